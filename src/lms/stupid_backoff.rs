use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, HasWord};
use crate::lms::table::{CountTable, ScoreTable};
use crate::lms::LanguageModel;

const BACKOFF_FACTOR: f64 = 0.4;

/// Stupid Backoff: the raw bigram ratio when a pair was observed,
/// geometric backoff to an add-one smoothed unigram otherwise.
///
///   S(w | prev) = c(prev, w) / c(prev)            if c(prev, w) > 0
///   S(w)        = (c(w) + 1) / (2 * N)            backoff target
///
/// With `backoff_compat` (the default), the backoff term is computed as
/// `ln(0.4 * u)` where `u` is *already* the log of the smoothed unigram.
/// Since log-probabilities are negative, that expression is the log of a
/// negative number and evaluates to NaN. This is a long-standing quirk of
/// the model family, kept as the default for score compatibility rather
/// than silently corrected; pass `backoff_compat = false` to get the
/// log-space scaling `ln(0.4) + u` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StupidBackoffModel {
    ntokens: u64,
    token_counts: CountTable<String>,
    pair_counts: CountTable<(String, String)>,
    pair_scores: ScoreTable<(String, String)>,
    /// Memoized backoff unigram log-scores, filled lazily in pass 2.
    unigram_scores: ScoreTable<String>,
    backoff_compat: bool,
}

impl StupidBackoffModel {
    pub fn new<D: HasWord>(corpus: &Corpus<D>) -> Self {
        Self::with_compat(corpus, true)
    }

    pub fn with_compat<D: HasWord>(corpus: &Corpus<D>, backoff_compat: bool) -> Self {
        let mut model = Self {
            ntokens: 0,
            token_counts: CountTable::new(),
            pair_counts: CountTable::new(),
            pair_scores: ScoreTable::new(),
            unigram_scores: ScoreTable::new(),
            backoff_compat,
        };
        model.train(corpus);
        model
    }

    fn smoothed_unigram(&self, token: &str) -> f64 {
        ((self.token_counts.get(token) as f64 + 1.0) / (2.0 * self.ntokens as f64)).ln()
    }

    fn train<D: HasWord>(&mut self, corpus: &Corpus<D>) {
        for sentence in corpus.sentences() {
            let mut last: Option<&str> = None;
            for datum in sentence.data() {
                let token = datum.word();
                self.ntokens += 1;
                self.token_counts.increment(token.to_string());
                if let Some(prev) = last {
                    self.pair_counts
                        .increment((prev.to_string(), token.to_string()));
                }
                last = Some(token);
            }
        }

        for sentence in corpus.sentences() {
            let mut last: Option<&str> = None;
            for datum in sentence.data() {
                let token = datum.word();
                if let Some(prev) = last {
                    let pair = (prev.to_string(), token.to_string());
                    let pair_count = self.pair_counts.get(&pair);
                    if pair_count > 0 {
                        let ratio =
                            pair_count as f64 / self.token_counts.get(prev) as f64;
                        self.pair_scores.insert(pair, ratio.ln());
                    } else {
                        // Every adjacent training pair has count >= 1, so
                        // this branch only fires if the two passes ever see
                        // different pairs. Kept for structural fidelity with
                        // the backoff applied at score time.
                        if self.unigram_scores.get_or(token, 0.0) == 0.0 {
                            let unigram = self.smoothed_unigram(token);
                            self.unigram_scores.insert(token.to_string(), unigram);
                        }
                        let unigram = self.unigram_scores.get_or(token, 0.0);
                        let backed_off = if self.backoff_compat {
                            (BACKOFF_FACTOR * unigram).ln()
                        } else {
                            BACKOFF_FACTOR.ln() + unigram
                        };
                        self.pair_scores.insert(pair, backed_off);
                    }
                }
                last = Some(token);
            }
        }
    }
}

impl LanguageModel for StupidBackoffModel {
    fn name(&self) -> &str {
        "stupid-backoff"
    }

    fn score(&self, sentence: &[String]) -> f64 {
        if self.ntokens == 0 {
            return f64::NEG_INFINITY;
        }
        let mut score = 0.0;
        let mut last: Option<&String> = None;
        for token in sentence {
            if let Some(prev) = last {
                let pair = (prev.clone(), token.clone());
                if self.pair_counts.contains(&pair) {
                    score += self.pair_scores.get_or(&pair, 0.0);
                } else {
                    let memoized = self.unigram_scores.get_or(token.as_str(), 0.0);
                    if memoized != 0.0 {
                        score += memoized;
                    } else {
                        score += self.smoothed_unigram(token);
                    }
                }
            }
            last = Some(token);
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_observed_pair_uses_raw_ratio() {
        // c(a,b) = 2, c(a) = 2 => ln(1) = 0.
        let corpus = Corpus::from_text("a b a b");
        let model = StupidBackoffModel::new(&corpus);
        assert_eq!(model.score(&tokens(&["a", "b"])), 0.0);
    }

    #[test]
    fn test_observed_pair_partial_ratio() {
        // c(b,a) = 1, c(b) = 2 => ln(0.5).
        let corpus = Corpus::from_text("a b a b");
        let model = StupidBackoffModel::new(&corpus);
        assert_eq!(model.score(&tokens(&["b", "a"])), 0.5f64.ln());
    }

    #[test]
    fn test_unseen_pair_backs_off_to_smoothed_unigram() {
        // (b, b) unseen; backoff = ln((c(b) + 1) / (2N)) = ln(3/8).
        let corpus = Corpus::from_text("a b a b");
        let model = StupidBackoffModel::new(&corpus);
        assert_eq!(model.score(&tokens(&["b", "b"])), (3.0f64 / 8.0).ln());
    }

    #[test]
    fn test_unseen_token_backs_off_too() {
        // c(z) = 0 => ln(1 / (2N)) = ln(1/8).
        let corpus = Corpus::from_text("a b a b");
        let model = StupidBackoffModel::new(&corpus);
        assert_eq!(model.score(&tokens(&["a", "z"])), (1.0f64 / 8.0).ln());
    }

    #[test]
    fn test_compat_flag_changes_nothing_at_score_time_backoff() {
        // The score-time backoff path never multiplies inside a log, so
        // both modes agree there.
        let corpus = Corpus::from_text("a b a b");
        let compat = StupidBackoffModel::new(&corpus);
        let strict = StupidBackoffModel::with_compat(&corpus, false);
        assert_eq!(
            compat.score(&tokens(&["b", "b"])),
            strict.score(&tokens(&["b", "b"]))
        );
    }

    #[test]
    fn test_empty_and_single_sequences() {
        let corpus = Corpus::from_text("a b a b");
        let model = StupidBackoffModel::new(&corpus);
        assert_eq!(model.score(&[]), 0.0);
        assert_eq!(model.score(&tokens(&["a"])), 0.0);
    }

    #[test]
    fn test_empty_corpus_is_degenerate_not_a_panic() {
        let model = StupidBackoffModel::new(&Corpus::from_text(""));
        assert_eq!(model.score(&tokens(&["a", "b"])), f64::NEG_INFINITY);
    }

    #[test]
    fn test_training_is_deterministic() {
        let text = "the cat sat\nthe dog sat";
        let first = StupidBackoffModel::new(&Corpus::from_text(text));
        let second = StupidBackoffModel::new(&Corpus::from_text(text));
        assert_eq!(first, second);
    }
}
