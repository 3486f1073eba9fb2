use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::corpus::{Corpus, HasWord};
use crate::lms::table::{CountTable, ScoreTable};
use crate::lms::LanguageModel;

const DISCOUNT: f64 = 0.5;

/// Interpolated Kneser-Ney, bigram, absolute discounting with d = 0.5:
///
///   P(w | prev) = max(c(prev, w) - d, 0) / c(prev) + lambda(prev) * Pcont(w)
///   lambda(prev) = d * |succ(prev)| / c(prev)
///   Pcont(w) = |pred(w)| / |bigram types|
///
/// where pred(w) is the set of distinct predecessors of w, succ(prev) the
/// set of distinct successors of prev, and the normalizer is the single
/// global count of distinct observed bigram types. Summed over the
/// vocabulary, Pcont is a proper distribution.
///
/// With `interpolation_compat` (the default), `score` adds the raw
/// interpolated probabilities for observed pairs even though the
/// unseen-pair fallback contributes log terms, mixing scales. This is a
/// long-standing quirk of the model family, kept as the default for score
/// compatibility rather than silently corrected; pass
/// `interpolation_compat = false` to take the log of every interpolated
/// term instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KneserNeyModel {
    discount: f64,
    ntokens: u64,
    token_counts: CountTable<String>,
    pair_counts: CountTable<(String, String)>,
    pair_probs: ScoreTable<(String, String)>,
    lambdas: ScoreTable<String>,
    continuations: ScoreTable<String>,
    interpolation_compat: bool,
}

impl KneserNeyModel {
    pub fn new<D: HasWord>(corpus: &Corpus<D>) -> Self {
        Self::with_compat(corpus, true)
    }

    pub fn with_compat<D: HasWord>(corpus: &Corpus<D>, interpolation_compat: bool) -> Self {
        let mut model = Self {
            discount: DISCOUNT,
            ntokens: 0,
            token_counts: CountTable::new(),
            pair_counts: CountTable::new(),
            pair_probs: ScoreTable::new(),
            lambdas: ScoreTable::new(),
            continuations: ScoreTable::new(),
            interpolation_compat,
        };
        model.train(corpus);
        model
    }

    fn train<D: HasWord>(&mut self, corpus: &Corpus<D>) {
        let mut pred_sets: HashMap<String, HashSet<String>> = HashMap::new();
        let mut succ_sets: HashMap<String, HashSet<String>> = HashMap::new();
        let mut bigram_types: HashSet<(String, String)> = HashSet::new();

        for sentence in corpus.sentences() {
            let mut last: Option<&str> = None;
            for datum in sentence.data() {
                let token = datum.word();
                self.ntokens += 1;
                self.token_counts.increment(token.to_string());
                if let Some(prev) = last {
                    self.pair_counts
                        .increment((prev.to_string(), token.to_string()));
                    pred_sets
                        .entry(token.to_string())
                        .or_default()
                        .insert(prev.to_string());
                    succ_sets
                        .entry(prev.to_string())
                        .or_default()
                        .insert(token.to_string());
                    bigram_types.insert((prev.to_string(), token.to_string()));
                }
                last = Some(token);
            }
        }

        let n_bigram_types = bigram_types.len();

        for sentence in corpus.sentences() {
            let mut last: Option<&str> = None;
            for datum in sentence.data() {
                let token = datum.word();
                if !self.continuations.contains(token) {
                    let n_preds = pred_sets.get(token).map_or(0, |s| s.len());
                    // A corpus with no bigrams at all has nothing to
                    // normalize over.
                    let p_cont = if n_bigram_types == 0 {
                        0.0
                    } else {
                        n_preds as f64 / n_bigram_types as f64
                    };
                    self.continuations.insert(token.to_string(), p_cont);
                }
                if let Some(prev) = last {
                    let n_succs = succ_sets.get(prev).map_or(0, |s| s.len());
                    let lambda =
                        self.discount * n_succs as f64 / self.token_counts.get(prev) as f64;
                    self.lambdas.insert(prev.to_string(), lambda);

                    let pair = (prev.to_string(), token.to_string());
                    let discounted =
                        (self.pair_counts.get(&pair) as f64 - self.discount).max(0.0);
                    let prob = discounted / self.token_counts.get(prev) as f64
                        + lambda * self.continuations.get_or(token, 0.0);
                    self.pair_probs.insert(pair, prob);
                }
                last = Some(token);
            }
        }
    }

    #[cfg(test)]
    fn continuation_sum(&self) -> f64 {
        self.continuations.iter().map(|(_, p)| p).sum()
    }
}

impl LanguageModel for KneserNeyModel {
    fn name(&self) -> &str {
        "kneser-ney"
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
                if self.pair_probs.contains(&pair) {
                    let prob = self.pair_probs.get_or(&pair, 0.0);
                    score += if self.interpolation_compat {
                        prob
                    } else {
                        prob.ln()
                    };
                } else {
                    let lambda = self.lambdas.get_or(prev.as_str(), 0.0);
                    let p_cont = self.continuations.get_or(token.as_str(), 0.0);
                    if lambda != 0.0 && p_cont != 0.0 {
                        let term = lambda * p_cont;
                        score += if self.interpolation_compat {
                            term
                        } else {
                            term.ln()
                        };
                    } else {
                        // Context or token never seen in training.
                        score += (1.0 / self.ntokens as f64).ln();
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
    fn test_interpolated_probability_abab() {
        // [a, b, a, b]: c(a) = c(b) = 2, c(a,b) = 2, c(b,a) = 1,
        // 2 bigram types, Pcont(a) = Pcont(b) = 1/2,
        // lambda(a) = lambda(b) = 0.5 * 1 / 2 = 0.25.
        // P(b|a) = (2 - 0.5)/2 + 0.25 * 0.5 = 0.875.
        // P(a|b) = (1 - 0.5)/2 + 0.25 * 0.5 = 0.375.
        let corpus = Corpus::from_text("a b a b");
        let model = KneserNeyModel::new(&corpus);
        assert_eq!(model.score(&tokens(&["a", "b"])), 0.875);
        assert_eq!(model.score(&tokens(&["b", "a"])), 0.375);
    }

    #[test]
    fn test_unseen_pair_falls_back_to_interpolation_weight() {
        // (b, b) unseen: lambda(b) * Pcont(b) = 0.25 * 0.5 = 0.125.
        let corpus = Corpus::from_text("a b a b");
        let model = KneserNeyModel::new(&corpus);
        assert_eq!(model.score(&tokens(&["b", "b"])), 0.125);
    }

    #[test]
    fn test_unseen_token_last_resort() {
        // Pcont(z) = 0, so the last-resort term ln(1/N) applies.
        let corpus = Corpus::from_text("a b a b");
        let model = KneserNeyModel::new(&corpus);
        assert_eq!(model.score(&tokens(&["a", "z"])), 0.25f64.ln());
    }

    #[test]
    fn test_continuation_distribution_is_proper() {
        let corpus = Corpus::from_text("the cat sat\nthe dog sat\na cat ran");
        let model = KneserNeyModel::new(&corpus);
        assert!((model.continuation_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_strict_log_space_mode() {
        let corpus = Corpus::from_text("a b a b");
        let model = KneserNeyModel::with_compat(&corpus, false);
        assert_eq!(model.score(&tokens(&["a", "b"])), 0.875f64.ln());
        assert_eq!(model.score(&tokens(&["b", "b"])), 0.125f64.ln());
    }

    #[test]
    fn test_empty_and_single_sequences() {
        let corpus = Corpus::from_text("a b a b");
        let model = KneserNeyModel::new(&corpus);
        assert_eq!(model.score(&[]), 0.0);
        assert_eq!(model.score(&tokens(&["a"])), 0.0);
    }

    #[test]
    fn test_empty_corpus_is_degenerate_not_a_panic() {
        let model = KneserNeyModel::new(&Corpus::from_text(""));
        assert_eq!(model.score(&tokens(&["a", "b"])), f64::NEG_INFINITY);
    }

    #[test]
    fn test_single_token_sentences_have_no_bigram_types() {
        // One-token lines produce no pairs; construction must still work.
        let corpus = Corpus::from_text("a\nb\nc");
        let model = KneserNeyModel::new(&corpus);
        assert_eq!(model.score(&tokens(&["a", "b"])), (1.0f64 / 3.0).ln());
    }

    #[test]
    fn test_training_is_deterministic() {
        let text = "the cat sat\nthe dog sat";
        let first = KneserNeyModel::new(&Corpus::from_text(text));
        let second = KneserNeyModel::new(&Corpus::from_text(text));
        assert_eq!(first, second);
    }
}
