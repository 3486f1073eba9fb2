use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, HasWord};
use crate::lms::table::{CountTable, ScoreTable};
use crate::lms::LanguageModel;

/// Add-one smoothed bigram model:
///
///   P(w | prev) = (c(prev, w) + 1) / (c(prev) + V)
///
/// Pairs never cross sentence boundaries; the context resets at each
/// sentence start, and the first token of a scored sequence contributes
/// no term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaplaceBigramModel {
    vocab: u64,
    token_counts: CountTable<String>,
    pair_counts: CountTable<(String, String)>,
    probs: ScoreTable<(String, String)>,
}

impl LaplaceBigramModel {
    pub fn new<D: HasWord>(corpus: &Corpus<D>) -> Self {
        let mut model = Self {
            vocab: 0,
            token_counts: CountTable::new(),
            pair_counts: CountTable::new(),
            probs: ScoreTable::new(),
        };
        model.train(corpus);
        model
    }

    fn train<D: HasWord>(&mut self, corpus: &Corpus<D>) {
        for sentence in corpus.sentences() {
            let mut last: Option<&str> = None;
            for datum in sentence.data() {
                let token = datum.word();
                if !self.token_counts.contains(token) {
                    self.vocab += 1;
                }
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
                    let prob = (self.pair_counts.get(&pair) as f64 + 1.0)
                        / (self.token_counts.get(prev) as f64 + self.vocab as f64);
                    self.probs.insert(pair, prob);
                }
                last = Some(token);
            }
        }
    }
}

impl LanguageModel for LaplaceBigramModel {
    fn name(&self) -> &str {
        "laplace-bigram"
    }

    fn score(&self, sentence: &[String]) -> f64 {
        if self.vocab == 0 {
            return f64::NEG_INFINITY;
        }
        let mut score = 0.0;
        let mut last: Option<&String> = None;
        for token in sentence {
            if let Some(prev) = last {
                let pair = (prev.clone(), token.clone());
                if self.pair_counts.contains(&pair) {
                    score += self.probs.get_or(&pair, 0.0).ln();
                } else {
                    // c(prev) may be 0 for an unseen context; V alone
                    // then backs the denominator.
                    score += (1.0
                        / (self.token_counts.get(prev.as_str()) as f64 + self.vocab as f64))
                        .ln();
                }
            }
            last = Some(token);
        }
        score
    }
}
