use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, HasWord};
use crate::lms::table::{CountTable, ScoreTable};
use crate::lms::LanguageModel;

/// Add-one smoothed unigram model:
///
///   P(w) = (c(w) + 1) / (2 * N)
///
/// where N is the total token count. The 2N denominator (rather than
/// N + V) is the historical behavior of this model family and is kept
/// for score compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaplaceUnigramModel {
    ntokens: u64,
    counts: CountTable<String>,
    probs: ScoreTable<String>,
}

impl LaplaceUnigramModel {
    /// Trains on the corpus; the returned model is an immutable scorer.
    pub fn new<D: HasWord>(corpus: &Corpus<D>) -> Self {
        let mut model = Self {
            ntokens: 0,
            counts: CountTable::new(),
            probs: ScoreTable::new(),
        };
        model.train(corpus);
        model
    }

    fn train<D: HasWord>(&mut self, corpus: &Corpus<D>) {
        for sentence in corpus.sentences() {
            for datum in sentence.data() {
                self.counts.increment(datum.word().to_string());
                self.ntokens += 1;
            }
        }

        for sentence in corpus.sentences() {
            for datum in sentence.data() {
                let token = datum.word();
                let prob =
                    (self.counts.get(token) as f64 + 1.0) / (2.0 * self.ntokens as f64);
                self.probs.insert(token.to_string(), prob);
            }
        }
    }
}

impl LanguageModel for LaplaceUnigramModel {
    fn name(&self) -> &str {
        "laplace-unigram"
    }

    fn score(&self, sentence: &[String]) -> f64 {
        if self.ntokens == 0 {
            return f64::NEG_INFINITY;
        }
        let unseen = 1.0 / (2.0 * self.ntokens as f64);
        let mut score = 0.0;
        for token in sentence {
            if self.counts.contains(token.as_str()) {
                score += self.probs.get_or(token.as_str(), unseen).ln();
            } else {
                score += unseen.ln();
            }
        }
        score
    }
}
