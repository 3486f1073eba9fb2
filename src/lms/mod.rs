pub mod kneser_ney;
pub mod laplace_bigram;
pub mod laplace_unigram;
pub mod stupid_backoff;
pub mod table;

pub use self::kneser_ney::KneserNeyModel;
pub use self::laplace_bigram::LaplaceBigramModel;
pub use self::laplace_unigram::LaplaceUnigramModel;
pub use self::stupid_backoff::StupidBackoffModel;
pub use self::table::{CountTable, ScoreTable};

/// A trained sentence scorer. Higher scores mean the model considers the
/// sequence more probable. Scores are only comparable between candidates
/// scored by the same model instance; depending on the variant they are
/// not guaranteed to be proper log-probabilities.
///
/// The four implementations are siblings: each trains once, inside its
/// constructor, with its own two-pass scan over the corpus. There is no
/// shared training logic because each variant derives different
/// quantities from its counts.
pub trait LanguageModel {
    fn name(&self) -> &str;

    fn score(&self, sentence: &[String]) -> f64;
}
