pub mod txt_reader;

pub use self::txt_reader::TxtReader;

use crate::tokenize::{Tokenize, WhitespaceTokenizer};

/// Narrow view the models consume: a datum is anything that can hand out
/// its token. Models never see the concrete datum representation.
pub trait HasWord {
    fn word(&self) -> &str;
}

/// One token of a training sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datum {
    word: String,
}

impl Datum {
    pub fn new(word: impl Into<String>) -> Self {
        Datum { word: word.into() }
    }
}

impl HasWord for Datum {
    fn word(&self) -> &str {
        &self.word
    }
}

/// An ordered run of datums. Bigram contexts never cross sentence
/// boundaries, so sentence segmentation matters to every bigram model.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence<D = Datum> {
    data: Vec<D>,
}

impl<D> Sentence<D> {
    pub fn new(data: Vec<D>) -> Self {
        Sentence { data }
    }

    pub fn data(&self) -> &[D] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An ordered collection of sentences, read-only once built. Models make
/// two full forward scans over it during training and never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus<D = Datum> {
    sentences: Vec<Sentence<D>>,
}

impl<D> Corpus<D> {
    pub fn new(sentences: Vec<Sentence<D>>) -> Self {
        Corpus { sentences }
    }

    pub fn sentences(&self) -> &[Sentence<D>] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl Corpus<Datum> {
    /// Builds a corpus from raw text, one sentence per non-empty line.
    pub fn from_text(text: &str) -> Self {
        let tokenizer = WhitespaceTokenizer::new();
        let sentences = text
            .lines()
            .map(|line| tokenizer.tokenize(line))
            .filter(|tokens| !tokens.is_empty())
            .map(|tokens| Sentence::new(tokens.into_iter().map(Datum::new).collect()))
            .collect();
        Corpus { sentences }
    }

    /// Reads a plain-text corpus file, one sentence per non-empty line.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let reader = TxtReader::open(path)?;
        Ok(Corpus {
            sentences: reader.map(|(_, sentence)| sentence).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_sentences_per_line() {
        let corpus = Corpus::from_text("the cat sat\nthe dog ran\n");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.sentences()[0].len(), 3);
        assert_eq!(corpus.sentences()[1].data()[1].word(), "dog");
    }

    #[test]
    fn test_from_text_skips_blank_lines() {
        let corpus = Corpus::from_text("a b\n\n   \nc d");
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_empty_text() {
        let corpus = Corpus::from_text("");
        assert!(corpus.is_empty());
    }
}
