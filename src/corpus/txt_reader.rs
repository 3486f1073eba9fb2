use anyhow::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};

use crate::corpus::{Datum, Sentence};
use crate::tokenize::{Tokenize, WhitespaceTokenizer};

/// Buffered reader over a plain-text corpus file: one sentence per
/// non-empty line, whitespace tokens.
pub struct TxtReader {
    lines: Lines<BufReader<File>>,
    tokenizer: WhitespaceTokenizer,
    counter: usize,
}

impl TxtReader {
    pub fn open(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            tokenizer: WhitespaceTokenizer::new(),
            counter: 0,
        })
    }
}

impl Iterator for TxtReader {
    type Item = (usize, Sentence);

    fn next(&mut self) -> Option<(usize, Sentence)> {
        loop {
            // A read error mid-file ends iteration.
            let line = self.lines.next()?.ok()?;
            let tokens = self.tokenizer.tokenize(&line);
            if tokens.is_empty() {
                continue;
            }
            let counter = self.counter;
            self.counter += 1;
            let data = tokens.into_iter().map(Datum::new).collect();
            return Some((counter, Sentence::new(data)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::HasWord;
    use std::io::Write;

    #[test]
    fn test_reads_one_sentence_per_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "the cat sat").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "on the mat").unwrap();

        let reader = TxtReader::open(file.path().to_str().unwrap()).unwrap();
        let sentences: Vec<_> = reader.collect();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].0, 0);
        assert_eq!(sentences[1].0, 1);
        assert_eq!(sentences[1].1.data()[0].word(), "on");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(TxtReader::open("/no/such/corpus.txt").is_err());
    }
}
