use crate::tokenize::Tokenize;

/// Splits on ASCII/Unicode whitespace. Tokens are kept verbatim; no
/// lowercasing or punctuation stripping happens here.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(|x| x.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::tokenize::{Tokenize, WhitespaceTokenizer};

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("hello world"), vec!["hello", "world"]);
        assert_eq!(tokenizer.tokenize("  spaced\tout\n"), vec!["spaced", "out"]);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenizer = WhitespaceTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   ").is_empty());
    }

    #[test]
    fn test_tokens_kept_verbatim() {
        let tokenizer = WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("He said, Hi!"), vec!["He", "said,", "Hi!"]);
    }
}
