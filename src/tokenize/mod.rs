pub mod whitespace;

pub use self::whitespace::WhitespaceTokenizer;

pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<String>;
}
