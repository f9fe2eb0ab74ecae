use crate::types::TokenSequence;

/// Text normalization applied to both sides of a comparison.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> TokenSequence;
}
