use crate::pipeline::traits::Tokenizer;
use crate::scoring::tokenization::tokenize;
use crate::types::TokenSequence;

/// Lower-cases, strips ASCII punctuation and splits on whitespace.
pub struct PunctuationStrippingTokenizer;

impl Tokenizer for PunctuationStrippingTokenizer {
    fn tokenize(&self, text: &str) -> TokenSequence {
        tokenize(text)
    }
}
