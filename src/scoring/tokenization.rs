use crate::types::{Token, TokenSequence};

/// Normalize raw lyric text into comparable word tokens.
///
/// Lower-cases, drops ASCII punctuation and splits on whitespace runs.
/// Non-ASCII symbols are kept as part of the word they appear in.
pub fn tokenize(text: &str) -> TokenSequence {
    if text.is_empty() {
        return TokenSequence::default();
    }

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    let tokens: Vec<Token> = cleaned.split_whitespace().map(str::to_string).collect();
    TokenSequence::new(tokens)
}
