use std::path::Path;

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::defaults::PunctuationStrippingTokenizer;
use crate::pipeline::runtime::{LyricsScorer, LyricsScorerParts};
use crate::pipeline::traits::Tokenizer;

pub struct LyricsScorerBuilder {
    config: ScoringConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
}

impl LyricsScorerBuilder {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            tokenizer: None,
        }
    }

    /// Start from a JSON config file instead of an in-memory config.
    pub fn from_config_file(path: &Path) -> Result<Self, ScoringError> {
        Ok(Self::new(ScoringConfig::load(path)?))
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn build(self) -> Result<LyricsScorer, ScoringError> {
        self.config.validate()?;
        if self.tokenizer.is_none() {
            tracing::debug!("no tokenizer supplied, using punctuation-stripping default");
        }

        Ok(LyricsScorer::from_parts(LyricsScorerParts {
            config: self.config,
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Box::new(PunctuationStrippingTokenizer)),
        }))
    }
}
