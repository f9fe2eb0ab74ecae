use crate::config::{ScoreWeights, ScoringConfig};
use crate::pipeline::traits::Tokenizer;
use crate::scoring::composite::score_with;
use crate::types::{ComparisonResult, TokenSequence};

/// Stateless scorer holding a tokenizer and validated composite weights.
///
/// Every call is independent; a single instance can be shared across threads.
pub struct LyricsScorer {
    config: ScoringConfig,
    tokenizer: Box<dyn Tokenizer>,
}

pub(crate) struct LyricsScorerParts {
    pub config: ScoringConfig,
    pub tokenizer: Box<dyn Tokenizer>,
}

impl LyricsScorer {
    pub(crate) fn from_parts(parts: LyricsScorerParts) -> Self {
        Self {
            config: parts.config,
            tokenizer: parts.tokenizer,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.config.weights
    }

    pub fn tokenize(&self, text: &str) -> TokenSequence {
        self.tokenizer.tokenize(text)
    }

    pub fn score(&self, reference: &str, hypothesis: &str) -> ComparisonResult {
        score_with(
            reference,
            hypothesis,
            |text| self.tokenizer.tokenize(text),
            &self.config.weights,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::builder::LyricsScorerBuilder;
    use crate::scoring::composite::score;

    use super::*;

    struct FirstWordTokenizer;

    impl Tokenizer for FirstWordTokenizer {
        fn tokenize(&self, text: &str) -> TokenSequence {
            TokenSequence::new(text.split_whitespace().take(1).map(str::to_string).collect())
        }
    }

    #[test]
    fn default_scorer_matches_free_function() {
        let scorer = LyricsScorerBuilder::new(ScoringConfig::default())
            .build()
            .expect("default config is valid");
        let pairs = [
            ("Hello world this is a test", "Hello world this is test"),
            ("", ""),
            ("abc", ""),
            ("", "abc"),
            ("la la la", "la la"),
        ];
        for (reference, hypothesis) in pairs {
            assert_eq!(scorer.score(reference, hypothesis), score(reference, hypothesis));
        }
    }

    #[test]
    fn custom_tokenizer_is_applied_to_both_sides() {
        let scorer = LyricsScorerBuilder::new(ScoringConfig::default())
            .with_tokenizer(Box::new(FirstWordTokenizer))
            .build()
            .expect("build");
        let result = scorer.score("same start here", "same other words");
        assert_eq!(result.word_count_ref, 1);
        assert_eq!(result.word_count_hyp, 1);
        assert_eq!(result.wer, 0.0);
        assert_eq!(scorer.tokenize("a b").len(), 1);
    }

    #[test]
    fn scorer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LyricsScorer>();
    }
}
