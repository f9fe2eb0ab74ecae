use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Relative weight of each metric in the composite score.
///
/// The composite is a convex combination, so the four weights must be
/// non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub wer_accuracy: f64,
    pub bag_of_words: f64,
    pub bigram: f64,
    pub semantic: f64,
}

impl ScoreWeights {
    pub const DEFAULT: Self = Self {
        wer_accuracy: 0.4,
        bag_of_words: 0.3,
        bigram: 0.2,
        semantic: 0.1,
    };

    const SUM_TOLERANCE: f64 = 1e-9;

    pub fn sum(&self) -> f64 {
        self.wer_accuracy + self.bag_of_words + self.bigram + self.semantic
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        let named = [
            ("wer_accuracy", self.wer_accuracy),
            ("bag_of_words", self.bag_of_words),
            ("bigram", self.bigram),
            ("semantic", self.semantic),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::invalid_config(format!(
                    "weight '{name}' must be a finite non-negative number, got {value}"
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(ScoringError::invalid_config(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Number of lowest-scoring cases listed in a batch report.
    pub outlier_top_n: usize,
}

impl ScoringConfig {
    pub const DEFAULT_OUTLIER_TOP_N: usize = 20;

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read scoring config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| ScoringError::json("parse scoring config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        self.weights.validate()
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::DEFAULT,
            outlier_top_n: Self::DEFAULT_OUTLIER_TOP_N,
        }
    }
}
