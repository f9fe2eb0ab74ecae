pub mod config;
pub mod error;
pub mod pipeline;
pub mod scoring;
pub mod types;

pub use config::{ScoreWeights, ScoringConfig};
pub use error::ScoringError;
pub use pipeline::builder::LyricsScorerBuilder;
pub use pipeline::runtime::LyricsScorer;
pub use pipeline::traits::Tokenizer;
pub use scoring::composite::{grade, score, score_with, MetricSet};
pub use scoring::edit_distance::{edit_distance, word_error_rate};
pub use scoring::narration::narrate;
pub use scoring::overlap::{bag_of_words_f1, bigram_f1, overlap_f1, NgramOrder, OverlapCounts};
pub use scoring::report::{
    aggregate_reports, compute_case_report, AggregateReport, CaseReport, Meta, Report,
};
pub use scoring::similarity::jaccard_similarity;
pub use scoring::tokenization::tokenize;
pub use types::{ComparisonResult, Grade, PerformanceTier, Token, TokenSequence};
