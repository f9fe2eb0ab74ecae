use serde::Serialize;

use crate::config::ScoreWeights;
use crate::scoring::edit_distance::word_error_rate;
use crate::scoring::narration::narrate;
use crate::scoring::overlap::{bag_of_words_f1, bigram_f1};
use crate::scoring::similarity::jaccard_similarity;
use crate::scoring::tokenization::tokenize;
use crate::types::{ComparisonResult, Grade, TokenSequence};

pub const BOTH_EMPTY_ANALYSIS: &str = "Both inputs are empty";
pub const NO_HYPOTHESIS_ANALYSIS: &str = "No transcribed lyrics provided";
pub const NO_REFERENCE_ANALYSIS: &str = "No reference lyrics provided";

/// The four raw metrics of one comparison, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSet {
    pub wer: f64,
    pub bow_f1: f64,
    pub bigram_f1: f64,
    pub semantic_similarity: f64,
}

impl MetricSet {
    const PERFECT: Self = Self {
        wer: 0.0,
        bow_f1: 100.0,
        bigram_f1: 100.0,
        semantic_similarity: 100.0,
    };

    const WORST: Self = Self {
        wer: 100.0,
        bow_f1: 0.0,
        bigram_f1: 0.0,
        semantic_similarity: 0.0,
    };

    /// WER turned into an accuracy where higher is better.
    pub fn wer_accuracy(&self) -> f64 {
        (100.0 - self.wer).max(0.0)
    }
}

pub fn compute_metrics(reference: &TokenSequence, hypothesis: &TokenSequence) -> MetricSet {
    MetricSet {
        wer: clamp_percent(word_error_rate(reference, hypothesis)),
        bow_f1: clamp_percent(bag_of_words_f1(reference, hypothesis)),
        bigram_f1: clamp_percent(bigram_f1(reference, hypothesis)),
        semantic_similarity: clamp_percent(jaccard_similarity(reference, hypothesis)),
    }
}

/// Convex combination of the metrics under `weights`.
pub fn weighted_score(metrics: &MetricSet, weights: &ScoreWeights) -> f64 {
    let overall = metrics.wer_accuracy() * weights.wer_accuracy
        + metrics.bow_f1 * weights.bag_of_words
        + metrics.bigram_f1 * weights.bigram
        + metrics.semantic_similarity * weights.semantic;
    clamp_percent(overall)
}

/// Score a transcription against reference lyrics with the default
/// tokenizer and weights.
pub fn score(reference: &str, hypothesis: &str) -> ComparisonResult {
    score_with(reference, hypothesis, tokenize, &ScoreWeights::DEFAULT)
}

/// Score with a caller-supplied tokenizer, applied identically to both sides.
///
/// Empty raw inputs short-circuit before tokenization: both empty is a
/// vacuous perfect match, one empty side is the worst case.
pub fn score_with<F>(
    reference: &str,
    hypothesis: &str,
    tokenize: F,
    weights: &ScoreWeights,
) -> ComparisonResult
where
    F: Fn(&str) -> TokenSequence,
{
    match (reference.is_empty(), hypothesis.is_empty()) {
        (true, true) => {
            tracing::debug!("both inputs empty, returning vacuous match");
            return fixed_result(MetricSet::PERFECT, 100.0, BOTH_EMPTY_ANALYSIS, 0, 0);
        }
        (false, true) => {
            tracing::debug!("hypothesis empty, returning worst-case result");
            let word_count_ref = tokenize(reference).len();
            return fixed_result(MetricSet::WORST, 0.0, NO_HYPOTHESIS_ANALYSIS, word_count_ref, 0);
        }
        (true, false) => {
            tracing::debug!("reference empty, returning worst-case result");
            let word_count_hyp = tokenize(hypothesis).len();
            return fixed_result(MetricSet::WORST, 0.0, NO_REFERENCE_ANALYSIS, 0, word_count_hyp);
        }
        (false, false) => {}
    }

    let ref_tokens = tokenize(reference);
    let hyp_tokens = tokenize(hypothesis);
    let metrics = compute_metrics(&ref_tokens, &hyp_tokens);
    let overall_score = weighted_score(&metrics, weights);

    ComparisonResult {
        wer: metrics.wer,
        bow_f1: metrics.bow_f1,
        bigram_f1: metrics.bigram_f1,
        semantic_similarity: metrics.semantic_similarity,
        overall_score,
        detailed_analysis: narrate(metrics.wer, metrics.bow_f1, metrics.bigram_f1),
        word_count_ref: ref_tokens.len(),
        word_count_hyp: hyp_tokens.len(),
    }
}

pub fn grade(overall_score: f64) -> Grade {
    Grade::from_score(overall_score)
}

fn fixed_result(
    metrics: MetricSet,
    overall_score: f64,
    analysis: &str,
    word_count_ref: usize,
    word_count_hyp: usize,
) -> ComparisonResult {
    ComparisonResult {
        wer: metrics.wer,
        bow_f1: metrics.bow_f1,
        bigram_f1: metrics.bigram_f1,
        semantic_similarity: metrics.semantic_similarity,
        overall_score,
        detailed_analysis: analysis.to_string(),
        word_count_ref,
        word_count_hyp,
    }
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
