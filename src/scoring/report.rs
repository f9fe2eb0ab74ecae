use std::cmp::Ordering;

use serde::Serialize;

use crate::config::ScoreWeights;
use crate::error::ScoringError;
use crate::pipeline::runtime::LyricsScorer;
use crate::types::{ComparisonResult, Grade, PerformanceTier};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub weights: ScoreWeights,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub id: String,
    /// True when either raw input was empty and the result is a fixed sentinel.
    pub degenerate: bool,
    pub result: ComparisonResult,
    pub grade: Grade,
    pub tier: PerformanceTier,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub metrics: AggregateMetrics,
    pub grades: Vec<GradeCount>,
    pub outliers: Vec<OutlierEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub scored: u32,
    pub degenerate: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AggregateMetrics {
    pub wer: Option<MetricDistribution>,
    pub bow_f1: Option<MetricDistribution>,
    pub bigram_f1: Option<MetricDistribution>,
    pub semantic_similarity: Option<MetricDistribution>,
    pub overall_score: Option<MetricDistribution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricDistribution {
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierEntry {
    pub id: String,
    pub grade: Grade,
    pub value: f64,
}

pub fn compute_case_report(
    id: &str,
    reference: &str,
    hypothesis: &str,
    scorer: &LyricsScorer,
) -> Result<CaseReport, ScoringError> {
    let mut notes = Vec::new();
    if reference.is_empty() {
        notes.push("reference_empty".to_string());
    }
    if hypothesis.is_empty() {
        notes.push("hypothesis_empty".to_string());
    }
    let degenerate = reference.is_empty() || hypothesis.is_empty();

    let result = scorer.score(reference, hypothesis);
    checked_percent(result.wer, "wer")?;
    checked_percent(result.bow_f1, "bow_f1")?;
    checked_percent(result.bigram_f1, "bigram_f1")?;
    checked_percent(result.semantic_similarity, "semantic_similarity")?;
    checked_percent(result.overall_score, "overall_score")?;

    if !degenerate && result.word_count_ref != result.word_count_hyp {
        notes.push(format!(
            "word_count_mismatch:ref={} hyp={}",
            result.word_count_ref, result.word_count_hyp
        ));
    }

    Ok(CaseReport {
        id: id.to_string(),
        degenerate,
        grade: result.grade(),
        tier: result.tier(),
        result,
        notes,
    })
}

/// Summarize a batch of case reports.
///
/// Metric distributions and outliers only consider non-degenerate cases; the
/// grade histogram covers every case.
pub fn aggregate_reports(cases: &[CaseReport], top_n: usize) -> AggregateReport {
    let scored: Vec<&CaseReport> = cases.iter().filter(|case| !case.degenerate).collect();

    AggregateReport {
        counts: AggregateCounts {
            total: to_u32(cases.len()),
            scored: to_u32(scored.len()),
            degenerate: to_u32(cases.len().saturating_sub(scored.len())),
        },
        metrics: aggregate_metrics(&scored),
        grades: grade_histogram(cases),
        outliers: ranked_outliers(&scored, top_n),
    }
}

fn aggregate_metrics(cases: &[&CaseReport]) -> AggregateMetrics {
    AggregateMetrics {
        wer: distribution_or_none(&metric_values(cases, |r| r.wer), "wer"),
        bow_f1: distribution_or_none(&metric_values(cases, |r| r.bow_f1), "bow_f1"),
        bigram_f1: distribution_or_none(&metric_values(cases, |r| r.bigram_f1), "bigram_f1"),
        semantic_similarity: distribution_or_none(
            &metric_values(cases, |r| r.semantic_similarity),
            "semantic_similarity",
        ),
        overall_score: distribution_or_none(
            &metric_values(cases, |r| r.overall_score),
            "overall_score",
        ),
    }
}

fn metric_values(cases: &[&CaseReport], metric: impl Fn(&ComparisonResult) -> f64) -> Vec<f64> {
    cases.iter().map(|case| metric(&case.result)).collect()
}

fn grade_histogram(cases: &[CaseReport]) -> Vec<GradeCount> {
    Grade::ALL
        .iter()
        .map(|&grade| GradeCount {
            grade,
            count: to_u32(cases.iter().filter(|case| case.grade == grade).count()),
        })
        .collect()
}

/// Lowest overall scores first, ties broken by id.
fn ranked_outliers(cases: &[&CaseReport], top_n: usize) -> Vec<OutlierEntry> {
    let mut entries: Vec<OutlierEntry> = cases
        .iter()
        .map(|case| OutlierEntry {
            id: case.id.clone(),
            grade: case.grade,
            value: case.result.overall_score,
        })
        .collect();

    entries.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    entries.truncate(top_n);
    entries
}

fn distribution_or_none(values: &[f64], metric_name: &str) -> Option<MetricDistribution> {
    if values.is_empty() {
        return None;
    }
    if values.iter().any(|value| !value.is_finite()) {
        tracing::warn!(metric = metric_name, "dropping distribution with non-finite values");
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Some(MetricDistribution {
        mean: mean(&sorted),
        p50: percentile_sorted(&sorted, 0.5),
        p90: percentile_sorted(&sorted, 0.9),
        p95: percentile_sorted(&sorted, 0.95),
        p99: percentile_sorted(&sorted, 0.99),
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Linear interpolation between closest ranks.
fn percentile_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    if sorted_values.len() == 1 {
        return sorted_values[0];
    }

    let clamped = percentile.clamp(0.0, 1.0);
    let max_index = (sorted_values.len() - 1) as f64;
    let rank = clamped * max_index;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = rank - lower as f64;
        sorted_values[lower] * (1.0 - weight) + sorted_values[upper] * weight
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn checked_percent(value: f64, metric_name: &str) -> Result<f64, ScoringError> {
    if !value.is_finite() {
        return Err(ScoringError::invalid_input(format!(
            "metric '{metric_name}' produced non-finite value: {value}"
        )));
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ScoringError::invalid_input(format!(
            "metric '{metric_name}' out of [0, 100] range: {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::pipeline::builder::LyricsScorerBuilder;

    fn scorer() -> LyricsScorer {
        LyricsScorerBuilder::new(ScoringConfig::default())
            .build()
            .expect("default scorer")
    }

    fn case(id: &str, reference: &str, hypothesis: &str) -> CaseReport {
        compute_case_report(id, reference, hypothesis, &scorer()).expect("case report")
    }

    #[test]
    fn case_report_carries_grade_tier_and_notes() {
        let report = case("c1", "Hello world this is a test", "Hello world this is test");
        assert!(!report.degenerate);
        assert_eq!(report.grade, Grade::AMinus);
        assert_eq!(report.tier, PerformanceTier::Excellent);
        assert_eq!(report.notes, ["word_count_mismatch:ref=6 hyp=5"]);
    }

    #[test]
    fn degenerate_cases_are_flagged() {
        let both = case("both", "", "");
        assert!(both.degenerate);
        assert_eq!(both.notes, ["reference_empty", "hypothesis_empty"]);
        assert_eq!(both.grade, Grade::APlus);

        let no_hyp = case("no_hyp", "some lyrics", "");
        assert!(no_hyp.degenerate);
        assert_eq!(no_hyp.notes, ["hypothesis_empty"]);
        assert_eq!(no_hyp.tier, PerformanceTier::NeedsPractice);
    }

    #[test]
    fn aggregate_counts_and_histogram() {
        let cases = vec![
            case("a", "one two three", "one two three"),
            case("b", "one two three", "one two"),
            case("c", "one two three", ""),
        ];
        let aggregate = aggregate_reports(&cases, 10);
        assert_eq!(aggregate.counts.total, 3);
        assert_eq!(aggregate.counts.scored, 2);
        assert_eq!(aggregate.counts.degenerate, 1);
        assert_eq!(aggregate.grades.len(), 12);
        let total: u32 = aggregate.grades.iter().map(|g| g.count).sum();
        assert_eq!(total, 3);
        let f_count = aggregate
            .grades
            .iter()
            .find(|g| g.grade == Grade::F)
            .map(|g| g.count);
        assert_eq!(f_count, Some(1));
    }

    #[test]
    fn aggregate_metrics_skip_degenerate_cases() {
        let cases = vec![case("a", "x y", "x y"), case("b", "x y", "")];
        let aggregate = aggregate_reports(&cases, 10);
        let overall = aggregate.metrics.overall_score.expect("distribution");
        assert!((overall.mean - 100.0).abs() < 1e-9);
        assert!((overall.p99 - 100.0).abs() < 1e-9);
        assert_eq!(aggregate.outliers.len(), 1);
    }

    #[test]
    fn aggregate_of_no_scored_cases_has_no_distributions() {
        let aggregate = aggregate_reports(&[case("only", "", "x")], 5);
        assert!(aggregate.metrics.wer.is_none());
        assert!(aggregate.outliers.is_empty());
    }

    #[test]
    fn outliers_are_lowest_scores_with_id_tiebreak() {
        let cases = vec![
            case("perfect", "a b c", "a b c"),
            case("z_bad", "a b c", "x y z"),
            case("a_bad", "a b c", "x y z"),
            case("half", "a b c d", "a b"),
        ];
        let aggregate = aggregate_reports(&cases, 2);
        let ids: Vec<&str> = aggregate.outliers.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["a_bad", "z_bad"]);
        assert_eq!(aggregate.outliers[0].grade, Grade::F);
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        let sorted = [0.0, 10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_sorted(&sorted, 0.5), 20.0);
        assert!((percentile_sorted(&sorted, 0.9) - 36.0).abs() < 1e-9);
        assert_eq!(percentile_sorted(&[7.0], 0.99), 7.0);
        assert_eq!(percentile_sorted(&[], 0.5), 0.0);
    }

    #[test]
    fn checked_percent_rejects_out_of_range() {
        assert!(checked_percent(50.0, "x").is_ok());
        assert!(matches!(
            checked_percent(f64::NAN, "x"),
            Err(ScoringError::InvalidInput { .. })
        ));
        assert!(checked_percent(100.5, "x").is_err());
    }

    #[test]
    fn report_serializes_grades_as_labels() {
        let cases = vec![case("a", "x y", "z")];
        let aggregates = aggregate_reports(&cases, 5);
        let report = Report {
            schema_version: 1,
            meta: Meta {
                generated_at: "2026-01-01T00:00:00Z".to_string(),
                weights: ScoreWeights::DEFAULT,
                case_count: cases.len(),
            },
            cases,
            aggregates,
        };
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["aggregates"]["grades"][0]["grade"], "A+");
        assert_eq!(value["cases"][0]["tier"], "needs_practice");
        assert!(value["cases"][0]["result"]["overall_score"].is_number());
    }
}
