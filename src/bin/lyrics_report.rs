use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lyrics_score_rs::{
    aggregate_reports, compute_case_report, CaseReport, ComparisonResult, LyricsScorer,
    LyricsScorerBuilder, Meta, Report, ScoringConfig,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[path = "lyrics_report/json_report_formatter.rs"]
mod json_report_formatter;

const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Parser)]
#[command(name = "lyrics_report")]
#[command(about = "Score transcribed lyrics against reference lyrics")]
struct Args {
    /// Reference lyrics for a single comparison.
    #[arg(long, env = "LYRICS_REPORT_REFERENCE")]
    reference: Option<String>,
    /// Transcribed lyrics for a single comparison.
    #[arg(long, env = "LYRICS_REPORT_HYPOTHESIS")]
    hypothesis: Option<String>,
    /// JSON array or JSON Lines file of `{id, reference, transcript}` cases.
    #[arg(long, env = "LYRICS_REPORT_CASES_FILE", conflicts_with_all = ["reference", "hypothesis"])]
    cases_file: Option<PathBuf>,
    #[arg(long, env = "LYRICS_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "LYRICS_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "LYRICS_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "LYRICS_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct Case {
    id: String,
    #[serde(default)]
    reference: String,
    #[serde(default)]
    transcript: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let scorer = build_scorer(args.config.as_deref())?;

    if let Some(cases_file) = args.cases_file.as_ref() {
        return run_batch(&args, cases_file, &scorer);
    }

    if args.reference.is_none() && args.hypothesis.is_none() {
        return Err(
            "Nothing to score: pass --reference/--hypothesis or --cases-file.".to_string(),
        );
    }
    let reference = args.reference.as_deref().unwrap_or_default();
    let hypothesis = args.hypothesis.as_deref().unwrap_or_default();
    let result = scorer.score(reference, hypothesis);
    print_single_result(&result);

    if let Some(out_path) = args.out.as_ref() {
        let case = compute_case_report("single", reference, hypothesis, &scorer)
            .map_err(|err| format!("Failed to build case report: {err}"))?;
        let report = build_report(vec![case], &scorer);
        json_report_formatter::write_report(out_path, &report)?;
        println!("{}", out_path.display());
    }
    Ok(())
}

fn run_batch(args: &Args, cases_file: &Path, scorer: &LyricsScorer) -> Result<(), String> {
    let mut cases = load_cases(cases_file)?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let mut case_reports = Vec::with_capacity(cases.len());
    let mut scoring_elapsed = Duration::ZERO;
    for case in &cases {
        progress.set_message(case.id.clone());
        let started = Instant::now();
        let report = compute_case_report(&case.id, &case.reference, &case.transcript, scorer)
            .map_err(|err| format!("{}: scoring failed: {err}", case.id))?;
        scoring_elapsed += started.elapsed();
        case_reports.push(report);
        progress.inc(1);
    }
    progress.finish_with_message("scoring pass complete");

    let avg_case_ms = scoring_elapsed.as_secs_f64() * 1000.0 / case_reports.len() as f64;
    println!(
        "scoring_elapsed: {:.3}s avg_per_case: {:.3}ms",
        scoring_elapsed.as_secs_f64(),
        avg_case_ms
    );

    let report = build_report(case_reports, scorer);
    if let Some(overall) = report.aggregates.metrics.overall_score.as_ref() {
        println!(
            "overall_score: mean={:.1} p50={:.1} p90={:.1} (scored {} of {})",
            overall.mean,
            overall.p50,
            overall.p90,
            report.aggregates.counts.scored,
            report.aggregates.counts.total
        );
    }

    let out_path = args.out.clone().unwrap_or_else(default_out_path);
    json_report_formatter::write_report(&out_path, &report)?;
    println!("{}", out_path.display());
    Ok(())
}

fn build_scorer(config_path: Option<&Path>) -> Result<LyricsScorer, String> {
    let builder = match config_path {
        Some(path) => {
            require_path_exists(path, "Missing --config path.")?;
            LyricsScorerBuilder::from_config_file(path)
                .map_err(|err| format!("Failed to load scoring config: {err}"))?
        }
        None => LyricsScorerBuilder::new(ScoringConfig::default()),
    };
    builder
        .build()
        .map_err(|err| format!("Failed to build LyricsScorer: {err}"))
}

fn build_report(cases: Vec<CaseReport>, scorer: &LyricsScorer) -> Report {
    let aggregates = aggregate_reports(&cases, scorer.config().outlier_top_n);
    Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            weights: *scorer.weights(),
            case_count: cases.len(),
        },
        cases,
        aggregates,
    }
}

fn print_single_result(result: &ComparisonResult) {
    println!("Word Error Rate (WER): {:.1}%", result.wer);
    println!("Bag of Words F1: {:.1}%", result.bow_f1);
    println!("Bigram F1: {:.1}%", result.bigram_f1);
    println!("Semantic Similarity: {:.1}%", result.semantic_similarity);
    println!("Overall Score: {:.1}%", result.overall_score);
    println!("Grade: {}", result.grade());
    println!("Analysis: {}", result.detailed_analysis);
    println!("{}", result.tier().message());
}

fn load_cases(path: &Path) -> Result<Vec<Case>, String> {
    require_path_exists(path, "Missing --cases-file path.")?;
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;

    if contents.trim_start().starts_with('[') {
        return serde_json::from_str(&contents)
            .map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()));
    }

    let mut cases = Vec::new();
    for (line_idx, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let case: Case = serde_json::from_str(line).map_err(|err| {
            format!(
                "Failed to parse case at '{}' line {}: {err}",
                path.display(),
                line_idx + 1
            )
        })?;
        cases.push(case);
    }
    Ok(cases)
}

fn default_out_path() -> PathBuf {
    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    PathBuf::from("target")
        .join("lyrics_reports")
        .join(format!("lyrics-report-{run_id}.json"))
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Missing path: {}", path.display()))
}
