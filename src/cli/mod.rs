//! CLI argument definitions and the scoring driver

use crate::config::Config;
use crate::models::Report;
use crate::reporters::{self, OutputFormat, RenderOptions};
use crate::scoring::{ScoreError, Scorer};
use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::error;

/// Scorecard - Rubric-driven quality scoring for course materials
#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(
    version,
    about = "Score Beamer slide decks, Python scripts, and Stata do-files against fixed quality rubrics",
    long_about = "Scorecard runs static quality checks against a fixed rubric and deducts \
points from a baseline of 100. Structural failures (unbalanced LaTeX \
environments, Python syntax errors) are an automatic fail regardless of \
the remaining score.\n\n\
Everything runs locally; the only subprocess is an optional \
`python -m py_compile` syntax check.",
    after_help = "\
Quality gates:
  80   commit-ready
  90   PR-ready
  95   excellence

Exit codes:
  0    all files scored at or above the commit gate
  1    a file scored below the commit gate, or could not be scored
  2    a file auto-failed (compilation/syntax error)

Examples:
  scorecard slides/lecture01.tex               Score one slide deck
  scorecard src/*.py --format json             JSON batch for scripting
  scorecard analysis/clean.do --verbose        Include minor issues
  scorecard slides/*.tex --summary             Counts only, no detail"
)]
pub struct Cli {
    /// Files to score (.tex, .py, .do)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format: text, json, markdown (or md)
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
    pub format: String,

    /// Counts only, no per-issue detail
    #[arg(long)]
    pub summary: bool,

    /// Include minor issues in text/markdown output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Config file path (default: ./scorecard.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    let format = OutputFormat::from_str(&cli.format)?;
    let opts = RenderOptions {
        summary: cli.summary,
        verbose: cli.verbose,
    };

    let config = Config::load(cli.config.as_deref());
    let scorer = Scorer::new(&config);

    let results: Vec<(PathBuf, Result<Report, ScoreError>)> = cli
        .paths
        .par_iter()
        .map(|path| (path.clone(), scorer.score_path(path)))
        .collect();

    let mut reports = Vec::new();
    let mut had_error = false;
    for (path, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                had_error = true;
                error!("{}: {err}", path.display());
            }
        }
    }

    print_reports(&reports, format, &opts)?;
    Ok(ExitCode::from(exit_code(&reports, had_error)))
}

/// JSON batches render as one array; other formats render per file.
fn print_reports(reports: &[Report], format: OutputFormat, opts: &RenderOptions) -> Result<()> {
    if format == OutputFormat::Json && reports.len() > 1 {
        println!("{}", reporters::render_batch(reports)?);
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", reporters::render(report, format, opts)?);
    }
    Ok(())
}

/// Exit code contract: 2 for any auto-fail, 1 for any file below the
/// commit gate or any scoring error, 0 otherwise. 2 wins over 1.
fn exit_code(reports: &[Report], had_error: bool) -> u8 {
    if reports.iter().any(|r| r.auto_fail) {
        2
    } else if had_error || reports.iter().any(|r| r.score < r.thresholds.commit) {
        1
    } else {
        0
    }
}
