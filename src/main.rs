//! Scorecard - rubric-driven quality scoring for course materials
//!
//! Scores Beamer/LaTeX slide decks, Python scripts, and Stata do-files
//! against fixed rubrics and quality gates (80 commit / 90 PR / 95
//! excellence). Everything runs locally; the only subprocess is an
//! optional `python -m py_compile` syntax check.

mod cli;
mod config;
mod detectors;
mod models;
mod reporters;
mod rubric;
mod scoring;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<ExitCode> {
    // Logs go to stderr so `--format json` stays machine-parseable on stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();
    cli::run(cli)
}
