//! Hygiene checks for Stata do-files
//!
//! Do-files accumulate state from whatever ran before them, so the house
//! style demands a `clear all` near the top, a header comment block, an
//! opened log, and a seed whenever randomness is involved.

use crate::detectors::{Detection, Detector, ScanContext};
use crate::models::IssueType;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Lines considered "near the top" for the clear-all check.
const HEADER_REGION_LINES: usize = 20;
/// Lines the header comment block must appear within.
const HEADER_COMMENT_LINES: usize = 5;

/// Commands that introduce randomness.
const RANDOM_COMMANDS: &[&str] = &[
    "simulate",
    "bootstrap",
    "permute",
    "sample",
    "bsample",
    "drawnorm",
];

static COMMENT_LINE: OnceLock<Regex> = OnceLock::new();

fn comment_line() -> &'static Regex {
    COMMENT_LINE.get_or_init(|| Regex::new(r"(?m)^\s*(\*|//)").expect("valid regex"))
}

pub struct StataHygiene;

impl Detector for StataHygiene {
    fn name(&self) -> &'static str {
        "stata-hygiene"
    }

    fn description(&self) -> &'static str {
        "Checks clear all, header block, log file, and set seed"
    }

    fn detect(&self, ctx: &ScanContext) -> Result<Vec<Detection>> {
        let mut detections = Vec::new();
        let lines: Vec<&str> = ctx.content.lines().collect();
        let lower = ctx.content.to_lowercase();

        let header_region = lines
            .iter()
            .take(HEADER_REGION_LINES)
            .map(|l| l.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");
        if !header_region.contains("clear") {
            detections.push(Detection::new(
                IssueType::MissingClearAll,
                "Missing `clear all` near top of file",
                "Add `clear all` after header block",
            ));
        }

        let first_lines = lines
            .iter()
            .take(HEADER_COMMENT_LINES)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");
        if !comment_line().is_match(&first_lines) {
            detections.push(Detection::new(
                IssueType::MissingHeader,
                "Missing header comment block",
                "Add header with purpose, author, date",
            ));
        }

        // `cmdlog using` contains `log using`, so one check covers both
        if !lower.contains("log using") {
            detections.push(Detection::new(
                IssueType::MissingLog,
                "No log file opened",
                "Add `log using scripts/stata/logs/filename.smcl, replace`",
            ));
        }

        let has_random = RANDOM_COMMANDS.iter().any(|cmd| lower.contains(cmd));
        if has_random && !lower.contains("set seed") {
            detections.push(Detection::new(
                IssueType::MissingSetSeed,
                "Missing `set seed` for reproducibility",
                "Add `set seed YYYYMMDD` after `clear all`",
            ));
        }

        Ok(detections)
    }
}
