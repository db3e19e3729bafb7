//! Core data models for Scorecard
//!
//! These models are used throughout the codebase for representing
//! scored files, detected issues, and per-file reports.

use crate::rubric::Thresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of file being scored, derived from the extension.
///
/// The kind selects which detector set and which rubric applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Beamer/LaTeX lecture slides (`.tex`)
    SlideDeck,
    /// General-purpose Python script (`.py`)
    GeneralScript,
    /// Stata statistical analysis do-file (`.do`)
    AnalysisScript,
}

impl FileKind {
    /// Determine the file kind from a path's extension.
    pub fn from_path(path: &Path) -> Option<FileKind> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tex") => Some(FileKind::SlideDeck),
            Some("py") => Some(FileKind::GeneralScript),
            Some("do") => Some(FileKind::AnalysisScript),
            _ => None,
        }
    }

    /// Human-readable label used in log lines and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::SlideDeck => "Beamer slides",
            FileKind::GeneralScript => "Python script",
            FileKind::AnalysisScript => "Stata do-file",
        }
    }
}

/// Severity levels for issues
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    #[default]
    Minor,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Major => write!(f, "major"),
            Severity::Minor => write!(f, "minor"),
        }
    }
}

/// The fixed catalog of issue types across all three rubrics.
///
/// Every type a detector can emit has exactly one rubric entry for the
/// file kind it is emitted for (see `rubric::entry`). Some types have
/// rubric entries but no built-in detector; they are priced for external
/// review agents that feed issues through the same tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    // Slide deck
    CompilationFailure,
    UndefinedCitation,
    OverfullHbox,
    TextOverflow,
    NotationInconsistency,
    FontSizeReduction,
    OrphanRunt,
    // Scripts (Python and Stata)
    SyntaxError,
    HardcodedPath,
    MissingImport,
    MissingSeed,
    MissingDocstring,
    NoMainGuard,
    StyleViolation,
    LongLine,
    // Stata only
    MissingClearAll,
    MissingSetSeed,
    MissingHeader,
    MissingLog,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Matches the serde snake_case rename so logs and JSON agree
        let s = match self {
            IssueType::CompilationFailure => "compilation_failure",
            IssueType::UndefinedCitation => "undefined_citation",
            IssueType::OverfullHbox => "overfull_hbox",
            IssueType::TextOverflow => "text_overflow",
            IssueType::NotationInconsistency => "notation_inconsistency",
            IssueType::FontSizeReduction => "font_size_reduction",
            IssueType::OrphanRunt => "orphan_runt",
            IssueType::SyntaxError => "syntax_error",
            IssueType::HardcodedPath => "hardcoded_path",
            IssueType::MissingImport => "missing_import",
            IssueType::MissingSeed => "missing_seed",
            IssueType::MissingDocstring => "missing_docstring",
            IssueType::NoMainGuard => "no_main_guard",
            IssueType::StyleViolation => "style_violation",
            IssueType::LongLine => "long_line",
            IssueType::MissingClearAll => "missing_clear_all",
            IssueType::MissingSetSeed => "missing_set_seed",
            IssueType::MissingHeader => "missing_header",
            IssueType::MissingLog => "missing_log",
        };
        write!(f, "{s}")
    }
}

/// Quality gate status derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Excellence,
    PrReady,
    CommitReady,
    Blocked,
    Fail,
}

impl Status {
    /// The threshold this status clears, as reported in the JSON output.
    pub fn threshold_label(&self) -> &'static str {
        match self {
            Status::Excellence => "excellence",
            Status::PrReady => "pr",
            Status::CommitReady => "commit",
            Status::Blocked => "None (below commit)",
            Status::Fail => "None (auto-fail)",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Excellence => write!(f, "EXCELLENCE"),
            Status::PrReady => write!(f, "PR_READY"),
            Status::CommitReady => write!(f, "COMMIT_READY"),
            Status::Blocked => write!(f, "BLOCKED"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// A single scored issue, priced by the rubric that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
    pub details: String,
    pub points: u32,
}

/// Per-severity issue counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
    pub total: usize,
}

/// Issues grouped by severity, in detection order within each bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issues {
    pub critical: Vec<Issue>,
    pub major: Vec<Issue>,
    pub minor: Vec<Issue>,
    pub counts: IssueCounts,
}

impl Issues {
    /// Append an issue to the bucket matching its severity.
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Critical => self.critical.push(issue),
            Severity::Major => self.major.push(issue),
            Severity::Minor => self.minor.push(issue),
        }
    }

    /// Recompute the per-severity counts from the buckets.
    pub fn finalize_counts(&mut self) {
        self.counts = IssueCounts {
            critical: self.critical.len(),
            major: self.major.len(),
            minor: self.minor.len(),
            total: self.critical.len() + self.major.len() + self.minor.len(),
        };
    }

    pub fn is_empty(&self) -> bool {
        self.critical.is_empty() && self.major.is_empty() && self.minor.is_empty()
    }
}

/// Quality report for one scored file.
///
/// Built once per file and immutable afterwards; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub filepath: PathBuf,
    /// Final score, clamped to [0, 100]
    pub score: u32,
    pub status: Status,
    pub threshold: String,
    pub auto_fail: bool,
    pub issues: Issues,
    pub thresholds: Thresholds,
}
