//! Issue detectors
//!
//! One detector per issue family, each a pure scan over a single file's
//! content. Detectors are independent of each other and order-insensitive;
//! the structural validity checks (`latex_syntax`, the external Python
//! validator in `external_tool`) are the exception and run first, before
//! any detector in these tables (see `scoring`).
//!
//! Detectors emit [`Detection`]s, which carry location and wording but no
//! pricing; the scorer looks up severity and points in the rubric so a
//! detector can never disagree with the published tables.

pub mod citations;
pub mod external_tool;
pub mod hardcoded_paths;
pub mod latex_syntax;
pub mod overflow;
pub mod python_hygiene;
pub mod runts;
pub mod stata_hygiene;

use crate::models::{FileKind, IssueType};
use anyhow::Result;
use std::path::Path;

/// A located problem reported by a detector, before rubric pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub issue_type: IssueType,
    pub description: String,
    pub details: String,
}

impl Detection {
    pub fn new(
        issue_type: IssueType,
        description: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Detection {
            issue_type,
            description: description.into(),
            details: details.into(),
        }
    }
}

/// Everything a detector may look at for one file.
///
/// `bibliography` is the companion `.bib` content for slide decks, already
/// resolved by the scorer; `None` means no bibliography file was found.
pub struct ScanContext<'a> {
    pub path: &'a Path,
    pub content: &'a str,
    pub bibliography: Option<&'a str>,
}

/// Trait for all issue detectors.
///
/// Implementations must be pure functions of the context: no side
/// effects, no shared state, restartable. `Send + Sync` so a batch of
/// files can be scored in parallel.
pub trait Detector: Send + Sync {
    /// Unique identifier, used in logs
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Scan the file and return zero or more located issues
    fn detect(&self, ctx: &ScanContext) -> Result<Vec<Detection>>;
}

/// The detector table for a file kind, in report order.
///
/// Structural validity is not in these tables; it pre-empts them.
pub fn detectors_for(kind: FileKind) -> Vec<Box<dyn Detector>> {
    match kind {
        FileKind::SlideDeck => vec![
            Box::new(citations::BrokenCitations),
            Box::new(overflow::OverfullHboxRisk),
            Box::new(overflow::EquationOverflow),
            Box::new(runts::OrphanRunts),
        ],
        FileKind::GeneralScript => vec![
            Box::new(hardcoded_paths::HardcodedPaths::new(kind)),
            Box::new(python_hygiene::PythonHygiene),
        ],
        FileKind::AnalysisScript => vec![
            Box::new(hardcoded_paths::HardcodedPaths::new(kind)),
            Box::new(stata_hygiene::StataHygiene),
        ],
    }
}

/// Strip a trailing LaTeX comment from a source line.
///
/// Deliberately naive (no `\%` escape handling), matching how the rest of
/// the pipeline treats comments: anything after the first `%` is ignored.
pub(crate) fn latex_code(line: &str) -> &str {
    match line.find('%') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_tables_cover_all_kinds() {
        assert_eq!(detectors_for(FileKind::SlideDeck).len(), 4);
        assert_eq!(detectors_for(FileKind::GeneralScript).len(), 2);
        assert_eq!(detectors_for(FileKind::AnalysisScript).len(), 2);
    }

    #[test]
    fn test_latex_code_strips_comments() {
        assert_eq!(latex_code("text % a comment"), "text ");
        assert_eq!(latex_code("% full-line comment"), "");
        assert_eq!(latex_code("no comment here"), "no comment here");
    }
}
