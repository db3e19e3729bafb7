//! Scoring rubrics and quality gate thresholds
//!
//! One rubric per file kind, mapping each issue type to a severity, a
//! point deduction, and whether detecting it forces auto-fail. The
//! tables are process-wide constants expressed as exhaustive matches;
//! nothing is configurable at runtime.

use crate::models::{FileKind, IssueType, Severity};
use serde::{Deserialize, Serialize};

/// Commit gate: scores below this block committing.
pub const COMMIT_THRESHOLD: u32 = 80;
/// PR gate: scores below this warn before opening a PR.
pub const PR_THRESHOLD: u32 = 90;
/// Aspirational excellence gate.
pub const EXCELLENCE_THRESHOLD: u32 = 95;

/// The three quality gates, echoed into every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub commit: u32,
    pub pr: u32,
    pub excellence: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            commit: COMMIT_THRESHOLD,
            pr: PR_THRESHOLD,
            excellence: EXCELLENCE_THRESHOLD,
        }
    }
}

/// One rubric row: how an issue type is priced for a given file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RubricEntry {
    pub severity: Severity,
    pub points: u32,
    pub auto_fail: bool,
}

const fn entry_of(severity: Severity, points: u32, auto_fail: bool) -> RubricEntry {
    RubricEntry {
        severity,
        points,
        auto_fail,
    }
}

/// Look up the rubric row for `(kind, issue_type)`.
///
/// Every issue type a detector emits exists in the rubric of the kind it
/// runs for; asking for a pair outside the tables is a programming error
/// in the detector wiring, not a user-reachable state.
pub fn entry(kind: FileKind, issue_type: IssueType) -> RubricEntry {
    use IssueType::*;
    use Severity::*;

    match kind {
        FileKind::SlideDeck => match issue_type {
            CompilationFailure => entry_of(Critical, 100, true),
            UndefinedCitation => entry_of(Critical, 15, false),
            OverfullHbox => entry_of(Critical, 10, false),
            TextOverflow => entry_of(Major, 5, false),
            NotationInconsistency => entry_of(Major, 3, false),
            FontSizeReduction => entry_of(Minor, 1, false),
            OrphanRunt => entry_of(Minor, 2, false),
            other => unreachable!("no slide-deck rubric entry for {other}"),
        },
        FileKind::GeneralScript => match issue_type {
            SyntaxError => entry_of(Critical, 100, true),
            HardcodedPath => entry_of(Critical, 20, false),
            MissingImport => entry_of(Critical, 10, false),
            MissingSeed => entry_of(Major, 10, false),
            MissingDocstring => entry_of(Major, 5, false),
            NoMainGuard => entry_of(Major, 3, false),
            StyleViolation => entry_of(Minor, 1, false),
            LongLine => entry_of(Minor, 1, false),
            other => unreachable!("no Python rubric entry for {other}"),
        },
        FileKind::AnalysisScript => match issue_type {
            SyntaxError => entry_of(Critical, 100, true),
            HardcodedPath => entry_of(Critical, 20, false),
            MissingClearAll => entry_of(Critical, 10, false),
            MissingSetSeed => entry_of(Major, 10, false),
            MissingHeader => entry_of(Major, 5, false),
            MissingLog => entry_of(Major, 5, false),
            StyleViolation => entry_of(Minor, 1, false),
            other => unreachable!("no Stata rubric entry for {other}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_the_published_gates() {
        let t = Thresholds::default();
        assert_eq!(t.commit, 80);
        assert_eq!(t.pr, 90);
        assert_eq!(t.excellence, 95);
    }

    #[test]
    fn test_only_structural_failures_auto_fail() {
        let kinds_and_fatal = [
            (FileKind::SlideDeck, IssueType::CompilationFailure),
            (FileKind::GeneralScript, IssueType::SyntaxError),
            (FileKind::AnalysisScript, IssueType::SyntaxError),
        ];
        for (kind, ty) in kinds_and_fatal {
            let e = entry(kind, ty);
            assert!(e.auto_fail, "{ty} should auto-fail for {kind:?}");
            assert_eq!(e.points, 100);
            assert_eq!(e.severity, Severity::Critical);
        }

        // Spot-check non-fatal rows
        assert!(!entry(FileKind::SlideDeck, IssueType::UndefinedCitation).auto_fail);
        assert!(!entry(FileKind::GeneralScript, IssueType::HardcodedPath).auto_fail);
        assert!(!entry(FileKind::AnalysisScript, IssueType::MissingClearAll).auto_fail);
    }

    #[test]
    fn test_point_values_match_published_rubrics() {
        assert_eq!(
            entry(FileKind::SlideDeck, IssueType::UndefinedCitation).points,
            15
        );
        assert_eq!(entry(FileKind::SlideDeck, IssueType::OverfullHbox).points, 10);
        assert_eq!(entry(FileKind::SlideDeck, IssueType::OrphanRunt).points, 2);
        assert_eq!(
            entry(FileKind::GeneralScript, IssueType::HardcodedPath).points,
            20
        );
        assert_eq!(
            entry(FileKind::GeneralScript, IssueType::MissingSeed).points,
            10
        );
        assert_eq!(
            entry(FileKind::GeneralScript, IssueType::NoMainGuard).points,
            3
        );
        assert_eq!(
            entry(FileKind::AnalysisScript, IssueType::MissingLog).points,
            5
        );
    }

    #[test]
    fn test_severity_assignment() {
        assert_eq!(
            entry(FileKind::SlideDeck, IssueType::TextOverflow).severity,
            Severity::Major
        );
        assert_eq!(
            entry(FileKind::SlideDeck, IssueType::FontSizeReduction).severity,
            Severity::Minor
        );
        // Stata places the clear-all check in the critical bucket
        assert_eq!(
            entry(FileKind::AnalysisScript, IssueType::MissingClearAll).severity,
            Severity::Critical
        );
    }
}
