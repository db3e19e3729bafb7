//! Per-file quality scoring
//!
//! The scorer is a fold: start at 100, run the structural validity check
//! for the file's kind, then (if it passed) every detector in the kind's
//! table, subtracting each issue's rubric points and clamping to
//! [0, 100]. Structural invalidity short-circuits: the file auto-fails
//! at score 0 and no other detector runs.
//!
//! Scoring one file touches nothing outside that file (plus the optional
//! companion bibliography), so a batch can score files in parallel with
//! no coordination.

mod classifier;

pub use classifier::classify;

use crate::config::Config;
use crate::detectors::external_tool::{PyCompileValidator, SyntaxValidator, Validation};
use crate::detectors::{citations, detectors_for, latex_syntax, ScanContext};
use crate::models::{FileKind, Issue, IssueType, Issues, Report};
use crate::rubric::{self, Thresholds};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Every file starts here before deductions.
const BASELINE_SCORE: u32 = 100;

/// Cap on external diagnostic text carried into an issue.
const MAX_DIAGNOSTIC_CHARS: usize = 200;

/// Per-file failure that is distinct from a low score: the file was
/// never scored at all. A batch run reports these and carries on.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("unsupported file type: {} (supported: .tex, .py, .do)", .path.display())]
    UnsupportedKind { path: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("detector {detector} failed on {}: {source}", .path.display())]
    Detector {
        detector: &'static str,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Scores individual files against their kind's rubric.
pub struct Scorer<'a> {
    config: &'a Config,
    validator: Box<dyn SyntaxValidator>,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Scorer {
            validator: Box::new(PyCompileValidator::from_config(&config.validator)),
            config,
        }
    }

    #[cfg(test)]
    fn with_validator(config: &'a Config, validator: Box<dyn SyntaxValidator>) -> Self {
        Scorer { config, validator }
    }

    /// Score one file from disk.
    pub fn score_path(&self, path: &Path) -> Result<Report, ScoreError> {
        let kind = FileKind::from_path(path).ok_or_else(|| ScoreError::UnsupportedKind {
            path: path.to_path_buf(),
        })?;

        // read_to_string also rejects non-UTF-8 content, which counts as
        // unreadable for scoring purposes
        let content = std::fs::read_to_string(path).map_err(|source| ScoreError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let bibliography = if kind == FileKind::SlideDeck {
            citations::locate_bibliography(path, &self.config.bibliography.filename)
                .and_then(|bib| std::fs::read_to_string(bib).ok())
        } else {
            None
        };

        debug!("scoring {} as {}", path.display(), kind.label());
        self.score_content(path, kind, &content, bibliography.as_deref())
    }

    /// Score already-loaded content. Pure given the same inputs.
    pub fn score_content(
        &self,
        path: &Path,
        kind: FileKind,
        content: &str,
        bibliography: Option<&str>,
    ) -> Result<Report, ScoreError> {
        let mut issues = Issues::default();
        let mut score = BASELINE_SCORE;
        let mut auto_fail = false;

        // Structural validity first; invalidity pre-empts everything else
        match kind {
            FileKind::SlideDeck => {
                let structural = latex_syntax::check(content);
                if !structural.is_empty() {
                    let entry = rubric::entry(kind, IssueType::CompilationFailure);
                    for env_issue in structural {
                        issues.push(Issue {
                            issue_type: IssueType::CompilationFailure,
                            severity: entry.severity,
                            description: format!("LaTeX syntax issue at line {}", env_issue.line),
                            details: env_issue.description,
                            points: entry.points,
                        });
                    }
                    auto_fail = entry.auto_fail;
                }
            }
            FileKind::GeneralScript => match self.validator.validate(path) {
                Validation::Valid => {}
                Validation::Invalid(diagnostic) => {
                    let entry = rubric::entry(kind, IssueType::SyntaxError);
                    issues.push(Issue {
                        issue_type: IssueType::SyntaxError,
                        severity: entry.severity,
                        description: "Python syntax error".to_string(),
                        details: truncate(&diagnostic, MAX_DIAGNOSTIC_CHARS),
                        points: entry.points,
                    });
                    auto_fail = entry.auto_fail;
                }
                Validation::Unavailable(reason) => {
                    warn!("syntax check skipped for {}: {reason}", path.display());
                }
                Validation::TimedOut(secs) => {
                    warn!(
                        "syntax check skipped for {}: timed out after {secs}s",
                        path.display()
                    );
                }
            },
            // Stata has no in-process or external syntax oracle
            FileKind::AnalysisScript => {}
        }

        if auto_fail {
            score = 0;
        } else {
            let ctx = ScanContext {
                path,
                content,
                bibliography,
            };
            for detector in detectors_for(kind) {
                debug!("running {}: {}", detector.name(), detector.description());
                let detections =
                    detector
                        .detect(&ctx)
                        .map_err(|source| ScoreError::Detector {
                            detector: detector.name(),
                            path: path.to_path_buf(),
                            source,
                        })?;
                if !detections.is_empty() {
                    debug!(
                        "{} reported {} issue(s) for {}",
                        detector.name(),
                        detections.len(),
                        path.display()
                    );
                }
                for detection in detections {
                    let entry = rubric::entry(kind, detection.issue_type);
                    score = score.saturating_sub(entry.points);
                    issues.push(Issue {
                        issue_type: detection.issue_type,
                        severity: entry.severity,
                        description: detection.description,
                        details: detection.details,
                        points: entry.points,
                    });
                }
            }
        }

        issues.finalize_counts();
        let status = classify(score, auto_fail);

        Ok(Report {
            filepath: path.to_path_buf(),
            score,
            status,
            threshold: status.threshold_label().to_string(),
            auto_fail,
            issues,
            thresholds: Thresholds::default(),
        })
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::external_tool::StaticValidator;
    use crate::models::Status;

    fn scorer_with(config: &Config, validation: Validation) -> Scorer<'_> {
        Scorer::with_validator(config, Box::new(StaticValidator(validation)))
    }

    fn score_deck(content: &str, bibliography: Option<&str>) -> Report {
        let config = Config::default();
        let scorer = scorer_with(&config, Validation::Valid);
        scorer
            .score_content(
                Path::new("slides/deck.tex"),
                FileKind::SlideDeck,
                content,
                bibliography,
            )
            .expect("scoring succeeds")
    }

    const CLEAN_DECK: &str = "\\begin{document}\n\\begin{frame}\n\\frametitle{Intro}\nSome reasonable text.\n\\end{frame}\n\\end{document}\n";

    #[test]
    fn test_clean_deck_scores_100() {
        let report = score_deck(CLEAN_DECK, None);
        assert_eq!(report.score, 100);
        assert_eq!(report.status, Status::Excellence);
        assert!(!report.auto_fail);
        assert!(report.issues.is_empty());
        assert_eq!(report.threshold, "excellence");
    }

    #[test]
    fn test_structural_failure_short_circuits_other_detectors() {
        // Unmatched \end{frame} plus a body that would trip the runt and
        // overflow detectors if they ran
        let long = "y".repeat(130);
        let content = format!(
            "\\begin{{frame}}\nThis line is long enough to count as real prose.\nlate\n{long}\n\\end{{frame}}\n\\end{{frame}}\n"
        );
        let report = score_deck(&content, None);

        assert!(report.auto_fail);
        assert_eq!(report.score, 0);
        assert_eq!(report.status, Status::Fail);
        assert_eq!(report.threshold, "None (auto-fail)");
        // Only the structural issue: nothing after the short-circuit ran
        assert_eq!(report.issues.counts.total, 1);
        assert_eq!(report.issues.counts.critical, 1);
        assert_eq!(
            report.issues.critical[0].issue_type,
            IssueType::CompilationFailure
        );
        assert_eq!(report.issues.critical[0].points, 100);
    }

    #[test]
    fn test_deductions_accumulate() {
        // Two broken citations (no bibliography): 100 - 2*15 = 70
        let content = "\\begin{frame}\nWe cite \\cite{a} and \\cite{b}.\n\\end{frame}\n";
        let report = score_deck(content, None);
        assert_eq!(report.score, 70);
        assert_eq!(report.status, Status::Blocked);
        assert_eq!(report.issues.counts.critical, 2);
    }

    #[test]
    fn test_bibliography_resolves_citations() {
        let content = "\\begin{frame}\nWe cite \\cite{a} and \\cite{b}.\n\\end{frame}\n";
        let report = score_deck(content, Some("@article{a,\n}\n@book{b,\n}\n"));
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        // Seven unresolved citations = 105 points of deductions
        let body: String = ('a'..='g').map(|k| format!("\\cite{{{k}}} ")).collect();
        let content = format!("\\begin{{frame}}\n{body}\n\\end{{frame}}\n");
        let report = score_deck(&content, None);

        assert_eq!(report.issues.counts.critical, 7);
        assert_eq!(report.score, 0);
        // Clamped to zero but not an auto-fail
        assert!(!report.auto_fail);
        assert_eq!(report.status, Status::Blocked);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let content = "\\begin{frame}\nWe cite \\cite{a}.\n\\end{frame}\n";
        let first = score_deck(content, None);
        let second = score_deck(content, None);
        assert_eq!(first, second);
        let a = serde_json::to_string(&first).expect("serialize");
        let b = serde_json::to_string(&second).expect("serialize");
        assert_eq!(a, b);
    }

    #[test]
    fn test_python_syntax_error_auto_fails() {
        let config = Config::default();
        let scorer = scorer_with(&config, Validation::Invalid("SyntaxError: bad".into()));
        let report = scorer
            .score_content(
                Path::new("broken.py"),
                FileKind::GeneralScript,
                "def broken(:\n",
                None,
            )
            .expect("scoring succeeds");

        assert!(report.auto_fail);
        assert_eq!(report.score, 0);
        assert_eq!(report.status, Status::Fail);
        assert_eq!(report.issues.counts.total, 1);
        assert_eq!(report.issues.critical[0].issue_type, IssueType::SyntaxError);
        assert_eq!(report.issues.critical[0].details, "SyntaxError: bad");
    }

    #[test]
    fn test_long_diagnostics_are_truncated() {
        let config = Config::default();
        let scorer = scorer_with(&config, Validation::Invalid("e".repeat(500)));
        let report = scorer
            .score_content(Path::new("broken.py"), FileKind::GeneralScript, "x\n", None)
            .expect("scoring succeeds");
        assert_eq!(
            report.issues.critical[0].details.chars().count(),
            MAX_DIAGNOSTIC_CHARS
        );
    }

    #[test]
    fn test_unavailable_validator_skips_check_but_scores_rest() {
        let config = Config::default();
        let scorer = scorer_with(&config, Validation::Unavailable("python not found".into()));
        let content = "import numpy as np\nx = np.random.normal()\n";
        let report = scorer
            .score_content(Path::new("a.py"), FileKind::GeneralScript, content, None)
            .expect("scoring succeeds");

        // No syntax issue, but hygiene detectors still ran:
        // missing seed (10) + missing docstring (5) = 85
        assert!(!report.auto_fail);
        assert_eq!(report.score, 85);
        assert_eq!(report.status, Status::CommitReady);
    }

    #[test]
    fn test_timeout_is_recoverable() {
        let config = Config::default();
        let scorer = scorer_with(&config, Validation::TimedOut(10));
        let report = scorer
            .score_content(
                Path::new("a.py"),
                FileKind::GeneralScript,
                "\"\"\"doc\"\"\"\nprint(1)\n",
                None,
            )
            .expect("scoring succeeds");
        assert_eq!(report.score, 100);
        assert_eq!(report.status, Status::Excellence);
    }

    #[test]
    fn test_clean_python_script_reaches_excellence() {
        let config = Config::default();
        let scorer = scorer_with(&config, Validation::Valid);
        let content = "\"\"\"Build the summary tables.\"\"\"\n\nimport pandas as pd\n\n\ndef main():\n    print(pd.DataFrame())\n\n\nif __name__ == \"__main__\":\n    main()\n";
        let report = scorer
            .score_content(Path::new("tables.py"), FileKind::GeneralScript, content, None)
            .expect("scoring succeeds");

        assert_eq!(report.score, 100);
        assert_eq!(report.status, Status::Excellence);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_stata_deductions() {
        let config = Config::default();
        let scorer = scorer_with(&config, Validation::Valid);
        // Missing header (5) and missing log (5): 100 - 10 = 90
        let content = "clear all\nregress y x\n";
        let report = scorer
            .score_content(Path::new("reg.do"), FileKind::AnalysisScript, content, None)
            .expect("scoring succeeds");

        assert_eq!(report.score, 90);
        assert_eq!(report.status, Status::PrReady);
        assert_eq!(report.issues.counts.major, 2);
    }

    #[test]
    fn test_score_path_rejects_unsupported_extension() {
        let config = Config::default();
        let scorer = Scorer::new(&config);
        let err = scorer
            .score_path(Path::new("notes.md"))
            .expect_err("md files are not scoreable");
        assert!(matches!(err, ScoreError::UnsupportedKind { .. }));
    }

    #[test]
    fn test_score_path_reports_unreadable_files() {
        let config = Config::default();
        let scorer = Scorer::new(&config);
        let err = scorer
            .score_path(Path::new("/nonexistent/deck.tex"))
            .expect_err("missing file is unreadable");
        assert!(matches!(err, ScoreError::Unreadable { .. }));
    }
}
