//! Balanced-environment check for LaTeX sources
//!
//! A linear scan with an explicit stack of open `\begin{...}` markers.
//! Any mismatch, close-without-open, or marker still open at end of file
//! is structural invalidity: the deck cannot compile, so the scorer
//! auto-fails the file and skips every other detector.
//!
//! This is deliberately not a [`Detector`](super::Detector): it runs
//! before the detector table and its result short-circuits scoring.

use crate::detectors::latex_code;
use regex::Regex;
use std::sync::OnceLock;

static BEGIN_PATTERN: OnceLock<Regex> = OnceLock::new();
static END_PATTERN: OnceLock<Regex> = OnceLock::new();

fn begin_pattern() -> &'static Regex {
    BEGIN_PATTERN.get_or_init(|| Regex::new(r"\\begin\{(\w+)\}").expect("valid regex"))
}

fn end_pattern() -> &'static Regex {
    END_PATTERN.get_or_init(|| Regex::new(r"\\end\{(\w+)\}").expect("valid regex"))
}

/// One structural problem, located at the line it was noticed on
/// (unclosed environments point at their opening line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvIssue {
    pub line: usize,
    pub description: String,
}

/// Verify that `\begin`/`\end` markers nest correctly.
///
/// Returns an empty vec for a structurally sound file.
pub fn check(content: &str) -> Vec<EnvIssue> {
    let mut issues = Vec::new();
    let mut stack: Vec<(&str, usize)> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let lineno = i + 1;
        let code = latex_code(line);

        for cap in begin_pattern().captures_iter(code) {
            if let Some(name) = cap.get(1) {
                stack.push((name.as_str(), lineno));
            }
        }

        for cap in end_pattern().captures_iter(code) {
            let Some(env) = cap.get(1).map(|m| m.as_str()) else {
                continue;
            };
            match stack.last().copied() {
                Some((top, _)) if top == env => {
                    stack.pop();
                }
                Some((top, opened)) => {
                    issues.push(EnvIssue {
                        line: lineno,
                        description: format!(
                            "Mismatched environment: \\end{{{env}}} but expected \\end{{{top}}} (opened at line {opened})"
                        ),
                    });
                }
                None => {
                    issues.push(EnvIssue {
                        line: lineno,
                        description: format!("\\end{{{env}}} without matching \\begin"),
                    });
                }
            }
        }
    }

    for (env, line) in stack {
        issues.push(EnvIssue {
            line,
            description: format!("Unclosed environment: \\begin{{{env}}} never closed"),
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_document_is_clean() {
        let content = "\\begin{document}\n\\begin{frame}\nHello\n\\end{frame}\n\\end{document}\n";
        assert!(check(content).is_empty());
    }

    #[test]
    fn test_mismatched_environment() {
        let content = "\\begin{frame}\n\\begin{itemize}\n\\end{frame}\n";
        let issues = check(content);
        // Line 3 closes frame while itemize is still open, then both
        // environments remain unclosed at EOF
        assert!(!issues.is_empty());
        assert_eq!(issues[0].line, 3);
        assert!(issues[0].description.contains("Mismatched environment"));
        assert!(issues[0].description.contains("\\end{itemize}"));
        assert!(issues[0].description.contains("opened at line 2"));
    }

    #[test]
    fn test_close_without_open() {
        let issues = check("Some text\n\\end{frame}\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);
        assert!(issues[0]
            .description
            .contains("\\end{frame} without matching \\begin"));
    }

    #[test]
    fn test_unclosed_environment_reports_opening_line() {
        let issues = check("\\begin{document}\n\\begin{frame}\ntext\n\\end{frame}\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 1);
        assert!(issues[0]
            .description
            .contains("\\begin{document} never closed"));
    }

    #[test]
    fn test_commented_markers_are_ignored() {
        let content = "\\begin{frame}\n% \\begin{itemize}\n\\end{frame}\n";
        assert!(check(content).is_empty());
    }

    #[test]
    fn test_multiple_environments_on_one_line() {
        assert!(check("\\begin{frame}\\begin{center}x\\end{center}\\end{frame}\n").is_empty());
    }
}
