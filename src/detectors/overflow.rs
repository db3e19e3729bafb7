//! Overflow-risk detectors for slide decks
//!
//! Beamer gives no horizontal scroll: a source line much wider than the
//! frame usually ends up as an overfull hbox on the rendered slide. Two
//! detectors approximate that risk without compiling:
//!
//! - [`OverfullHboxRisk`] flags any line over 120 characters inside a
//!   frame, except asset-inclusion commands that never render as text.
//! - [`EquationOverflow`] tracks math mode (both `$$`-delimited and named
//!   display environments) and flags single over-long math lines, which
//!   cannot be rewrapped by the engine at all.

use crate::detectors::{latex_code, Detection, Detector, ScanContext};
use crate::models::IssueType;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Width past which a single source line is treated as an overflow risk.
const MAX_LINE_WIDTH: usize = 120;

static ASSET_LINE: OnceLock<Regex> = OnceLock::new();
static MATH_ENV_BEGIN: OnceLock<Regex> = OnceLock::new();
static MATH_ENV_END: OnceLock<Regex> = OnceLock::new();

fn asset_line() -> &'static Regex {
    ASSET_LINE.get_or_init(|| {
        Regex::new(r"^\s*\\(includegraphics|input|bibliography|usepackage)").expect("valid regex")
    })
}

fn math_env_begin() -> &'static Regex {
    MATH_ENV_BEGIN.get_or_init(|| {
        Regex::new(r"^\\begin\{(equation|align|gather|multline|eqnarray)\*?\}")
            .expect("valid regex")
    })
}

fn math_env_end() -> &'static Regex {
    MATH_ENV_END.get_or_init(|| {
        Regex::new(r"^\\end\{(equation|align|gather|multline|eqnarray)\*?\}").expect("valid regex")
    })
}

fn width(s: &str) -> usize {
    s.chars().count()
}

/// Long prose/code lines inside frames.
pub struct OverfullHboxRisk;

impl Detector for OverfullHboxRisk {
    fn name(&self) -> &'static str {
        "overfull-hbox-risk"
    }

    fn description(&self) -> &'static str {
        "Flags lines inside frames likely to cause an overfull hbox"
    }

    fn detect(&self, ctx: &ScanContext) -> Result<Vec<Detection>> {
        let mut detections = Vec::new();
        let mut in_frame = false;

        for (i, line) in ctx.content.lines().enumerate() {
            let code = latex_code(line);

            if code.contains(r"\begin{frame}") {
                in_frame = true;
            } else if code.contains(r"\end{frame}") {
                in_frame = false;
            }

            if in_frame && width(code.trim()) > MAX_LINE_WIDTH {
                if asset_line().is_match(code) {
                    continue;
                }
                detections.push(Detection::new(
                    IssueType::OverfullHbox,
                    format!("Potential overfull hbox at line {}", i + 1),
                    "Line >120 chars inside frame may overflow slide width",
                ));
            }
        }

        Ok(detections)
    }
}

#[derive(PartialEq)]
enum MathDelim {
    Dollar,
    Env,
}

/// Over-long single lines inside displayed math.
pub struct EquationOverflow;

impl Detector for EquationOverflow {
    fn name(&self) -> &'static str {
        "equation-overflow"
    }

    fn description(&self) -> &'static str {
        "Flags displayed equations with single lines likely to overflow"
    }

    fn detect(&self, ctx: &ScanContext) -> Result<Vec<Detection>> {
        let mut detections = Vec::new();
        let mut in_math = false;
        let mut delim: Option<MathDelim> = None;

        for (i, line) in ctx.content.lines().enumerate() {
            let lineno = i + 1;
            let stripped = line.trim();

            // $$ delimiters toggle math mode unless we are inside a named
            // environment (where a stray $$ would be malformed anyway)
            if stripped.contains("$$") && delim != Some(MathDelim::Env) {
                if !in_math {
                    in_math = true;
                    delim = Some(MathDelim::Dollar);
                    // One-line $$...$$: only the enclosed content counts
                    if stripped.matches("$$").count() >= 2 {
                        if let Some(inner) = stripped.split("$$").nth(1) {
                            if width(inner.trim()) > MAX_LINE_WIDTH {
                                detections.push(equation_detection(lineno));
                            }
                        }
                        in_math = false;
                        delim = None;
                    }
                } else {
                    in_math = false;
                    delim = None;
                }
                continue;
            }

            if math_env_begin().is_match(stripped) && !in_math {
                in_math = true;
                delim = Some(MathDelim::Env);
                continue;
            }

            if math_env_end().is_match(stripped) {
                in_math = false;
                delim = None;
                continue;
            }

            if in_math && width(latex_code(line).trim()) > MAX_LINE_WIDTH {
                detections.push(equation_detection(lineno));
            }
        }

        Ok(detections)
    }
}

fn equation_detection(lineno: usize) -> Detection {
    Detection::new(
        IssueType::OverfullHbox,
        format!("Potential equation overflow at line {lineno}"),
        "Single equation line >120 chars likely to overflow",
    )
}
