//! Orphan/runt word detector for Beamer frames
//!
//! A runt is a single word or very short phrase (<10 chars) sitting alone
//! on the final line of a paragraph or bullet point. Flagged only inside
//! frames, and only when a nearby preceding line is substantial prose
//! (>=30 chars): a short line after a long one is evidence the word
//! spilled over from a wrap, while a short line on its own is usually
//! intentional.
//!
//! Drawing, table, and listing sub-regions are excluded; their short
//! lines are markup, not prose.

use crate::detectors::{latex_code, Detection, Detector, ScanContext};
use crate::models::IssueType;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Trimmed lines shorter than this are runt candidates.
const RUNT_WIDTH: usize = 10;
/// The preceding line must be at least this wide to count as prose.
const PROSE_WIDTH: usize = 30;
/// How many lines back to look for the preceding content line.
const LOOKBACK: usize = 3;

static STRUCTURAL_COMMAND: OnceLock<Regex> = OnceLock::new();
static BRACKET_ONLY: OnceLock<Regex> = OnceLock::new();

/// Layout/markup commands that start a line and are not prose.
fn structural_command() -> &'static Regex {
    STRUCTURAL_COMMAND.get_or_init(|| {
        Regex::new(concat!(
            r"^\s*\\(begin|end|item|section|subsection|frametitle",
            r"|includegraphics|input|vspace|hspace|centering",
            r"|column|textbf|textit|label|ref|cite|caption",
            r"|draw|node|fill|path|coordinate", // TikZ
            r"|toprule|midrule|bottomrule",     // booktabs
            r")\b",
        ))
        .expect("valid regex")
    })
}

fn bracket_only() -> &'static Regex {
    BRACKET_ONLY.get_or_init(|| Regex::new(r"^[{}\[\](),;]+$").expect("valid regex"))
}

pub struct OrphanRunts;

impl Detector for OrphanRunts {
    fn name(&self) -> &'static str {
        "orphan-runts"
    }

    fn description(&self) -> &'static str {
        "Finds short spillover words alone on the last line of a text block"
    }

    fn detect(&self, ctx: &ScanContext) -> Result<Vec<Detection>> {
        let mut detections = Vec::new();
        let lines: Vec<&str> = ctx.content.lines().collect();

        let mut in_frame = false;
        let mut in_tikz = false;
        let mut in_tabular = false;
        let mut in_lstlisting = false;

        for (idx, line) in lines.iter().enumerate() {
            let raw = latex_code(line);

            if raw.contains(r"\begin{frame}") {
                in_frame = true;
                continue;
            }
            if raw.contains(r"\end{frame}") {
                in_frame = false;
                continue;
            }

            // Sub-regions where short lines are markup, not prose
            if raw.contains(r"\begin{tikzpicture}") {
                in_tikz = true;
            }
            if raw.contains(r"\end{tikzpicture}") {
                in_tikz = false;
                continue;
            }
            if raw.contains(r"\begin{tabular") || raw.contains(r"\begin{tabbing") {
                in_tabular = true;
            }
            if raw.contains(r"\end{tabular") || raw.contains(r"\end{tabbing") {
                in_tabular = false;
                continue;
            }
            if raw.contains(r"\begin{lstlisting}") {
                in_lstlisting = true;
            }
            if raw.contains(r"\end{lstlisting}") {
                in_lstlisting = false;
                continue;
            }

            if !in_frame || idx == 0 {
                continue;
            }
            if in_tikz || in_tabular || in_lstlisting {
                continue;
            }

            let stripped = raw.trim();
            if stripped.is_empty() {
                continue;
            }
            if structural_command().is_match(stripped) {
                continue;
            }
            // Brace/bracket-only lines are code constructs
            if bracket_only().is_match(stripped) {
                continue;
            }
            // Intentional labels
            if stripped.ends_with(':') {
                continue;
            }
            if stripped.starts_with('\\') {
                continue;
            }

            if stripped.chars().count() >= RUNT_WIDTH {
                continue;
            }

            // Nearest preceding non-blank content line, up to LOOKBACK back
            let mut prev = "";
            let lookback_floor = idx.saturating_sub(LOOKBACK);
            for j in (lookback_floor..idx).rev() {
                let candidate = latex_code(lines[j]).trim();
                if !candidate.is_empty() {
                    prev = candidate;
                    break;
                }
            }

            // Runt only when the preceding line is substantial prose
            if prev.chars().count() >= PROSE_WIDTH && !structural_command().is_match(prev) {
                detections.push(Detection::new(
                    IssueType::OrphanRunt,
                    format!("Orphan/runt word at line {}", idx + 1),
                    "Short word alone on last line of text block; \
                     rephrase to pull it back to the previous line",
                ));
            }
        }

        Ok(detections)
    }
}
