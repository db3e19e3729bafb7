//! Hardcoded absolute path detector
//!
//! Scripts that open `/Users/alice/...` or `C:\data\...` only run on one
//! machine. Flags quoted absolute paths per non-comment line: Unix-style
//! paths under well-known roots unconditionally, and drive-letter paths
//! unless the line carries a URL (schemes like `https:` would otherwise
//! match the `letter:` shape).

use crate::detectors::{Detection, Detector, ScanContext};
use crate::models::{FileKind, IssueType};
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

static UNIX_ROOT: OnceLock<Regex> = OnceLock::new();
static DRIVE_LETTER: OnceLock<Regex> = OnceLock::new();
static URL_SCHEME: OnceLock<Regex> = OnceLock::new();

fn unix_root() -> &'static Regex {
    UNIX_ROOT.get_or_init(|| {
        Regex::new(r#"["'][/\\](?:Users|home|tmp|var|etc)[/\\]"#).expect("valid regex")
    })
}

fn drive_letter() -> &'static Regex {
    DRIVE_LETTER.get_or_init(|| Regex::new(r#"["'][A-Za-z]:[/\\]"#).expect("valid regex"))
}

fn url_scheme() -> &'static Regex {
    URL_SCHEME.get_or_init(|| Regex::new(r"http:|https:").expect("valid regex"))
}

pub struct HardcodedPaths {
    kind: FileKind,
}

impl HardcodedPaths {
    pub fn new(kind: FileKind) -> Self {
        HardcodedPaths { kind }
    }

    fn suggestion(&self) -> &'static str {
        match self.kind {
            FileKind::AnalysisScript => "Use global macros ($root, $data, etc.)",
            _ => "Use relative paths or Path() objects",
        }
    }
}

impl Detector for HardcodedPaths {
    fn name(&self) -> &'static str {
        "hardcoded-paths"
    }

    fn description(&self) -> &'static str {
        "Detects quoted absolute filesystem paths"
    }

    fn detect(&self, ctx: &ScanContext) -> Result<Vec<Detection>> {
        let mut detections = Vec::new();

        for (i, line) in ctx.content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.starts_with('*') || trimmed.starts_with("//") {
                continue;
            }

            let hit = if unix_root().is_match(line) {
                true
            } else {
                // URL exception applies to the drive-letter branch only
                drive_letter().is_match(line) && !url_scheme().is_match(line)
            };

            if hit {
                detections.push(Detection::new(
                    IssueType::HardcodedPath,
                    format!("Hardcoded absolute path at line {}", i + 1),
                    self.suggestion(),
                ));
            }
        }

        Ok(detections)
    }
}
