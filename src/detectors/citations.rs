//! Broken citation detector
//!
//! Extracts every `\cite*{...}` key from the deck, every `@entry{key,`
//! from the companion bibliography, and reports the set difference. With
//! no bibliography available, every cited key is reported as broken.
//!
//! Keys are collected into ordered sets so the report is deterministic
//! for identical input.

use crate::detectors::{Detection, Detector, ScanContext};
use crate::models::IssueType;
use anyhow::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

static CITE_PATTERN: OnceLock<Regex> = OnceLock::new();
static BIB_KEY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn cite_pattern() -> &'static Regex {
    // \cite plus any lowercase suffix (\citep, \citet, \citeauthor, ...)
    CITE_PATTERN.get_or_init(|| Regex::new(r"\\cite[a-z]*\{([^}]+)\}").expect("valid regex"))
}

fn bib_key_pattern() -> &'static Regex {
    BIB_KEY_PATTERN.get_or_init(|| Regex::new(r"@\w+\{([^,]+),").expect("valid regex"))
}

/// Locate the companion bibliography for a deck.
///
/// Checks two fixed candidates: `../<filename>` relative to the deck's
/// directory first (the repo convention of `slides/` next to a shared
/// bibliography), then the deck's own directory. Absence is not an
/// error; it just degrades the citation check.
pub fn locate_bibliography(deck_path: &Path, filename: &str) -> Option<PathBuf> {
    let dir = deck_path.parent()?;
    let candidates = [
        dir.parent().map(|p| p.join(filename)),
        Some(dir.join(filename)),
    ];
    for candidate in candidates.into_iter().flatten() {
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    debug!(
        "no bibliography named {filename} near {}",
        deck_path.display()
    );
    None
}

/// All keys cited anywhere in the deck, deduplicated and ordered.
fn cited_keys(content: &str) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for cap in cite_pattern().captures_iter(content) {
        if let Some(group) = cap.get(1) {
            for key in group.as_str().split(',') {
                let key = key.trim();
                if !key.is_empty() {
                    keys.insert(key.to_string());
                }
            }
        }
    }
    keys
}

/// All entry keys defined in a bibliography source.
fn defined_keys(bib_content: &str) -> BTreeSet<String> {
    bib_key_pattern()
        .captures_iter(bib_content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

pub struct BrokenCitations;

impl Detector for BrokenCitations {
    fn name(&self) -> &'static str {
        "broken-citations"
    }

    fn description(&self) -> &'static str {
        "Finds citation keys missing from the bibliography"
    }

    fn detect(&self, ctx: &ScanContext) -> Result<Vec<Detection>> {
        let cited = cited_keys(ctx.content);
        if cited.is_empty() {
            return Ok(vec![]);
        }

        if ctx.bibliography.is_none() {
            debug!(
                "no bibliography for {}; every cited key is unresolved",
                ctx.path.display()
            );
        }
        let defined = ctx.bibliography.map(defined_keys).unwrap_or_default();

        Ok(cited
            .difference(&defined)
            .map(|key| {
                Detection::new(
                    IssueType::UndefinedCitation,
                    format!("Citation key not in bibliography: {key}"),
                    "Add to bibliography.bib or fix key",
                )
            })
            .collect())
    }
}
