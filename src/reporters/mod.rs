//! Output reporters for quality reports
//!
//! Supported formats:
//! - `text` - Terminal output with colors, gap analysis, and actions
//! - `json` - Machine-readable JSON (single report or batch array)
//! - `markdown` - GitHub-flavored Markdown for PR comments

mod json;
mod markdown;
mod text;

pub use json::render_batch;

use crate::models::Report;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Presentation switches shared by the text and markdown reporters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Counts only, no per-issue detail
    pub summary: bool,
    /// Include minor issues
    pub verbose: bool,
}

/// Render one report in the requested format
pub fn render(report: &Report, format: OutputFormat, opts: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, opts),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report, opts),
    }
}
