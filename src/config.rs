//! Optional project configuration
//!
//! Loads `scorecard.toml` from the working directory (or an explicit
//! `--config` path). Absence of the file is not an error; parse failures
//! fall back to defaults with a warning so a broken config never blocks
//! a scoring run.
//!
//! ```toml
//! # scorecard.toml
//!
//! [validator]
//! program = "python3"
//! timeout_secs = 10
//!
//! [bibliography]
//! filename = "refs.bib"
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// External syntax validator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Interpreter used for `python -m py_compile`
    pub program: String,
    /// Kill the check after this many seconds; 0 disables the check
    pub timeout_secs: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            program: "python".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Companion bibliography settings for slide decks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BibliographyConfig {
    /// Filename looked up next to (and one directory above) the deck
    pub filename: String,
}

impl Default for BibliographyConfig {
    fn default() -> Self {
        BibliographyConfig {
            filename: "bibliography.bib".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validator: ValidatorConfig,
    pub bibliography: BibliographyConfig,
}

impl Config {
    /// Load configuration, falling back to defaults when the file is
    /// missing or unparseable.
    pub fn load(explicit: Option<&Path>) -> Config {
        let path = explicit.unwrap_or_else(|| Path::new("scorecard.toml"));

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => {
                debug!("no config at {}, using defaults", path.display());
                return Config::default();
            }
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => {
                debug!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("failed to parse {}: {e}; using defaults", path.display());
                Config::default()
            }
        }
    }
}
