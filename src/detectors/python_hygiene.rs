//! Reproducibility and hygiene checks for Python scripts
//!
//! Three substring-based checks; the goal is catching the common sloppy
//! script, not parsing Python:
//!
//! - randomness APIs used without any seeding call
//! - no module-level docstring
//! - a `main`/`run` entry point defined without an `if __name__` guard

use crate::detectors::{Detection, Detector, ScanContext};
use crate::models::IssueType;
use anyhow::Result;

/// APIs whose presence marks the script as using randomness.
const RANDOM_APIS: &[&str] = &["np.random", "random.", "torch.manual_seed", "sklearn"];

/// Seeding calls that make randomness reproducible.
const SEED_APIS: &[&str] = &[
    "np.random.seed",
    "random.seed",
    "torch.manual_seed",
    "np.random.default_rng",
    "RandomState",
];

pub struct PythonHygiene;

impl PythonHygiene {
    fn missing_seed(content: &str) -> bool {
        let has_random = RANDOM_APIS.iter().any(|api| content.contains(api));
        let has_seed = SEED_APIS.iter().any(|api| content.contains(api));
        has_random && !has_seed
    }

    /// The first non-blank, non-comment, non-shebang line must open a
    /// docstring.
    fn missing_docstring(content: &str) -> bool {
        let stripped = content.trim_start();
        if stripped.starts_with("\"\"\"") || stripped.starts_with("'''") {
            return false;
        }
        for line in content.lines() {
            let l = line.trim();
            if l.is_empty() || l.starts_with('#') {
                continue;
            }
            return !(l.starts_with("\"\"\"") || l.starts_with("'''"));
        }
        true
    }

    fn missing_main_guard(content: &str) -> bool {
        (content.contains("def main") || content.contains("def run"))
            && !content.contains("__name__")
    }
}

impl Detector for PythonHygiene {
    fn name(&self) -> &'static str {
        "python-hygiene"
    }

    fn description(&self) -> &'static str {
        "Checks seeding, module docstring, and main guard"
    }

    fn detect(&self, ctx: &ScanContext) -> Result<Vec<Detection>> {
        let mut detections = Vec::new();

        if Self::missing_seed(ctx.content) {
            detections.push(Detection::new(
                IssueType::MissingSeed,
                "Missing random seed for reproducibility",
                "Add np.random.seed() or random.seed() at top of script",
            ));
        }

        if Self::missing_docstring(ctx.content) {
            detections.push(Detection::new(
                IssueType::MissingDocstring,
                "Missing module-level docstring",
                "Add a docstring describing the script purpose",
            ));
        }

        if Self::missing_main_guard(ctx.content) {
            detections.push(Detection::new(
                IssueType::NoMainGuard,
                "Missing `if __name__ == \"__main__\"` guard",
                "Add main guard for importability",
            ));
        }

        Ok(detections)
    }
}
