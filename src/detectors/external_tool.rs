//! External syntax validation
//!
//! Python files get a ground-truth syntax check by running
//! `python -m py_compile` as a subprocess. The interpreter may be absent
//! or wedged, so the outcome is an explicit enum rather than a bool:
//! only [`Validation::Invalid`] is fatal to the file's score, while
//! `Unavailable` and `TimedOut` mean the check is skipped and scoring
//! continues with the remaining detectors.
//!
//! The subprocess is polled with a hard deadline and killed on overrun;
//! a hung interpreter must never stall a batch run.

use crate::config::ValidatorConfig;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Poll interval while waiting for the subprocess.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of one external validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The tool ran and the file parses.
    Valid,
    /// The tool ran and rejected the file; carries its diagnostic text.
    Invalid(String),
    /// The tool could not be run at all (not installed, disabled,
    /// spawn failure). The check is skipped.
    Unavailable(String),
    /// The tool exceeded its deadline and was killed. The check is
    /// skipped; this is not evidence of a syntax error.
    TimedOut(u64),
}

/// Capability seam for syntax validation, so scoring never assumes an
/// interpreter exists in-process.
pub trait SyntaxValidator: Send + Sync {
    fn validate(&self, path: &Path) -> Validation;
}

/// Validates Python files via `python -m py_compile`.
pub struct PyCompileValidator {
    program: String,
    timeout_secs: u64,
}

impl PyCompileValidator {
    pub fn new(program: impl Into<String>, timeout_secs: u64) -> Self {
        PyCompileValidator {
            program: program.into(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.program.clone(), config.timeout_secs)
    }
}

impl SyntaxValidator for PyCompileValidator {
    fn validate(&self, path: &Path) -> Validation {
        if self.timeout_secs == 0 {
            return Validation::Unavailable("external syntax check disabled".to_string());
        }

        debug!("running {} -m py_compile {}", self.program, path.display());

        let mut command = Command::new(&self.program);
        command
            .arg("-m")
            .arg("py_compile")
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Validation::Unavailable(format!("{} not found", self.program));
            }
            Err(e) => {
                return Validation::Unavailable(format!("failed to run {}: {e}", self.program));
            }
        };

        wait_with_timeout(child, &self.program, self.timeout_secs)
    }
}

/// Poll for completion, killing the process at the deadline.
fn wait_with_timeout(mut child: Child, tool: &str, timeout_secs: u64) -> Validation {
    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                if status.success() {
                    return Validation::Valid;
                }
                let mut diagnostic = String::new();
                if let Some(mut stderr) = child.stderr.take() {
                    let _ = stderr.read_to_string(&mut diagnostic);
                }
                return Validation::Invalid(diagnostic);
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    warn!("{tool} timed out after {timeout_secs}s");
                    return Validation::TimedOut(timeout_secs);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Validation::Unavailable(format!("failed to wait for {tool}: {e}"));
            }
        }
    }
}

/// Test validator returning a fixed outcome.
#[cfg(test)]
pub(crate) struct StaticValidator(pub Validation);

#[cfg(test)]
impl SyntaxValidator for StaticValidator {
    fn validate(&self, _path: &Path) -> Validation {
        self.0.clone()
    }
}
