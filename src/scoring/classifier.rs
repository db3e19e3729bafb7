//! Quality gate classification
//!
//! Pure mapping from a final score (and the auto-fail flag) to a status
//! label. Auto-fail dominates: a structurally invalid file is `Fail` no
//! matter what the arithmetic says.

use crate::models::Status;
use crate::rubric::{COMMIT_THRESHOLD, EXCELLENCE_THRESHOLD, PR_THRESHOLD};

pub fn classify(score: u32, auto_fail: bool) -> Status {
    if auto_fail {
        Status::Fail
    } else if score >= EXCELLENCE_THRESHOLD {
        Status::Excellence
    } else if score >= PR_THRESHOLD {
        Status::PrReady
    } else if score >= COMMIT_THRESHOLD {
        Status::CommitReady
    } else {
        Status::Blocked
    }
}
