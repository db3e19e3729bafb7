//! JSON reporter
//!
//! Outputs the full Report as pretty-printed JSON, for piping to jq or
//! consumption by CI. Batch runs serialize as a single array.

use crate::models::Report;
use anyhow::Result;

/// Render one report as JSON
pub fn render(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a batch of reports as a JSON array
pub fn render_batch(reports: &[Report]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["score"], 83);
        assert_eq!(parsed["status"], "COMMIT_READY");
        assert_eq!(parsed["auto_fail"], false);
        assert_eq!(parsed["issues"]["counts"]["total"], 2);
        assert_eq!(parsed["thresholds"]["commit"], 80);
        assert_eq!(
            parsed["issues"]["critical"][0]["type"],
            "undefined_citation"
        );
    }

    #[test]
    fn test_batch_is_an_array() {
        let reports = vec![test_report(), test_report()];
        let json_str = render_batch(&reports).expect("render batch");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed.as_array().expect("array").len(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let json_str = render_batch(&[]).expect("render batch");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed.as_array().expect("array").len(), 0);
    }
}
