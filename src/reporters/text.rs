//! Text (terminal) reporter with colors and gap analysis

use crate::models::{Report, Status};
use crate::reporters::RenderOptions;
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Status colors (ANSI escape codes)
fn status_color(status: Status) -> &'static str {
    match status {
        Status::Excellence => "\x1b[32m",  // Green
        Status::PrReady => "\x1b[92m",     // Light green
        Status::CommitReady => "\x1b[33m", // Yellow
        Status::Blocked => "\x1b[91m",     // Light red
        Status::Fail => "\x1b[31m",        // Red
    }
}

/// Render report as formatted terminal output
pub fn render(report: &Report, opts: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    let t = &report.thresholds;

    let name = report
        .filepath
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| report.filepath.display().to_string());

    let color = status_color(report.status);
    out.push_str(&format!("\n{BOLD}Quality Score: {name}{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{}/100{RESET}  Status: {color}{BOLD}{}{RESET}\n\n",
        report.score, report.status
    ));

    match report.status {
        Status::Blocked => {
            out.push_str(&format!(
                "BLOCKED - cannot commit (score < {})\n",
                t.commit
            ));
        }
        Status::CommitReady => {
            out.push_str(&format!("Ready for commit (score >= {})\n", t.commit));
            let gap = t.pr.saturating_sub(report.score);
            out.push_str(&format!("Next milestone: PR threshold ({}+)\n", t.pr));
            out.push_str(&format!("Gap analysis: need +{gap} points to reach PR quality\n"));
        }
        Status::PrReady => {
            out.push_str(&format!("Ready for PR (score >= {})\n", t.pr));
            let gap = t.excellence.saturating_sub(report.score);
            if gap > 0 {
                out.push_str(&format!("Next milestone: Excellence ({})\n", t.excellence));
                out.push_str(&format!("Gap analysis: +{gap} points to excellence\n"));
            }
        }
        Status::Excellence => {
            out.push_str(&format!(
                "Excellence achieved (score >= {})\n",
                t.excellence
            ));
        }
        Status::Fail => {
            out.push_str("Auto-fail (compilation/syntax error)\n");
        }
    }

    let counts = &report.issues.counts;
    if opts.summary {
        out.push_str(&format!(
            "\nTotal issues: {} ({} critical, {} major, {} minor)\n",
            counts.total, counts.critical, counts.major, counts.minor
        ));
        return Ok(out);
    }

    out.push_str(&format!(
        "\n{BOLD}CRITICAL ISSUES (MUST FIX): {}{RESET}\n",
        counts.critical
    ));
    if counts.critical == 0 {
        out.push_str("No critical issues - safe to commit\n");
    } else {
        for (i, issue) in report.issues.critical.iter().enumerate() {
            out.push_str(&format!(
                "{}. {BOLD}{}{RESET} (-{} points)\n   {DIM}{}{RESET}\n",
                i + 1,
                issue.description,
                issue.points,
                issue.details
            ));
        }
    }

    if counts.major > 0 {
        out.push_str(&format!(
            "\n{BOLD}MAJOR ISSUES (SHOULD FIX): {}{RESET}\n",
            counts.major
        ));
        for (i, issue) in report.issues.major.iter().enumerate() {
            out.push_str(&format!(
                "{}. {BOLD}{}{RESET} (-{} points)\n   {DIM}{}{RESET}\n",
                i + 1,
                issue.description,
                issue.points,
                issue.details
            ));
        }
    }

    if counts.minor > 0 && opts.verbose {
        out.push_str(&format!(
            "\n{BOLD}MINOR ISSUES (NICE-TO-HAVE): {}{RESET}\n",
            counts.minor
        ));
        for (i, issue) in report.issues.minor.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} (-{} points)\n",
                i + 1,
                issue.description,
                issue.points
            ));
        }
    }

    match report.status {
        Status::Blocked | Status::Fail => {
            out.push_str(&format!("\n{BOLD}Recommended actions{RESET}\n"));
            out.push_str("1. Fix all critical issues above\n");
            out.push_str(&format!(
                "2. Re-run quality score (target: >={})\n",
                t.commit
            ));
            out.push_str("3. Commit after reaching threshold\n");
        }
        Status::CommitReady => {
            let needed = t.pr.saturating_sub(report.score);
            out.push_str(&format!(
                "\n{BOLD}Recommended actions to reach PR threshold{RESET}\n"
            ));
            out.push_str(&format!("Need +{needed} points to reach {}/100\n", t.pr));
            if counts.major > 0 {
                out.push_str("Fix major issues listed above to improve score\n");
            }
        }
        _ => {}
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_full_report_contents() {
        let report = test_report();
        let out = render(&report, &RenderOptions::default()).expect("render");

        assert!(out.contains("Quality Score: Lecture01.tex"));
        assert!(out.contains("83/100"));
        assert!(out.contains("COMMIT_READY"));
        assert!(out.contains("CRITICAL ISSUES (MUST FIX): 1"));
        assert!(out.contains("smith2020"));
        assert!(out.contains("-15 points"));
        // Gap analysis: 90 - 83 = 7
        assert!(out.contains("+7 points"));
        // Minor issues hidden without --verbose
        assert!(!out.contains("MINOR ISSUES"));
    }

    #[test]
    fn test_verbose_shows_minor_issues() {
        let report = test_report();
        let opts = RenderOptions {
            summary: false,
            verbose: true,
        };
        let out = render(&report, &opts).expect("render");
        assert!(out.contains("MINOR ISSUES (NICE-TO-HAVE): 1"));
        assert!(out.contains("Orphan/runt word at line 12"));
    }

    #[test]
    fn test_summary_omits_details() {
        let report = test_report();
        let opts = RenderOptions {
            summary: true,
            verbose: false,
        };
        let out = render(&report, &opts).expect("render");
        assert!(out.contains("Total issues: 2 (1 critical, 0 major, 1 minor)"));
        assert!(!out.contains("CRITICAL ISSUES"));
    }

    #[test]
    fn test_auto_fail_wording() {
        let mut report = test_report();
        report.auto_fail = true;
        report.score = 0;
        report.status = crate::models::Status::Fail;
        let out = render(&report, &RenderOptions::default()).expect("render");
        assert!(out.contains("Auto-fail (compilation/syntax error)"));
        assert!(out.contains("Recommended actions"));
    }
}
