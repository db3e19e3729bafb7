//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Suited for PR comments and CI job summaries. Output is deterministic
//! for identical reports (no timestamps), so re-posting a comment on an
//! unchanged file produces no diff.

use crate::models::{Issue, Report, Status};
use crate::reporters::RenderOptions;
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &Report, opts: &RenderOptions) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');
    md.push_str(&render_gates(report));

    if !opts.summary {
        md.push('\n');
        md.push_str(&render_issues(report, opts));
    }

    Ok(md)
}

fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Excellence => "🏆",
        Status::PrReady => "✅",
        Status::CommitReady => "✅",
        Status::Blocked => "🚫",
        Status::Fail => "💀",
    }
}

fn render_header(report: &Report) -> String {
    let counts = &report.issues.counts;
    format!(
        r#"# Quality Score: {}

**Status: {} {}** | **Score: {}/100**

| Metric | Value |
|--------|-------|
| Score | {}/100 |
| Status | {} |
| Auto-fail | {} |
| Issues | {} ({} critical, {} major, {} minor) |
"#,
        report.filepath.display(),
        status_marker(report.status),
        report.status,
        report.score,
        report.score,
        report.status,
        if report.auto_fail { "yes" } else { "no" },
        counts.total,
        counts.critical,
        counts.major,
        counts.minor,
    )
}

fn render_gates(report: &Report) -> String {
    let t = &report.thresholds;
    let met = |cutoff: u32| {
        if report.auto_fail {
            "no (auto-fail)"
        } else if report.score >= cutoff {
            "yes"
        } else {
            "no"
        }
    };

    format!(
        r#"## Quality Gates

| Gate | Cutoff | Met |
|------|--------|-----|
| Commit | {} | {} |
| PR | {} | {} |
| Excellence | {} | {} |
"#,
        t.commit,
        met(t.commit),
        t.pr,
        met(t.pr),
        t.excellence,
        met(t.excellence),
    )
}

fn render_issue_list(title: &str, issues: &[Issue]) -> String {
    let mut md = format!("### {} ({})\n\n", title, issues.len());
    for (i, issue) in issues.iter().enumerate() {
        md.push_str(&format!(
            "{}. **{}** (-{} points)\n   - {}\n",
            i + 1,
            issue.description,
            issue.points,
            issue.details
        ));
    }
    md.push('\n');
    md
}

fn render_issues(report: &Report, opts: &RenderOptions) -> String {
    if report.issues.is_empty() {
        return "## Issues\n\nNone found.\n".to_string();
    }

    let mut md = String::from("## Issues\n\n");
    if !report.issues.critical.is_empty() {
        md.push_str(&render_issue_list("Critical (must fix)", &report.issues.critical));
    }
    if !report.issues.major.is_empty() {
        md.push_str(&render_issue_list("Major (should fix)", &report.issues.major));
    }
    if !report.issues.minor.is_empty() && opts.verbose {
        md.push_str(&render_issue_list("Minor (nice-to-have)", &report.issues.minor));
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_markdown_structure() {
        let report = test_report();
        let md = render(&report, &RenderOptions::default()).expect("render");

        assert!(md.starts_with("# Quality Score: slides/Lecture01.tex"));
        assert!(md.contains("**Score: 83/100**"));
        assert!(md.contains("| Commit | 80 | yes |"));
        assert!(md.contains("| PR | 90 | no |"));
        assert!(md.contains("### Critical (must fix) (1)"));
        // Minor issues only with verbose
        assert!(!md.contains("Minor (nice-to-have)"));
    }

    #[test]
    fn test_verbose_includes_minor() {
        let report = test_report();
        let opts = RenderOptions {
            summary: false,
            verbose: true,
        };
        let md = render(&report, &opts).expect("render");
        assert!(md.contains("### Minor (nice-to-have) (1)"));
    }

    #[test]
    fn test_summary_skips_issue_detail() {
        let report = test_report();
        let opts = RenderOptions {
            summary: true,
            verbose: false,
        };
        let md = render(&report, &opts).expect("render");
        assert!(md.contains("Quality Gates"));
        assert!(!md.contains("## Issues"));
    }

    #[test]
    fn test_auto_fail_marks_all_gates_unmet() {
        let mut report = test_report();
        report.auto_fail = true;
        report.score = 0;
        report.status = crate::models::Status::Fail;
        let md = render(&report, &RenderOptions::default()).expect("render");
        assert!(md.contains("| Commit | 80 | no (auto-fail) |"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let report = test_report();
        let a = render(&report, &RenderOptions::default()).expect("render");
        let b = render(&report, &RenderOptions::default()).expect("render");
        assert_eq!(a, b);
    }
}
