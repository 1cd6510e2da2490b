use std::fmt::Write as _;

use crate::core::{AuditReport, Category};

pub fn render_markdown(report: &AuditReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}", report.title());
    let _ = writeln!(out);
    let _ = writeln!(out, "**Generated:** {}  ", report.timestamp());
    let _ = writeln!(out, "**Server:** {}  ", report.server_url());
    let _ = writeln!(out, "**Project root:** `{}`", report.project_root());
    let _ = writeln!(out);

    let s = report.summary();
    let _ = writeln!(out, "## Executive Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metric | Count |");
    let _ = writeln!(out, "|--------|-------|");
    let _ = writeln!(out, "| Total Checks | {} |", s.total_checks);
    let _ = writeln!(out, "| Passed | {} |", s.passed);
    let _ = writeln!(out, "| Warnings | {} |", s.warnings);
    let _ = writeln!(out, "| Failed | {} |", s.failed);
    let _ = writeln!(out, "| Info | {} |", s.info);

    for category in Category::ALL {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", category.title());
        let _ = writeln!(out);
        let results = report.results(category);
        if results.is_empty() {
            let _ = writeln!(out, "_No checks were run._");
            continue;
        }
        let _ = writeln!(out, "| {} | Status | Details |", category.subject_label());
        let _ = writeln!(out, "|-------|--------|---------|");
        for r in results {
            let status = r.status();
            let _ = writeln!(
                out,
                "| {} | {} {} | {} |",
                escape_cell(category.display_name(r.name())),
                status.symbol(),
                status.as_str().to_ascii_uppercase(),
                escape_cell(r.message())
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Recommendations");
    let _ = writeln!(out);
    for (i, rec) in report.recommendations().iter().enumerate() {
        let _ = writeln!(out, "{}. {rec}", i + 1);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "---");
    let _ = writeln!(out);
    out.push_str(OPERATIONAL_SCHEDULE);
    let _ = writeln!(out);
    let _ = writeln!(out, "---");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "*Report generated by pipeline-audit {}*",
        report.tool_version()
    );
    out
}

const OPERATIONAL_SCHEDULE: &str = r#"## Automation Flow Overview

### Daily Flow (09:00 Amsterdam)
1. `/daily-news-collection` - Scrape 8 Dutch recruitment sources
2. `/upload-to-sheets` - Score articles and upload to Google Sheets
3. HTML report generation
4. Email notification with daily summary

### Weekly Flow (Sunday 10:00)
1. `/weekly-content-creation` - Analyze top articles from the week
2. Generate 4 LinkedIn content formats:
   - Weekly Roundup (Social media post)
   - Insight Post (Single trend focus)
   - Trend Analysis (Data-driven)
   - Long-form Article (Comprehensive)
3. Save markdown files to `/content` directory
4. Email notification with content options
5. **Manual LinkedIn posting** (human review required)

### Content Types
- **weeklyRoundup**: Overview of top 5 articles for quick social sharing
- **insightPost**: Deep dive into one trending topic
- **trendAnalysis**: Data-driven analysis with statistics
- **longFormArticle**: Comprehensive article for LinkedIn publishing
"#;

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\r', '\n'], " ")
}
