use anyhow::Error;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

use crate::core::{AuditResult, AuditSummary, Category, Status};
use crate::report::SavedReports;

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub color: bool,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn eprintln_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error:");
    let _ = writeln!(stderr, "  {err}");

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        let _ = writeln!(stderr, "caused by:");
        for cause in causes {
            let _ = writeln!(stderr, "  - {cause}");
        }
    }

    let _ = writeln!(stderr, "next:");
    let _ = writeln!(
        stderr,
        "  - rerun with `--verbose` for diagnostic logs"
    );
    let _ = writeln!(
        stderr,
        "  - see `pipeline-audit --help` for commands and options"
    );
}

pub fn print_banner(title: &str, server_url: &str, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", emphasize(title, cfg.color));
    let _ = writeln!(out, "server: {server_url}");
}

pub fn print_category(category: Category, results: &[AuditResult], cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }
    let mut out = io::stdout().lock();
    let _ = writeln!(out);
    let _ = writeln!(out, "{} ({})", emphasize(category.title(), cfg.color), results.len());
    print_results_table(&mut out, category, results, cfg.color);
}

pub fn print_summary(summary: &AuditSummary, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }
    let mut out = io::stdout().lock();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", emphasize("Summary", cfg.color));
    let _ = writeln!(out, "  total checks: {}", summary.total_checks);
    for status in Status::ALL {
        let count = summary.count(status);
        if count == 0 && matches!(status, Status::Warn | Status::Fail) {
            continue;
        }
        let _ = writeln!(
            out,
            "  {}: {count}",
            format_status(status, cfg.color)
        );
    }
}

pub fn print_recommendations(recommendations: &[String], cfg: &UiConfig) {
    if cfg.quiet || !cfg.verbose {
        return;
    }
    let mut out = io::stdout().lock();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", emphasize("Recommendations", cfg.color));
    for (i, rec) in recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {rec}", i + 1);
    }
}

pub fn print_saved(saved: &SavedReports, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }
    let mut out = io::stdout().lock();
    let _ = writeln!(out);
    if let Some(path) = &saved.json {
        let _ = writeln!(out, "JSON report saved: {}", path.display());
    }
    if let Some(path) = &saved.markdown {
        let _ = writeln!(out, "Markdown report saved: {}", path.display());
    }
}

fn print_results_table(out: &mut dyn Write, category: Category, results: &[AuditResult], color: bool) {
    if results.is_empty() {
        let _ = writeln!(out, "  (no checks)");
        return;
    }

    let name_w = results
        .iter()
        .map(|r| visible_width_ansi(category.display_name(r.name())))
        .max()
        .unwrap_or(0);
    let status_w = Status::ALL
        .iter()
        .map(|s| visible_width_ansi(&status_cell(*s)))
        .max()
        .unwrap_or(0);

    for r in results {
        let status = pad_end_ansi(&format_status(r.status(), color), status_w);
        let name = pad_end_ansi(category.display_name(r.name()), name_w);
        let _ = writeln!(out, "  {status}  {name}  {}", r.message());
    }
}

fn status_cell(status: Status) -> String {
    format!("{} {}", status.symbol(), status.as_str().to_ascii_uppercase())
}

fn format_status(status: Status, color: bool) -> String {
    let s = status_cell(status);
    if !color {
        return s;
    }

    let code = match status {
        Status::Pass => "32",
        Status::Warn => "33",
        Status::Fail => "31",
        Status::Info => "34",
    };
    format!("\x1b[{code}m{s}\x1b[0m")
}

fn emphasize(s: &str, color: bool) -> String {
    if color {
        format!("\x1b[1;35m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

fn pad_end_ansi(s: &str, width: usize) -> String {
    let w = visible_width_ansi(s);
    if w >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - w))
}

fn visible_width_ansi(s: &str) -> usize {
    let mut width: usize = 0;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            let _ = chars.next();
            for ch2 in chars.by_ref() {
                if ch2 == 'm' {
                    break;
                }
            }
            continue;
        }
        width = width.saturating_add(UnicodeWidthChar::width(ch).unwrap_or(0));
    }
    width
}
