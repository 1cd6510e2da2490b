//! Persists an [`AuditReport`] as JSON and/or Markdown under timestamped names.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::core::AuditReport;

mod json;
mod markdown;

pub use json::{from_json, to_json};
pub use markdown::render_markdown;

pub const DEFAULT_REPORT_DIR: &str = "audit-reports";
const FILE_STEM: &str = "audit-report";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Md,
    #[default]
    All,
}

impl ReportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Md => "md",
            ReportFormat::All => "all",
        }
    }

    pub const fn includes_json(self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::All)
    }

    pub const fn includes_markdown(self) -> bool {
        matches!(self, ReportFormat::Md | ReportFormat::All)
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "md" | "markdown" => Ok(ReportFormat::Md),
            "all" => Ok(ReportFormat::All),
            other => Err(format!("invalid output format: {other} (expected json|md|all)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedReports {
    pub json: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
}

/// Creates `dir` if needed and writes the requested formats. Existing reports
/// are never overwritten: a numeric suffix is added when the timestamped name is taken.
pub fn write_reports(
    report: &AuditReport,
    dir: &Path,
    format: ReportFormat,
    now: OffsetDateTime,
) -> Result<SavedReports> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report directory: {}", dir.display()))?;

    let stem = unique_stem(dir, &file_timestamp(now), format);
    let mut saved = SavedReports::default();

    if format.includes_json() {
        let path = dir.join(format!("{stem}.json"));
        let buf = to_json(report)?;
        std::fs::write(&path, buf)
            .with_context(|| format!("failed to write JSON report: {}", path.display()))?;
        tracing::info!(path = %path.display(), "JSON report saved");
        saved.json = Some(path);
    }

    if format.includes_markdown() {
        let path = dir.join(format!("{stem}.md"));
        std::fs::write(&path, render_markdown(report))
            .with_context(|| format!("failed to write Markdown report: {}", path.display()))?;
        tracing::info!(path = %path.display(), "Markdown report saved");
        saved.markdown = Some(path);
    }

    Ok(saved)
}

pub fn file_timestamp(now: OffsetDateTime) -> String {
    now.format(format_description!(
        "[year]-[month]-[day]_[hour]-[minute]-[second]"
    ))
    .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

fn unique_stem(dir: &Path, timestamp: &str, format: ReportFormat) -> String {
    let base = format!("{FILE_STEM}-{timestamp}");
    let taken = |stem: &str| {
        (format.includes_json() && dir.join(format!("{stem}.json")).exists())
            || (format.includes_markdown() && dir.join(format!("{stem}.md")).exists())
    };
    if !taken(&base) {
        return base;
    }
    let mut n: u32 = 1;
    loop {
        let stem = format!("{base}-{n}");
        if !taken(&stem) {
            return stem;
        }
        n = n.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AuditResult, Category, CategoryResults, ReportMeta};
    use std::sync::atomic::{AtomicU64, Ordering};
    use time::macros::datetime;

    fn make_temp_dir() -> PathBuf {
        static DIR_SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "pipeline-audit-report-test-{}-{seq}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn sample_report() -> AuditReport {
        let mut results = CategoryResults::default();
        results.set(Category::File, vec![AuditResult::pass("file_package.json", "ok")]);
        AuditReport::new(
            ReportMeta {
                title: "Audit".to_string(),
                timestamp: "2026-01-01T00:00:00Z".to_string(),
                server_url: "http://localhost:3000".to_string(),
                project_root: "/srv/pipeline".to_string(),
            },
            results,
            vec!["advice".to_string()],
        )
    }

    #[test]
    fn file_timestamp_is_sortable() {
        let now = datetime!(2026-03-04 05:06:07 UTC);
        assert_eq!(file_timestamp(now), "2026-03-04_05-06-07");
    }

    #[test]
    fn writes_both_formats_and_never_overwrites() {
        let dir = make_temp_dir().join("nested/audit-reports");
        let now = datetime!(2026-03-04 05:06:07 UTC);
        let report = sample_report();

        let first = write_reports(&report, &dir, ReportFormat::All, now).expect("write");
        assert_eq!(
            first.json.as_deref(),
            Some(dir.join("audit-report-2026-03-04_05-06-07.json").as_path())
        );
        assert!(first.markdown.as_deref().is_some_and(Path::exists));

        let second = write_reports(&report, &dir, ReportFormat::Json, now).expect("write");
        assert_eq!(
            second.json.as_deref(),
            Some(dir.join("audit-report-2026-03-04_05-06-07-1.json").as_path())
        );
        assert!(second.markdown.is_none());

        let _ = std::fs::remove_dir_all(dir.parent().and_then(Path::parent).expect("root"));
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let base = make_temp_dir();
        std::fs::create_dir_all(&base).expect("mkdir");
        let blocker = base.join("file");
        std::fs::write(&blocker, b"x").expect("write");

        let err = write_reports(
            &sample_report(),
            &blocker.join("reports"),
            ReportFormat::All,
            OffsetDateTime::now_utc(),
        )
        .expect_err("must fail");
        assert!(err.to_string().contains("failed to create report directory"));

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn format_parses_aliases() {
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Md));
        assert_eq!("markdown".parse::<ReportFormat>(), Ok(ReportFormat::Md));
        assert!("xml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::default(), ReportFormat::All);
    }
}
