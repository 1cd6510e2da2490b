use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::time::Duration;

use serde_json::json;

use crate::checks::{self, CheckContext};
use crate::core::{AuditReport, AuditResult, Category, CategoryResults, ReportMeta};

pub const DEFAULT_TITLE: &str = "Dutch Recruitment Intelligence - Audit Report";

/// Everything the orchestrator needs, resolved up front by the caller.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub root: PathBuf,
    pub server_url: String,
    pub timeout: Duration,
    pub title: String,
    pub show_progress: bool,
}

#[derive(Debug, Clone)]
pub struct Auditor {
    opts: AuditOptions,
}

impl Auditor {
    pub fn new(opts: AuditOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &AuditOptions {
        &self.opts
    }

    fn context(&self) -> CheckContext {
        CheckContext {
            root: self.opts.root.clone(),
            server_url: self.opts.server_url.clone(),
            timeout: self.opts.timeout,
        }
    }

    /// Runs one category. A runner that panics is reported as a single `fail`.
    pub fn run_category(&self, category: Category) -> Vec<AuditResult> {
        let ctx = self.context();

        let pb = if self.opts.show_progress {
            let pb = indicatif::ProgressBar::new_spinner();
            pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
            pb.set_message(format!("{}...", category.title()));
            pb.enable_steady_tick(Duration::from_millis(120));
            Some(pb)
        } else {
            None
        };

        tracing::info!(%category, "running checks");
        let outcome = catch_unwind(AssertUnwindSafe(|| checks::run(category, &ctx)));

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        match outcome {
            Ok(results) => results,
            Err(payload) => {
                let error = panic_message(payload.as_ref());
                tracing::error!(%category, %error, "check runner aborted");
                vec![
                    AuditResult::fail(
                        format!("{category}_runner"),
                        format!("{} aborted: {error}", category.title()),
                    )
                    .with_details(json!({"error": error})),
                ]
            }
        }
    }

    pub fn run_full(&self) -> AuditReport {
        self.run_full_with(|_, _| {})
    }

    /// Runs all six categories in order, handing each result list to
    /// `on_category` as soon as it is complete.
    pub fn run_full_with(
        &self,
        mut on_category: impl FnMut(Category, &[AuditResult]),
    ) -> AuditReport {
        let mut results = CategoryResults::default();
        for category in Category::ALL {
            let out = self.run_category(category);
            on_category(category, &out);
            results.set(category, out);
        }

        let meta = ReportMeta {
            title: self.opts.title.clone(),
            timestamp: crate::core::now_rfc3339(),
            server_url: self.opts.server_url.clone(),
            project_root: self.opts.root.display().to_string(),
        };
        aggregate(meta, results)
    }
}

/// Concatenates in category order, derives recommendations, and freezes the report.
pub fn aggregate(meta: ReportMeta, results: CategoryResults) -> AuditReport {
    let all: Vec<AuditResult> = results.iter().cloned().collect();
    let recommendations = crate::rules::recommend(&all);
    AuditReport::new(meta, results, recommendations)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
