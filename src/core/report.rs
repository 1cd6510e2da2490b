use serde::{Deserialize, Serialize};

use crate::core::{AuditResult, Category, Status};

pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_checks: usize,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub info: usize,
}

impl AuditSummary {
    pub fn tally<'a>(results: impl IntoIterator<Item = &'a AuditResult>) -> Self {
        let mut summary = Self::default();
        for r in results {
            summary.total_checks += 1;
            match r.status() {
                Status::Pass => summary.passed += 1,
                Status::Warn => summary.warnings += 1,
                Status::Fail => summary.failed += 1,
                Status::Info => summary.info += 1,
            }
        }
        summary
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Pass => self.passed,
            Status::Warn => self.warnings,
            Status::Fail => self.failed,
            Status::Info => self.info,
        }
    }
}

/// Per-category result lists, in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryResults {
    file: Vec<AuditResult>,
    endpoint: Vec<AuditResult>,
    data: Vec<AuditResult>,
    content: Vec<AuditResult>,
    security: Vec<AuditResult>,
    code: Vec<AuditResult>,
}

impl CategoryResults {
    pub fn set(&mut self, category: Category, results: Vec<AuditResult>) {
        *self.slot_mut(category) = results;
    }

    pub fn get(&self, category: Category) -> &[AuditResult] {
        match category {
            Category::File => &self.file,
            Category::Endpoint => &self.endpoint,
            Category::Data => &self.data,
            Category::Content => &self.content,
            Category::Security => &self.security,
            Category::Code => &self.code,
        }
    }

    /// Concatenation in the fixed category order.
    pub fn iter(&self) -> impl Iterator<Item = &AuditResult> {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).iter())
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_mut(&mut self, category: Category) -> &mut Vec<AuditResult> {
        match category {
            Category::File => &mut self.file,
            Category::Endpoint => &mut self.endpoint,
            Category::Data => &mut self.data,
            Category::Content => &mut self.content,
            Category::Security => &mut self.security,
            Category::Code => &mut self.code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub title: String,
    pub timestamp: String,
    pub server_url: String,
    pub project_root: String,
}

/// Complete audit outcome. Only [`AuditReport::new`] builds one, and it derives
/// the summary from the category lists so the counts always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    schema_version: String,
    tool_version: String,
    title: String,
    timestamp: String,
    server_url: String,
    project_root: String,
    summary: AuditSummary,
    file_audit: Vec<AuditResult>,
    endpoint_audit: Vec<AuditResult>,
    data_audit: Vec<AuditResult>,
    content_audit: Vec<AuditResult>,
    security_audit: Vec<AuditResult>,
    code_audit: Vec<AuditResult>,
    recommendations: Vec<String>,
}

impl AuditReport {
    pub fn new(meta: ReportMeta, results: CategoryResults, recommendations: Vec<String>) -> Self {
        let summary = AuditSummary::tally(results.iter());
        let CategoryResults {
            file,
            endpoint,
            data,
            content,
            security,
            code,
        } = results;
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            title: meta.title,
            timestamp: meta.timestamp,
            server_url: meta.server_url,
            project_root: meta.project_root,
            summary,
            file_audit: file,
            endpoint_audit: endpoint,
            data_audit: data,
            content_audit: content,
            security_audit: security,
            code_audit: code,
            recommendations,
        }
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn project_root(&self) -> &str {
        &self.project_root
    }

    pub fn summary(&self) -> &AuditSummary {
        &self.summary
    }

    pub fn results(&self, category: Category) -> &[AuditResult] {
        match category {
            Category::File => &self.file_audit,
            Category::Endpoint => &self.endpoint_audit,
            Category::Data => &self.data_audit,
            Category::Content => &self.content_audit,
            Category::Security => &self.security_audit,
            Category::Code => &self.code_audit,
        }
    }

    pub fn all_results(&self) -> impl Iterator<Item = &AuditResult> {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.results(c).iter())
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}
