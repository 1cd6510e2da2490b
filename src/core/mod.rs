mod category;
mod report;
mod result;
mod status;

pub use category::Category;
pub use report::{AuditReport, AuditSummary, CategoryResults, ReportMeta, SCHEMA_VERSION};
pub use result::{AuditResult, Details};
pub(crate) use result::now_rfc3339;
pub use status::Status;
