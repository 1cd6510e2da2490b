use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    File,
    Endpoint,
    Data,
    Content,
    Security,
    Code,
}

impl Category {
    /// Execution and report order.
    pub const ALL: [Category; 6] = [
        Category::File,
        Category::Endpoint,
        Category::Data,
        Category::Content,
        Category::Security,
        Category::Code,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::File => "file",
            Category::Endpoint => "endpoint",
            Category::Data => "data",
            Category::Content => "content",
            Category::Security => "security",
            Category::Code => "code",
        }
    }

    /// Key of the category's result list in the JSON report.
    pub const fn report_key(self) -> &'static str {
        match self {
            Category::File => "file_audit",
            Category::Endpoint => "endpoint_audit",
            Category::Data => "data_audit",
            Category::Content => "content_audit",
            Category::Security => "security_audit",
            Category::Code => "code_audit",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Category::File => "File Structure Audit",
            Category::Endpoint => "Endpoint Audit",
            Category::Data => "Data Integrity Audit",
            Category::Content => "Content Audit",
            Category::Security => "Security Audit",
            Category::Code => "Code Quality Audit",
        }
    }

    /// First column header of the category table.
    pub const fn subject_label(self) -> &'static str {
        match self {
            Category::File | Category::Security | Category::Code => "Check",
            Category::Endpoint => "Endpoint",
            Category::Data => "Data Source",
            Category::Content => "Content Type",
        }
    }

    /// Prefix stripped from result names when rendering tables.
    /// File results keep their `file_`/`dir_` prefix.
    pub const fn name_prefix(self) -> Option<&'static str> {
        match self {
            Category::File => None,
            Category::Endpoint => Some("endpoint_"),
            Category::Data => Some("data_"),
            Category::Content => Some("content_"),
            Category::Security => Some("security_"),
            Category::Code => Some("code_"),
        }
    }

    pub fn display_name<'a>(self, result_name: &'a str) -> &'a str {
        match self.name_prefix() {
            Some(prefix) => result_name.strip_prefix(prefix).unwrap_or(result_name),
            None => result_name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
