//! The six check runners. Each one reads external state (filesystem, network)
//! and returns its own ordered list of results; none of them fails as a whole.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::{AuditResult, Category};
use crate::profile;

pub mod code;
pub mod content;
pub mod data;
pub mod endpoints;
pub mod files;
pub mod security;

#[derive(Debug, Clone)]
pub struct CheckContext {
    pub root: PathBuf,
    pub server_url: String,
    pub timeout: Duration,
}

impl CheckContext {
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(profile::DATA_DIR)
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(profile::CONTENT_DIR)
    }
}

pub fn run(category: Category, ctx: &CheckContext) -> Vec<AuditResult> {
    match category {
        Category::File => files::run(ctx),
        Category::Endpoint => endpoints::run(ctx),
        Category::Data => data::run(ctx),
        Category::Content => content::run(ctx),
        Category::Security => security::run(ctx),
        Category::Code => code::run(ctx),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Invalid JSON - {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// `Ok(None)` when the file does not exist.
pub(crate) fn read_optional_text(path: &Path) -> Result<Option<String>, CheckError> {
    match crate::scan::read_text(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CheckError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// `Ok(None)` when the file does not exist.
pub(crate) fn read_optional_json(path: &Path) -> Result<Option<serde_json::Value>, CheckError> {
    let Some(text) = read_optional_text(path)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&text)?))
}
