use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::json;

use crate::checks::{CheckContext, read_optional_text};
use crate::core::AuditResult;
use crate::profile;
use crate::scan;

pub fn run(ctx: &CheckContext) -> Vec<AuditResult> {
    let mut out = vec![scan_sources(&ctx.root)];
    out.extend(check_env_file(&ctx.root));
    out.push(check_gitignore(&ctx.root));
    out.extend(check_cors(&ctx.root.join(profile::SERVER_SOURCE)));
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityIssue {
    pub file: String,
    pub issue: String,
    pub matches: usize,
}

pub fn scan_sources(root: &Path) -> AuditResult {
    const ID: &str = "security_code_scan";

    let sources = match scan::list_matching(root, profile::SOURCE_GLOB) {
        Ok(sources) => sources,
        Err(err) => {
            return AuditResult::fail(ID, "Source files could not be listed")
                .with_details(json!({"error": format!("{err:#}")}));
        }
    };
    let patterns = compile_patterns();

    let mut issues = Vec::new();
    for source in &sources {
        let text = match scan::read_text(&source.path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(file = %source.name, error = %err, "skipping unreadable source");
                continue;
            }
        };
        issues.extend(scan_text(&source.name, &text, &patterns));
    }

    if issues.is_empty() {
        return AuditResult::pass(ID, "No obvious security issues in code")
            .with_details(json!({"files_scanned": sources.len()}));
    }

    for issue in &issues {
        tracing::info!(file = %issue.file, issue = %issue.issue, matches = issue.matches, "potential security issue");
    }
    AuditResult::warn(
        ID,
        format!("Found {} potential security issues", issues.len()),
    )
    .with_details(json!({"issues": issues, "files_scanned": sources.len()}))
}

/// One issue per pattern that matches at least once.
pub fn scan_text(file: &str, text: &str, patterns: &[(Regex, &str)]) -> Vec<SecurityIssue> {
    patterns
        .iter()
        .filter_map(|(re, label)| {
            let matches = re.find_iter(text).count();
            (matches > 0).then(|| SecurityIssue {
                file: file.to_string(),
                issue: (*label).to_string(),
                matches,
            })
        })
        .collect()
}

pub fn compile_patterns() -> Vec<(Regex, &'static str)> {
    profile::SECURITY_PATTERNS
        .iter()
        .filter_map(|(pattern, label)| {
            match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(re) => Some((re, *label)),
                Err(err) => {
                    tracing::error!(label, error = %err, "invalid security pattern");
                    None
                }
            }
        })
        .collect()
}

fn check_env_file(root: &Path) -> Vec<AuditResult> {
    let env_file = profile::ENV_FILE;
    let secret = profile::REQUIRED_SECRET;

    match read_optional_text(&root.join(env_file)) {
        Ok(Some(text)) => {
            let configured = text.contains(secret);
            let secret_result = if configured {
                AuditResult::pass("security_webhook_secret", format!("{secret}: configured"))
            } else {
                AuditResult::warn("security_webhook_secret", format!("{secret}: not found"))
            };
            vec![
                AuditResult::pass("security_env_file", format!("{env_file} file exists")),
                secret_result,
            ]
        }
        Ok(None) => vec![AuditResult::warn(
            "security_env_file",
            format!("{env_file} file not found"),
        )],
        Err(err) => vec![
            AuditResult::pass("security_env_file", format!("{env_file} file exists")),
            AuditResult::warn(
                "security_webhook_secret",
                format!("{secret}: {env_file} could not be read"),
            )
            .with_details(json!({"error": err.to_string()})),
        ],
    }
}

/// The one security check that fails instead of warning: a secrets file that
/// version control does not ignore.
fn check_gitignore(root: &Path) -> AuditResult {
    const ID: &str = "security_gitignore";
    let env_file = profile::ENV_FILE;

    match read_optional_text(&root.join(profile::GITIGNORE_FILE)) {
        Ok(Some(text)) => {
            let ignored = text.contains(env_file);
            let message = format!("{env_file} in .gitignore: {ignored}");
            if ignored {
                AuditResult::pass(ID, message)
            } else {
                AuditResult::fail(ID, message)
            }
        }
        Ok(None) => AuditResult::warn(ID, ".gitignore not found"),
        Err(err) => AuditResult::warn(ID, ".gitignore could not be read")
            .with_details(json!({"error": err.to_string()})),
    }
}

/// `None` when the server source is absent.
fn check_cors(server_source: &Path) -> Option<AuditResult> {
    const ID: &str = "security_cors";

    let text = match read_optional_text(server_source) {
        Ok(text) => text?,
        Err(err) => {
            return Some(
                AuditResult::warn(ID, "CORS: server source could not be read")
                    .with_details(json!({"error": err.to_string()})),
            );
        }
    };
    Some(if has_open_cors(&text) {
        AuditResult::warn(ID, "CORS: Open (*)")
    } else {
        AuditResult::pass(ID, "CORS: Restricted")
    })
}

pub fn has_open_cors(source: &str) -> bool {
    Regex::new(profile::OPEN_CORS_PATTERN)
        .map(|re| re.is_match(source))
        .unwrap_or(false)
}
