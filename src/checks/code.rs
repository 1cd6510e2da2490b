use std::path::Path;

use serde_json::json;

use crate::checks::{CheckContext, read_optional_text};
use crate::core::AuditResult;
use crate::profile;
use crate::scan;

pub fn run(ctx: &CheckContext) -> Vec<AuditResult> {
    let mut out = Vec::new();

    match read_optional_text(&ctx.root.join(profile::CREATOR_SOURCE)) {
        Ok(Some(creator)) => {
            out.push(check_creator_methods(&creator));
            out.push(check_templates(&creator));
        }
        Ok(None) => {}
        Err(err) => out.push(
            AuditResult::fail("code_creator_source", format!("{} could not be read", profile::CREATOR_SOURCE))
                .with_details(json!({"error": err.to_string()})),
        ),
    }

    match read_optional_text(&ctx.root.join(profile::SERVER_SOURCE)) {
        Ok(Some(server)) => out.push(check_server_endpoints(&server)),
        Ok(None) => {}
        Err(err) => out.push(
            AuditResult::fail("code_server_source", format!("{} could not be read", profile::SERVER_SOURCE))
                .with_details(json!({"error": err.to_string()})),
        ),
    }

    out.push(check_error_handling(&ctx.root));
    out
}

struct Presence<'a> {
    found: Vec<&'a str>,
    missing: Vec<&'a str>,
}

impl<'a> Presence<'a> {
    fn of(text: &str, needles: &[&'a str]) -> Self {
        let (found, missing) = needles.iter().copied().partition(|n| text.contains(*n));
        Self { found, missing }
    }

    fn total(&self) -> usize {
        self.found.len() + self.missing.len()
    }
}

pub fn check_creator_methods(source: &str) -> AuditResult {
    let p = Presence::of(source, profile::CREATOR_METHODS);
    let message = format!(
        "Content creator: {}/{} methods found",
        p.found.len(),
        p.total()
    );
    let details = json!({"found": p.found, "missing": p.missing});
    if p.missing.is_empty() {
        AuditResult::pass("code_creator_methods", message).with_details(details)
    } else {
        AuditResult::warn("code_creator_methods", message).with_details(details)
    }
}

pub fn check_templates(source: &str) -> AuditResult {
    let p = Presence::of(source, profile::CONTENT_TEMPLATES);
    let message = format!(
        "Content templates: {}/{} configured",
        p.found.len(),
        p.total()
    );
    let details = json!({"templates": p.found, "missing": p.missing});
    if p.missing.is_empty() {
        AuditResult::pass("code_templates", message).with_details(details)
    } else {
        AuditResult::warn("code_templates", message).with_details(details)
    }
}

pub fn check_server_endpoints(source: &str) -> AuditResult {
    let p = Presence::of(source, profile::SERVER_ENDPOINT_LITERALS);
    let message = format!(
        "Webhook endpoints: {}/{} implemented",
        p.found.len(),
        p.total()
    );
    let details = json!({"endpoints": p.found, "missing": p.missing});
    if p.missing.is_empty() {
        AuditResult::pass("code_endpoints", message).with_details(details)
    } else {
        AuditResult::warn("code_endpoints", message).with_details(details)
    }
}

/// Coarse: counts source files containing at least one `try {` block.
pub fn check_error_handling(root: &Path) -> AuditResult {
    const ID: &str = "code_error_handling";

    let sources = match scan::list_matching(root, profile::SOURCE_GLOB) {
        Ok(sources) => sources,
        Err(err) => {
            return AuditResult::fail(ID, "Source files could not be listed")
                .with_details(json!({"error": format!("{err:#}")}));
        }
    };

    let mut with_handling = 0usize;
    for source in &sources {
        match scan::read_text(&source.path) {
            Ok(text) if text.contains(profile::ERROR_HANDLING_MARKER) => with_handling += 1,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(file = %source.name, error = %err, "skipping unreadable source");
            }
        }
    }

    let total = sources.len();
    let message = format!("Error handling: {with_handling}/{total} files use try-catch");
    let details = json!({"files_with_handling": with_handling, "total_files": total});
    if with_handling > profile::MIN_FILES_WITH_ERROR_HANDLING {
        AuditResult::pass(ID, message).with_details(details)
    } else {
        AuditResult::warn(ID, message).with_details(details)
    }
}
