use std::path::Path;

use serde_json::json;

use crate::checks::CheckContext;
use crate::core::AuditResult;
use crate::profile;

pub fn run(ctx: &CheckContext) -> Vec<AuditResult> {
    check_layout(&ctx.root, profile::REQUIRED_FILES, profile::REQUIRED_DIRS)
}

/// Missing files fail; missing directories only warn.
pub fn check_layout(root: &Path, files: &[&str], dirs: &[&str]) -> Vec<AuditResult> {
    let mut out = Vec::with_capacity(files.len() + dirs.len());

    for name in files {
        let path = root.join(name);
        let id = format!("file_{name}");
        match std::fs::metadata(&path) {
            Ok(meta) => {
                let size = meta.len();
                tracing::debug!(file = %name, size, "required file present");
                out.push(
                    AuditResult::pass(id, format!("{name} exists ({size} bytes)"))
                        .with_details(json!({"path": path.display().to_string(), "size": size})),
                );
            }
            Err(_) => {
                tracing::debug!(file = %name, "required file missing");
                out.push(AuditResult::fail(id, format!("{name} is missing")));
            }
        }
    }

    for name in dirs {
        let path = root.join(name);
        let id = format!("dir_{name}");
        if !path.is_dir() {
            out.push(AuditResult::warn(id, format!("{name}/ is missing")));
            continue;
        }
        match crate::scan::count_entries(&path) {
            Ok(items) => out.push(
                AuditResult::pass(id, format!("{name}/ exists ({items} items)"))
                    .with_details(json!({"path": path.display().to_string(), "items": items})),
            ),
            Err(err) => out.push(
                AuditResult::warn(id, format!("{name}/ exists but is not readable"))
                    .with_details(json!({"error": format!("{err:#}")})),
            ),
        }
    }

    out
}
