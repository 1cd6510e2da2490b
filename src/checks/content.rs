use std::path::Path;

use serde_json::json;

use crate::checks::CheckContext;
use crate::core::AuditResult;
use crate::profile;
use crate::scan;

pub fn run(ctx: &CheckContext) -> Vec<AuditResult> {
    check_content_dir(&ctx.content_dir())
}

pub fn check_content_dir(dir: &Path) -> Vec<AuditResult> {
    if !dir.is_dir() {
        return vec![AuditResult::warn(
            "content_dir",
            "Content directory does not exist",
        )];
    }
    match scan::count_entries(dir) {
        Ok(0) => {
            return vec![AuditResult::info("content_dir", "Content directory is empty")];
        }
        Ok(_) => {}
        Err(err) => {
            return vec![
                AuditResult::fail("content_dir", "Content directory could not be read")
                    .with_details(json!({"error": format!("{err:#}")})),
            ];
        }
    }

    let mut out = Vec::new();
    for content_type in profile::CONTENT_TYPES {
        out.push(count_content_type(dir, content_type));
    }
    if let Some(quality) = latest_content_quality(dir) {
        out.push(quality);
    }
    out.push(count_metadata(dir));
    out
}

fn count_content_type(dir: &Path, content_type: &str) -> AuditResult {
    let id = format!("content_{content_type}");
    let pattern = format!("*-{content_type}.md");
    let files = match scan::list_matching(dir, &pattern) {
        Ok(files) => files,
        Err(err) => {
            return AuditResult::fail(id, format!("{content_type}: files could not be listed"))
                .with_details(json!({"error": format!("{err:#}")}));
        }
    };

    let count = files.len();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    let message = format!("{content_type}: {count} files");
    let details = json!({"content_type": content_type, "count": count, "files": names});
    tracing::debug!(content_type, count, "content files counted");
    if count > 0 {
        AuditResult::pass(id, message).with_details(details)
    } else {
        AuditResult::info(id, message).with_details(details)
    }
}

/// Scores the most recently modified markdown file. `None` when there is none.
fn latest_content_quality(dir: &Path) -> Option<AuditResult> {
    const ID: &str = "content_quality";

    let files = match scan::list_matching(dir, "*.md") {
        Ok(files) => files,
        Err(err) => {
            return Some(
                AuditResult::fail(ID, "Content files could not be listed")
                    .with_details(json!({"error": format!("{err:#}")})),
            );
        }
    };
    let latest = scan::latest_modified(&files)?;

    let text = match scan::read_text(&latest.path) {
        Ok(text) => text,
        Err(err) => {
            return Some(
                AuditResult::fail(ID, format!("Latest content: {} could not be read", latest.name))
                    .with_details(json!({"file": latest.name, "error": err.to_string()})),
            );
        }
    };

    let quality = ContentQuality::measure(&text);
    let message = format!("Latest content: {} ({} words)", latest.name, quality.word_count);
    let details = json!({
        "file": latest.name,
        "word_count": quality.word_count,
        "has_hashtags": quality.has_hashtags,
        "has_keywords": quality.has_keywords,
    });
    Some(if quality.is_acceptable() {
        AuditResult::pass(ID, message).with_details(details)
    } else {
        AuditResult::warn(ID, message).with_details(details)
    })
}

fn count_metadata(dir: &Path) -> AuditResult {
    const ID: &str = "content_metadata";
    match scan::list_matching(dir, profile::METADATA_GLOB) {
        Ok(files) => {
            let count = files.len();
            let message = format!("Metadata files: {count}");
            let details = json!({"count": count});
            if count > 0 {
                AuditResult::pass(ID, message).with_details(details)
            } else {
                AuditResult::info(ID, message).with_details(details)
            }
        }
        Err(err) => AuditResult::fail(ID, "Metadata files could not be listed")
            .with_details(json!({"error": format!("{err:#}")})),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentQuality {
    pub word_count: usize,
    pub has_hashtags: bool,
    pub has_keywords: bool,
}

impl ContentQuality {
    pub fn measure(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            word_count: text.split_whitespace().count(),
            has_hashtags: text.contains('#'),
            has_keywords: profile::CONTENT_KEYWORDS
                .iter()
                .any(|keyword| lower.contains(keyword)),
        }
    }

    /// All three heuristics must hold.
    pub fn is_acceptable(self) -> bool {
        self.word_count > profile::MIN_CONTENT_WORDS && self.has_hashtags && self.has_keywords
    }
}
