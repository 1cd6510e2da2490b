use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct MatchedFile {
    pub path: PathBuf,
    pub name: String,
    pub modified: Option<SystemTime>,
}

/// Regular files directly inside `dir` whose name matches `pattern`, sorted by name.
///
/// Like shell globbing, a leading `*` does not match dot-files. A missing `dir`
/// yields an empty list.
pub fn list_matching(dir: &Path, pattern: &str) -> Result<Vec<MatchedFile>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let matcher = build_matcher(pattern)?;
    let include_hidden = pattern.starts_with('.');

    let mut out = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.starts_with('.') && !include_hidden {
            continue;
        }
        if !matcher.is_match(name) {
            continue;
        }
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
        out.push(MatchedFile {
            path: entry.path().to_path_buf(),
            name: name.to_string(),
            modified,
        });
    }
    Ok(out)
}

/// Number of entries (files and directories) directly inside `dir`.
pub fn count_entries(dir: &Path) -> Result<usize> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries.filter(|e| e.is_ok()).count())
}

/// Most recently modified file; ties keep the later name.
pub fn latest_modified(files: &[MatchedFile]) -> Option<&MatchedFile> {
    files.iter().max_by_key(|f| f.modified)
}

/// Reads a text file, replacing invalid UTF-8 sequences.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher> {
    let glob = Glob::new(pattern).with_context(|| format!("invalid glob: {pattern}"))?;
    Ok(glob.compile_matcher())
}
