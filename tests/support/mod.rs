#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

pub const CLOSED_SERVER: &str = "http://127.0.0.1:9";

pub fn audit_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pipeline-audit"));
    cmd.current_dir(root);
    cmd.env_remove("WEBHOOK_BASE_URL");
    cmd.env_remove("PIPELINE_AUDIT_CONFIG");
    cmd.env_remove("PIPELINE_AUDIT_TIMEOUT");
    cmd.env_remove("PIPELINE_AUDIT_REPORT_DIR");
    cmd.env_remove("PIPELINE_AUDIT_REPORT_FORMAT");
    cmd.env_remove("PIPELINE_AUDIT_UI_COLOR");
    cmd.env_remove("PIPELINE_AUDIT_LOG");
    cmd
}

pub fn run(root: &Path, args: &[&str]) -> Output {
    audit_cmd(root).args(args).output().expect("run pipeline-audit")
}

pub fn make_temp_root(tag: &str) -> PathBuf {
    static ROOT_SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = ROOT_SEQ.fetch_add(1, Ordering::Relaxed);
    let root = std::env::temp_dir().join(format!(
        "pipeline-audit-{tag}-{}-{seq}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).expect("create root");
    root
}

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

/// Report files in `dir` with the given extension, sorted by name.
pub fn reports_with_ext(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.extension().and_then(|x| x.to_str()) == Some(ext))
                .collect()
        })
        .unwrap_or_default();
    out.sort();
    out
}
