mod support;

use support::{CLOSED_SERVER, make_temp_root, run, write_file};

#[test]
fn strict_mode_exits_1_when_checks_fail() {
    let root = make_temp_root("exit-strict");
    let out = run(&root, &["files", "--strict", "--quiet"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("check(s) failed"), "{stderr}");
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn failed_checks_do_not_change_exit_code_without_strict() {
    let root = make_temp_root("exit-lenient");
    let out = run(&root, &["files", "--quiet"]);
    assert_eq!(out.status.code(), Some(0));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn unwritable_report_dir_exits_10() {
    let root = make_temp_root("exit-report-dir");
    write_file(&root, "blocked", "not a directory\n");
    let out = run(
        &root,
        &["--report-dir", "blocked/reports", "-s", CLOSED_SERVER, "--timeout", "2"],
    );
    assert_eq!(out.status.code(), Some(10));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to create report directory"), "{stderr}");
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn zero_timeout_exits_2() {
    let root = make_temp_root("exit-timeout");
    assert_eq!(run(&root, &["--timeout", "0"]).status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_root_exits_2() {
    let root = make_temp_root("exit-root");
    assert_eq!(run(&root, &["--root", "does-not-exist"]).status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&root);
}
