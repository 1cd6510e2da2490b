mod support;

use support::{CLOSED_SERVER, make_temp_root, run, write_file};

#[test]
fn single_category_does_not_persist_reports() {
    let root = make_temp_root("cmd-files");
    write_file(&root, "package.json", "{}\n");

    let out = run(&root, &["files", "--no-color"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(!root.join("audit-reports").exists());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("File Structure Audit"));
    assert!(stdout.contains("package.json exists"));
    assert!(stdout.contains("zapier-webhook-server.cjs is missing"));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn single_category_json_lists_results() {
    let root = make_temp_root("cmd-data-json");
    write_file(
        &root,
        "data/latest-dutch-news.json",
        r#"{"totalArticles": 12, "categories": {"hr": [], "tech": []}, "sources": ["a"]}"#,
    );

    let out = run(&root, &["data", "--json"]);
    assert_eq!(out.status.code(), Some(0));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    let results = v.as_array().expect("array of results");
    let news = results
        .iter()
        .find(|r| r["name"] == "data_latest_news")
        .expect("latest news result");
    assert_eq!(news["status"], "pass");
    assert_eq!(news["message"], "latest-dutch-news.json: 12 articles, 2 categories");
    assert_eq!(news["details"]["sources"], 1);
    assert!(news["timestamp"].is_string());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn invalid_output_format_exits_2() {
    let root = make_temp_root("cmd-bad-output");
    let out = run(&root, &["-o", "pdf"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!root.join("audit-reports").exists());
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn unknown_command_exits_2() {
    let root = make_temp_root("cmd-unknown");
    let out = run(&root, &["everything"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn root_flag_points_at_another_directory() {
    let cwd = make_temp_root("cmd-cwd");
    let project = make_temp_root("cmd-project");
    write_file(&project, "package.json", "{}\n");

    let project_arg = project.display().to_string();
    let out = run(
        &cwd,
        &["--root", &project_arg, "-s", CLOSED_SERVER, "--timeout", "2", "-o", "json"],
    );
    assert_eq!(out.status.code(), Some(0));
    assert!(project.join("audit-reports").is_dir());
    assert!(!cwd.join("audit-reports").exists());

    let _ = std::fs::remove_dir_all(&cwd);
    let _ = std::fs::remove_dir_all(&project);
}
