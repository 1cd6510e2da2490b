use std::path::Path;

use serde_json::{Value, json};

use crate::checks::{CheckContext, CheckError, read_optional_json};
use crate::core::AuditResult;
use crate::profile;

pub fn run(ctx: &CheckContext) -> Vec<AuditResult> {
    let dir = ctx.data_dir();
    vec![
        check_latest_news(&dir.join(profile::LATEST_NEWS_FILE)),
        check_weekly_articles(&dir.join(profile::WEEKLY_ARTICLES_FILE)),
        check_backups(&dir),
    ]
}

pub fn check_latest_news(path: &Path) -> AuditResult {
    const ID: &str = "data_latest_news";
    let file = profile::LATEST_NEWS_FILE;

    match read_optional_json(path) {
        Ok(Some(data)) => {
            let raw_total = data.get("totalArticles").cloned().unwrap_or(json!(0));
            let total_articles = article_count(&raw_total);
            let categories = collection_len(data.get("categories"));
            let sources = collection_len(data.get("sources"));
            tracing::debug!(total_articles, categories, sources, "latest news parsed");
            AuditResult::pass(
                ID,
                format!("{file}: {total_articles} articles, {categories} categories"),
            )
            .with_details(json!({
                "total_articles": raw_total,
                "categories": categories,
                "sources": sources,
            }))
        }
        Ok(None) => AuditResult::warn(ID, format!("{file} not found")),
        Err(err @ CheckError::InvalidJson(_)) => AuditResult::fail(ID, format!("{file}: {err}")),
        Err(err) => unreadable(ID, file, &err),
    }
}

pub fn check_weekly_articles(path: &Path) -> AuditResult {
    const ID: &str = "data_weekly_articles";
    let file = profile::WEEKLY_ARTICLES_FILE;

    match read_optional_json(path) {
        Ok(Some(data)) => {
            let days = data.as_array().map_or(0, Vec::len);
            let message = format!("{file}: {days} days of data");
            let details = json!({"days": days});
            if days >= profile::MIN_WEEKLY_DAYS {
                AuditResult::pass(ID, message).with_details(details)
            } else {
                AuditResult::warn(ID, message).with_details(details)
            }
        }
        Ok(None) => AuditResult::warn(
            ID,
            format!("{file} not found - needed for weekly content generation"),
        ),
        Err(err @ CheckError::InvalidJson(_)) => AuditResult::fail(ID, format!("{file}: Invalid JSON"))
            .with_details(json!({"error": err.to_string()})),
        Err(err) => unreadable(ID, file, &err),
    }
}

/// Backups are optional, so their absence is informational.
pub fn check_backups(data_dir: &Path) -> AuditResult {
    const ID: &str = "data_backups";
    match crate::scan::list_matching(data_dir, profile::BACKUP_GLOB) {
        Ok(files) => {
            let count = files.len();
            let message = format!("Sheets backups: {count} files");
            let details = json!({"count": count});
            if count > 0 {
                AuditResult::pass(ID, message).with_details(details)
            } else {
                AuditResult::info(ID, message).with_details(details)
            }
        }
        Err(err) => AuditResult::fail(ID, "Sheets backups could not be listed")
            .with_details(json!({"error": format!("{err:#}")})),
    }
}

/// Numeric counts, including floats and numeric strings; anything else is 0.
fn article_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn collection_len(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map.len(),
        _ => 0,
    }
}

fn unreadable(id: &str, file: &str, err: &CheckError) -> AuditResult {
    tracing::warn!(file, error = %err, "data file unreadable");
    AuditResult::fail(id, format!("{file} could not be read"))
        .with_details(json!({"error": err.to_string()}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{ctx, make_temp_root, write_file};
    use crate::core::Status;

    fn weekly_with(days: usize) -> AuditResult {
        let root = make_temp_root("data-weekly");
        let entries: Vec<Value> = (0..days).map(|d| json!({"day": d})).collect();
        let path = root.join("data").join(profile::WEEKLY_ARTICLES_FILE);
        write_file(&path, serde_json::to_string(&entries).expect("json").as_bytes());
        let r = check_weekly_articles(&path);
        let _ = std::fs::remove_dir_all(&root);
        r
    }

    #[test]
    fn weekly_history_threshold_is_three_days() {
        assert_eq!(weekly_with(2).status(), Status::Warn);
        assert_eq!(weekly_with(3).status(), Status::Pass);
        assert_eq!(weekly_with(3).message(), "weekly-top-articles.json: 3 days of data");
    }

    #[test]
    fn weekly_missing_warns_and_non_list_counts_zero_days() {
        let root = make_temp_root("data-weekly-missing");
        let path = root.join(profile::WEEKLY_ARTICLES_FILE);
        assert_eq!(check_weekly_articles(&path).status(), Status::Warn);

        write_file(&path, br#"{"monday": []}"#);
        let r = check_weekly_articles(&path);
        assert_eq!(r.status(), Status::Warn);
        assert_eq!(r.detail("days"), Some(&json!(0)));

        write_file(&path, b"[1, 2");
        assert_eq!(check_weekly_articles(&path).status(), Status::Fail);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn latest_news_counts_default_to_zero() {
        let root = make_temp_root("data-latest");
        let path = root.join(profile::LATEST_NEWS_FILE);

        write_file(&path, br#"{"totalArticles": 42, "categories": ["a", "b"], "sources": ["x"]}"#);
        let r = check_latest_news(&path);
        assert_eq!(r.status(), Status::Pass);
        assert_eq!(r.message(), "latest-dutch-news.json: 42 articles, 2 categories");
        assert_eq!(r.detail("sources"), Some(&json!(1)));

        write_file(&path, b"{}");
        let r = check_latest_news(&path);
        assert_eq!(r.status(), Status::Pass);
        assert_eq!(r.detail("total_articles"), Some(&json!(0)));
        assert_eq!(r.detail("categories"), Some(&json!(0)));

        write_file(&path, b"not json");
        let r = check_latest_news(&path);
        assert_eq!(r.status(), Status::Fail);
        assert!(r.message().contains("Invalid JSON"), "msg={}", r.message());

        std::fs::remove_file(&path).expect("rm");
        assert_eq!(check_latest_news(&path).status(), Status::Warn);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn latest_news_accepts_float_and_string_totals() {
        let root = make_temp_root("data-latest-loose");
        let path = root.join(profile::LATEST_NEWS_FILE);

        write_file(&path, br#"{"totalArticles": 42.0}"#);
        let r = check_latest_news(&path);
        assert_eq!(r.status(), Status::Pass);
        assert_eq!(r.message(), "latest-dutch-news.json: 42 articles, 0 categories");
        assert_eq!(r.detail("total_articles"), Some(&json!(42.0)));

        write_file(&path, br#"{"totalArticles": "42"}"#);
        let r = check_latest_news(&path);
        assert_eq!(r.message(), "latest-dutch-news.json: 42 articles, 0 categories");
        assert_eq!(r.detail("total_articles"), Some(&json!("42")));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn backups_are_pass_or_info() {
        let root = make_temp_root("data-backups");
        let results = run(&ctx(&root));
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].status(), Status::Info);

        write_file(&root.join("data/sheets-backup-2026-01-01.json"), b"[]");
        write_file(&root.join("data/other-backup.json"), b"[]");
        let r = check_backups(&root.join("data"));
        assert_eq!(r.status(), Status::Pass);
        assert_eq!(r.detail("count"), Some(&json!(1)));

        let _ = std::fs::remove_dir_all(&root);
    }
}
