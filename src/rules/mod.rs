//! Recommendation rules: an ordered table of predicates over the aggregated
//! results, each paired with one piece of advice. Every matching rule fires.

use crate::core::{AuditResult, Status};

pub struct Rule {
    pub id: &'static str,
    pub applies: fn(&[AuditResult]) -> bool,
    pub advice: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        id: "restrict-cors",
        applies: |results| {
            results
                .iter()
                .any(|r| r.status() == Status::Warn && name_has(r, "cors"))
        },
        advice: "Consider restricting CORS to specific domains in production",
    },
    Rule {
        id: "configure-secrets",
        applies: |results| {
            results
                .iter()
                .any(|r| r.status().is_problem() && name_has(r, "env"))
        },
        advice: "Ensure .env file is properly configured with all required secrets",
    },
    Rule {
        id: "collect-weekly-history",
        applies: |results| {
            results
                .iter()
                .any(|r| r.status() != Status::Pass && name_has(r, "weekly"))
        },
        advice: "Run daily uploads for at least 3 days before generating weekly LinkedIn content",
    },
    Rule {
        id: "generate-content",
        applies: |results| results.iter().any(is_empty_content_type),
        advice: "Generate LinkedIn content using: node linkedin-content-creator.cjs create",
    },
    Rule {
        id: "automate-backups",
        applies: |results| results.iter().any(|r| name_has(r, "backup")),
        advice: "Set up automated backups of the data directory",
    },
    Rule {
        id: "start-server",
        applies: |results| {
            results
                .iter()
                .any(|r| r.status() == Status::Fail && name_has(r, "endpoint"))
        },
        advice: "Ensure the webhook server is running: npm start",
    },
];

/// Appended after rule advice on every run.
pub const GENERAL_ADVICE: &[&str] = &[
    "Review generated LinkedIn content before manual posting",
    "Monitor endpoint response times in production",
    "Keep dependencies updated: npm update",
    "Test automation flow weekly to ensure reliability",
];

/// Deterministic: same results in, same ordered advice out.
pub fn recommend(results: &[AuditResult]) -> Vec<String> {
    let mut out: Vec<String> = RULES
        .iter()
        .filter(|rule| (rule.applies)(results))
        .map(|rule| {
            tracing::debug!(rule = rule.id, "recommendation rule matched");
            rule.advice.to_string()
        })
        .collect();
    out.extend(GENERAL_ADVICE.iter().map(|s| s.to_string()));
    out
}

fn name_has(result: &AuditResult, needle: &str) -> bool {
    result.name().to_ascii_lowercase().contains(needle)
}

/// Per-type content counts carry `content_type`; metadata counts do not.
fn is_empty_content_type(result: &AuditResult) -> bool {
    result.detail("content_type").is_some()
        && result.detail("count").and_then(|c| c.as_u64()) == Some(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn advice_for(results: &[AuditResult]) -> Vec<String> {
        let mut out = recommend(results);
        out.truncate(out.len() - GENERAL_ADVICE.len());
        out
    }

    #[test]
    fn general_advice_is_always_appended() {
        let out = recommend(&[]);
        assert_eq!(out, GENERAL_ADVICE.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn every_matching_rule_fires_in_table_order() {
        let results = vec![
            AuditResult::fail("endpoint_/status", "GET /status - Connection failed"),
            AuditResult::info("data_backups", "Sheets backups: 0 files"),
            AuditResult::warn("data_weekly_articles", "weekly-top-articles.json: 2 days of data"),
            AuditResult::info("content_insightPost", "insightPost: 0 files")
                .with_details(json!({"content_type": "insightPost", "count": 0, "files": []})),
            AuditResult::warn("security_env_file", ".env file not found"),
            AuditResult::warn("security_cors", "CORS: Open (*)"),
        ];
        let ids: Vec<&str> = RULES
            .iter()
            .filter(|r| (r.applies)(&results))
            .map(|r| r.id)
            .collect();
        assert_eq!(ids.len(), RULES.len());
        assert_eq!(advice_for(&results)[0], RULES[0].advice);
    }

    #[test]
    fn passing_results_only_trigger_backup_advice() {
        let results = vec![
            AuditResult::pass("security_cors", "CORS: Restricted"),
            AuditResult::pass("security_env_file", ".env file exists"),
            AuditResult::pass("data_weekly_articles", "weekly-top-articles.json: 5 days of data"),
            AuditResult::pass("endpoint_/status", "GET /status - HTTP 200"),
            AuditResult::pass("data_backups", "Sheets backups: 2 files"),
            AuditResult::pass("content_metadata", "Metadata files: 0")
                .with_details(json!({"count": 0})),
        ];
        assert_eq!(
            advice_for(&results),
            vec!["Set up automated backups of the data directory".to_string()]
        );
    }

    #[test]
    fn content_rule_ignores_counts_that_merely_end_in_zero() {
        let ten = AuditResult::pass("content_weeklyRoundup", "weeklyRoundup: 10 files")
            .with_details(json!({"content_type": "weeklyRoundup", "count": 10}));
        assert!(advice_for(&[ten]).is_empty());
    }

    #[test]
    fn gitignore_failure_is_not_an_env_match_but_env_file_is() {
        let gitignore = AuditResult::fail("security_gitignore", ".env in .gitignore: false");
        assert!(advice_for(&[gitignore]).is_empty());
        let env = AuditResult::fail("security_env_file", "x");
        assert_eq!(advice_for(&[env]), vec![RULES[1].advice.to_string()]);
    }

    #[test]
    fn output_is_deterministic() {
        let results = vec![
            AuditResult::warn("security_cors", "CORS: Open (*)"),
            AuditResult::fail("endpoint_/test", "GET /test - Connection failed"),
        ];
        assert_eq!(recommend(&results), recommend(&results));
    }
}
