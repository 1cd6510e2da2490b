//! Fixed description of the audited pipeline: which artifacts it is expected to
//! produce, which endpoints it serves, and what its sources should contain.

use crate::probe::Method;

pub const REQUIRED_FILES: &[&str] = &[
    "zapier-webhook-server.cjs",
    "linkedin-content-creator.cjs",
    "dutch-recruitment-news-scraper.cjs",
    "google-sheets-uploader.cjs",
    "complete-automation-flow.cjs",
    "package.json",
];

pub const REQUIRED_DIRS: &[&str] = &["data", "content", "reports"];

pub const ENDPOINTS: &[(&str, Method)] = &[
    ("/status", Method::Get),
    ("/test", Method::Get),
    ("/reports", Method::Get),
    ("/daily-news-collection", Method::Post),
    ("/upload-to-sheets", Method::Post),
    ("/weekly-content-creation", Method::Post),
    ("/get-top-articles", Method::Get),
];

pub const DATA_DIR: &str = "data";
pub const CONTENT_DIR: &str = "content";

pub const LATEST_NEWS_FILE: &str = "latest-dutch-news.json";
pub const WEEKLY_ARTICLES_FILE: &str = "weekly-top-articles.json";
pub const BACKUP_GLOB: &str = "sheets-backup-*.json";
pub const MIN_WEEKLY_DAYS: usize = 3;

pub const CONTENT_TYPES: &[&str] = &[
    "weeklyRoundup",
    "insightPost",
    "trendAnalysis",
    "longFormArticle",
];
pub const METADATA_GLOB: &str = "*-metadata.json";
pub const MIN_CONTENT_WORDS: usize = 100;
pub const CONTENT_KEYWORDS: &[&str] = &["recruitment", "nederlandse", "arbeidsmarkt"];

pub const SOURCE_GLOB: &str = "*.cjs";
pub const SERVER_SOURCE: &str = "zapier-webhook-server.cjs";
pub const CREATOR_SOURCE: &str = "linkedin-content-creator.cjs";

pub const ENV_FILE: &str = ".env";
pub const GITIGNORE_FILE: &str = ".gitignore";
pub const REQUIRED_SECRET: &str = "WEBHOOK_SECRET";

/// `(pattern, label)`; evaluated case-insensitively, in order, against every source file.
pub const SECURITY_PATTERNS: &[(&str, &str)] = &[
    (
        r#"(api_key|apikey)\s*[=:]\s*["'][^"']{10,}["']"#,
        "Hardcoded API key",
    ),
    (
        r#"(secret|password)\s*[=:]\s*["'][^"']{8,}["']"#,
        "Hardcoded secret/password",
    ),
    (r#"(token)\s*[=:]\s*["'][^"']{20,}["']"#, "Hardcoded token"),
    (r"eval\s*\(", "Unsafe eval() usage"),
    (r"innerHTML\s*=", "Potential XSS via innerHTML"),
];

/// Matches `'Access-Control-Allow-Origin', '*'` with either quote style.
pub const OPEN_CORS_PATTERN: &str = r#"Access-Control-Allow-Origin["']\s*,\s*["']\*["']"#;

pub const CREATOR_METHODS: &[&str] = &[
    "runWeeklyContentCreation",
    "generateWeeklyRoundupPost",
    "generateInsightPost",
    "generateTrendAnalysisPost",
    "generateLongFormArticle",
    "analyzeWeeklyTrends",
];

pub const CONTENT_TEMPLATES: &[&str] = &["weeklyRoundup", "insightPost", "trendAnalysis", "article"];

pub const ERROR_HANDLING_MARKER: &str = "try {";
pub const MIN_FILES_WITH_ERROR_HANDLING: usize = 3;

/// Endpoint path literals the server source is expected to register.
pub const SERVER_ENDPOINT_LITERALS: &[&str] = &[
    "/daily-news-collection",
    "/upload-to-sheets",
    "/weekly-content-creation",
    "/get-top-articles",
    "/status",
    "/test",
    "/reports",
];
