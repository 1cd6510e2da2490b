use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::report::{DEFAULT_REPORT_DIR, ReportFormat};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const CONFIG_FILE_NAME: &str = "pipeline-audit.toml";

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    pub server: ServerConfig,
    pub report: ReportConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub dir: String,
    pub format: ReportFormat,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UiConfig {
    pub color: bool,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: DEFAULT_SERVER_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            report: ReportConfig {
                dir: DEFAULT_REPORT_DIR.to_string(),
                format: ReportFormat::All,
                title: crate::engine::DEFAULT_TITLE.to_string(),
            },
            ui: UiConfig { color: true },
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    server: Option<RawServerConfig>,
    report: Option<RawReportConfig>,
    ui: Option<RawUiConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServerConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReportConfig {
    dir: Option<String>,
    format: Option<ReportFormat>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUiConfig {
    color: Option<bool>,
}

pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Defaults, then the TOML file, then environment variables. CLI flags are
/// applied on top by the caller.
pub fn load(config_path: Option<&Path>, root: &Path) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::default();

    let explicit = config_path.is_some();
    let path = config_path
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_config_path(root));

    if path.exists() {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&s)
            .with_context(|| format!("failed to parse config file (TOML): {}", path.display()))?;
        apply_raw_config(&mut cfg, raw);
        cfg.config_path = Some(path.display().to_string());
    } else if explicit {
        anyhow::bail!("config file not found: {}", path.display());
    }

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig) {
    if let Some(server) = raw.server {
        if let Some(base_url) = server.base_url {
            cfg.server.base_url = base_url;
        }
        if let Some(timeout_secs) = server.timeout_secs {
            cfg.server.timeout_secs = timeout_secs;
        }
    }

    if let Some(report) = raw.report {
        if let Some(dir) = report.dir {
            cfg.report.dir = dir;
        }
        if let Some(format) = report.format {
            cfg.report.format = format;
        }
        if let Some(title) = report.title {
            cfg.report.title = title;
        }
    }

    if let Some(ui) = raw.ui {
        if let Some(color) = ui.color {
            cfg.ui.color = color;
        }
    }
}

fn apply_env_overrides(
    cfg: &mut EffectiveConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(v) = var("WEBHOOK_BASE_URL") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.server.base_url = v.to_string();
        }
    }
    if let Some(v) = var("PIPELINE_AUDIT_TIMEOUT") {
        cfg.server.timeout_secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| "PIPELINE_AUDIT_TIMEOUT")?;
    }
    if let Some(v) = var("PIPELINE_AUDIT_REPORT_DIR") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.report.dir = v.to_string();
        }
    }
    if let Some(v) = var("PIPELINE_AUDIT_REPORT_FORMAT") {
        cfg.report.format = v
            .parse::<ReportFormat>()
            .map_err(anyhow::Error::msg)
            .with_context(|| "PIPELINE_AUDIT_REPORT_FORMAT")?;
    }
    if let Some(v) = var("PIPELINE_AUDIT_UI_COLOR") {
        cfg.ui.color = parse_bool(&v).with_context(|| "PIPELINE_AUDIT_UI_COLOR")?;
    }

    Ok(())
}

fn parse_bool(s: &str) -> Result<bool> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "invalid boolean: {s} (expected true|false|1|0|yes|no|on|off)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn raw_config_overrides_defaults() {
        let raw: RawConfig = toml::from_str(
            r#"
[server]
base_url = "http://pipeline.internal:8080"

[report]
format = "md"
"#,
        )
        .expect("parse");
        let mut cfg = EffectiveConfig::default();
        apply_raw_config(&mut cfg, raw);
        assert_eq!(cfg.server.base_url, "http://pipeline.internal:8080");
        assert_eq!(cfg.server.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.report.format, ReportFormat::Md);
        assert_eq!(cfg.report.dir, DEFAULT_REPORT_DIR);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<RawConfig>("[server]\nurl = \"x\"\n").is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = EffectiveConfig::default();
        cfg.server.base_url = "http://from-file".to_string();
        apply_env_overrides(
            &mut cfg,
            env(&[
                ("WEBHOOK_BASE_URL", "http://from-env:3000"),
                ("PIPELINE_AUDIT_TIMEOUT", "3"),
                ("PIPELINE_AUDIT_REPORT_FORMAT", "json"),
                ("PIPELINE_AUDIT_UI_COLOR", "off"),
            ]),
        )
        .expect("apply");
        assert_eq!(cfg.server.base_url, "http://from-env:3000");
        assert_eq!(cfg.server.timeout_secs, 3);
        assert_eq!(cfg.report.format, ReportFormat::Json);
        assert!(!cfg.ui.color);
    }

    #[test]
    fn blank_base_url_env_is_ignored() {
        let mut cfg = EffectiveConfig::default();
        apply_env_overrides(&mut cfg, env(&[("WEBHOOK_BASE_URL", "  ")])).expect("apply");
        assert_eq!(cfg.server.base_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn invalid_env_values_are_errors() {
        let mut cfg = EffectiveConfig::default();
        assert!(apply_env_overrides(&mut cfg, env(&[("PIPELINE_AUDIT_TIMEOUT", "soon")])).is_err());
        assert!(
            apply_env_overrides(&mut cfg, env(&[("PIPELINE_AUDIT_REPORT_FORMAT", "pdf")])).is_err()
        );
        assert!(apply_env_overrides(&mut cfg, env(&[("PIPELINE_AUDIT_UI_COLOR", "maybe")])).is_err());
    }
}
