use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::config::EffectiveConfig;
use crate::core::{AuditSummary, Category};
use crate::engine::{AuditOptions, Auditor};
use crate::report::ReportFormat;
use crate::ui::UiConfig;

#[derive(Debug, Parser)]
#[command(
    name = "pipeline-audit",
    version,
    about = "Audit a content-automation pipeline project: files, endpoints, data, content, security and code"
)]
pub struct Cli {
    /// Audit to run
    #[arg(value_enum, default_value_t = AuditCommand::Full)]
    pub command: AuditCommand,
    /// Report format written by `full`: json, md or all
    #[arg(short = 'o', long = "output")]
    pub output: Option<ReportFormat>,
    /// Base URL of the webhook server
    #[arg(short = 's', long = "server")]
    pub server: Option<String>,
    /// Project root to audit (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Per-request timeout for endpoint probes, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    #[arg(long = "report-dir")]
    pub report_dir: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
    #[arg(long = "no-color")]
    pub no_color: bool,
    #[arg(long)]
    pub quiet: bool,
    #[arg(long)]
    pub verbose: bool,
    /// Exit with code 1 when any check failed
    #[arg(long)]
    pub strict: bool,
    #[arg(long = "show-config")]
    pub show_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuditCommand {
    Full,
    Files,
    Endpoints,
    Data,
    Content,
    Security,
    Code,
}

impl AuditCommand {
    fn category(self) -> Option<Category> {
        match self {
            AuditCommand::Full => None,
            AuditCommand::Files => Some(Category::File),
            AuditCommand::Endpoints => Some(Category::Endpoint),
            AuditCommand::Data => Some(Category::Data),
            AuditCommand::Content => Some(Category::Content),
            AuditCommand::Security => Some(Category::Security),
            AuditCommand::Code => Some(Category::Code),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.quiet, cli.verbose)?;

    let stdout_is_tty = io::stdout().is_terminal();
    let stderr_is_tty = io::stderr().is_terminal();

    let root = resolve_root(cli.root.as_deref()).map_err(crate::exit::invalid_args_err)?;

    let env_config_path = std::env::var_os("PIPELINE_AUDIT_CONFIG").map(PathBuf::from);
    let mut cfg = crate::config::load(cli.config.as_deref().or(env_config_path.as_deref()), &root)
        .map_err(crate::exit::invalid_args_err)?;
    apply_cli_overrides(&mut cfg, &cli);
    if cfg.server.timeout_secs == 0 {
        return Err(crate::exit::invalid_args("timeout must be greater than 0 seconds"));
    }
    tracing::debug!(root = %root.display(), server = %cfg.server.base_url, "configuration resolved");

    if cli.show_config {
        let s = toml::to_string_pretty(&cfg).context("failed to serialize config")?;
        return write_stdout(s.as_bytes());
    }

    let ui_cfg = UiConfig {
        color: stdout_is_tty && cfg.ui.color && !cli.no_color,
        quiet: cli.quiet || cli.json,
        verbose: cli.verbose,
    };

    let auditor = Auditor::new(AuditOptions {
        root: root.clone(),
        server_url: cfg.server.base_url.clone(),
        timeout: Duration::from_secs(cfg.server.timeout_secs),
        title: cfg.report.title.clone(),
        show_progress: stderr_is_tty && !cli.quiet && !cli.json,
    });

    crate::ui::print_banner(&cfg.report.title, &cfg.server.base_url, &ui_cfg);

    let summary = match cli.command.category() {
        Some(category) => {
            let results = auditor.run_category(category);
            crate::ui::print_category(category, &results, &ui_cfg);
            let summary = AuditSummary::tally(&results);
            crate::ui::print_summary(&summary, &ui_cfg);
            if cli.json {
                write_json(&results)?;
            }
            summary
        }
        None => {
            let report = auditor.run_full_with(|category, results| {
                crate::ui::print_category(category, results, &ui_cfg);
            });
            crate::ui::print_summary(report.summary(), &ui_cfg);
            crate::ui::print_recommendations(report.recommendations(), &ui_cfg);

            let dir = resolve_against(&root, Path::new(&cfg.report.dir));
            let saved = crate::report::write_reports(
                &report,
                &dir,
                cfg.report.format,
                time::OffsetDateTime::now_utc(),
            )
            .map_err(crate::exit::report_write_err)?;
            crate::ui::print_saved(&saved, &ui_cfg);

            if cli.json {
                write_json(&report)?;
            }
            *report.summary()
        }
    };

    if cli.strict && summary.failed > 0 {
        return Err(crate::exit::checks_failed(summary.failed));
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PIPELINE_AUDIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let root = match root {
        Some(p) => resolve_against(&cwd, p),
        None => cwd,
    };
    if !root.is_dir() {
        anyhow::bail!("project root is not a directory: {}", root.display());
    }
    Ok(root)
}

fn resolve_against(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

fn apply_cli_overrides(cfg: &mut EffectiveConfig, cli: &Cli) {
    if let Some(server) = cli.server.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        cfg.server.base_url = server.to_string();
    }
    if let Some(timeout) = cli.timeout {
        cfg.server.timeout_secs = timeout;
    }
    if let Some(dir) = &cli.report_dir {
        cfg.report.dir = dir.display().to_string();
    }
    if let Some(format) = cli.output {
        cfg.report.format = format;
    }
    if cli.no_color {
        cfg.ui.color = false;
    }
}

fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut buf = serde_json::to_vec_pretty(value)?;
    buf.push(b'\n');
    write_stdout(&buf)
}

fn write_stdout(buf: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(buf) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}
