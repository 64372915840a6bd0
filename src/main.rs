/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::main
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Entry point for Syn-Herald Core. Reads the update job's
    package-manager state, derives deprecation notices, emits
    the notices manifest and pull-request markdown, and
    optionally delivers the warning out-of-band.

  Security / Safety Notes:
    Operates within user privileges. Performs HTTPS POST
    requests to the configured reporting service only.

  Dependencies:
    clap for CLI parsing, chrono for timestamps.

  Operational Scope:
    Invoked by the update-job orchestrator via `syn-herald core`
    or standalone when operators need notice regeneration.

  Revision History:
    2025-11-18 COD  Authored Syn-Herald Core runtime.
    2026-01-22 COD  Out-of-band send honours dry-run.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Result-first error handling with deterministic exits
    - Structured logging following Synavera cadence
    - Configurable execution via CLI and config file
============================================================*/

mod config;
mod descriptor;
mod dispatch;
mod error;
mod logger;
mod manifest;
mod notice;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{ArgAction, Parser};

use config::SynHeraldConfig;
use descriptor::{read_job_state, JobState};
use dispatch::{add_deprecation_notice, send_deprecation_notice};
use error::{Result, SynHeraldError};
use logger::Logger;
use manifest::{build_document, write_document, write_markdown};
use notice::Notice;
use report::ReportClient;

/// Command-line arguments for Syn-Herald-Core.
#[derive(Debug, Parser)]
#[command(
    name = "Syn-Herald-Core",
    version,
    author = "Synavera Systems",
    about = "Deprecation herald for the Syn-Herald update pipeline"
)]
struct Cli {
    /// Override configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Job-state JSON produced by the orchestrator.
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Override notices manifest output path.
    #[arg(long, value_name = "PATH")]
    notices: Option<PathBuf>,
    /// Override pull-request markdown output path.
    #[arg(long, value_name = "PATH")]
    markdown: Option<PathBuf>,
    /// Explicit log file path.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Override the reporting-service job id.
    #[arg(long, value_name = "ID")]
    job_id: Option<String>,
    /// Also deliver the notice through log + reporting service.
    #[arg(long, action = ArgAction::SetTrue)]
    send: bool,
    /// Do not write outputs or deliver; emit summary only.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[Syn-Herald-Core] {}", err);
            err.exit_code()
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = SynHeraldConfig::load_from_optional_path(cli.config.as_deref())?;

    let session_stamp = Utc::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let log_path = cli
        .log
        .clone()
        .or_else(|| Some(config.log_dir().join(format!("herald_{session_stamp}.log"))));
    let logger = Logger::new(log_path, cli.verbose)?;
    logger.info("INIT", "Syn-Herald Core awakening.");

    let state = read_job_state(&cli.input)?;
    match &state.package_manager {
        Some(manager) => logger.info(
            "STATE",
            format!(
                "Package manager {} v{} (deprecated={})",
                manager.name,
                manager.version,
                manager.is_deprecated()
            ),
        ),
        None => logger.warn("STATE", "Job state carries no package manager"),
    }

    let mut notices: Vec<Notice> = Vec::new();
    add_deprecation_notice(&mut notices, state.package_manager.as_ref());
    logger.info(
        "DETECT",
        format!("Deprecation notices pending: {}", notices.len()),
    );

    if cli.dry_run {
        print_summary(&state, &notices);
        logger.info("SUMMARY", "Dry-run requested; outputs withheld");
        logger.finalize()?;
        return Ok(ExitCode::SUCCESS);
    }

    let notices_path = cli.notices.clone().unwrap_or_else(|| config.notices_path());
    let manager_name = state.package_manager.as_ref().map(|m| m.name.as_str());
    let document = build_document(manager_name, notices);
    write_document(&document, &notices_path)?;
    logger.info(
        "MANIFEST",
        format!("Notices manifest written to {}", notices_path.display()),
    );

    if document.notices.is_empty() {
        logger.debug("MARKDOWN", "No notices; markdown section skipped");
    } else {
        let markdown_path = cli
            .markdown
            .clone()
            .unwrap_or_else(|| config.markdown_path());
        write_markdown(&document.notices, &markdown_path)?;
        logger.info(
            "MARKDOWN",
            format!("PR markdown section written to {}", markdown_path.display()),
        );
    }

    if cli.send {
        if let Some(manager) = state.package_manager.as_ref() {
            let job_id = resolve_job_id(&cli, &state, &config)?;
            let client = ReportClient::new(&config.report, &job_id)?;
            send_deprecation_notice(&logger, &client, manager).await;
            logger.info("SEND", format!("Out-of-band delivery attempted for job {job_id}"));
        } else {
            logger.warn("SEND", "Send requested but no package manager present");
        }
    }

    logger.info(
        "SUMMARY",
        format!(
            "manager={} notices={}",
            manager_name.unwrap_or("none"),
            document.metadata.notice_count
        ),
    );
    logger.info("COMPLETE", "Notice ledger sealed.");
    logger.finalize()?;

    Ok(ExitCode::SUCCESS)
}

fn resolve_job_id(cli: &Cli, state: &JobState, config: &SynHeraldConfig) -> Result<String> {
    cli.job_id
        .clone()
        .or_else(|| state.job_id.clone())
        .or_else(|| config.report.job_id.clone())
        .ok_or_else(|| {
            SynHeraldError::Config(
                "Reporting requires a job id via --job-id, job state, or config".into(),
            )
        })
}

fn print_summary(state: &JobState, notices: &[Notice]) {
    let manager = state
        .package_manager
        .as_ref()
        .map(|m| m.name.as_str())
        .unwrap_or("none");
    let deprecated = state
        .package_manager
        .as_ref()
        .map(|m| m.is_deprecated())
        .unwrap_or(false);
    println!(
        "→ Notice dry-run. Manager={manager} Deprecated={deprecated} Notices={}",
        notices.len()
    );
}
