/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::config
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Load and default Syn-Herald-Core configuration covering the
    job-reporting endpoint and output locations.

  Security / Safety Notes:
    The reporting auth token is read from configuration and is
    never logged or serialized back out.

  Dependencies:
    toml + serde for parsing, dirs for platform paths.

  Operational Scope:
    Resolved once at startup from an explicit path or the
    platform config directory; absent files fall back to
    defaults.

  Revision History:
    2025-11-18 COD  Authored configuration loader.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Defaults keep the binary runnable without any config file
    - Explicit paths fail loudly when unreadable
============================================================*/

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SynHeraldError};

const DEFAULT_REPORT_BASE_URL: &str = "https://updater-api.synavera.dev";
const DEFAULT_REPORT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REPORT_MAX_RETRIES: usize = 3;

/// Top-level Syn-Herald-Core configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SynHeraldConfig {
    pub report: ReportConfig,
    pub output: OutputConfig,
}

/// Job-reporting service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub base_url: String,
    pub job_id: Option<String>,
    pub auth_token: Option<String>,
    pub timeout: u64,
    pub max_retries: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REPORT_BASE_URL.to_string(),
            job_id: None,
            auth_token: None,
            timeout: DEFAULT_REPORT_TIMEOUT_SECS,
            max_retries: DEFAULT_REPORT_MAX_RETRIES,
        }
    }
}

/// Output locations for the notices manifest, PR markdown, and logs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub notices_path: Option<PathBuf>,
    pub markdown_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl SynHeraldConfig {
    /// Load configuration from `path` when given, otherwise from the
    /// platform config directory; missing default files yield defaults.
    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => Self::load_file(explicit),
            None => {
                let fallback = default_config_path();
                match fallback {
                    Some(candidate) if candidate.is_file() => Self::load_file(&candidate),
                    _ => Ok(Self::default()),
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SynHeraldError::Filesystem(format!(
                "Failed to read config {}: {err}",
                path.display()
            ))
        })?;
        toml::from_str(&raw).map_err(|err| {
            SynHeraldError::Config(format!("Failed to parse config {}: {err}", path.display()))
        })
    }

    /// Resolved notices manifest output path.
    pub fn notices_path(&self) -> PathBuf {
        self.output
            .notices_path
            .clone()
            .unwrap_or_else(|| data_root().join("notices.json"))
    }

    /// Resolved PR markdown output path.
    pub fn markdown_path(&self) -> PathBuf {
        self.output
            .markdown_path
            .clone()
            .unwrap_or_else(|| data_root().join("notices.md"))
    }

    /// Resolved log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.output
            .log_dir
            .clone()
            .unwrap_or_else(|| data_root().join("logs"))
    }
}

fn data_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("syn-herald")
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("syn-herald").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let config = SynHeraldConfig::default();
        assert_eq!(config.report.base_url, DEFAULT_REPORT_BASE_URL);
        assert_eq!(config.report.timeout, DEFAULT_REPORT_TIMEOUT_SECS);
        assert_eq!(config.report.max_retries, DEFAULT_REPORT_MAX_RETRIES);
        assert!(config.report.job_id.is_none());
        assert!(config.output.notices_path.is_none());
    }

    #[test]
    fn partial_toml_overlays_defaults() {
        let config: SynHeraldConfig = toml::from_str(
            r#"
            [report]
            base_url = "https://jobs.internal.example"
            job_id = "9001"

            [output]
            notices_path = "/tmp/out/notices.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.report.base_url, "https://jobs.internal.example");
        assert_eq!(config.report.job_id.as_deref(), Some("9001"));
        assert_eq!(config.report.max_retries, DEFAULT_REPORT_MAX_RETRIES);
        assert_eq!(
            config.notices_path(),
            PathBuf::from("/tmp/out/notices.json")
        );
    }

    #[test]
    fn resolved_paths_fall_back_to_data_root() {
        let config = SynHeraldConfig::default();
        assert!(config.notices_path().ends_with("syn-herald/notices.json"));
        assert!(config.log_dir().ends_with("syn-herald/logs"));
    }
}
