/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::logger
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Provide structured, append-only logging for Syn-Herald-Core
    and back the dispatcher's warning sink.

  Security / Safety Notes:
    Log lines carry operator-facing notice text only; reporting
    tokens and endpoints are never echoed.

  Dependencies:
    std::fs::File, std::sync::Mutex, chrono for timestamps,
    sha2 for session digests.

  Operational Scope:
    Emits RFC-3339 UTC stamped entries to stderr and optionally
    to a session log file consumed by the orchestrator.

  Revision History:
    2025-11-18 COD  Established logging module for Syn-Herald.
    2026-01-22 COD  Exposed fallible sink surface for dispatch.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Append-only logging with UTC timestamps
    - Deterministic formatting for auditability
    - Sink failures surface to the delivery boundary
============================================================*/

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::dispatch::EventSink;
use crate::error::{Result, SynHeraldError};

/// Structured log level for Syn-Herald-Core events.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn echoed(self, verbose: bool) -> bool {
        verbose || matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

/// Event code used for notice traffic emitted through the sink seam.
const NOTICE_CODE: &str = "NOTICE";

/// Session logger writing to stderr and, when configured, a log file.
pub struct Logger {
    file: Option<Mutex<File>>,
    path: Option<PathBuf>,
    verbose: bool,
}

impl Logger {
    /// Build a logger, creating the log directory and file as needed.
    pub fn new(path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let file = match path.as_deref() {
            Some(file_path) => {
                if let Some(parent) = file_path.parent() {
                    std::fs::create_dir_all(parent).map_err(|err| {
                        SynHeraldError::Filesystem(format!(
                            "Failed to create log directory {}: {err}",
                            parent.display()
                        ))
                    })?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(file_path)
                    .map_err(|err| {
                        SynHeraldError::Filesystem(format!(
                            "Failed to open log file {}: {err}",
                            file_path.display()
                        ))
                    })?;
                Some(Mutex::new(file))
            }
            None => None,
        };

        Ok(Self {
            file,
            path,
            verbose,
        })
    }

    /// Append one entry to every configured channel, surfacing file-channel
    /// failures to the caller.
    fn append(&self, level: LogLevel, code: &str, message: &str) -> Result<()> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let payload = format!("{timestamp} [{}] [{code}] {message}", level.as_str());

        if level.echoed(self.verbose) {
            eprintln!("{payload}");
        }

        if let Some(file) = &self.file {
            let mut guard = file
                .lock()
                .map_err(|_| SynHeraldError::Runtime("Log writer poisoned".into()))?;
            writeln!(guard, "{payload}").map_err(|err| {
                SynHeraldError::Filesystem(format!("Failed to write log entry: {err}"))
            })?;
            guard.flush().map_err(|err| {
                SynHeraldError::Filesystem(format!("Failed to flush log writer: {err}"))
            })?;
        }

        Ok(())
    }

    /// Emit a log entry, falling back to stderr if the file channel fails.
    pub fn log<S: AsRef<str>>(&self, level: LogLevel, code: &str, message: S) {
        if let Err(err) = self.append(level, code, message.as_ref()) {
            eprintln!("[Syn-Herald-Core] logger degraded: {err}");
        }
    }

    /// Convenience wrapper for `INFO` level events.
    pub fn info<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Info, code, message);
    }

    /// Convenience wrapper for `WARN` level events.
    pub fn warn<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Warn, code, message);
    }

    /// Convenience wrapper for `DEBUG` level events.
    pub fn debug<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Debug, code, message);
    }

    /// Return the path backing this logger, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Compute and persist the SHA-256 digest of the session log.
    pub fn finalize(&self) -> Result<()> {
        let Some(path) = self.path() else {
            return Ok(());
        };
        let data = std::fs::read(path).map_err(|err| {
            SynHeraldError::Filesystem(format!(
                "Failed to read log for hashing {}: {err}",
                path.display()
            ))
        })?;
        let digest = Sha256::digest(&data);
        let mut hash_os = path.as_os_str().to_os_string();
        hash_os.push(".hash");
        let hash_path = PathBuf::from(hash_os);
        let mut file = File::create(&hash_path).map_err(|err| {
            SynHeraldError::Filesystem(format!(
                "Failed to create hash file {}: {err}",
                hash_path.display()
            ))
        })?;
        writeln!(
            file,
            "{:x}  {}",
            digest,
            path.file_name().unwrap_or_default().to_string_lossy()
        )
        .map_err(|err| {
            SynHeraldError::Filesystem(format!(
                "Failed to write hash file {}: {err}",
                hash_path.display()
            ))
        })?;
        Ok(())
    }
}

impl EventSink for Logger {
    /// Warning-channel write for notice delivery; file failures propagate
    /// so the dispatcher's containment can record them.
    fn warn(&self, message: &str) -> Result<()> {
        self.append(LogLevel::Warn, NOTICE_CODE, message)
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, NOTICE_CODE, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "synherald_logger_{tag}_{}.log",
            std::process::id()
        ))
    }

    #[test]
    fn entries_are_appended_with_level_and_code() {
        let path = scratch_path("append");
        let _ = std::fs::remove_file(&path);
        let logger = Logger::new(Some(path.clone()), false).unwrap();

        logger.info("INIT", "Syn-Herald Core awakening.");
        EventSink::warn(&logger, "deprecation ahead").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[INFO] [INIT] Syn-Herald Core awakening."));
        assert!(contents.contains("[WARN] [NOTICE] deprecation ahead"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn finalize_writes_session_digest() {
        let path = scratch_path("digest");
        let _ = std::fs::remove_file(&path);
        let logger = Logger::new(Some(path.clone()), false).unwrap();
        logger.info("INIT", "digest check");
        logger.finalize().unwrap();

        let hash_path = PathBuf::from(format!("{}.hash", path.display()));
        let digest_line = std::fs::read_to_string(&hash_path).unwrap();
        assert_eq!(digest_line.trim().split("  ").count(), 2);
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&hash_path);
    }

    #[test]
    fn pathless_logger_is_accepted() {
        let logger = Logger::new(None, true).unwrap();
        logger.debug("STATE", "stderr only");
        assert!(logger.path().is_none());
        logger.finalize().unwrap();
    }
}
