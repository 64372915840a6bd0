/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::error
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Centralise Syn-Herald-Core error types to provide consistent
    diagnostics and exit semantics.

  Security / Safety Notes:
    Error contexts redact potentially sensitive data such as
    reporting-service tokens; only high-level paths are exposed.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    Used across modules to propagate recoverable failures and
    consolidate exit codes for the binary entry point.

  Revision History:
    2025-11-18 COD  Established shared error definitions.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit error taxonomy with actionable context
    - No silent failure paths outside the delivery boundary
    - Stable exit codes for operational tooling
============================================================*/

use std::io;
use std::process::ExitCode;

use thiserror::Error;

/// Result alias for Syn-Herald-Core operations.
pub type Result<T> = std::result::Result<T, SynHeraldError>;

/// Enumerates high-level error domains surfaced by Syn-Herald-Core.
#[derive(Debug, Error)]
pub enum SynHeraldError {
    #[error("Configuration: {0}")]
    Config(String),
    #[error("Network: {0}")]
    Network(String),
    #[error("Serialization: {0}")]
    Serialization(String),
    #[error("Filesystem: {0}")]
    Filesystem(String),
    #[error("Runtime: {0}")]
    Runtime(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SynHeraldError {
    /// Map error category to a deterministic exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SynHeraldError::Config(_) => ExitCode::from(20),
            SynHeraldError::Network(_) => ExitCode::from(30),
            SynHeraldError::Serialization(_) => ExitCode::from(31),
            SynHeraldError::Filesystem(_) => ExitCode::from(40),
            SynHeraldError::Io(_) => ExitCode::from(41),
            SynHeraldError::Runtime(_) => ExitCode::from(50),
        }
    }
}
