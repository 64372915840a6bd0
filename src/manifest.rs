/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::manifest
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Assemble and persist the notices manifest consumed by the
    update-job orchestrator, plus the pull-request markdown
    section derived from the same notices.

  Security / Safety Notes:
    Manifest data is written to operator-controlled paths; no
    privileged operations are performed.

  Dependencies:
    serde for JSON serialization.

  Operational Scope:
    Consumed by the orchestrator to fold warnings into the
    pull-request description.

  Revision History:
    2025-11-18 COD  Authored notices manifest builder.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Insertion order preserved for reproducible PR bodies
    - Rich metadata for audit and observability
============================================================*/

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Result, SynHeraldError};
use crate::notice::{render_notices_markdown, Notice};

/// Wrapper representing the full notices document.
#[derive(Debug, Serialize)]
pub struct NoticeDocument {
    pub metadata: NoticeMetadata,
    pub notices: Vec<Notice>,
}

/// Metadata block describing document context.
#[derive(Debug, Serialize)]
pub struct NoticeMetadata {
    pub generated_at: String,
    pub generated_by: String,
    pub package_manager: Option<String>,
    pub notice_count: usize,
}

/// Build a notices document from the accumulated collection.
pub fn build_document(package_manager: Option<&str>, notices: Vec<Notice>) -> NoticeDocument {
    let metadata = NoticeMetadata {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        generated_by: "synherald_core".to_string(),
        package_manager: package_manager.map(str::to_string),
        notice_count: notices.len(),
    };

    NoticeDocument { metadata, notices }
}

/// Persist the notices document to the given path.
pub fn write_document(document: &NoticeDocument, path: &Path) -> Result<()> {
    let file = create_output_file(path)?;
    serde_json::to_writer_pretty(file, document).map_err(|err| {
        SynHeraldError::Filesystem(format!(
            "Failed to write notices manifest {}: {err}",
            path.display()
        ))
    })?;
    Ok(())
}

/// Persist the pull-request markdown section for the given notices.
pub fn write_markdown(notices: &[Notice], path: &Path) -> Result<()> {
    let mut file = create_output_file(path)?;
    file.write_all(render_notices_markdown(notices).as_bytes())
        .map_err(|err| {
            SynHeraldError::Filesystem(format!(
                "Failed to write markdown section {}: {err}",
                path.display()
            ))
        })?;
    Ok(())
}

fn create_output_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            SynHeraldError::Filesystem(format!(
                "Failed to create output directory {}: {err}",
                parent.display()
            ))
        })?;
    }
    File::create(path).map_err(|err| {
        SynHeraldError::Filesystem(format!(
            "Failed to create output file {}: {err}",
            path.display()
        ))
    })
}
