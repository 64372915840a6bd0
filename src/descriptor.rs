/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::descriptor
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Shared structures describing the package-manager integration
    state handed over by the update job (active version plus the
    deprecated and supported version sets).

  Security / Safety Notes:
    Pure data containers; file reads are limited to the
    operator-supplied job-state path.

  Dependencies:
    serde for job-state deserialization.

  Operational Scope:
    Consumed by the notice factory and dispatcher to decide
    whether a deprecation warning is due.

  Revision History:
    2025-11-18 COD  Introduced descriptor and job-state types.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Clear data contracts between modules
    - Membership in the deprecated set is the sole signal
============================================================*/

use std::fmt;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SynHeraldError};

/// Normalized package-manager version value.
///
/// Versions are compared by equality and set membership only; no ordering
/// semantics are assumed beyond what the ecosystem integration reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Build a version from a raw string, trimming stray whitespace.
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        Self(raw.as_ref().trim().to_string())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Version::new(raw))
    }
}

/// Snapshot of one package-manager integration as reported by the job.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManagerDescriptor {
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub deprecated_versions: Vec<Version>,
    #[serde(default)]
    pub supported_versions: Vec<Version>,
}

impl PackageManagerDescriptor {
    /// True iff the active version is a member of the deprecated set.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated_versions.contains(&self.version)
    }
}

/// Job-state document written by the update-job orchestrator.
#[derive(Debug, Deserialize)]
pub struct JobState {
    pub job_id: Option<String>,
    pub package_manager: Option<PackageManagerDescriptor>,
}

/// Read and deserialize the job-state document at `path`.
pub fn read_job_state(path: &Path) -> Result<JobState> {
    let file = File::open(path).map_err(|err| {
        SynHeraldError::Filesystem(format!(
            "Failed to open job state {}: {err}",
            path.display()
        ))
    })?;
    serde_json::from_reader(file).map_err(|err| {
        SynHeraldError::Serialization(format!(
            "Failed to decode job state {}: {err}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(version: &str, deprecated: &[&str], supported: &[&str]) -> PackageManagerDescriptor {
        PackageManagerDescriptor {
            name: "bundler".to_string(),
            version: Version::new(version),
            deprecated_versions: deprecated.iter().map(Version::new).collect(),
            supported_versions: supported.iter().map(Version::new).collect(),
        }
    }

    #[test]
    fn deprecated_when_version_in_deprecated_set() {
        assert!(descriptor("1", &["1"], &["2", "3"]).is_deprecated());
    }

    #[test]
    fn not_deprecated_when_version_outside_deprecated_set() {
        assert!(!descriptor("2", &["1"], &["2", "3"]).is_deprecated());
        assert!(!descriptor("2", &[], &["2", "3"]).is_deprecated());
    }

    #[test]
    fn version_normalizes_whitespace() {
        assert_eq!(Version::new(" 1 "), Version::new("1"));
        assert_eq!(Version::new("2.3").to_string(), "2.3");
    }

    #[test]
    fn job_state_decodes_descriptor_fields() {
        let raw = r#"{
            "job_id": "9001",
            "package_manager": {
                "name": "bundler",
                "version": "1",
                "deprecated_versions": ["1"],
                "supported_versions": ["2", "3"]
            }
        }"#;
        let state: JobState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.job_id.as_deref(), Some("9001"));
        let manager = state.package_manager.unwrap();
        assert_eq!(manager.name, "bundler");
        assert!(manager.is_deprecated());
        assert_eq!(manager.supported_versions.len(), 2);
    }

    #[test]
    fn job_state_tolerates_missing_package_manager() {
        let state: JobState = serde_json::from_str(r#"{"job_id": null}"#).unwrap();
        assert!(state.package_manager.is_none());
    }
}
