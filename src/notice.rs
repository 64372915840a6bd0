/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::notice
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Model operator-facing notices and derive the package-manager
    deprecation warning from a descriptor, including the plain
    message and its pull-request markdown rendering.

  Security / Safety Notes:
    Pure construction and string rendering; no I/O performed in
    this module.

  Dependencies:
    serde for manifest serialization.

  Operational Scope:
    Feeds the dispatcher and the notices manifest; markdown
    output is embedded verbatim into pull-request bodies.

  Revision History:
    2025-11-18 COD  Authored notice model and factory.
    2026-01-22 COD  Callout label now follows notice mode.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Immutable records assembled in one step
    - Total construction over well-formed descriptors
    - Deterministic rendering for reproducible PR bodies
============================================================*/

use serde::Serialize;

use crate::descriptor::{PackageManagerDescriptor, Version};

/// Title shared by all package-manager deprecation notices.
pub const DEPRECATION_NOTICE_TITLE: &str = "Package manager deprecation notice";

/// Severity of a notice. Deprecation detection only emits `Warn`;
/// `Error` is kept for the severity scale consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoticeMode {
    Warn,
    #[allow(dead_code)]
    Error,
}

impl NoticeMode {
    /// GitHub admonition label for the markdown callout block.
    fn callout_label(self) -> &'static str {
        match self {
            NoticeMode::Warn => "WARNING",
            NoticeMode::Error => "IMPORTANT",
        }
    }
}

/// One operator-facing warning record. All fields are set together at
/// construction and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub mode: NoticeMode,
    #[serde(rename = "type")]
    pub notice_type: String,
    pub package_manager_name: String,
    pub title: String,
    pub message: String,
    pub markdown: String,
}

/// Derive a deprecation notice from the package-manager descriptor.
///
/// Returns `None` when no descriptor was supplied or the active version is
/// not in the deprecated set. An empty supported set still yields a notice
/// with an empty upgrade list; the deprecation signal itself is the
/// load-bearing content.
pub fn create_deprecation_notice(
    package_manager: Option<&PackageManagerDescriptor>,
) -> Option<Notice> {
    let manager = package_manager?;
    if !manager.is_deprecated() {
        return None;
    }

    let message = format!(
        "Dependabot will stop supporting `{} v{}`!\n\
         Please upgrade to one of the following versions: {}.\n",
        manager.name,
        manager.version,
        render_supported_versions(&manager.supported_versions)
    );
    let mode = NoticeMode::Warn;

    Some(Notice {
        mode,
        notice_type: format!("{}_deprecated_warn", manager.name),
        package_manager_name: manager.name.clone(),
        title: DEPRECATION_NOTICE_TITLE.to_string(),
        markdown: render_markdown_callout(mode, &message),
        message,
    })
}

/// Render the supported set as a backtick-quoted sentence fragment:
/// one version stands alone, the last of several is prefixed with "or".
fn render_supported_versions(versions: &[Version]) -> String {
    let mut quoted: Vec<String> = versions
        .iter()
        .map(|version| format!("`v{version}`"))
        .collect();
    if quoted.len() > 1 {
        if let Some(last) = quoted.last_mut() {
            *last = format!("or {last}");
        }
    }
    quoted.join(", ")
}

/// Wrap a plain message as a GitHub callout block: a `[!LABEL]` header,
/// then each message line quoted and followed by a blank quoted line.
pub fn render_markdown_callout(mode: NoticeMode, message: &str) -> String {
    let mut rendered = format!("> [!{}]\n", mode.callout_label());
    for line in message.lines() {
        rendered.push_str("> ");
        rendered.push_str(line);
        rendered.push_str("\n>\n");
    }
    rendered
}

/// Join the markdown of each notice in insertion order for embedding in a
/// pull-request body.
pub fn render_notices_markdown(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| notice.markdown.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundler(version: &str, deprecated: &[&str], supported: &[&str]) -> PackageManagerDescriptor {
        PackageManagerDescriptor {
            name: "bundler".to_string(),
            version: Version::new(version),
            deprecated_versions: deprecated.iter().map(Version::new).collect(),
            supported_versions: supported.iter().map(Version::new).collect(),
        }
    }

    #[test]
    fn deprecated_manager_yields_warn_notice() {
        let manager = bundler("1", &["1"], &["2", "3"]);
        let notice = create_deprecation_notice(Some(&manager)).unwrap();

        assert_eq!(notice.mode, NoticeMode::Warn);
        assert_eq!(notice.notice_type, "bundler_deprecated_warn");
        assert_eq!(notice.package_manager_name, "bundler");
        assert_eq!(notice.title, DEPRECATION_NOTICE_TITLE);
    }

    #[test]
    fn message_matches_observed_wording_exactly() {
        let manager = bundler("1", &["1"], &["2", "3"]);
        let notice = create_deprecation_notice(Some(&manager)).unwrap();

        assert_eq!(
            notice.message,
            "Dependabot will stop supporting `bundler v1`!\n\
             Please upgrade to one of the following versions: `v2`, or `v3`.\n"
        );
    }

    #[test]
    fn markdown_renders_warning_callout() {
        let manager = bundler("1", &["1"], &["2", "3"]);
        let notice = create_deprecation_notice(Some(&manager)).unwrap();

        assert_eq!(
            notice.markdown,
            "> [!WARNING]\n\
             > Dependabot will stop supporting `bundler v1`!\n\
             >\n\
             > Please upgrade to one of the following versions: `v2`, or `v3`.\n\
             >\n"
        );
    }

    #[test]
    fn absent_manager_yields_no_notice() {
        assert!(create_deprecation_notice(None).is_none());
    }

    #[test]
    fn supported_manager_yields_no_notice() {
        let manager = bundler("2", &["1"], &["2", "3"]);
        assert!(create_deprecation_notice(Some(&manager)).is_none());
    }

    #[test]
    fn single_supported_version_has_no_connective() {
        let manager = bundler("1", &["1"], &["2"]);
        let notice = create_deprecation_notice(Some(&manager)).unwrap();
        assert!(notice
            .message
            .contains("Please upgrade to one of the following versions: `v2`.\n"));
    }

    #[test]
    fn three_supported_versions_join_with_final_or() {
        let manager = bundler("1", &["1"], &["2", "3", "4"]);
        let notice = create_deprecation_notice(Some(&manager)).unwrap();
        assert!(notice
            .message
            .contains("Please upgrade to one of the following versions: `v2`, `v3`, or `v4`.\n"));
    }

    #[test]
    fn empty_supported_set_still_produces_notice() {
        let manager = bundler("1", &["1"], &[]);
        let notice = create_deprecation_notice(Some(&manager)).unwrap();
        assert!(notice
            .message
            .contains("Please upgrade to one of the following versions: .\n"));
    }

    #[test]
    fn error_mode_renders_important_callout() {
        let rendered = render_markdown_callout(NoticeMode::Error, "Support ended.\n");
        assert_eq!(rendered, "> [!IMPORTANT]\n> Support ended.\n>\n");
    }

    #[test]
    fn notices_markdown_preserves_insertion_order() {
        let first = create_deprecation_notice(Some(&bundler("1", &["1"], &["2"]))).unwrap();
        let second = {
            let mut manager = bundler("1", &["1"], &["3"]);
            manager.name = "composer".to_string();
            create_deprecation_notice(Some(&manager)).unwrap()
        };

        let body = render_notices_markdown(&[first.clone(), second]);
        assert!(body.starts_with(&first.markdown));
        assert!(body.contains("composer v1"));
    }

    #[test]
    fn notice_serializes_type_under_wire_name() {
        let manager = bundler("1", &["1"], &["2"]);
        let notice = create_deprecation_notice(Some(&manager)).unwrap();
        let value = serde_json::to_value(&notice).unwrap();
        assert_eq!(value["type"], "bundler_deprecated_warn");
        assert_eq!(value["mode"], "WARN");
    }
}
