/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::dispatch
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Route deprecation notices: accumulate them into the job's
    collection for pull-request rendering, or deliver them
    immediately through the log stream and the job-reporting
    service.

  Security / Safety Notes:
    Delivery faults are contained here; a failing log sink or
    reporting service must never abort the surrounding update
    run.

  Dependencies:
    tokio runtime for the asynchronous delivery path.

  Operational Scope:
    Called by the core binary once per job; collaborators are
    supplied per call, the dispatcher holds no state.

  Revision History:
    2025-11-18 COD  Authored dispatch operations.
    2026-01-22 COD  Narrowed containment to the delivery step.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit capability seams instead of shared mix-in state
    - Accumulation is fail-fast, delivery is fail-contained
    - Sequential delivery with no retry of its own
============================================================*/

use crate::descriptor::PackageManagerDescriptor;
use crate::error::Result;
use crate::notice::{create_deprecation_notice, Notice};

/// Capability: receive operator-facing warning output.
///
/// `warn` is fallible so delivery containment can observe sink failures;
/// `error` is the containment channel itself and must not fail.
pub trait EventSink {
    fn warn(&self, message: &str) -> Result<()>;
    fn error(&self, message: &str);
}

/// Capability: reach the remote job-reporting service.
#[allow(async_fn_in_trait)]
pub trait ReportService {
    async fn record_update_job_warn(
        &self,
        warn_type: &str,
        warn_title: &str,
        warn_message: &str,
    ) -> Result<()>;
}

/// Append a deprecation notice for the descriptor to `notices`, if one is
/// due. No-op when the descriptor is absent or not deprecated.
///
/// Construction is pure and total; faults here propagate to the caller
/// instead of being swallowed.
pub fn add_deprecation_notice(
    notices: &mut Vec<Notice>,
    package_manager: Option<&PackageManagerDescriptor>,
) {
    if let Some(notice) = create_deprecation_notice(package_manager) {
        notices.push(notice);
    }
}

/// Deliver a deprecation notice out-of-band: one warn-level log line with
/// the plain message, then one structured record to the reporting service.
///
/// Silent no-op when no notice is due. Any fault raised during delivery is
/// converted to a single error-level log line and swallowed; the calling
/// update job never sees it.
pub async fn send_deprecation_notice<L, S>(
    logger: &L,
    service: &S,
    package_manager: &PackageManagerDescriptor,
) where
    L: EventSink,
    S: ReportService,
{
    let Some(notice) = create_deprecation_notice(Some(package_manager)) else {
        return;
    };

    if let Err(err) = deliver(logger, service, &notice).await {
        logger.error(&format!(
            "Failed to send package manager deprecation notice warning: {err}"
        ));
    }
}

async fn deliver<L, S>(logger: &L, service: &S, notice: &Notice) -> Result<()>
where
    L: EventSink,
    S: ReportService,
{
    logger.warn(&notice.message)?;
    service
        .record_update_job_warn(&notice.notice_type, &notice.title, &notice.message)
        .await
}
