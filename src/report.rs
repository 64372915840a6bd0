/*============================================================
  Synavera Project: Syn-Herald
  Module: synherald_core::report
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    HTTP client for the update-job reporting service, carrying
    structured warning records to the operator dashboard.

  Security / Safety Notes:
    Performs HTTPS POST requests only; the auth token travels
    in a header and is never interpolated into URLs or logs.

  Dependencies:
    reqwest for HTTP, serde_json for payloads.

  Operational Scope:
    Backs the dispatcher's ReportService seam; retry and
    timeout policy for deliveries lives here, not in the
    dispatcher.

  Revision History:
    2025-11-18 COD  Implemented asynchronous report client.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Defensive retry logic with exponential backoff
    - Structured payloads with explicit error paths
    - Configurable timeouts per deployment
============================================================*/

use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;
use urlencoding::encode;

use crate::config::ReportConfig;
use crate::dispatch::ReportService;
use crate::error::{Result, SynHeraldError};

/// Client for the job-reporting RPC surface.
#[derive(Clone)]
pub struct ReportClient {
    client: reqwest::Client,
    base_url: String,
    job_id: String,
    auth_token: Option<String>,
    max_retries: usize,
}

impl ReportClient {
    /// Construct a new client from configuration and the active job id.
    pub fn new(config: &ReportConfig, job_id: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent("Syn-Herald-Core/0.4 (linux)")
            .build()
            .map_err(|err| SynHeraldError::Network(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            job_id: job_id.to_string(),
            auth_token: config.auth_token.clone(),
            max_retries: config.max_retries.max(1),
        })
    }

    fn compose_url(&self, endpoint: &str) -> String {
        format!(
            "{}/update_jobs/{}/{endpoint}",
            self.base_url,
            encode(&self.job_id)
        )
    }

    async fn post_with_retry(&self, url: &str, payload: &serde_json::Value) -> Result<()> {
        let mut attempt = 0;
        loop {
            let mut request = self.client.post(url).json(payload);
            if let Some(token) = &self.auth_token {
                request = request.header("Authorization", format!("Token {token}"));
            }
            let response = request.send().await.map_err(|err| {
                SynHeraldError::Network(format!("Report request to {url} failed: {err}"))
            })?;

            let status = response.status();
            if status.is_success() {
                return Ok(());
            }

            attempt += 1;
            if attempt >= self.max_retries {
                return Err(SynHeraldError::Network(format!(
                    "Report request {url} failed with status {status} after {attempt} retries"
                )));
            }
            let exponent = (attempt as u32).min(8);
            let backoff = Duration::from_millis(200_u64.saturating_mul(1_u64 << exponent));
            sleep(backoff).await;
        }
    }
}

impl ReportService for ReportClient {
    async fn record_update_job_warn(
        &self,
        warn_type: &str,
        warn_title: &str,
        warn_message: &str,
    ) -> Result<()> {
        let payload = warn_payload(warn_type, warn_title, warn_message);
        let url = self.compose_url("record_update_job_warn");
        self.post_with_retry(&url, &payload).await
    }
}

fn warn_payload(warn_type: &str, warn_title: &str, warn_message: &str) -> serde_json::Value {
    json!({
        "data": {
            "warn-type": warn_type,
            "warn-title": warn_title,
            "warn-message": warn_message,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, job_id: &str) -> ReportClient {
        let config = ReportConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        ReportClient::new(&config, job_id).unwrap()
    }

    #[test]
    fn url_targets_the_job_scoped_endpoint() {
        let client = client("https://updater-api.synavera.dev/", "9001");
        assert_eq!(
            client.compose_url("record_update_job_warn"),
            "https://updater-api.synavera.dev/update_jobs/9001/record_update_job_warn"
        );
    }

    #[test]
    fn job_ids_are_percent_encoded() {
        let client = client("https://updater-api.synavera.dev", "job/42 beta");
        assert_eq!(
            client.compose_url("record_update_job_warn"),
            "https://updater-api.synavera.dev/update_jobs/job%2F42%20beta/record_update_job_warn"
        );
    }

    #[test]
    fn payload_uses_dashed_field_names() {
        let payload = warn_payload(
            "bundler_deprecated_warn",
            "Package manager deprecation notice",
            "Dependabot will stop supporting `bundler v1`!\n",
        );
        assert_eq!(payload["data"]["warn-type"], "bundler_deprecated_warn");
        assert_eq!(
            payload["data"]["warn-title"],
            "Package manager deprecation notice"
        );
        assert!(payload["data"]["warn-message"]
            .as_str()
            .unwrap()
            .starts_with("Dependabot will stop supporting"));
    }
}
