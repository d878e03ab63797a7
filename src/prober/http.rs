//! HTTP GET readiness probe

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{Probe, ProbeOutcome};
use crate::config::ProbeConfig;

/// GET-based readiness probe
///
/// Issues one short-timeout GET per check and classifies the response.
/// Transport failures and non-2xx statuses all classify as unreachable; the
/// caller's only decision is keep waiting or give up, so the distinction is
/// logged at debug level and then dropped.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    request_timeout: Duration,
    signature: Option<String>,
}

impl HttpProbe {
    /// Create a probe with a per-request timeout and an optional expected
    /// body signature
    pub fn new(request_timeout: Duration, signature: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            request_timeout,
            signature,
        }
    }

    /// Create the probe a config describes
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(
            config.effective_probe_timeout(),
            config.expected_signature.clone(),
        )
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let response = match self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, error = %e, "Probe transport failure");
                return ProbeOutcome::Unreachable;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "Probe got non-success status");
            return ProbeOutcome::Unreachable;
        }

        let Some(signature) = &self.signature else {
            return ProbeOutcome::ReachableUnverified;
        };

        // The endpoint is up either way; the body only decides verified vs not.
        match response.text().await {
            Ok(body) if body.to_lowercase().contains(&signature.to_lowercase()) => {
                ProbeOutcome::ReachableVerified
            }
            Ok(_) => {
                debug!(url = %url, signature = %signature, "Body did not contain signature");
                ProbeOutcome::ReachableUnverified
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Failed to read response body");
                ProbeOutcome::ReachableUnverified
            }
        }
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
