//! Probe configuration
//!
//! The original helper configured everything through ad hoc environment
//! variables read at their point of use. Here configuration is an explicit
//! value object with named fields, resolved once and validated before any
//! probing starts.

use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Default overall deadline for a service to come up
pub const DEFAULT_TOTAL_TIMEOUT: Duration = Duration::from_secs(120);

/// Default cadence between poll rounds
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default per-request timeout; clamped to the poll interval at use
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// The two local ports the web UI is expected to appear on
pub const DEFAULT_CANDIDATES: [&str; 2] = ["http://127.0.0.1:3000/", "http://127.0.0.1:8080/"];

/// Errors produced while building or validating a [`ProbeConfig`]
///
/// All of these fail fast, before any network I/O, and are never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("candidate list is empty")]
    NoCandidates,

    #[error("candidate {url:?} is not a valid http(s) URL: {reason}")]
    InvalidCandidate { url: String, reason: String },

    #[error("total timeout must be greater than zero")]
    ZeroTimeout,

    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("invalid value {value:?} for {var}: expected whole seconds")]
    InvalidEnvValue { var: String, value: String },
}

/// Configuration for one readiness wait
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Candidate URLs in priority order; the first to answer 2xx wins
    pub candidates: Vec<String>,

    /// Overall deadline for the service to become ready
    pub total_timeout: Duration,

    /// Cadence between poll rounds
    pub poll_interval: Duration,

    /// Timeout for a single GET; never applied longer than the poll interval
    pub probe_timeout: Duration,

    /// Substring expected in a ready response body (matched case-insensitively)
    pub expected_signature: Option<String>,
}

impl ProbeConfig {
    /// Create a config with defaults for everything but the candidates
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            total_timeout: DEFAULT_TOTAL_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            expected_signature: None,
        }
    }

    /// Create a config from environment variables
    ///
    /// Uses:
    /// - `VALMIS_TIMEOUT_SECS` for the overall deadline (default 120)
    /// - `VALMIS_POLL_INTERVAL_SECS` for the poll cadence (default 1)
    /// - `VALMIS_PROBE_TIMEOUT_SECS` for the per-request timeout (default 3)
    /// - `VALMIS_SIGNATURE` for the expected body signature (default unset)
    ///
    /// Parse failures are errors, not silent fallbacks to the default.
    pub fn from_env(candidates: Vec<String>) -> Result<Self, ConfigError> {
        let mut config = Self::new(candidates);

        if let Some(timeout) = duration_from_env("VALMIS_TIMEOUT_SECS")? {
            config.total_timeout = timeout;
        }
        if let Some(interval) = duration_from_env("VALMIS_POLL_INTERVAL_SECS")? {
            config.poll_interval = interval;
        }
        if let Some(probe_timeout) = duration_from_env("VALMIS_PROBE_TIMEOUT_SECS")? {
            config.probe_timeout = probe_timeout;
        }
        config.expected_signature = std::env::var("VALMIS_SIGNATURE")
            .ok()
            .filter(|signature| !signature.is_empty());

        Ok(config)
    }

    /// Validate the config
    ///
    /// Called by the prober before any network I/O so that a bad config is a
    /// fast, distinct failure rather than a slow timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidates.is_empty() {
            return Err(ConfigError::NoCandidates);
        }

        for url in &self.candidates {
            let parsed =
                reqwest::Url::parse(url).map_err(|e| ConfigError::InvalidCandidate {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(ConfigError::InvalidCandidate {
                    url: url.clone(),
                    reason: format!("unsupported scheme {:?}", parsed.scheme()),
                });
            }
        }

        if self.total_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        // Legal but almost certainly a mistake: at most one round will run.
        if self.poll_interval > self.total_timeout {
            warn!(
                poll_interval = ?self.poll_interval,
                total_timeout = ?self.total_timeout,
                "Poll interval exceeds total timeout"
            );
        }

        Ok(())
    }

    /// Per-request timeout actually applied to probes
    ///
    /// A probe request must not outlive the poll cadence, so the configured
    /// probe timeout is clamped to the poll interval.
    pub fn effective_probe_timeout(&self) -> Duration {
        self.probe_timeout.min(self.poll_interval)
    }
}

/// Read a whole-seconds duration from an environment variable
///
/// Returns `Ok(None)` when the variable is unset so the default applies.
fn duration_from_env(var: &str) -> Result<Option<Duration>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvValue {
                    var: var.to_string(),
                    value: value.clone(),
                })?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
