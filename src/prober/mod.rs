//! Readiness probing for newly launched network services
//!
//! Given an ordered list of candidate URLs for a service that was just asked
//! to start, [`await_ready`] polls them until one answers or a deadline
//! elapses:
//!
//! - [`Probe`]: the transport seam the poll loop drives
//! - [`HttpProbe`]: the GET-based implementation shipped with the crate
//! - [`ProbeOutcome`]: classification of a single attempt
//! - [`ReadyReport`] / [`WaitError`]: what a wait resolves to
//!
//! One probe is in flight at a time; candidates are tried strictly in their
//! declared order, and the first 2xx in a round wins the whole wait.

pub mod error;
pub mod http;
pub mod session;

pub use error::{TimeoutError, WaitError};
pub use http::HttpProbe;
pub use session::{await_ready, wait_with_probe, ReadyReport};

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Classification of a single probe attempt
///
/// Reachability alone decides success; signature verification upgrades the
/// outcome but never gates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeOutcome {
    /// Transport error, per-request timeout, or non-2xx status
    Unreachable,
    /// 2xx, but no signature configured or the body did not contain it
    ReachableUnverified,
    /// 2xx and the body contained the expected signature
    ReachableVerified,
}

impl ProbeOutcome {
    /// Whether this outcome ends the wait successfully
    pub fn is_reachable(&self) -> bool {
        !matches!(self, ProbeOutcome::Unreachable)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProbeOutcome::Unreachable => "unreachable",
            ProbeOutcome::ReachableUnverified => "reachable-unverified",
            ProbeOutcome::ReachableVerified => "reachable-verified",
        };
        f.write_str(label)
    }
}

/// Transport seam for a single readiness check
///
/// The poll loop in [`session`] drives implementations of this trait and
/// never interprets transport detail beyond the returned [`ProbeOutcome`].
/// Implementations must bound each check with their own per-request timeout
/// so the loop's cadence stays bounded.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Check one candidate once
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(ProbeOutcome::Unreachable.to_string(), "unreachable");
        assert_eq!(
            ProbeOutcome::ReachableUnverified.to_string(),
            "reachable-unverified"
        );
        assert_eq!(
            ProbeOutcome::ReachableVerified.to_string(),
            "reachable-verified"
        );
    }

    #[test]
    fn test_reachability_decides_success() {
        assert!(!ProbeOutcome::Unreachable.is_reachable());
        assert!(ProbeOutcome::ReachableUnverified.is_reachable());
        assert!(ProbeOutcome::ReachableVerified.is_reachable());
    }

    #[test]
    fn test_outcome_serializes_kebab_case() {
        let value = serde_json::to_value(ProbeOutcome::ReachableVerified).expect("serialize");
        assert_eq!(value, serde_json::json!("reachable-verified"));
    }
}
