//! Error types for readiness waits

use crate::config::ConfigError;
use std::time::Duration;
use thiserror::Error;

/// Terminal failure: the deadline elapsed with no candidate answering 2xx
///
/// Carries everything an operator needs to diagnose a stuck startup without
/// re-reading logs: which URLs were tried, for how long, over how many
/// rounds.
#[derive(Debug, Error)]
#[error(
    "no candidate became ready within {:.1}s ({} rounds): tried {}",
    .elapsed.as_secs_f64(),
    .rounds,
    .candidates.join(", ")
)]
pub struct TimeoutError {
    /// Every candidate URL that was attempted, in priority order
    pub candidates: Vec<String>,

    /// Wall time spent waiting
    pub elapsed: Duration,

    /// Completed poll rounds
    pub rounds: u32,
}

/// Errors a readiness wait can resolve to
#[derive(Debug, Error)]
pub enum WaitError {
    /// Invalid configuration, surfaced before any network I/O
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Deadline elapsed with no candidate ready
    #[error(transparent)]
    Timeout(#[from] TimeoutError),
}
