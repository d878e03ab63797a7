//! The poll loop: probe candidates until one is ready or the deadline passes
//!
//! A probe session is transient and owned by the call: the deadline, tick
//! state, and round counter live on the stack and are gone when the wait
//! returns. Nothing is shared across sessions.

use serde::Serialize;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::error::{TimeoutError, WaitError};
use super::http::HttpProbe;
use super::{Probe, ProbeOutcome};
use crate::config::ProbeConfig;

/// Successful resolution of a readiness wait
#[derive(Debug, Clone, Serialize)]
pub struct ReadyReport {
    /// The candidate that answered 2xx, first in priority order
    pub url: String,

    /// How the winning response classified
    pub outcome: ProbeOutcome,

    /// Wall time from the start of the wait to the winning response
    #[serde(rename = "elapsed_secs", serialize_with = "secs_f64")]
    pub elapsed: Duration,

    /// 1-based poll round in which the service came up
    pub round: u32,
}

fn secs_f64<S>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Wait for one of the configured candidates to answer 2xx
///
/// Validates the config, builds the [`HttpProbe`] it describes, and runs the
/// poll loop. This is the crate's front door.
pub async fn await_ready(config: &ProbeConfig) -> Result<ReadyReport, WaitError> {
    config.validate()?;
    let probe = HttpProbe::from_config(config);
    wait_with_probe(config, &probe).await
}

/// Poll loop over an arbitrary [`Probe`] transport
///
/// Candidates are tried strictly in declared order and the first reachable
/// one in a round wins the wait immediately, so a later candidate is never
/// preferred over an earlier one that also came up in the same round. The
/// loop itself is the retry mechanism; there is no backoff, because the
/// service under test is expected to go from "not yet started" to "ready"
/// monotonically within the deadline.
pub async fn wait_with_probe(
    config: &ProbeConfig,
    probe: &dyn Probe,
) -> Result<ReadyReport, WaitError> {
    config.validate()?;

    let started = Instant::now();
    let deadline = started + config.total_timeout;

    // The first tick fires immediately so an already-ready service resolves
    // in round one. Delay keeps ticks from bunching up when a round of
    // probes runs longer than the interval, bounding the effective cadence
    // at poll_interval + probe latency.
    let mut ticks = tokio::time::interval(config.poll_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut rounds: u32 = 0;
    while Instant::now() < deadline {
        ticks.tick().await;
        if Instant::now() >= deadline {
            break;
        }
        rounds += 1;

        for url in &config.candidates {
            let outcome = probe.probe(url).await;
            if outcome.is_reachable() {
                let elapsed = started.elapsed();
                info!(url = %url, outcome = %outcome, round = rounds, "Endpoint is ready");
                return Ok(ReadyReport {
                    url: url.clone(),
                    outcome,
                    elapsed,
                    round: rounds,
                });
            }
        }

        debug!(round = rounds, elapsed = ?started.elapsed(), "No candidate ready yet");
    }

    Err(TimeoutError {
        candidates: config.candidates.clone(),
        elapsed: started.elapsed(),
        rounds,
    }
    .into())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
