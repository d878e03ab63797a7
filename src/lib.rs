pub mod config;
pub mod prober;

// Re-export the operator-facing surface for main.rs and embedders
pub use crate::config::ProbeConfig;
pub use crate::prober::{await_ready, HttpProbe, Probe, ProbeOutcome, ReadyReport, WaitError};
