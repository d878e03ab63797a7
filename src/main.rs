use tracing::{error, info};
use valmis::config::DEFAULT_CANDIDATES;
use valmis::{await_ready, ProbeConfig};

/// Environment variable selecting the success report format
const OUTPUT_ENV: &str = "VALMIS_OUTPUT";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let candidates = candidates_from_args(std::env::args().skip(1).collect());
    let config = ProbeConfig::from_env(candidates)?;

    info!(
        candidates = ?config.candidates,
        timeout = ?config.total_timeout,
        poll_interval = ?config.poll_interval,
        "Waiting for service readiness"
    );

    let report = match await_ready(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Service did not become ready");
            return Err(e.into());
        }
    };

    if std::env::var(OUTPUT_ENV).as_deref() == Ok("json") {
        // One JSON object on stdout so shell callers can consume the result
        // without parsing prose.
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "ready: {} ({}) after {:.1}s",
            report.url,
            report.outcome,
            report.elapsed.as_secs_f64()
        );
    }

    Ok(())
}

/// Candidate URLs from the command line, falling back to the two local ports
/// the service is expected to appear on
pub fn candidates_from_args(args: Vec<String>) -> Vec<String> {
    if args.is_empty() {
        DEFAULT_CANDIDATES.iter().map(|url| url.to_string()).collect()
    } else {
        args
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
