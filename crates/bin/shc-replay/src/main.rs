//! # shc-replay
//!
//! Composition root that replays recorded poll cycles.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install logging on stderr so stdout stays machine-readable
//! - Construct the change bus and the poll-event processor
//! - Apply every cycle file given on the command line, in order
//! - Print the resulting registry as JSON
//!
//! ## Dependency rule
//! This is the wiring layer: no domain logic belongs here.

use std::path::PathBuf;
use std::sync::Arc;

use shc_app::change_bus::InProcessChangeBus;
use shc_app::services::poll_processor::PollEventProcessor;
use shc_replay::config::Config;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    // Change bus
    let bus = Arc::new(InProcessChangeBus::new(config.processor.change_bus_capacity));
    let mut changes = bus.subscribe();
    let watcher = tokio::spawn(async move {
        let mut seen = 0_usize;
        loop {
            match changes.recv().await {
                Ok(change) => {
                    seen += 1;
                    tracing::trace!(?change, "registry change");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "change watcher lagged");
                }
                Err(RecvError::Closed) => break seen,
            }
        }
    });

    // Processor
    let processor = PollEventProcessor::new(bus, config.processor.rejection_log_capacity);
    let reports = shc_replay::replay::replay(&processor, &paths).await?;

    let registry = processor.snapshot().await;
    let rejected: usize = reports.iter().map(|report| report.rejected.len()).sum();
    drop(processor);
    let seen = watcher.await?;
    tracing::info!(
        cycles = reports.len(),
        entities = registry.len(),
        rejected,
        changes = seen,
        "replay finished"
    );

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&registry)?
    } else {
        serde_json::to_string(&registry)?
    };
    println!("{json}");

    Ok(())
}
