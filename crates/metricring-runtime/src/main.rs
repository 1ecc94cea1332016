//! metricring reporter
//!
//! Boots a registry directory from `METRICRING_CONFIG` (default
//! `metricring.yaml`), prints every registry's text dump on the configured
//! report interval and stops all rotation tasks on Ctrl-C.

use std::process::ExitCode;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing_subscriber::{fmt, EnvFilter};

use metricring_core::Result;
use metricring_runtime::{config, RegistryDirectory};

const DEFAULT_CONFIG_PATH: &str = "metricring.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "metricring failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("METRICRING_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;

    let directory = RegistryDirectory::new();
    config::build_directory(&cfg, &directory)?;
    tracing::info!(%path, registries = directory.len(), "metricring started");

    let mut report = tokio::time::interval(Duration::from_millis(cfg.report.interval_ms));
    report.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = report.tick() => {
                for name in directory.registry_names() {
                    match directory.dump_registry(&name) {
                        Ok(text) => println!("{text}"),
                        Err(e) => tracing::warn!(registry = %name, error = %e, "dump failed"),
                    }
                }
            }
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    tracing::warn!(error = %e, "ctrl-c handler failed, shutting down");
                }
                break;
            }
        }
    }

    directory.shutdown().await;
    tracing::info!("metricring stopped");
    Ok(())
}
