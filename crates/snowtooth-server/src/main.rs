//! Server binary for the Snowtooth resort status service.
//!
//! Loads configuration, initializes logging, builds the resort context
//! from the initial dataset, and serves the HTTP + `WebSocket` API until
//! `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `snowtooth-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Read the lift and trail datasets
//! 4. Build the resort context (collections + notification bus)
//! 5. Serve the API

mod error;

use std::path::Path;
use std::sync::Arc;

use snowtooth_api::AppState;
use snowtooth_core::config::{LogFormat, LoggingConfig};
use snowtooth_core::{Dataset, ResortContext, SnowtoothConfig};
use snowtooth_types::Status;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "snowtooth-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, dataset loading, or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = SnowtoothConfig::load(Path::new(CONFIG_PATH)).map_err(AppError::from)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        host = config.http.host,
        port = config.http.port,
        lifts_path = %config.data.lifts_path.display(),
        trails_path = %config.data.trails_path.display(),
        "snowtooth starting"
    );

    run(config).await?;
    Ok(())
}

async fn run(config: SnowtoothConfig) -> Result<(), AppError> {
    // 3. Read the datasets.
    let dataset = Dataset::from_files(&config.data.lifts_path, &config.data.trails_path)?;

    // 4. Build the resort context.
    let resort = ResortContext::from_dataset(dataset, &config.notifications)?;
    info!(
        lifts_open = resort.lift_count(Some(Status::Open)).await,
        trails_open = resort.trail_count(Some(Status::Open)).await,
        "Resort ready"
    );

    // 5. Serve.
    let state = Arc::new(AppState::new(resort));
    snowtooth_api::start_server(&config.http, state).await?;

    info!("snowtooth shut down cleanly");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_dataset_is_a_dataset_error() {
        let mut config = SnowtoothConfig::default();
        config.data.lifts_path = "no/such/lifts.json".into();
        let err = run(config).await.unwrap_err();
        assert!(matches!(err, AppError::Dataset { .. }));
    }

    #[tokio::test]
    async fn unparsable_listen_address_is_a_server_error() {
        let mut config = SnowtoothConfig::default();
        config.data.lifts_path = "../../data/lifts.json".into();
        config.data.trails_path = "../../data/trails.json".into();
        config.http.host = String::from("not an address");
        let err = run(config).await.unwrap_err();
        assert!(matches!(err, AppError::Server { .. }));
    }
}
