//! FL Store API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p fl-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use fl_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let tracing_config = match std::env::var("APP_ENV").as_deref() {
        Ok("production") => TracingConfig::production(),
        _ => TracingConfig::development(),
    };
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting FL Store API server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        database = config.database.is_some(),
        redis = config.redis.is_some(),
        "Configuration loaded"
    );

    fl_api::run(config).await?;

    Ok(())
}
