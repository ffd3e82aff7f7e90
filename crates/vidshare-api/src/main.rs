//! vidshare API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p vidshare-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`), or from
//! the TOML file named by `VIDSHARE_CONFIG`.

use tracing::{error, info};
use vidshare_common::{try_init_tracing, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        persistence = ?config.persistence.backend,
        storage = ?config.storage.backend,
        "Configuration loaded"
    );

    if let Err(e) = vidshare_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
