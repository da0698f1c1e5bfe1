//! MyCloud Server: per-user file storage with public download links.
//!
//! Main entry point that loads configuration, sets up logging, and starts
//! the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use mycloud_core::config::AppConfig;
use mycloud_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Starting MyCloud v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = mycloud_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from the file named by `MYCLOUD_CONFIG` or the first
/// argument, layered over `config/default.toml` and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path = std::env::var("MYCLOUD_CONFIG")
        .ok()
        .or_else(|| std::env::args().nth(1));

    AppConfig::load(config_path.as_deref())
}

/// Initialize tracing/logging. `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "pretty" => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
    }
}
