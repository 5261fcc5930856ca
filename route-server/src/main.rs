use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use route_server::config::ServerConfig;
use route_server::network::{LoadError, Network, NetworkData};
use route_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "route_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // An invalid network is fatal: never serve queries against it
    let network = match load_network(&config) {
        Ok(network) => network,
        Err(e) => {
            error!(error = %e, "Failed to load network");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(network);
    let app = create_router(state, &config.allowed_origins);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "Route server listening");
    info!("  GET  /health          - Health check");
    info!("  GET  /api/stations    - List stations");
    info!("  POST /api/find-path   - Find a route");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Load the configured network, or the demo network if none is configured.
fn load_network(config: &ServerConfig) -> Result<Network, LoadError> {
    let data = match &config.network_path {
        Some(path) => {
            info!(path = %path.display(), "Loading network data");
            NetworkData::read(path)?
        }
        None => {
            info!("No {} set, serving the demo network", route_server::config::NETWORK_PATH_VAR);
            NetworkData::demo()?
        }
    };
    data.into_network()
}
