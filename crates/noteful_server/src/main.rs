//! Noteful API server entry point.

use log::{error, info};
use noteful_core::init_logging;
use noteful_server::config::Config;
use noteful_server::store::Store;
use noteful_server::{build_router, AppState};
use std::error::Error;
use std::net::SocketAddr;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing `.env` is normal in deployed environments.
    dotenv::dotenv().ok();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=server status=error error={err}");
            eprintln!("noteful_server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    let store = Store::open(&config.database)?;
    let app = build_router(AppState::new(store, config.environment));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "event=server_listen module=server status=ok addr={} environment={}",
        addr,
        config.environment.as_str()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=server status=error error={err}");
    }
}
