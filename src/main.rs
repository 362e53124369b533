//! Supplier service binary: reads settings from the environment, connects, serves, and
//! shuts down cleanly on SIGINT/SIGTERM.

use std::process::ExitCode;
use supplier_service::{app, lifecycle, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supplier_service=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(environment = %settings.environment, ssl = ?settings.ssl_mode, "starting");
    let db = lifecycle::connect(&settings).await?;
    let state = AppState::new(db.clone(), settings.errors);

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("listening on http://{}/suppliers", listener.local_addr()?);

    match lifecycle::serve(listener, app(state), db, lifecycle::shutdown_signal()).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "shutdown failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
