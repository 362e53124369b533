//! Startup and shutdown: connect and sync the store, serve until a termination signal,
//! drain in-flight requests, then release the pool.

use crate::config::Settings;
use crate::error::{LifecycleError, StoreError};
use crate::routes::App;
use crate::store::{Database, SUPPLIERS_TABLE};
use axum::{extract::Request, ServiceExt};
use std::future::Future;
use tokio::net::TcpListener;

/// Configure the pool, then report on reachability and schema. Neither check aborts
/// startup; `/health` reports the live status instead.
pub async fn connect(settings: &Settings) -> Result<Database, StoreError> {
    let db = Database::configure_with(&settings.database_url, settings.ssl_mode, &settings.pool)?;
    match db.authenticate().await {
        Ok(()) => tracing::info!("connected to database"),
        Err(e) => tracing::error!(error = %e, "could not connect to database"),
    }
    match db.sync().await {
        Ok(()) => tracing::info!(table = SUPPLIERS_TABLE, "schema synchronized"),
        Err(e) => tracing::error!(error = %e, "schema sync failed"),
    }
    Ok(db)
}

/// Serve `app` until `signal` resolves, wait for in-flight requests, then close `db`.
/// The pool is closed even when the server itself failed.
pub async fn serve<F>(listener: TcpListener, app: App, db: Database, signal: F) -> Result<(), LifecycleError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let served = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(signal)
        .await;
    if let Err(e) = &served {
        tracing::error!(error = %e, "server stopped with an error");
    }
    tracing::info!("closing database connections");
    db.close().await?;
    served?;
    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C (SIGINT) or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorExposure;
    use crate::state::AppState;
    use crate::store::SslMode;

    fn lazy_db() -> Database {
        Database::configure("postgres://postgres@127.0.0.1:1/suppliers", SslMode::Disabled).unwrap()
    }

    #[tokio::test]
    async fn serve_closes_the_pool_on_shutdown() {
        let db = lazy_db();
        let app = crate::routes::app(AppState::new(db.clone(), ErrorExposure::default()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, app, db.clone(), async move {
            let _ = rx.await;
        }));
        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
        assert!(db.is_closed());
    }

    #[tokio::test]
    async fn failed_close_is_reported() {
        let db = lazy_db();
        db.close().await.unwrap();
        let app = crate::routes::app(AppState::new(db.clone(), ErrorExposure::default()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let result = serve(listener, app, db, async {}).await;
        assert!(matches!(result, Err(LifecycleError::Close(StoreError::Closed))));
    }
}
