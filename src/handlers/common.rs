//! Readiness text, database health, and JSON fallbacks for unmatched requests.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

pub const READY_TEXT: &str = "Supplier service is running";

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct HealthBody {
    pub status: &'static str,
    pub db: &'static str,
}

pub async fn root() -> &'static str {
    READY_TEXT
}

/// Checks the store on every call; 503 when it cannot be reached.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthBody>) {
    match state.db.authenticate().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthBody {
                status: "ok",
                db: "connected",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthBody {
                    status: "error",
                    db: "unavailable",
                }),
            )
        }
    }
}

pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route".into())
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
