//! Common routes: readiness text and database health.

use crate::handlers::common::{health, method_not_allowed, root};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
        .with_state(state)
}
