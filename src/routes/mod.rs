//! Route table and the layers wrapped around it.

mod common;
mod supplier;

pub use common::common_routes;
pub use supplier::supplier_routes;

use crate::handlers::common::route_not_found;
use crate::middleware::{cors, panic_response};
use crate::state::AppState;
use axum::{middleware, Router};
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Router behind trailing-slash normalization, so `/suppliers/` matches `/suppliers`.
pub type App = NormalizePath<Router>;

/// The complete application: routes, JSON fallback, CORS, panic recovery, request logging.
/// Path normalization wraps the router from outside; a `Router::layer` would run after matching.
pub fn app(state: AppState) -> App {
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(supplier_routes(state))
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(cors))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        );
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
