//! Supplier CRUD routes. The resource segment is a parameter so every alias shares one
//! registration; the extractors reject segments that are not a supplier alias.

use crate::handlers::common::method_not_allowed;
use crate::handlers::supplier::{create, delete, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn supplier_routes(state: AppState) -> Router {
    Router::new()
        .route("/:resource", get(list).post(create).fallback(method_not_allowed))
        .route(
            "/:resource/:id",
            get(read)
                .put(update)
                .patch(update)
                .delete(delete)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}
