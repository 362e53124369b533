//! Success bodies that are not the entity itself.

use axum::Json;
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Deleted {
    pub message: &'static str,
}

pub fn deleted() -> Json<Deleted> {
    Json(Deleted { message: "deleted" })
}
