//! Supplier CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::{JsonBody, SupplierCollection, SupplierItem};
use crate::model::{Supplier, SupplierPayload, SUPPLIER_ENTITY};
use crate::response::{deleted, Deleted};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

fn not_found() -> AppError {
    AppError::NotFound(SUPPLIER_ENTITY.into())
}

pub async fn list(
    _: SupplierCollection,
    State(state): State<AppState>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let rows = state
        .suppliers
        .list_all()
        .await
        .map_err(|e| AppError::repository("List suppliers", e, state.errors))?;
    Ok(Json(rows))
}

pub async fn read(item: SupplierItem, State(state): State<AppState>) -> Result<Json<Supplier>, AppError> {
    let row = state
        .suppliers
        .get_by_id(&item.id)
        .await
        .map_err(|e| AppError::repository("Get supplier", e, state.errors))?
        .ok_or_else(not_found)?;
    Ok(Json(row))
}

pub async fn create(
    _: SupplierCollection,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SupplierPayload>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    let input = RequestValidator::new_supplier(payload)?;
    let row = state
        .suppliers
        .create(input)
        .await
        .map_err(|e| AppError::repository("Create supplier", e, state.errors))?;
    tracing::info!(id = row.id, "supplier created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// Serves both PUT and PATCH; only the fields present are replaced.
pub async fn update(
    item: SupplierItem,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    let changes = RequestValidator::changes(payload)?;
    let row = state
        .suppliers
        .update(&item.id, changes)
        .await
        .map_err(|e| AppError::repository("Update supplier", e, state.errors))?
        .ok_or_else(not_found)?;
    Ok(Json(row))
}

pub async fn delete(item: SupplierItem, State(state): State<AppState>) -> Result<Json<Deleted>, AppError> {
    let removed = state
        .suppliers
        .delete(&item.id)
        .await
        .map_err(|e| AppError::repository("Delete supplier", e, state.errors))?;
    if !removed {
        return Err(not_found());
    }
    tracing::info!(id = %item.id, "supplier deleted");
    Ok(deleted())
}
