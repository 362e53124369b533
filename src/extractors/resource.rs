//! Resource alias resolution for `/:resource` and `/:resource/:id`.
//! One route pair serves every accepted spelling of the supplier collection.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Accepted path segments for the supplier collection, canonical first.
pub const SUPPLIER_ALIASES: &[&str] = &["suppliers", "supplier", "proveedores", "proveedor"];

/// Case-insensitive, matching how the legacy routes were served.
pub fn is_supplier_alias(segment: &str) -> bool {
    SUPPLIER_ALIASES.iter().any(|a| a.eq_ignore_ascii_case(segment))
}

fn unknown_resource() -> AppError {
    AppError::NotFound("Resource".into())
}

/// `/:resource` resolved to the supplier collection.
#[derive(Debug, Clone)]
pub struct SupplierCollection;

#[async_trait]
impl<S> FromRequestParts<S> for SupplierCollection
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| unknown_resource())?;
        if is_supplier_alias(&segment) {
            Ok(SupplierCollection)
        } else {
            Err(unknown_resource())
        }
    }
}

/// `/:resource/:id` resolved to one supplier. The id is passed on untouched.
#[derive(Debug, Clone)]
pub struct SupplierItem {
    pub id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SupplierItem
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((segment, id)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|_| unknown_resource())?;
        if is_supplier_alias(&segment) {
            Ok(SupplierItem { id })
        } else {
            Err(unknown_resource())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        for alias in SUPPLIER_ALIASES {
            assert!(is_supplier_alias(alias));
        }
        assert!(is_supplier_alias("Proveedores"));
        assert!(!is_supplier_alias("customers"));
        assert!(!is_supplier_alias("health"));
    }
}
