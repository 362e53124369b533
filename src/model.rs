//! Supplier entity and the request payloads that create or change it.

use serde::{Deserialize, Serialize};

/// Column width of `suppliers.name`.
pub const NAME_MAX_LEN: usize = 100;

/// Display name used in error messages.
pub const SUPPLIER_ENTITY: &str = "Supplier";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
}

/// Request body for POST, PUT and PATCH. `nombre` is the field name older clients send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupplierPayload {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
}

/// Validated input for create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplier {
    pub name: String,
}

/// Validated input for update. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierChanges {
    pub name: Option<String>,
}
