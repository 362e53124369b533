//! Shared application state for all routes.

use crate::config::ErrorExposure;
use crate::service::{PgSupplierRepository, SupplierRepository};
use crate::store::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Used by `/health`; the repository draws from the same pool.
    pub db: Database,
    pub suppliers: Arc<dyn SupplierRepository>,
    pub errors: ErrorExposure,
}

impl AppState {
    /// State backed by PostgreSQL through `db`'s pool.
    pub fn new(db: Database, errors: ErrorExposure) -> Self {
        let suppliers = Arc::new(PgSupplierRepository::new(db.pool().clone()));
        AppState {
            db,
            suppliers,
            errors,
        }
    }

    pub fn with_repository(db: Database, suppliers: Arc<dyn SupplierRepository>, errors: ErrorExposure) -> Self {
        AppState {
            db,
            suppliers,
            errors,
        }
    }
}
