//! Supplier repository: the storage trait, its PostgreSQL implementation, and input validation.

mod crud;
mod repository;
mod validation;
pub use crud::PgSupplierRepository;
pub use repository::{coerce_id, SupplierRepository};
pub use validation::RequestValidator;
