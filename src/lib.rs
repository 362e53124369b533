//! Supplier service: REST CRUD over a single PostgreSQL-backed supplier table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ErrorExposure, Settings};
pub use error::{AppError, ConfigError, FieldError, LifecycleError, RepositoryError, StoreError};
pub use model::{NewSupplier, Supplier, SupplierChanges, SupplierPayload};
pub use routes::{app, common_routes, supplier_routes, App};
pub use service::{PgSupplierRepository, SupplierRepository};
pub use state::AppState;
pub use store::{Database, PoolSettings, SslMode};
