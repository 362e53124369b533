//! Storage seam for suppliers.

use crate::error::RepositoryError;
use crate::model::{NewSupplier, Supplier, SupplierChanges};
use async_trait::async_trait;

/// Supplier persistence. `id` is the raw path segment; implementations coerce it
/// to their key type, and a segment that cannot be a key simply matches nothing.
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    /// All rows in the store's natural order.
    async fn list_all(&self) -> Result<Vec<Supplier>, RepositoryError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Supplier>, RepositoryError>;

    /// Insert a row; the store assigns the id.
    async fn create(&self, input: NewSupplier) -> Result<Supplier, RepositoryError>;

    /// Apply `changes` to the row. `None` when no row has this id.
    async fn update(&self, id: &str, changes: SupplierChanges) -> Result<Option<Supplier>, RepositoryError>;

    /// Hard delete. `false` when no row has this id.
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;
}

/// Integer key for a path segment, if it can be one.
pub fn coerce_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
