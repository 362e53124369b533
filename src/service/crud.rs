//! Supplier CRUD against PostgreSQL. Each operation is one auto-committed statement.

use crate::error::RepositoryError;
use crate::model::{NewSupplier, Supplier, SupplierChanges};
use crate::service::repository::{coerce_id, SupplierRepository};
use crate::store::SUPPLIERS_TABLE;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgSupplierRepository {
    pool: PgPool,
}

impl PgSupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        PgSupplierRepository { pool }
    }
}

#[async_trait]
impl SupplierRepository for PgSupplierRepository {
    async fn list_all(&self) -> Result<Vec<Supplier>, RepositoryError> {
        let sql = format!("SELECT id, name FROM {}", SUPPLIERS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Supplier>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Supplier>, RepositoryError> {
        let Some(id) = coerce_id(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT id, name FROM {} WHERE id = $1", SUPPLIERS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: NewSupplier) -> Result<Supplier, RepositoryError> {
        let sql = format!("INSERT INTO {} (name) VALUES ($1) RETURNING id, name", SUPPLIERS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Supplier>(&sql)
            .bind(input.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: &str, changes: SupplierChanges) -> Result<Option<Supplier>, RepositoryError> {
        let Some(id) = coerce_id(id) else {
            return Ok(None);
        };
        let sql = format!(
            "UPDATE {} SET name = COALESCE($2, name) WHERE id = $1 RETURNING id, name",
            SUPPLIERS_TABLE
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .bind(changes.name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let Some(id) = coerce_id(id) else {
            return Ok(false);
        };
        let sql = format!("DELETE FROM {} WHERE id = $1", SUPPLIERS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
