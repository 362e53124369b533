//! In-memory repositories and request helpers shared by the HTTP tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use supplier_service::routes::App;
use supplier_service::service::coerce_id;
use supplier_service::{
    app, AppState, Database, ErrorExposure, FieldError, NewSupplier, PoolSettings, RepositoryError, SslMode,
    Supplier, SupplierChanges, SupplierRepository,
};
use tower::ServiceExt;

/// Vec-backed store that hands out ids like a SERIAL column.
#[derive(Default)]
pub struct MemoryRepository {
    rows: Mutex<Vec<Supplier>>,
    next_id: Mutex<i32>,
    calls: AtomicUsize,
}

impl MemoryRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SupplierRepository for MemoryRepository {
    async fn list_all(&self) -> Result<Vec<Supplier>, RepositoryError> {
        self.touch();
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Supplier>, RepositoryError> {
        self.touch();
        let Some(id) = coerce_id(id) else { return Ok(None) };
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, input: NewSupplier) -> Result<Supplier, RepositoryError> {
        self.touch();
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let row = Supplier {
            id: *next,
            name: input.name,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &str, changes: SupplierChanges) -> Result<Option<Supplier>, RepositoryError> {
        self.touch();
        let Some(id) = coerce_id(id) else { return Ok(None) };
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|s| s.id == id).map(|s| {
            if let Some(name) = changes.name {
                s.name = name;
            }
            s.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        self.touch();
        let Some(id) = coerce_id(id) else { return Ok(false) };
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }
}

/// Every call fails the way an unreachable store does.
pub struct UnavailableRepository;

#[async_trait]
impl SupplierRepository for UnavailableRepository {
    async fn list_all(&self) -> Result<Vec<Supplier>, RepositoryError> {
        Err(RepositoryError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<Supplier>, RepositoryError> {
        Err(RepositoryError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _input: NewSupplier) -> Result<Supplier, RepositoryError> {
        Err(RepositoryError::Closed)
    }

    async fn update(&self, _id: &str, _changes: SupplierChanges) -> Result<Option<Supplier>, RepositoryError> {
        Err(RepositoryError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: &str) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Connection(sqlx::Error::PoolTimedOut))
    }
}

/// Rejects every insert like a violated column constraint.
pub struct RejectingRepository;

#[async_trait]
impl SupplierRepository for RejectingRepository {
    async fn list_all(&self) -> Result<Vec<Supplier>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<Supplier>, RepositoryError> {
        Ok(None)
    }

    async fn create(&self, _input: NewSupplier) -> Result<Supplier, RepositoryError> {
        Err(RepositoryError::Validation(vec![FieldError::new(
            "name",
            "duplicate key value violates unique constraint",
        )]))
    }

    async fn update(&self, _id: &str, _changes: SupplierChanges) -> Result<Option<Supplier>, RepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &str) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}

/// Pool pointed at a closed port; nothing touches it unless a test hits `/health`.
pub fn unreachable_db() -> Database {
    let settings = PoolSettings {
        acquire_timeout: Duration::from_secs(1),
        ..PoolSettings::default()
    };
    Database::configure_with("postgres://postgres@127.0.0.1:1/suppliers", SslMode::Disabled, &settings).unwrap()
}

pub fn router(repo: Arc<dyn SupplierRepository>, errors: ErrorExposure) -> App {
    app(AppState::with_repository(unreachable_db(), repo, errors))
}

pub async fn send(app: &App, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
    let content_type = body.map(|_| "application/json");
    send_as(app, method, uri, content_type, body.unwrap_or_default()).await
}

/// Raw request: `content_type` is set verbatim when given, `body` is sent as-is.
pub async fn send_as(app: &App, method: Method, uri: &str, content_type: Option<&str>, body: &str) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    app.clone().oneshot(builder.body(Body::from(body.to_string())).unwrap()).await.unwrap()
}

pub async fn json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status for response");
}
