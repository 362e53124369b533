//! HTTP handlers for supplier CRUD and service status.

pub mod common;
pub mod supplier;
