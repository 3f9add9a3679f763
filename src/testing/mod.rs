//! Factories and sample schemas for exercising views without a network.

pub mod app;
pub mod client;
pub mod schema;

pub use app::{create_app, url_string, AppOptions, ROUTE_NAME, ROUTE_PATH};
pub use client::TestClient;
pub use schema::{AsyncSchema, SchemaVariant, SyncSchema, TestSchema};
