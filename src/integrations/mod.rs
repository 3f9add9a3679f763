//! Adapters for third-party web frameworks.

pub mod axum;
