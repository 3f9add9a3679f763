//! HTTP types shared by the GraphQL view, the hyper server and the axum integration.

pub mod accept;
mod request;
mod response;

pub use accept::{best_match, AcceptHeader};
pub use request::{Method, ViewRequest};
pub use response::{StatusCode, ViewResponse};
