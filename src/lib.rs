//! # graphql-view - GraphQL over HTTP with GraphiQL
//!
//! `graphql-view` serves an [`async_graphql`] schema over HTTP. A single
//! [`GraphQLView`] answers JSON clients with execution results and browsers
//! with the GraphiQL IDE, chosen by `Accept` header negotiation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//! │ HttpServer   │  │ axum Router  │  │ TestClient   │
//! │ (hyper)      │  │              │  │ (in-process) │
//! └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!        └─────────────────┼─────────────────┘
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ App ── RouteTable ──► GraphQLView                   │
//! │                        ├─ body parsing              │
//! │                        ├─ content negotiation       │
//! │                        ├─ run_http_query ─► schema  │
//! │                        └─ GraphiQL renderer         │
//! │                           (simple | Tera)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use graphql_view::prelude::*;
//! use std::sync::Arc;
//!
//! struct Query;
//!
//! #[async_graphql::Object]
//! impl Query {
//!     async fn hello(&self) -> &'static str {
//!         "Hello from graphql-view!"
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let schema = async_graphql::Schema::new(
//!         Query,
//!         async_graphql::EmptyMutation,
//!         async_graphql::EmptySubscription,
//!     );
//!     let view = GraphQLView::new(Arc::new(schema), ViewConfig::new().graphiql(true));
//!     let app = App::new().mount("graphql", "/graphql", view);
//!
//!     HttpServer::with_defaults(app).run().await
//! }
//! ```
//!
//! ## Responses
//!
//! | Request | Response |
//! |---|---|
//! | `GET ?query=…`, `Accept: application/json` | 200 JSON result |
//! | `GET`, `Accept: text/html`, GraphiQL on | 200 GraphiQL page, result embedded |
//! | `GET`, no query, JSON wanted | 400 `Must provide query string.` |
//! | `GET` with a mutation | 405, `Allow: POST` |
//! | neither `GET` nor `POST` | 405, `Allow: GET, POST` |

pub mod app;
pub mod graphiql;
pub mod graphql;
pub mod http;
pub mod integrations;
pub mod routing;
pub mod runtime;
pub mod testing;
pub mod view;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::app::App;
    pub use crate::graphiql::TemplateEnv;
    pub use crate::graphql::{GraphQLExecutor, HttpQueryError, RequestContext};
    pub use crate::http::{Method, StatusCode, ViewRequest, ViewResponse};
    pub use crate::runtime::{HttpServer, ServerConfig};
    pub use crate::view::{GraphQLView, ViewConfig};
}

// Re-export for convenience
pub use app::App;
pub use graphql::{GraphQLExecutor, HttpQueryError};
pub use http::{ViewRequest, ViewResponse};
pub use runtime::{HttpServer, ServerConfig};
pub use view::{GraphQLView, ViewConfig};
