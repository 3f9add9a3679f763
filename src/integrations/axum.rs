//! Serving an [`App`] from an axum [`Router`].
//!
//! ```rust,no_run
//! use graphql_view::integrations::axum::router;
//! # async fn run(app: graphql_view::App) -> std::io::Result<()> {
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, router(std::sync::Arc::new(app))).await
//! # }
//! ```

use crate::app::App;
use crate::http::{Method, ViewRequest, ViewResponse};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// A router that hands every request to `app`.
pub fn router(app: Arc<App>) -> Router {
    Router::new().fallback(handle).with_state(app)
}

async fn handle(
    State(app): State<Arc<App>>,
    method: axum::http::Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut request_headers = HashMap::new();
    for (name, value) in &headers {
        if let Ok(v) = value.to_str() {
            request_headers.insert(name.as_str().to_string(), v.to_string());
        }
    }

    let request = ViewRequest {
        method: Method::from(&method),
        uri: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        headers: request_headers,
        body: (!body.is_empty()).then_some(body),
    };

    into_axum_response(app.handle(request).await)
}

fn into_axum_response(view_response: ViewResponse) -> Response {
    let status =
        StatusCode::from_u16(view_response.status.0).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    for (name, value) in &view_response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!("Dropping invalid response header {}", name),
        }
    }

    let body = Body::from(view_response.body.unwrap_or_default());
    (status, headers, body).into_response()
}
