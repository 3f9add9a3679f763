//! Request-level failures of the GraphQL view.

use crate::http::{StatusCode, ViewResponse};
use std::collections::HashMap;
use thiserror::Error;

/// An error that aborts the whole HTTP request.
///
/// GraphQL errors raised while executing a query are not `HttpQueryError`s;
/// they travel inside the execution result instead.
#[derive(Debug, Clone, Error)]
#[error("[{status}] {message}")]
pub struct HttpQueryError {
    /// Status code to answer with.
    pub status: StatusCode,
    /// Human readable message, sent as the single error of the body.
    pub message: String,
    /// Extra response headers, e.g. `Allow`.
    pub headers: HashMap<String, String>,
}

impl HttpQueryError {
    /// Create a new error.
    pub fn new(status: impl Into<StatusCode>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            headers: HashMap::new(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a method-not-allowed error advertising the allowed methods.
    pub fn method_not_allowed(message: impl Into<String>, allow: &str) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message).header("Allow", allow)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Add a response header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// The `{"errors": [{"message": ...}]}` document for this error.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": [{ "message": self.message }] })
    }

    /// Render the error as a JSON response.
    pub fn into_response(self, pretty: bool) -> ViewResponse {
        let body = crate::graphql::json_encode(&self.to_json(), pretty)
            .unwrap_or_else(|_| String::from(r#"{"errors":[]}"#));
        let mut response = ViewResponse::json(self.status, body);
        for (name, value) in self.headers {
            response = response.header(name, value);
        }
        response
    }
}

impl From<serde_json::Error> for HttpQueryError {
    fn from(err: serde_json::Error) -> Self {
        HttpQueryError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_status_and_message() {
        let error = HttpQueryError::bad_request("Must provide query string.");

        assert_eq!(error.to_string(), "[400] Must provide query string.");
    }

    #[test]
    fn response_carries_headers_and_body() {
        let response =
            HttpQueryError::method_not_allowed("Nope.", "GET, POST").into_response(false);

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.get_header("allow"), Some("GET, POST"));
        assert_eq!(
            response.text_body().as_deref(),
            Some(r#"{"errors":[{"message":"Nope."}]}"#)
        );
    }
}
