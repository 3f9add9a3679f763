//! Framework-neutral HTTP request consumed by [`GraphQLView`](crate::GraphQLView).

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP method enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    /// Any extension method, kept verbatim.
    Other(String),
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
            Method::Head => write!(f, "HEAD"),
            Method::Options => write!(f, "OPTIONS"),
            Method::Other(name) => write!(f, "{}", name),
        }
    }
}

impl From<&hyper::Method> for Method {
    fn from(method: &hyper::Method) -> Self {
        match *method {
            hyper::Method::GET => Method::Get,
            hyper::Method::POST => Method::Post,
            hyper::Method::PUT => Method::Put,
            hyper::Method::DELETE => Method::Delete,
            hyper::Method::PATCH => Method::Patch,
            hyper::Method::HEAD => Method::Head,
            hyper::Method::OPTIONS => Method::Options,
            ref other => Method::Other(other.as_str().to_string()),
        }
    }
}

/// An HTTP request as seen by the view.
///
/// Header names are stored lower-cased so lookups are case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewRequest {
    /// HTTP method.
    pub method: Method,
    /// Request target: path plus optional `?query`.
    pub uri: String,
    /// HTTP headers, keyed by lower-case name.
    pub headers: HashMap<String, String>,
    /// Request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Bytes>,
}

impl ViewRequest {
    /// Create a new request.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::Get, uri)
    }

    /// Shorthand for a POST request.
    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(Method::Post, uri)
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get a header value, ignoring case.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The path component of the URI.
    pub fn path(&self) -> &str {
        match self.uri.split_once('?') {
            Some((path, _)) => path,
            None => &self.uri,
        }
    }

    /// The raw query string, without the leading `?`.
    pub fn query_string(&self) -> &str {
        self.uri
            .split_once('?')
            .map(|(_, query)| query)
            .unwrap_or_default()
    }

    /// Decode the query string. Later duplicates win.
    pub fn query_params(&self) -> HashMap<String, String> {
        serde_urlencoded::from_str::<Vec<(String, String)>>(self.query_string())
            .map(|pairs| pairs.into_iter().collect())
            .unwrap_or_default()
    }

    /// The media type of the body, lower-cased and without parameters.
    pub fn content_type(&self) -> Option<String> {
        self.get_header("content-type").map(|value| {
            value
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    /// Get the body as text if present.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self::get("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_case_insensitive() {
        let request = ViewRequest::get("/graphql").header("Accept", "text/html");

        assert_eq!(request.get_header("accept"), Some("text/html"));
        assert_eq!(request.get_header("ACCEPT"), Some("text/html"));
        assert_eq!(request.get_header("content-type"), None);
    }

    #[test]
    fn splits_path_and_query() {
        let request = ViewRequest::get("/graphql?query=%7Btest%7D&raw");

        assert_eq!(request.path(), "/graphql");
        assert_eq!(request.query_string(), "query=%7Btest%7D&raw");

        let params = request.query_params();
        assert_eq!(params.get("query").map(String::as_str), Some("{test}"));
        assert_eq!(params.get("raw").map(String::as_str), Some(""));
    }

    #[test]
    fn uri_without_query_has_no_params() {
        let request = ViewRequest::get("/graphql");

        assert_eq!(request.path(), "/graphql");
        assert!(request.query_params().is_empty());
    }

    #[test]
    fn content_type_drops_parameters() {
        let request =
            ViewRequest::post("/graphql").header("Content-Type", "Application/JSON; charset=utf-8");

        assert_eq!(request.content_type().as_deref(), Some("application/json"));
    }

    #[test]
    fn converts_extension_methods() {
        let method = hyper::Method::from_bytes(b"PURGE").unwrap();

        assert_eq!(Method::from(&hyper::Method::POST), Method::Post);
        assert_eq!(Method::from(&method).to_string(), "PURGE");
    }
}
