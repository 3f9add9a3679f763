//! In-process test client.

use crate::app::App;
use crate::http::{Method, ViewRequest, ViewResponse};
use bytes::Bytes;

/// Issues requests straight into [`App::handle`], one at a time.
#[derive(Debug, Clone, Copy)]
pub struct TestClient<'a> {
    app: &'a App,
}

impl<'a> TestClient<'a> {
    /// A client for `app`.
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    /// Send a prepared request.
    pub async fn request(&self, request: ViewRequest) -> ViewResponse {
        self.app.handle(request).await
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> ViewResponse {
        self.request(with_headers(ViewRequest::get(uri), headers)).await
    }

    /// Send a POST request.
    pub async fn post(
        &self,
        uri: &str,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> ViewResponse {
        self.request(with_headers(ViewRequest::post(uri), headers).body(body))
            .await
    }

    /// Send a request with any method.
    pub async fn send(&self, method: Method, uri: &str, headers: &[(&str, &str)]) -> ViewResponse {
        self.request(with_headers(ViewRequest::new(method, uri), headers))
            .await
    }
}

fn with_headers(request: ViewRequest, headers: &[(&str, &str)]) -> ViewRequest {
    headers
        .iter()
        .fold(request, |request, (name, value)| request.header(name, *value))
}

impl App {
    /// A client driving this app in-process.
    pub fn test_client(&self) -> TestClient<'_> {
        TestClient::new(self)
    }
}
