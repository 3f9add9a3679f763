//! hyper HTTP server serving an [`App`].

use crate::app::App;
use crate::http::{Method, StatusCode, ViewRequest, ViewResponse};
use crate::runtime::ServerConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// HTTP/1 server for GraphQL views.
pub struct HttpServer {
    /// Server configuration.
    config: ServerConfig,
    /// Mounted views.
    app: Arc<App>,
}

impl HttpServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, app: App) -> Self {
        Self {
            config,
            app: Arc::new(app),
        }
    }

    /// Create a new server with default configuration.
    pub fn with_defaults(app: App) -> Self {
        Self::new(ServerConfig::default(), app)
    }

    /// Get the application.
    pub fn app(&self) -> Arc<App> {
        self.app.clone()
    }

    /// Bind the configured address and serve forever.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve connections accepted from `listener`.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("GraphQL server listening on {}", listener.local_addr()?);

        let app = self.app.clone();
        let config = Arc::new(self.config.clone());

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);

            let app = app.clone();
            let config = config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let app = app.clone();
                    let config = config.clone();
                    async move { handle_request(req, app, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service)
                    .await
                {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request(
    req: Request<Incoming>,
    app: Arc<App>,
    config: Arc<ServerConfig>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    debug!("Handling request: {} {} from {}", req.method(), req.uri(), remote_addr);

    if config.enable_health && req.uri().path() == "/_health" {
        return Ok(build_response(ViewResponse::text("OK")));
    }

    let request = match convert_request(req, &config).await {
        Ok(request) => request,
        Err(response) => return Ok(build_response(response)),
    };

    let timeout = Duration::from_secs(config.request_timeout);
    match tokio::time::timeout(timeout, app.handle(request)).await {
        Ok(response) => Ok(build_response(response)),
        Err(_) => {
            warn!("Request from {} timed out after {:?}", remote_addr, timeout);
            Ok(build_response(ViewResponse::error(
                StatusCode::SERVICE_UNAVAILABLE,
                "Request timed out",
            )))
        }
    }
}

/// Convert a hyper Request to a ViewRequest, enforcing the body limit.
async fn convert_request(
    req: Request<Incoming>,
    config: &ServerConfig,
) -> Result<ViewRequest, ViewResponse> {
    let method = Method::from(req.method());
    let uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let mut headers = HashMap::new();
    for (name, value) in req.headers() {
        if let Ok(v) = value.to_str() {
            headers.insert(name.as_str().to_string(), v.to_string());
        }
    }

    let body = Limited::new(req.into_body(), config.max_body_size)
        .collect()
        .await
        .map_err(|err| body_error_response(err.as_ref()))?
        .to_bytes();

    Ok(ViewRequest {
        method,
        uri,
        headers,
        body: (!body.is_empty()).then_some(body),
    })
}

/// 413 when the body outgrew the limit, 400 for any other read failure.
fn body_error_response(err: &(dyn std::error::Error + Send + Sync + 'static)) -> ViewResponse {
    if err.downcast_ref::<LengthLimitError>().is_some() {
        warn!("Rejected request body: {}", err);
        ViewResponse::error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else {
        warn!("Failed to read request body: {}", err);
        ViewResponse::error(StatusCode::BAD_REQUEST, "Failed to read request body")
    }
}

/// Build a hyper Response from a ViewResponse.
fn build_response(view_response: ViewResponse) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(view_response.status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            view_response.status.0
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut response = Response::new(Full::new(view_response.body.unwrap_or_default()));
    *response.status_mut() = status;
    for (name, value) in view_response.headers {
        match (
            hyper::header::HeaderName::from_bytes(name.as_bytes()),
            hyper::header::HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => warn!("Dropping invalid response header {}", name),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let err = Limited::new(Full::new(Bytes::from_static(b"far too long")), 4)
            .collect()
            .await
            .unwrap_err();

        let response = body_error_response(err.as_ref());

        assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn other_body_errors_are_bad_requests() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"));

        let response = body_error_response(err.as_ref());

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.text_body().as_deref(), Some("Failed to read request body"));
    }
}
