//! The GraphQL HTTP view.

mod config;

pub use config::ViewConfig;

use crate::graphiql::{render_graphiql, GraphiQLData, RenderError, Renderer, TemplateEnv};
use crate::graphql::{
    encode_execution_results, run_http_query, GraphQLExecutor, HttpQueryError, QueryOptions,
    RequestContext,
};
use crate::http::{best_match, Method, ViewRequest, ViewResponse};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

const JSON: &str = "application/json";
const HTML: &str = "text/html";

/// Serves a GraphQL schema over HTTP, with GraphiQL for browsers.
pub struct GraphQLView {
    executor: Arc<dyn GraphQLExecutor>,
    config: ViewConfig,
    renderer: Renderer,
}

impl std::fmt::Debug for GraphQLView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLView")
            .field("config", &self.config)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl GraphQLView {
    /// Create a view rendering GraphiQL with the simple renderer.
    pub fn new(executor: Arc<dyn GraphQLExecutor>, config: ViewConfig) -> Self {
        Self {
            executor,
            config,
            renderer: Renderer::Simple,
        }
    }

    /// Render GraphiQL through a Tera environment instead.
    pub fn with_template_env(mut self, env: TemplateEnv) -> Result<Self, RenderError> {
        self.renderer = Renderer::from_env(env, self.config.template())?;
        Ok(self)
    }

    /// The view configuration.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Whether GraphiQL should answer this request.
    pub fn should_display_graphiql(&self, request: &ViewRequest) -> bool {
        if !self.config.graphiql || request.query_params().contains_key("raw") {
            return false;
        }
        request_wants_html(request)
    }

    /// Handle a request. Never fails: errors become JSON error responses.
    pub async fn dispatch(&self, request: &ViewRequest) -> ViewResponse {
        debug!(method = %request.method, uri = %request.uri, "dispatching GraphQL request");
        match self.try_dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("GraphQL request rejected: {}", err);
                err.into_response(self.config.pretty)
            }
        }
    }

    async fn try_dispatch(&self, request: &ViewRequest) -> Result<ViewResponse, HttpQueryError> {
        let data = parse_body(request)?;
        let query_data = request.query_params();
        let show_graphiql = request.method == Method::Get && self.should_display_graphiql(request);

        let options = QueryOptions {
            batch_enabled: self.config.batch,
            catch: show_graphiql,
            enable_async: self.config.enable_async,
            context: RequestContext {
                query_params: query_data.clone(),
                headers: request.headers.clone(),
            },
        };
        let outcome = run_http_query(
            self.executor.as_ref(),
            &request.method,
            data,
            &query_data,
            &options,
        )
        .await?;

        let pretty = self.config.pretty
            || show_graphiql
            || query_data.get("pretty").is_some_and(|v| !v.is_empty());
        let (result, status) = encode_execution_results(&outcome.results, outcome.is_batch, pretty)?;

        if !show_graphiql {
            return Ok(ViewResponse::json(status, result));
        }

        let params = outcome.params.first().cloned().unwrap_or_default();
        let executed = outcome.results.iter().any(Option::is_some);
        let data = GraphiQLData {
            graphiql_version: self.config.version().to_string(),
            graphiql_html_title: self.config.html_title().to_string(),
            variables: params.variables_json(),
            query: params.query,
            operation_name: params.operation_name,
            result: executed.then_some(result),
            subscription_url: self.config.subscriptions.clone(),
            headers: self.config.headers.clone(),
            default_query: self.config.default_query.clone(),
            header_editor_enabled: self.config.header_editor_enabled,
            should_persist_headers: self.config.should_persist_headers,
        };
        let source = render_graphiql(&data, self.config.template(), &self.renderer)
            .await
            .map_err(|err| HttpQueryError::internal(err.to_string()))?;
        Ok(ViewResponse::html(source))
    }
}

/// True when the client ranks HTML above JSON.
pub fn request_wants_html(request: &ViewRequest) -> bool {
    best_match(request.get_header("accept"), &[JSON, HTML]) == Some(HTML)
}

/// Decode the request body according to its content type.
///
/// GET bodies are ignored. Unknown content types decode to an empty object.
pub fn parse_body(request: &ViewRequest) -> Result<Value, HttpQueryError> {
    let empty = || Value::Object(Map::new());
    if request.method == Method::Get {
        return Ok(empty());
    }
    let Some(body) = request.body.as_ref().filter(|body| !body.is_empty()) else {
        return Ok(empty());
    };

    match request.content_type().as_deref() {
        Some("application/graphql") => {
            let mut data = Map::new();
            data.insert(
                "query".to_string(),
                Value::String(String::from_utf8_lossy(body).into_owned()),
            );
            Ok(Value::Object(data))
        }
        Some("application/json") => serde_json::from_slice::<Value>(body)
            .map_err(|_| HttpQueryError::bad_request("POST body sent invalid JSON.")),
        Some("application/x-www-form-urlencoded") => {
            let fields = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
                .map_err(|_| HttpQueryError::bad_request("POST body sent invalid form data."))?;
            let data: HashMap<String, String> = fields.into_iter().collect();
            Ok(Value::Object(
                data.into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            ))
        }
        _ => Ok(empty()),
    }
}
