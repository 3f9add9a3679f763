//! The seam between the view and a GraphQL engine.

use async_graphql::{ObjectType, Request, Response, Schema, SubscriptionType};
use async_trait::async_trait;
use std::collections::HashMap;

/// Executes a single GraphQL request.
///
/// Implemented for every [`async_graphql::Schema`], so views can hold any
/// schema behind an `Arc<dyn GraphQLExecutor>`.
#[async_trait]
pub trait GraphQLExecutor: Send + Sync {
    /// Run the request to completion.
    async fn execute(&self, request: Request) -> Response;
}

#[async_trait]
impl<Q, M, S> GraphQLExecutor for Schema<Q, M, S>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    async fn execute(&self, request: Request) -> Response {
        Schema::execute(self, request).await
    }
}

/// HTTP details made available to resolvers through `ctx.data::<RequestContext>()`.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Decoded URL query parameters.
    pub query_params: HashMap<String, String>,
    /// Request headers, keyed by lower-case name.
    pub headers: HashMap<String, String>,
}

impl RequestContext {
    /// Get a URL query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Get a header value, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }
}
