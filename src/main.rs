//! Demo GraphQL server.
//!
//! Serves a small schema at `/graphql` with GraphiQL enabled.

use async_graphql::{EmptySubscription, Object, Schema};
use graphql_view::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Demo queries.
struct Query;

#[Object]
impl Query {
    /// Greets `name`, the world by default.
    async fn hello(&self, name: Option<String>) -> String {
        format!("Hello, {}!", name.unwrap_or_else(|| "World".to_string()))
    }

    /// Value of a request header.
    async fn user_agent(&self, ctx: &async_graphql::Context<'_>) -> Option<String> {
        ctx.data_opt::<RequestContext>()
            .and_then(|request| request.header("user-agent"))
            .map(str::to_string)
    }

    /// Current counter value.
    async fn count(&self, ctx: &async_graphql::Context<'_>) -> async_graphql::Result<u64> {
        Ok(ctx.data::<Arc<AtomicU64>>()?.load(Ordering::SeqCst))
    }
}

/// Demo mutations.
struct Mutation;

#[Object]
impl Mutation {
    /// Bump the counter and return the new value.
    async fn increment(&self, ctx: &async_graphql::Context<'_>) -> async_graphql::Result<u64> {
        Ok(ctx.data::<Arc<AtomicU64>>()?.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting GraphQL server...");

    let schema = Schema::build(Query, Mutation, EmptySubscription)
        .data(Arc::new(AtomicU64::new(0)))
        .finish();

    let view = GraphQLView::new(
        Arc::new(schema),
        ViewConfig::new()
            .graphiql(true)
            .batch(true)
            .default_query("{ hello }"),
    );
    let app = App::new().mount("graphql", "/graphql", view);

    let config = ServerConfig::from_env();
    tracing::info!("Try: curl 'http://localhost:{}/graphql?query=%7Bhello%7D'", config.port);
    tracing::info!("GraphiQL: http://localhost:{}/graphql", config.port);
    tracing::info!("Health check: curl http://localhost:{}/_health", config.port);

    HttpServer::new(config, app).run().await
}
