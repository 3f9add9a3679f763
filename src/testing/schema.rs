//! Sample schemas exercised by the test suites and the demo binary.

use crate::graphql::{GraphQLExecutor, RequestContext};
use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};
use std::sync::Arc;

/// Root query of the default schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Greets `who`, the world by default.
    async fn test(&self, #[graphql(default = "World")] who: String) -> String {
        format!("Hello {}", who)
    }

    /// Always fails.
    async fn thrower(&self) -> async_graphql::Result<String> {
        Err("Throws!".into())
    }

    /// The `q` parameter of the request URL.
    async fn request(&self, ctx: &Context<'_>) -> Option<String> {
        ctx.data_opt::<RequestContext>()
            .and_then(|request| request.query_param("q"))
            .map(str::to_string)
    }

    /// A request header.
    async fn header(&self, ctx: &Context<'_>, name: String) -> Option<String> {
        ctx.data_opt::<RequestContext>()
            .and_then(|request| request.header(&name))
            .map(str::to_string)
    }
}

/// Root mutation of the default schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn write_test(&self) -> QueryRoot {
        QueryRoot
    }
}

/// The default schema.
pub type TestSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Fields resolved by async resolvers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsyncQuery;

async fn resolve_later(value: &str) -> String {
    tokio::task::yield_now().await;
    value.to_string()
}

#[Object]
impl AsyncQuery {
    async fn a(&self) -> String {
        resolve_later("hey").await
    }

    async fn b(&self) -> String {
        resolve_later("hey2").await
    }

    async fn c(&self) -> String {
        resolve_later("hey3").await
    }
}

/// Schema whose fields resolve asynchronously.
pub type AsyncSchema = Schema<AsyncQuery, EmptyMutation, EmptySubscription>;

/// Fields held as plain data, resolved without any async work.
#[derive(Debug, Clone, SimpleObject)]
pub struct SyncQuery {
    a: String,
    b: String,
}

impl Default for SyncQuery {
    fn default() -> Self {
        Self {
            a: "synced_one".to_string(),
            b: "synced_two".to_string(),
        }
    }
}

/// Schema whose fields resolve synchronously.
pub type SyncSchema = Schema<SyncQuery, EmptyMutation, EmptySubscription>;

/// Which sample schema an app serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaVariant {
    #[default]
    Default,
    Async,
    Sync,
}

impl SchemaVariant {
    /// Build the schema.
    pub fn build(self) -> Arc<dyn GraphQLExecutor> {
        match self {
            SchemaVariant::Default => Arc::new(
                TestSchema::build(QueryRoot, MutationRoot, EmptySubscription).finish(),
            ),
            SchemaVariant::Async => Arc::new(
                AsyncSchema::build(AsyncQuery, EmptyMutation, EmptySubscription).finish(),
            ),
            SchemaVariant::Sync => Arc::new(
                SyncSchema::build(SyncQuery::default(), EmptyMutation, EmptySubscription).finish(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::run_query;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::default(SchemaVariant::Default, "{test}", json!({ "test": "Hello World" }))]
    #[case::default_with_arg(SchemaVariant::Default, r#"{test(who: "Dolly")}"#, json!({ "test": "Hello Dolly" }))]
    #[case::async_fields(SchemaVariant::Async, "{a,b,c}", json!({ "a": "hey", "b": "hey2", "c": "hey3" }))]
    #[case::sync_fields(SchemaVariant::Sync, "{a,b}", json!({ "a": "synced_one", "b": "synced_two" }))]
    #[tokio::test]
    async fn resolves_sample_fields(
        #[case] variant: SchemaVariant,
        #[case] query: &str,
        #[case] expected: serde_json::Value,
    ) {
        let schema = variant.build();

        let response = run_query(schema.as_ref(), query).await.unwrap();

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(serde_json::to_value(&response.data).unwrap(), expected);
    }

    #[rstest]
    #[case::async_fields(SchemaVariant::Async, "{a,b,c}", r#"{"a":"hey","b":"hey2","c":"hey3"}"#)]
    #[case::sync_fields(SchemaVariant::Sync, "{a,b}", r#"{"a":"synced_one","b":"synced_two"}"#)]
    #[case::reversed(SchemaVariant::Async, "{c,b,a}", r#"{"c":"hey3","b":"hey2","a":"hey"}"#)]
    #[tokio::test]
    async fn data_keys_follow_the_query(
        #[case] variant: SchemaVariant,
        #[case] query: &str,
        #[case] expected: &str,
    ) {
        let schema = variant.build();

        let response = run_query(schema.as_ref(), query).await.unwrap();

        assert_eq!(serde_json::to_string(&response.data).unwrap(), expected);
    }

    #[tokio::test]
    async fn thrower_reports_path() {
        let schema = SchemaVariant::Default.build();

        let response = run_query(schema.as_ref(), "{thrower}").await.unwrap();

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Throws!");
        assert!(!response.errors[0].path.is_empty());
    }
}
