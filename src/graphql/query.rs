//! Running the GraphQL operations carried by one HTTP request.

use crate::graphql::{
    get_graphql_params, restore_selection_order, GraphQLExecutor, GraphQLParams, HttpQueryError,
    RequestContext,
};
use crate::http::Method;
use async_graphql::parser::types::{DocumentOperations, OperationType};
use async_graphql::{Request, Response, Variables};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Knobs for [`run_http_query`].
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Accept JSON arrays of operations.
    pub batch_enabled: bool,
    /// Turn per-operation request errors into "no result" instead of failing.
    pub catch: bool,
    /// Run batch entries concurrently.
    pub enable_async: bool,
    /// Data handed to resolvers.
    pub context: RequestContext,
}

/// What [`run_http_query`] produced.
#[derive(Debug, Default)]
pub struct HttpQueryOutcome {
    /// One entry per operation; `None` where a caught error prevented execution.
    pub results: Vec<Option<Response>>,
    /// Parameters of every operation, in request order.
    pub params: Vec<GraphQLParams>,
    /// Whether the body was a batch.
    pub is_batch: bool,
}

fn operation_name(ty: OperationType) -> &'static str {
    match ty {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    }
}

/// Type of the operation that would run, if the document parses and the
/// operation can be identified.
fn selected_operation(query: &str, name: Option<&str>) -> Option<OperationType> {
    let document = async_graphql::parser::parse_query(query).ok()?;
    match document.operations {
        DocumentOperations::Single(operation) => Some(operation.node.ty),
        DocumentOperations::Multiple(operations) => {
            let name = name?;
            operations
                .iter()
                .find(|(op_name, _)| op_name.as_str() == name)
                .map(|(_, operation)| operation.node.ty)
        }
    }
}

async fn get_response(
    executor: &dyn GraphQLExecutor,
    params: &GraphQLParams,
    allow_only_query: bool,
    context: &RequestContext,
) -> Result<Response, HttpQueryError> {
    let query = params
        .query
        .as_deref()
        .ok_or_else(|| HttpQueryError::bad_request("Must provide query string."))?;

    if allow_only_query {
        if let Some(ty) = selected_operation(query, params.operation_name.as_deref()) {
            if ty != OperationType::Query {
                return Err(HttpQueryError::method_not_allowed(
                    format!(
                        "Can only perform a {} operation from a POST request.",
                        operation_name(ty)
                    ),
                    "POST",
                ));
            }
        }
    }

    let mut request = Request::new(query).data(context.clone());
    if let Some(variables) = &params.variables {
        request = request.variables(Variables::from_json(Value::Object(variables.clone())));
    }
    if let Some(name) = &params.operation_name {
        request = request.operation_name(name.as_str());
    }

    let mut response = executor.execute(request).await;
    restore_selection_order(&mut response.data, query, params.operation_name.as_deref());
    Ok(response)
}

/// Execute every operation of a request.
///
/// `data` is the decoded body (an object, or an array for batches) and
/// `query_data` the decoded URL query. Errors that concern the request as a
/// whole (method, batch shape, variables) always fail; errors of a single
/// operation are swallowed when `options.catch` is set.
pub async fn run_http_query(
    executor: &dyn GraphQLExecutor,
    method: &Method,
    data: Value,
    query_data: &HashMap<String, String>,
    options: &QueryOptions,
) -> Result<HttpQueryOutcome, HttpQueryError> {
    if !matches!(method, Method::Get | Method::Post) {
        return Err(HttpQueryError::method_not_allowed(
            "GraphQL only supports GET and POST requests.",
            "GET, POST",
        ));
    }

    let (entries, is_batch) = match data {
        Value::Array(entries) => {
            if !options.batch_enabled {
                return Err(HttpQueryError::bad_request(
                    "Batch GraphQL requests are not enabled.",
                ));
            }
            if entries.is_empty() {
                return Err(HttpQueryError::bad_request(
                    "Received an empty list in the batch request.",
                ));
            }
            (entries, true)
        }
        Value::Object(map) => (vec![Value::Object(map)], false),
        other => {
            return Err(HttpQueryError::bad_request(format!(
                "GraphQL params should be a dict. Received {}.",
                other
            )))
        }
    };

    let no_extra = HashMap::new();
    let extra_data = if is_batch { &no_extra } else { query_data };

    let params = entries
        .iter()
        .map(|entry| match entry {
            Value::Object(map) => get_graphql_params(map, extra_data),
            other => Err(HttpQueryError::bad_request(format!(
                "GraphQL params should be a dict. Received {}.",
                other
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let allow_only_query = *method == Method::Get;
    debug!(
        operations = params.len(),
        is_batch,
        allow_only_query,
        "running GraphQL request"
    );

    let outcomes: Vec<Result<Response, HttpQueryError>> = if options.enable_async {
        futures::future::join_all(
            params
                .iter()
                .map(|p| get_response(executor, p, allow_only_query, &options.context)),
        )
        .await
    } else {
        let mut outcomes = Vec::with_capacity(params.len());
        for p in &params {
            outcomes.push(get_response(executor, p, allow_only_query, &options.context).await);
        }
        outcomes
    };

    let results = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            Ok(response) => Ok(Some(response)),
            Err(_) if options.catch => Ok(None),
            Err(err) => Err(err),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HttpQueryOutcome {
        results,
        params,
        is_batch,
    })
}

/// Shorthand for running a bare query string outside of HTTP.
pub async fn run_query(
    executor: &dyn GraphQLExecutor,
    query: &str,
) -> Result<Response, HttpQueryError> {
    let mut data = Map::new();
    data.insert("query".to_string(), Value::String(query.to_string()));
    let outcome = run_http_query(
        executor,
        &Method::Post,
        Value::Object(data),
        &HashMap::new(),
        &QueryOptions::default(),
    )
    .await?;
    outcome
        .results
        .into_iter()
        .next()
        .flatten()
        .ok_or_else(|| HttpQueryError::internal("No result was produced."))
}
