//! Extraction of GraphQL parameters from request data.

use crate::graphql::HttpQueryError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The parameters of one GraphQL operation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphQLParams {
    /// Query document.
    pub query: Option<String>,
    /// Variables as a JSON object.
    pub variables: Option<Map<String, Value>>,
    /// Operation to run when the document holds several.
    pub operation_name: Option<String>,
}

impl GraphQLParams {
    /// Params for a bare query.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Variables re-encoded for display in GraphiQL.
    pub fn variables_json(&self) -> Option<String> {
        self.variables
            .as_ref()
            .and_then(|vars| serde_json::to_string_pretty(vars).ok())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) => true,
    }
}

/// Body value if present and truthy, otherwise the URL value.
fn pick(data: &Map<String, Value>, query_data: &HashMap<String, String>, key: &str) -> Option<Value> {
    data.get(key)
        .filter(|value| is_truthy(value))
        .cloned()
        .or_else(|| {
            query_data
                .get(key)
                .filter(|value| !value.is_empty())
                .map(|value| Value::String(value.clone()))
        })
}

fn as_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Decode `variables`, which may arrive as an object or as a JSON string.
pub fn load_json_variables(
    variables: Option<Value>,
) -> Result<Option<Map<String, Value>>, HttpQueryError> {
    let invalid = || HttpQueryError::bad_request("Variables are invalid JSON.");
    match variables {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(&encoded) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(Value::Null) => Ok(None),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

/// Build the params of one operation from body data and URL query data.
pub fn get_graphql_params(
    data: &Map<String, Value>,
    query_data: &HashMap<String, String>,
) -> Result<GraphQLParams, HttpQueryError> {
    Ok(GraphQLParams {
        query: as_string(pick(data, query_data, "query")),
        variables: load_json_variables(pick(data, query_data, "variables"))?,
        operation_name: as_string(pick(data, query_data, "operationName")),
    })
}
