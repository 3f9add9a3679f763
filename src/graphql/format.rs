//! JSON encoding of execution results.

use crate::http::StatusCode;
use async_graphql::Response;
use serde::Serialize;
use serde_json::{Map, Value};

/// One execution result, shaped for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedResult {
    /// `None` when nothing was executed.
    pub body: Option<Value>,
    /// Status this result alone would answer with.
    pub status: StatusCode,
}

/// Serialize with two-space indentation or with no whitespace at all.
pub fn json_encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Shape a response as `{"data": ...}` or `{"errors": [...], "data": ...}`.
///
/// Errors without a path never reached execution (syntax or validation
/// failures); they answer 400 and drop `data`.
pub fn format_execution_result(
    result: Option<&Response>,
) -> serde_json::Result<FormattedResult> {
    let Some(result) = result else {
        return Ok(FormattedResult {
            body: None,
            status: StatusCode::OK,
        });
    };

    let data = serde_json::to_value(&result.data)?;
    let mut body = Map::new();
    let mut status = StatusCode::OK;

    if result.errors.is_empty() {
        body.insert("data".to_string(), data);
    } else {
        let errors = result
            .errors
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        body.insert("errors".to_string(), Value::Array(errors));

        if result.errors.iter().any(|error| error.path.is_empty()) {
            status = StatusCode::BAD_REQUEST;
        } else {
            body.insert("data".to_string(), data);
        }
    }

    if !result.extensions.is_empty() {
        body.insert(
            "extensions".to_string(),
            serde_json::to_value(&result.extensions)?,
        );
    }

    Ok(FormattedResult {
        body: Some(Value::Object(body)),
        status,
    })
}

/// Encode all results of a request.
///
/// The status is the highest status of any single result. A batch encodes as
/// an array; a single request as its only result, `null` when it was not run.
pub fn encode_execution_results(
    results: &[Option<Response>],
    is_batch: bool,
    pretty: bool,
) -> serde_json::Result<(String, StatusCode)> {
    let formatted = results
        .iter()
        .map(|result| format_execution_result(result.as_ref()))
        .collect::<serde_json::Result<Vec<_>>>()?;

    let status = formatted
        .iter()
        .map(|result| result.status)
        .max()
        .unwrap_or(StatusCode::OK);

    let bodies: Vec<Value> = formatted
        .into_iter()
        .map(|result| result.body.unwrap_or(Value::Null))
        .collect();

    let encoded = if is_batch {
        json_encode(&bodies, pretty)?
    } else {
        json_encode(bodies.first().unwrap_or(&Value::Null), pretty)?
    };
    Ok((encoded, status))
}
