use juniper::http::GraphQLRequest;
use serde::Serialize;
use serde_json::Value;

use super::{Context, Schema};

/// Result of executing one document, always in `{data, errors}` form.
///
/// `data` is `null` when the document failed to parse or validate, `errors` is empty on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub data: Value,
    pub errors: Vec<Value>,
}

impl QueryResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error messages in response order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| e.get("message").and_then(Value::as_str))
            .collect()
    }

    fn from_json(mut body: Value) -> Self {
        let data = body.get_mut("data").map(Value::take).unwrap_or(Value::Null);
        let errors = match body.get_mut("errors").map(Value::take) {
            Some(Value::Array(errors)) => errors,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![other],
        };
        Self { data, errors }
    }
}

/// Executes `request` against `schema` with the given per-request context.
///
/// # Errors
///
/// Will return Err only if the juniper response cannot be converted to JSON
pub fn execute(
    schema: &Schema,
    request: &GraphQLRequest,
    context: &Context,
) -> Result<QueryResponse, serde_json::Error> {
    let response = request.execute_sync(schema, context);
    let body = serde_json::to_value(&response)?;
    Ok(QueryResponse::from_json(body))
}
