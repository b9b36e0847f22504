//! Response envelope and paged-query payload types.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{IgniteError, Result};

/// The JSON envelope wrapping every server response.
///
/// `successStatus` is a boolean on some server builds and a small integer on
/// others; anything truthy means the operation failed and `error` carries the
/// server's message. Success never returns an error-shaped payload, and a
/// failure never surfaces as an empty result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestResponse {
    #[serde(default)]
    success_status: Value,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    response: Value,
}

impl RestResponse {
    /// Unwraps the envelope into the payload or the server error.
    pub fn into_result(self) -> Result<Value> {
        if is_truthy(&self.success_status) {
            let message = match self.error {
                Some(message) if !message.is_empty() => message,
                _ => "unknown server error".to_string(),
            };
            Err(IgniteError::Server(message))
        } else {
            Ok(self.response)
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// One page of a query result, as returned by the execute and fetch
/// commands.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    /// Rows (or entries) in this page.
    #[serde(default)]
    pub items: Vec<Value>,
    /// True when the server-side cursor has been drained.
    #[serde(default)]
    pub last: bool,
    /// Server-side cursor identifier, used by fetch and close.
    #[serde(default)]
    pub query_id: i64,
    /// Column metadata, populated on the first page.
    #[serde(default)]
    pub fields_metadata: Vec<FieldMetadata>,
}

/// Column metadata for a fields query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    /// Column name.
    #[serde(default)]
    pub field_name: Option<String>,
    /// Column type name.
    #[serde(default)]
    pub field_type_name: Option<String>,
    /// Schema the column belongs to.
    #[serde(default)]
    pub schema_name: Option<String>,
    /// Table (type) the column belongs to.
    #[serde(default)]
    pub type_name: Option<String>,
}
