//! Output converter for turning model text into structured values.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Error raised when model output cannot be converted.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The output was not JSON, or not a JSON shape the caller accepts.
    #[error("{0}")]
    Malformed(String),

    /// The JSON did not fit the target model.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Parse model output strictly as JSON.
pub fn parse_json_output(result: &str) -> Result<Value, ConverterError> {
    serde_json::from_str(result)
        .map_err(|e| ConverterError::Malformed(format!("JSON parse error: {}", e)))
}

/// Coerce a JSON value into the target model.
pub fn validate_model<T: DeserializeOwned>(value: Value) -> Result<T, ConverterError> {
    serde_json::from_value(value).map_err(|e| ConverterError::Validation(e.to_string()))
}

/// Short human name of a JSON value's type, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
