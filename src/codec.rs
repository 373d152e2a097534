//! JSON wire codec, generic over record shape.

use crate::error::ServiceError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, ServiceError> {
    serde_json::to_string(value).map_err(|e| ServiceError::Internal(format!("encode: {}", e)))
}

/// Decode a request body. The body must be a JSON object; absent fields take their
/// defaults and unknown fields are ignored.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ServiceError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ServiceError::InvalidInput(format!("malformed JSON: {}", e)))?;
    if !value.is_object() {
        return Err(ServiceError::InvalidInput("body must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| ServiceError::InvalidInput(e.to_string()))
}
