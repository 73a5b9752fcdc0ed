use serde_json::Value;
use thiserror::Error;

use crate::call::{MethodCall, MethodResponse};

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Malformed method call: {0}")]
    MalformedCall(serde_json::Error),

    #[error("Malformed reply envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Failed to encode message: {0}")]
    Encode(serde_json::Error),
}

/// JSON codec for method calls and reply envelopes.
///
/// Calls travel as `{"method": <string>, "args": <json>}`. Replies are a one element array
/// `[result]` on success, a three element array `[code, message, details]` on error, and an
/// empty message when the method is not implemented.
pub struct JsonMethodCodec;

impl JsonMethodCodec {
    #[allow(missing_docs)]
    pub fn encode_method_call(call: &MethodCall) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(call).map_err(CodecError::Encode)
    }

    #[allow(missing_docs)]
    pub fn decode_method_call(message: &[u8]) -> Result<MethodCall, CodecError> {
        serde_json::from_slice(message).map_err(CodecError::MalformedCall)
    }

    #[allow(missing_docs)]
    pub fn encode_response(response: &MethodResponse) -> Result<Vec<u8>, CodecError> {
        let envelope = match response {
            MethodResponse::Success(value) => Value::Array(vec![value.clone()]),
            MethodResponse::Error {
                code,
                message,
                details,
            } => Value::Array(vec![
                Value::String(code.clone()),
                Value::String(message.clone()),
                details.clone().unwrap_or(Value::Null),
            ]),
            MethodResponse::NotImplemented => return Ok(Vec::new()),
        };

        serde_json::to_vec(&envelope).map_err(CodecError::Encode)
    }

    #[allow(missing_docs)]
    pub fn decode_envelope(envelope: &[u8]) -> Result<MethodResponse, CodecError> {
        if envelope.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }

        let value: Value = serde_json::from_slice(envelope)
            .map_err(|e| CodecError::MalformedEnvelope(e.to_string()))?;

        let Value::Array(mut items) = value else {
            return Err(CodecError::MalformedEnvelope(
                "expected a JSON array".to_string(),
            ));
        };

        match items.len() {
            1 => Ok(MethodResponse::Success(items.remove(0))),
            3 => {
                let details = items.pop().filter(|d| !d.is_null());
                let message = match items.pop() {
                    Some(Value::String(message)) => message,
                    Some(Value::Null) => String::new(),
                    _ => {
                        return Err(CodecError::MalformedEnvelope(
                            "error message must be a string".to_string(),
                        ))
                    }
                };
                let Some(Value::String(code)) = items.pop() else {
                    return Err(CodecError::MalformedEnvelope(
                        "error code must be a string".to_string(),
                    ));
                };

                Ok(MethodResponse::Error {
                    code,
                    message,
                    details,
                })
            }
            n => Err(CodecError::MalformedEnvelope(format!(
                "unexpected envelope length {n}"
            ))),
        }
    }
}
