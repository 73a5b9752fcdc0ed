use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// A method invocation received on a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Name of the invoked method.
    pub method: String,
    /// Untyped arguments, `null` when the caller passed none.
    #[serde(default)]
    pub args: Value,
}

impl MethodCall {
    #[allow(missing_docs)]
    pub fn new(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// Decode the arguments into a typed request. Fails when a required key is missing or a
    /// value has the wrong type.
    pub fn arguments<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.args)
    }
}

/// The single reply produced for every [`MethodCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// The call completed with a value.
    Success(Value),
    /// The call failed.
    Error {
        /// Machine readable error category.
        code: String,
        /// Human readable description.
        message: String,
        /// Optional structured payload.
        details: Option<Value>,
    },
    /// The handler does not know the invoked method.
    NotImplemented,
}

impl MethodResponse {
    #[allow(missing_docs)]
    pub fn success(value: impl Into<Value>) -> Self {
        MethodResponse::Success(value.into())
    }

    #[allow(missing_docs)]
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        MethodResponse::Error {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Arguments {
        name: String,
    }

    #[test]
    fn arguments_decodes_typed_request() {
        let call = MethodCall::new("greet", json!({ "name": "amplify", "extra": 1 }));

        let arguments: Arguments = call.arguments().expect("arguments should decode");

        assert_eq!(
            arguments,
            Arguments {
                name: "amplify".to_string()
            }
        );
    }

    #[test]
    fn arguments_fails_on_missing_key() {
        let call = MethodCall::new("greet", json!({}));

        let error = call
            .arguments::<Arguments>()
            .expect_err("decoding should fail");

        assert!(error.to_string().contains("missing field `name`"));
    }

    #[test]
    fn arguments_fails_on_wrong_type() {
        let call = MethodCall::new("greet", json!({ "name": 42 }));

        assert!(call.arguments::<Arguments>().is_err());
    }

    #[test]
    fn arguments_fails_when_no_arguments_were_passed() {
        let call = MethodCall::new("greet", Value::Null);

        assert!(call.arguments::<Arguments>().is_err());
    }
}
