//! Types shared with the Amplify SDK collaborator.

use serde_json::{Map, Value};
use thiserror::Error;

/// Handle to the host application environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationContext {
    package_name: String,
}

impl ApplicationContext {
    #[allow(missing_docs)]
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }

    #[allow(missing_docs)]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }
}

/// Handle to the foreground activity of the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    name: String,
}

impl Activity {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Error raised by the SDK when it rejects a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AmplifyException {
    /// What went wrong.
    pub message: String,
    /// Underlying failure, if any.
    pub cause: Option<String>,
    /// How the caller can fix the problem.
    pub recovery_suggestion: Option<String>,
}

impl AmplifyException {
    #[allow(missing_docs)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
            recovery_suggestion: None,
        }
    }

    #[allow(missing_docs)]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    #[allow(missing_docs)]
    pub fn with_recovery_suggestion(mut self, recovery_suggestion: impl Into<String>) -> Self {
        self.recovery_suggestion = Some(recovery_suggestion.into());
        self
    }
}

/// JSON encoded configuration, passed to the SDK exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationPayload(String);

impl ConfigurationPayload {
    #[allow(missing_docs)]
    pub fn new(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    #[allow(missing_docs)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the payload into a JSON object.
    pub fn to_json_object(&self) -> Result<Map<String, Value>, AmplifyException> {
        let value: Value = serde_json::from_str(&self.0).map_err(|e| {
            AmplifyException::new("Failed to parse the configuration JSON")
                .with_cause(e.to_string())
                .with_recovery_suggestion("Check that the configuration is valid JSON.")
        })?;

        match value {
            Value::Object(object) => Ok(object),
            _ => Err(AmplifyException::new("The configuration is not a JSON object")
                .with_recovery_suggestion(
                    "Pass the contents of amplifyconfiguration.json unmodified.",
                )),
        }
    }
}

/// Configuration entry point of the Amplify SDK.
///
/// Parsing and validating the configuration is entirely up to the implementation.
pub trait AmplifySdk: Send + Sync {
    /// Configure the SDK. Blocks until the SDK has accepted or rejected the configuration.
    fn configure(
        &self,
        configuration: &ConfigurationPayload,
        context: &ApplicationContext,
    ) -> Result<(), AmplifyException>;
}
