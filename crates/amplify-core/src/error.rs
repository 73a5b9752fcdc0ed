use amplify_channel::MethodResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sdk::AmplifyException;

/// Error code attached to every error reported on the Core channel.
pub const AMPLIFY_EXCEPTION: &str = "AmplifyException";

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error("{0}")]
    Arguments(#[from] serde_json::Error),

    #[error(transparent)]
    Configuration(#[from] AmplifyException),

    #[error("The Core plugin is not attached to an engine")]
    NotAttached,
}

/// Structured payload sent along with configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    #[allow(missing_docs)]
    pub cause: Option<String>,
    #[allow(missing_docs)]
    pub recovery_suggestion: Option<String>,
}

impl From<&AmplifyException> for ErrorDetails {
    fn from(value: &AmplifyException) -> Self {
        Self {
            cause: value.cause.clone(),
            recovery_suggestion: value.recovery_suggestion.clone(),
        }
    }
}

impl From<ConfigureError> for MethodResponse {
    fn from(error: ConfigureError) -> Self {
        let details = match &error {
            ConfigureError::Configuration(e) => serde_json::to_value(ErrorDetails::from(e)).ok(),
            ConfigureError::Arguments(_) | ConfigureError::NotAttached => None,
        };

        MethodResponse::error(AMPLIFY_EXCEPTION, error.to_string(), details)
    }
}
