//! Plugin lifecycle driven by the host runtime.

use thiserror::Error;

use crate::sdk::{Activity, ApplicationContext};

#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("The plugin is already attached to an engine")]
    AlreadyAttached,

    #[error("The plugin is not attached to an engine")]
    NotAttached,
}

/// Where the plugin is in its host lifecycle.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PluginState {
    #[default]
    Detached,
    Attached {
        context: ApplicationContext,
    },
    ActivityBound {
        context: ApplicationContext,
        activity: Activity,
    },
}

impl PluginState {
    /// The application context captured on attach.
    pub fn context(&self) -> Option<&ApplicationContext> {
        match self {
            PluginState::Detached => None,
            PluginState::Attached { context } | PluginState::ActivityBound { context, .. } => {
                Some(context)
            }
        }
    }

    /// The current foreground activity.
    pub fn activity(&self) -> Option<&Activity> {
        match self {
            PluginState::ActivityBound { activity, .. } => Some(activity),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn on_attach(&mut self, context: ApplicationContext) -> Result<(), LifecycleError> {
        if !matches!(self, PluginState::Detached) {
            return Err(LifecycleError::AlreadyAttached);
        }

        *self = PluginState::Attached { context };
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn on_detach(&mut self) {
        *self = PluginState::Detached;
    }

    /// Track `activity` as the foreground activity, replacing any previous one.
    pub fn on_activity_bind(&mut self, activity: Activity) -> Result<(), LifecycleError> {
        let context = self.context().cloned().ok_or(LifecycleError::NotAttached)?;

        *self = PluginState::ActivityBound { context, activity };
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn on_activity_unbind(&mut self) {
        if let PluginState::ActivityBound { context, .. } = self {
            *self = PluginState::Attached {
                context: context.clone(),
            };
        }
    }
}
