use std::sync::Arc;

use amplify_channel::{
    MethodCall, MethodCallHandler, MethodChannel, MethodResponse, PlatformMessenger,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::{
    error::ConfigureError,
    lifecycle::{LifecycleError, PluginState},
    sdk::{Activity, AmplifySdk, ApplicationContext, ConfigurationPayload},
};

/// Name of the channel the Core plugin listens on.
pub const CHANNEL_NAME: &str = "com.amazonaws.amplify/core";

/// What the host hands to a plugin when attaching it to an engine.
pub struct PluginBinding {
    #[allow(missing_docs)]
    pub messenger: Arc<PlatformMessenger>,
    #[allow(missing_docs)]
    pub application_context: ApplicationContext,
}

#[derive(Debug, Deserialize)]
struct ConfigureArguments {
    configuration: String,
}

impl ConfigureArguments {
    fn decode(call: &MethodCall) -> Result<Self, serde_json::Error> {
        // Structs also decode from sequences, so require a map first.
        let arguments: Map<String, Value> = call.arguments()?;
        serde_json::from_value(Value::Object(arguments))
    }
}

/// The Core plugin. Answers `configure` calls by handing the configuration to the Amplify SDK.
pub struct CorePlugin<S> {
    sdk: S,
    state: RwLock<PluginState>,
    channel: RwLock<Option<MethodChannel>>,
}

impl<S> CorePlugin<S>
where
    S: AmplifySdk + 'static,
{
    #[allow(missing_docs)]
    pub fn new(sdk: S) -> Arc<Self> {
        Arc::new(Self {
            sdk,
            state: RwLock::new(PluginState::default()),
            channel: RwLock::new(None),
        })
    }

    /// Register the handler on the Core channel and capture the application context.
    pub async fn on_attached_to_engine(
        self: &Arc<Self>,
        binding: PluginBinding,
    ) -> Result<(), LifecycleError> {
        self.state
            .write()
            .await
            .on_attach(binding.application_context)?;

        let channel = MethodChannel::new(binding.messenger, CHANNEL_NAME);
        let handler: Arc<dyn MethodCallHandler> = self.clone();
        channel.set_method_call_handler(Some(handler)).await;
        *self.channel.write().await = Some(channel);

        log::info!("Added Core plugin");
        Ok(())
    }

    /// Clear the channel handler. Calls made on the channel afterwards get no response.
    pub async fn on_detached_from_engine(&self) {
        if let Some(channel) = self.channel.write().await.take() {
            channel.set_method_call_handler(None).await;
        }
        self.state.write().await.on_detach();
        log::debug!("Detached Core plugin");
    }

    #[allow(missing_docs)]
    pub async fn on_attached_to_activity(&self, activity: Activity) -> Result<(), LifecycleError> {
        log::debug!("Attached to activity {}", activity.name());
        self.state.write().await.on_activity_bind(activity)
    }

    #[allow(missing_docs)]
    pub async fn on_reattached_to_activity_for_config_changes(
        &self,
        activity: Activity,
    ) -> Result<(), LifecycleError> {
        self.on_attached_to_activity(activity).await
    }

    #[allow(missing_docs)]
    pub async fn on_detached_from_activity_for_config_changes(&self) {
        self.on_detached_from_activity().await;
    }

    #[allow(missing_docs)]
    pub async fn on_detached_from_activity(&self) {
        log::debug!("Detached from activity");
        self.state.write().await.on_activity_unbind();
    }

    /// Snapshot of the current lifecycle state.
    pub async fn state(&self) -> PluginState {
        self.state.read().await.clone()
    }

    /// Decode the `configure` arguments and hand the configuration to the SDK.
    pub async fn configure(&self, call: &MethodCall) -> Result<bool, ConfigureError> {
        let arguments = ConfigureArguments::decode(call)?;
        let configuration = ConfigurationPayload::new(arguments.configuration);

        let state = self.state.read().await;
        let context = state.context().ok_or(ConfigureError::NotAttached)?;

        self.sdk.configure(&configuration, context)?;
        Ok(true)
    }
}

#[async_trait::async_trait]
impl<S> MethodCallHandler for CorePlugin<S>
where
    S: AmplifySdk + 'static,
{
    async fn on_method_call(&self, call: MethodCall) -> MethodResponse {
        match call.method.as_str() {
            "configure" => match self.configure(&call).await {
                Ok(configured) => MethodResponse::success(configured),
                Err(e) => {
                    log::error!("Failed to configure Amplify: {e}");
                    e.into()
                }
            },
            method => {
                log::warn!("Method {method} is not implemented on {CHANNEL_NAME}");
                MethodResponse::NotImplemented
            }
        }
    }
}
