use std::sync::Arc;

use serde_json::Value;

use crate::{
    call::{MethodCall, MethodResponse},
    codec::{CodecError, JsonMethodCodec},
    messenger::{MethodCallHandler, PlatformMessenger},
};

/// A named channel on a [`PlatformMessenger`].
#[derive(Clone)]
pub struct MethodChannel {
    messenger: Arc<PlatformMessenger>,
    name: String,
}

impl MethodChannel {
    #[allow(missing_docs)]
    pub fn new(messenger: Arc<PlatformMessenger>, name: impl Into<String>) -> Self {
        Self {
            messenger,
            name: name.into(),
        }
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Install `handler` as the receiver of all calls on this channel. Passing `None` clears
    /// the current handler.
    pub async fn set_method_call_handler(&self, handler: Option<Arc<dyn MethodCallHandler>>) {
        self.messenger.set_handler(&self.name, handler).await;
    }

    /// Invoke `method` on the other side of the channel.
    ///
    /// Returns `Ok(None)` when nothing is listening on the channel.
    pub async fn invoke_method(
        &self,
        method: &str,
        args: Value,
    ) -> Result<Option<MethodResponse>, CodecError> {
        let message = JsonMethodCodec::encode_method_call(&MethodCall::new(method, args))?;

        match self.messenger.send(&self.name, &message).await? {
            Some(reply) => JsonMethodCodec::decode_envelope(&reply).map(Some),
            None => Ok(None),
        }
    }
}
