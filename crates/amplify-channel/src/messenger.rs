use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};

use crate::{
    call::{MethodCall, MethodResponse},
    codec::{CodecError, JsonMethodCodec},
};

/// Entry point receiving every call made on a channel.
/// Handlers are registered with the [`PlatformMessenger`] under a channel name.
#[async_trait::async_trait]
pub trait MethodCallHandler: Send + Sync {
    /// Handle the call. Every invocation must produce exactly one response.
    async fn on_method_call(&self, call: MethodCall) -> MethodResponse;
}

/// Routes encoded messages to the handler registered for a channel name.
///
/// Handler invocations are serialized: only one call runs at a time, the way the host runtime
/// delivers every call on its platform thread.
pub struct PlatformMessenger {
    handlers: RwLock<HashMap<String, Arc<dyn MethodCallHandler>>>,
    platform_thread: Mutex<()>,
}

impl PlatformMessenger {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            platform_thread: Mutex::new(()),
        }
    }

    /// Install the handler for `channel`, or remove it when `handler` is `None`.
    pub async fn set_handler(&self, channel: &str, handler: Option<Arc<dyn MethodCallHandler>>) {
        let mut handlers = self.handlers.write().await;
        match handler {
            Some(handler) => {
                log::debug!("Registering method call handler on {channel}");
                handlers.insert(channel.to_string(), handler);
            }
            None => {
                log::debug!("Clearing method call handler on {channel}");
                handlers.remove(channel);
            }
        }
    }

    /// Whether a handler is currently registered for `channel`.
    pub async fn has_handler(&self, channel: &str) -> bool {
        self.handlers.read().await.contains_key(channel)
    }

    /// Deliver an encoded method call to the handler of `channel` and return the encoded reply.
    ///
    /// Returns `Ok(None)` when no handler is registered, in which case nothing answers the call.
    pub async fn send(&self, channel: &str, message: &[u8]) -> Result<Option<Vec<u8>>, CodecError> {
        let _platform_thread = self.platform_thread.lock().await;

        let Some(handler) = self.handlers.read().await.get(channel).cloned() else {
            log::debug!("No handler registered on {channel}, dropping message");
            return Ok(None);
        };

        let call = JsonMethodCodec::decode_method_call(message)?;
        let response = handler.on_method_call(call).await;

        JsonMethodCodec::encode_response(&response).map(Some)
    }
}

impl Default for PlatformMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    struct EchoHandler;

    #[async_trait::async_trait]
    impl MethodCallHandler for EchoHandler {
        async fn on_method_call(&self, call: MethodCall) -> MethodResponse {
            match call.method.as_str() {
                "echo" => MethodResponse::Success(call.args),
                _ => MethodResponse::NotImplemented,
            }
        }
    }

    /// Fails the test when two calls overlap.
    #[derive(Default)]
    struct ExclusiveHandler {
        running: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl MethodCallHandler for ExclusiveHandler {
        async fn on_method_call(&self, _call: MethodCall) -> MethodResponse {
            let previous = self.running.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.running.fetch_sub(1, Ordering::SeqCst);
            MethodResponse::success(previous == 0)
        }
    }

    fn encoded_call(method: &str) -> Vec<u8> {
        JsonMethodCodec::encode_method_call(&MethodCall::new(method, json!("hello")))
            .expect("encoding should succeed")
    }

    #[tokio::test]
    async fn send_returns_none_when_no_handler_is_registered() {
        let messenger = PlatformMessenger::new();

        let reply = messenger
            .send("test/channel", &encoded_call("echo"))
            .await
            .expect("send should succeed");

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn send_runs_registered_handler() {
        let messenger = PlatformMessenger::new();
        messenger
            .set_handler("test/channel", Some(Arc::new(EchoHandler)))
            .await;

        let reply = messenger
            .send("test/channel", &encoded_call("echo"))
            .await
            .expect("send should succeed")
            .expect("handler should reply");

        assert_eq!(reply, br#"["hello"]"#);
    }

    #[tokio::test]
    async fn send_only_reaches_handler_of_the_named_channel() {
        let messenger = PlatformMessenger::new();
        messenger
            .set_handler("test/channel", Some(Arc::new(EchoHandler)))
            .await;

        let reply = messenger
            .send("other/channel", &encoded_call("echo"))
            .await
            .expect("send should succeed");

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn cleared_handler_no_longer_replies() {
        let messenger = PlatformMessenger::new();
        messenger
            .set_handler("test/channel", Some(Arc::new(EchoHandler)))
            .await;
        messenger.set_handler("test/channel", None).await;

        let reply = messenger
            .send("test/channel", &encoded_call("echo"))
            .await
            .expect("send should succeed");

        assert!(!messenger.has_handler("test/channel").await);
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn send_rejects_malformed_calls() {
        let messenger = PlatformMessenger::new();
        messenger
            .set_handler("test/channel", Some(Arc::new(EchoHandler)))
            .await;

        let result = messenger.send("test/channel", b"{").await;

        assert!(matches!(result, Err(CodecError::MalformedCall(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_sends_are_serialized() {
        let messenger = Arc::new(PlatformMessenger::new());
        messenger
            .set_handler(
                "test/channel",
                Some(Arc::new(ExclusiveHandler::default())),
            )
            .await;

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let messenger = messenger.clone();
                tokio::spawn(async move {
                    messenger
                        .send("test/channel", &encoded_call("ping"))
                        .await
                        .expect("send should succeed")
                        .expect("handler should reply")
                })
            })
            .collect();

        for task in tasks {
            let reply = task.await.expect("task should not panic");
            assert_eq!(reply, b"[true]");
        }
    }
}
