//! Minimal model of the host messaging runtime that native plugins attach to.
//!
//! A [`PlatformMessenger`] routes encoded messages to the [`MethodCallHandler`] registered for
//! a channel name. Plugins talk to it through a [`MethodChannel`], and messages on the wire are
//! encoded with the [`JsonMethodCodec`].

mod call;
mod channel;
mod codec;
mod messenger;

pub use call::{MethodCall, MethodResponse};
pub use channel::MethodChannel;
pub use codec::{CodecError, JsonMethodCodec};
pub use messenger::{MethodCallHandler, PlatformMessenger};
