//! Amplify Core plugin.
//!
//! Listens on the [`CHANNEL_NAME`] channel and answers `configure` calls by handing the JSON
//! configuration to an [`AmplifySdk`] implementation. Success is reported as `true`, failures as
//! an `AmplifyException` error carrying the SDK's cause and recovery suggestion.

mod error;
pub mod lifecycle;
mod plugin;
pub mod sdk;

pub use error::{ConfigureError, ErrorDetails, AMPLIFY_EXCEPTION};
pub use lifecycle::{LifecycleError, PluginState};
pub use plugin::{CorePlugin, PluginBinding, CHANNEL_NAME};
pub use sdk::{Activity, AmplifyException, AmplifySdk, ApplicationContext, ConfigurationPayload};

/// Install the platform logger. Calling this more than once is harmless.
pub fn init_logger() {
    #[cfg(not(target_os = "android"))]
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag("Amplify Flutter")
            .with_max_level(log::LevelFilter::Info),
    );
}
