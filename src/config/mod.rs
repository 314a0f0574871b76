mod env;
mod log_config;
mod settings;

pub use env::{EnvLookup, ProcessEnv};
pub use log_config::{LogChannelConfig, LogConfig};
pub use settings::{
    DEFAULT_HASTE_URL, DiscordConfig, LoggingConfig, PasteConfig, Settings, load_settings,
};
