use crate::config::LogConfig;
use crate::error::{LogRouterError, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord: DiscordConfig,
    pub paste: PasteConfig,
    pub logging: LoggingConfig,
    pub log_config_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub bot_token: String,
    /// Route API calls through an HTTP proxy, e.g. a shared ratelimit proxy
    pub proxy_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PasteConfig {
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub json: bool,
}

pub const DEFAULT_HASTE_URL: &str = "https://hst.sh";

pub fn load_settings() -> Result<Settings> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let discord = DiscordConfig {
        bot_token: std::env::var("DISCORD_TOKEN")
            .map_err(|_| LogRouterError::Config("DISCORD_TOKEN not set".to_string()))?,
        proxy_url: std::env::var("DISCORD_PROXY_URL")
            .ok()
            .filter(|v| !v.is_empty()),
    };

    let paste = PasteConfig {
        base_url: std::env::var("HASTE_URL").unwrap_or_else(|_| DEFAULT_HASTE_URL.to_string()),
    };

    let logging = LoggingConfig {
        json: std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false),
    };

    let log_config_path = std::env::var("LOG_ROUTER_CONFIG")
        .unwrap_or_else(|_| "config.json".to_string())
        .into();

    Ok(Settings {
        discord,
        paste,
        logging,
        log_config_path,
    })
}

impl Settings {
    /// Read and validate the log channel configuration file
    pub async fn load_log_config(&self) -> Result<LogConfig> {
        LogConfig::load(&self.log_config_path).await
    }
}
