//! Log channel configuration, in both the legacy flat shape and the keyed `logChannels` shape

use crate::error::{LogRouterError, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;

/// Snowflakes may be written as JSON strings or plain numbers; `""` and `0` mean unset.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSnowflake {
    Str(String),
    Num(u64),
}

fn deserialize_snowflake<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawSnowflake::deserialize(deserializer)? {
        RawSnowflake::Num(n) => Ok(n),
        RawSnowflake::Str(s) if s.is_empty() => Ok(0),
        RawSnowflake::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// One entry of the `logChannels` mapping
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogChannelConfig {
    #[serde(deserialize_with = "deserialize_snowflake")]
    pub channel_id: u64,

    /// Name of an environment variable holding the webhook URL
    pub webhook_env_var: String,

    pub webhook_url: String,
}

impl LogChannelConfig {
    pub fn channel(channel_id: u64) -> Self {
        Self {
            channel_id,
            ..Default::default()
        }
    }

    pub fn webhook_url(url: impl Into<String>) -> Self {
        Self {
            webhook_url: url.into(),
            ..Default::default()
        }
    }

    pub fn webhook_env(var: impl Into<String>) -> Self {
        Self {
            webhook_env_var: var.into(),
            ..Default::default()
        }
    }

    pub fn with_channel(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogConfig {
    #[serde(deserialize_with = "deserialize_snowflake")]
    pub log_channel: u64,

    #[serde(deserialize_with = "deserialize_snowflake")]
    pub user_log_channel: u64,

    #[serde(deserialize_with = "deserialize_snowflake")]
    pub home_channel: u64,

    #[serde(
        rename = "investigationsChannel",
        deserialize_with = "deserialize_snowflake"
    )]
    pub investigations_channel_id: u64,

    #[serde(deserialize_with = "deserialize_snowflake")]
    pub support_log_channel: u64,

    #[serde(rename = "dmLogChannel", deserialize_with = "deserialize_snowflake")]
    pub dm_log_channel_id: u64,

    #[serde(rename = "errorLogChannel", deserialize_with = "deserialize_snowflake")]
    pub error_log_channel_id: u64,

    #[serde(rename = "mysteryLogChannel", deserialize_with = "deserialize_snowflake")]
    pub mystery_log_channel_id: u64,

    pub log_channels: Option<HashMap<String, LogChannelConfig>>,

    pub silent_mode: bool,
}

impl LogConfig {
    /// The eight well-known keys and their legacy channel ids, in resolution order
    pub fn legacy_mapping(&self) -> [(&'static str, u64); 8] {
        [
            ("mod", self.log_channel),
            ("users", self.user_log_channel),
            ("home", self.home_channel),
            ("investigations", self.investigations_channel_id),
            ("support", self.support_log_channel),
            ("dms", self.dm_log_channel_id),
            ("errors", self.error_log_channel_id),
            ("secret", self.mystery_log_channel_id),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if self.home_channel == 0 {
            return Err(LogRouterError::Config(
                "homeChannel must be set; it is the fallback for every log channel".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading log channel configuration");
        let raw = tokio::fs::read_to_string(path).await?;
        Self::from_json(&raw)
    }
}
