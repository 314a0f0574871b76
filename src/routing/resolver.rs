//! Startup resolution of log keys from the legacy fields and the `logChannels` mapping

use crate::config::{LogChannelConfig, LogConfig};
use crate::discord::ChannelId;
use crate::error::{LogRouterError, Result};
use crate::logging::Timer;
use crate::routing::{ChannelCache, DestinationTable, LogRouter, WebhookCache};

impl LogRouter {
    /// Resolve every configured key once. Later calls return immediately.
    ///
    /// On error nothing is kept and the router stays not ready.
    pub async fn unpack_log_config(&self, config: &LogConfig) -> Result<()> {
        if self.is_ready() {
            tracing::debug!("Log channels already unpacked, skipping");
            return Ok(());
        }

        let table = self
            .resolved
            .get_or_try_init(|| self.resolve(config))
            .await?;

        tracing::info!(
            destinations = table.len(),
            "Log channels unpacked, router ready"
        );
        Ok(())
    }

    async fn resolve(&self, config: &LogConfig) -> Result<DestinationTable> {
        let _timer = Timer::new("unpack_log_config");
        let platform = self.platform.as_ref();
        let mut channels = ChannelCache::new();
        let mut webhooks = WebhookCache::new();

        let home = configured(config.home_channel).ok_or_else(|| {
            LogRouterError::Config("homeChannel must be set before unpacking".to_string())
        })?;

        // Structured entries first so they shadow the legacy fields
        if let Some(log_channels) = &config.log_channels {
            for (key, entry) in log_channels {
                if let Some(channel_id) = configured(entry.channel_id) {
                    channels.register(platform, key, channel_id).await?;
                }

                if let Some(url) = self.webhook_url_for(key, entry) {
                    webhooks.register(platform, key, &url).await?;
                }
            }
        }

        for (key, channel_id) in config.legacy_mapping() {
            if channels.contains(key) {
                continue;
            }

            if let Some(channel_id) = configured(channel_id) {
                channels.register(platform, key, channel_id).await?;
            } else if !webhooks.contains(key) {
                // Home is mandatory, so every well-known key resolves to something
                tracing::debug!(key = %key, "No log channel configured, falling back to home");
                channels.register(platform, key, home).await?;
            }
        }

        let identity = platform.current_user().await?;

        tracing::info!(
            channels = channels.len(),
            webhooks = webhooks.len(),
            username = %identity.username,
            "Resolved log destinations"
        );

        Ok(DestinationTable::freeze(channels, webhooks, identity))
    }

    /// First non-empty of the named environment variable and the literal URL
    fn webhook_url_for(&self, key: &str, entry: &LogChannelConfig) -> Option<String> {
        if !entry.webhook_env_var.is_empty() {
            match self.env.var(&entry.webhook_env_var) {
                Some(url) if !url.trim().is_empty() => return Some(url),
                _ => tracing::warn!(
                    key = %key,
                    env_var = %entry.webhook_env_var,
                    "Webhook environment variable is unset or empty"
                ),
            }
        }

        if !entry.webhook_url.is_empty() {
            return Some(entry.webhook_url.clone());
        }

        None
    }
}

/// `0` marks an unset id in the config file
fn configured(id: u64) -> Option<ChannelId> {
    (id != 0).then(|| ChannelId::new(id))
}
