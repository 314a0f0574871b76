//! Channel resolution cache

use crate::discord::{ChannelId, ChannelInfo, ChatPlatform};
use crate::error::{LogRouterError, Result};
use std::collections::HashMap;

/// Key to channel map, filled once during startup
#[derive(Default)]
pub struct ChannelCache {
    entries: HashMap<String, ChannelInfo>,
}

impl ChannelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `channel_id` and store it under `key`.
    ///
    /// A failed fetch is logged and returned as [`LogRouterError::ChannelResolution`],
    /// which the binary treats as fatal.
    pub async fn register(
        &mut self,
        platform: &dyn ChatPlatform,
        key: &str,
        channel_id: ChannelId,
    ) -> Result<ChannelInfo> {
        let channel = match platform.get_channel(channel_id).await {
            Ok(channel) => channel,
            Err(e) => {
                tracing::error!(
                    key = %key,
                    channel_id = %channel_id,
                    error = %e,
                    "Error getting channel {} for log channel {}",
                    channel_id,
                    key
                );
                return Err(LogRouterError::ChannelResolution {
                    key: key.to_string(),
                    channel_id: channel_id.get(),
                    reason: e.to_string(),
                });
            }
        };

        tracing::info!(
            key = %key,
            channel_id = %channel.id,
            channel = %channel.display_name(),
            is_thread = channel.is_thread(),
            "Resolved log channel"
        );
        self.entries.insert(key.to_string(), channel.clone());
        Ok(channel)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ChannelInfo> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (String, ChannelInfo)> {
        self.entries.into_iter()
    }
}
