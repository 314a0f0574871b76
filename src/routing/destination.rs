//! Per-key delivery targets, fixed once resolution completes

use crate::discord::{BotIdentity, ChannelId, ChannelInfo, WebhookBinding};
use crate::error::{LogRouterError, Result};
use crate::routing::{ChannelCache, WebhookCache};
use std::collections::HashMap;

/// Where messages for one key go
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// Post through a webhook, optionally into a thread of its channel
    Webhook {
        binding: WebhookBinding,
        thread_id: Option<ChannelId>,
    },
    /// Post directly with the bot account
    Channel(ChannelInfo),
}

impl Destination {
    /// The channel (or thread) a message for this destination ends up in
    pub fn channel_id(&self) -> ChannelId {
        match self {
            Self::Webhook {
                thread_id: Some(thread_id),
                ..
            } => *thread_id,
            Self::Webhook { binding, .. } => binding.channel_id,
            Self::Channel(channel) => channel.id,
        }
    }
}

/// Immutable result of resolving every configured key
#[derive(Debug, Clone)]
pub struct DestinationTable {
    destinations: HashMap<String, Destination>,
    identity: BotIdentity,
}

impl DestinationTable {
    /// Collapse both caches into one destination per key.
    ///
    /// A webhook wins over a channel for the same key; the channel then only
    /// contributes its id when it is a thread.
    pub fn freeze(channels: ChannelCache, webhooks: WebhookCache, identity: BotIdentity) -> Self {
        let mut channels: HashMap<String, ChannelInfo> = channels.into_entries().collect();
        let mut destinations = HashMap::new();

        for (key, binding) in webhooks.into_entries() {
            let thread_id = channels
                .remove(&key)
                .filter(|c| c.is_thread())
                .map(|c| c.id);
            destinations.insert(key, Destination::Webhook { binding, thread_id });
        }

        for (key, channel) in channels {
            destinations.insert(key, Destination::Channel(channel));
        }

        Self {
            destinations,
            identity,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Destination> {
        self.destinations.get(key)
    }

    pub fn resolve(&self, key: &str) -> Result<&Destination> {
        self.get(key)
            .ok_or_else(|| LogRouterError::LogDestinationNotFound(key.to_string()))
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.destinations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
