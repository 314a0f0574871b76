use crate::config::EnvLookup;
use crate::discord::{
    ChannelId, ChannelInfo, ChatPlatform, Embed, Message, MessagePayload, TranscriptEntry,
    WebhookPayload,
};
use crate::error::{LogRouterError, Result};
use crate::logging::log_delivery_error;
use crate::paste::PasteService;
use crate::routing::{Destination, DestinationTable, DeliveryStats, DumpComposer};
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};

/// Routes log messages by key to the channel, thread or webhook configured for it.
///
/// Construct once at startup, call [`LogRouter::unpack_log_config`], then share
/// behind an `Arc`. Until unpacking succeeds every delivery is a silent no-op.
pub struct LogRouter {
    pub(super) platform: Arc<dyn ChatPlatform>,
    pub(super) env: Arc<dyn EnvLookup>,
    pub(super) resolved: OnceCell<DestinationTable>,
    dumps: DumpComposer,
    stats: Arc<RwLock<DeliveryStats>>,
}

impl LogRouter {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        paste: Arc<dyn PasteService>,
        env: Arc<dyn EnvLookup>,
    ) -> Self {
        Self {
            platform,
            env,
            resolved: OnceCell::new(),
            dumps: DumpComposer::new(paste),
            stats: Arc::new(RwLock::new(DeliveryStats::default())),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.resolved.initialized()
    }

    pub fn destinations(&self) -> Option<&DestinationTable> {
        self.resolved.get()
    }

    pub fn dumps(&self) -> &DumpComposer {
        &self.dumps
    }

    /// Send a message to the destination for `key`.
    ///
    /// Never fails: not-ready, unknown keys and transport errors all yield `None`,
    /// the latter two after being logged.
    pub async fn deliver(&self, key: &str, payload: impl Into<MessagePayload>) -> Option<Message> {
        let Some(table) = self.resolved.get() else {
            self.stats.write().await.skipped_not_ready += 1;
            tracing::trace!(key = %key, "Log router not ready, dropping message");
            return None;
        };

        let payload = payload.into();
        match self.try_deliver(table, key, &payload).await {
            Ok((message, via_webhook)) => {
                let mut stats = self.stats.write().await;
                stats.delivered += 1;
                if via_webhook {
                    stats.via_webhook += 1;
                }
                tracing::trace!(
                    key = %key,
                    message_id = %message.id,
                    channel_id = %message.channel_id,
                    via_webhook = via_webhook,
                    "Delivered log message"
                );
                Some(message)
            }
            Err(e) => {
                self.stats.write().await.failed += 1;
                log_delivery_error(key, &e);
                None
            }
        }
    }

    pub async fn log_text(&self, key: &str, content: impl Into<String>) -> Option<Message> {
        self.deliver(key, MessagePayload::text(content)).await
    }

    pub async fn log_embed(&self, key: &str, embed: Embed) -> Option<Message> {
        self.deliver(key, MessagePayload::embed(embed)).await
    }

    pub async fn log_text_with_embed(
        &self,
        key: &str,
        content: impl Into<String>,
        embed: Embed,
    ) -> Option<Message> {
        self.deliver(key, MessagePayload::text(content).with_embed(embed))
            .await
    }

    /// Dump `messages` (e.g. a purge) to `key` with a transcript attachment
    pub async fn log_deleted_messages<T: TranscriptEntry>(
        &self,
        key: &str,
        content: &str,
        messages: &[T],
        channel: &ChannelInfo,
    ) -> Option<Message> {
        let (payload, _) = self.dumps.compose_dump(content, messages, channel).await;
        self.deliver(key, payload).await
    }

    /// The channel a message for `key` lands in: the thread id for webhooks
    /// into threads, the webhook's own channel otherwise, else the plain channel.
    pub fn destination_id(&self, key: &str) -> Result<ChannelId> {
        self.resolved
            .get()
            .ok_or_else(|| LogRouterError::LogDestinationNotFound(key.to_string()))?
            .resolve(key)
            .map(Destination::channel_id)
    }

    async fn try_deliver(
        &self,
        table: &DestinationTable,
        key: &str,
        payload: &MessagePayload,
    ) -> Result<(Message, bool)> {
        match table.resolve(key)? {
            Destination::Webhook { binding, thread_id } => {
                let mut webhook_payload = WebhookPayload::new(payload.clone(), table.identity());
                if let Some(thread_id) = thread_id {
                    webhook_payload = webhook_payload.with_thread(*thread_id);
                }
                let message = self
                    .platform
                    .execute_webhook(binding, &webhook_payload)
                    .await?;
                Ok((message, true))
            }
            Destination::Channel(channel) => {
                let message = self.platform.send_message(channel.id, payload).await?;
                Ok((message, false))
            }
        }
    }

    pub async fn get_stats(&self) -> DeliveryStats {
        self.stats.read().await.clone()
    }

    /// Log delivery statistics (for periodic monitoring)
    pub async fn log_stats(&self) {
        let stats = self.get_stats().await;
        tracing::info!(
            delivered = stats.delivered,
            via_webhook = stats.via_webhook,
            failed = stats.failed,
            skipped_not_ready = stats.skipped_not_ready,
            success_rate = stats.success_rate(),
            "Log delivery statistics"
        );
    }
}
