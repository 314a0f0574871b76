//! Recording in-memory platform for unit tests

use crate::discord::{
    BotIdentity, ChannelId, ChannelInfo, ChannelType, ChatPlatform, Message, MessageId,
    MessagePayload, UserId, WebhookBinding, WebhookId, WebhookInfo, WebhookPayload,
};
use crate::error::{LogRouterError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetChannel(ChannelId),
    Send(ChannelId, MessagePayload),
    RegisterWebhook(WebhookId),
    ExecuteWebhook(WebhookId, WebhookPayload),
    CurrentUser,
}

#[derive(Default)]
pub struct MockPlatform {
    channels: HashMap<ChannelId, ChannelInfo>,
    webhooks: HashMap<WebhookId, ChannelId>,
    failing_channels: HashSet<ChannelId>,
    failing_webhooks: HashSet<WebhookId>,
    calls: Mutex<Vec<Call>>,
    next_message_id: AtomicU64,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicU64::new(1000),
            ..Default::default()
        }
    }

    pub fn with_channel(mut self, id: u64, name: &str) -> Self {
        self.channels.insert(
            ChannelId::new(id),
            ChannelInfo {
                id: ChannelId::new(id),
                kind: ChannelType::Text,
                name: Some(name.to_string()),
                parent_id: None,
            },
        );
        self
    }

    pub fn with_thread(mut self, id: u64, parent: u64) -> Self {
        self.channels.insert(
            ChannelId::new(id),
            ChannelInfo {
                id: ChannelId::new(id),
                kind: ChannelType::PublicThread,
                name: Some(format!("thread-{}", id)),
                parent_id: Some(ChannelId::new(parent)),
            },
        );
        self
    }

    pub fn with_webhook(mut self, id: u64, channel: u64) -> Self {
        self.webhooks.insert(WebhookId::new(id), ChannelId::new(channel));
        self
    }

    pub fn failing_channel(mut self, id: u64) -> Self {
        self.failing_channels.insert(ChannelId::new(id));
        self
    }

    pub fn failing_webhook(mut self, id: u64) -> Self {
        self.failing_webhooks.insert(WebhookId::new(id));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<(ChannelId, MessagePayload)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send(id, payload) => Some((id, payload)),
                _ => None,
            })
            .collect()
    }

    pub fn webhook_executions(&self) -> Vec<(WebhookId, WebhookPayload)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::ExecuteWebhook(id, payload) => Some((id, payload)),
                _ => None,
            })
            .collect()
    }

    pub fn channel_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::GetChannel(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn message(&self, channel_id: ChannelId, payload: &MessagePayload) -> Message {
        Message {
            id: MessageId::new(self.next_message_id.fetch_add(1, Ordering::SeqCst)),
            channel_id,
            content: payload.content.clone().unwrap_or_default(),
            author_id: UserId::new(1),
            author_name: bot_identity().username,
            timestamp: Utc::now(),
            attachments: vec![],
            embeds: payload.embeds.clone(),
        }
    }
}

pub fn bot_identity() -> BotIdentity {
    BotIdentity {
        username: "modbot".to_string(),
        avatar_url: "https://cdn.discordapp.com/avatars/1/a1b2.webp?size=1024".to_string(),
    }
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    async fn get_channel(&self, channel_id: ChannelId) -> Result<ChannelInfo> {
        self.record(Call::GetChannel(channel_id));
        self.channels
            .get(&channel_id)
            .cloned()
            .ok_or_else(|| LogRouterError::Transport("404 Not Found: Unknown Channel".into()))
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        payload: &MessagePayload,
    ) -> Result<Message> {
        self.record(Call::Send(channel_id, payload.clone()));
        if self.failing_channels.contains(&channel_id) {
            return Err(LogRouterError::Transport("403 Forbidden: Missing Access".into()));
        }
        Ok(self.message(channel_id, payload))
    }

    async fn register_webhook(&self, id: WebhookId, _token: &str) -> Result<WebhookInfo> {
        self.record(Call::RegisterWebhook(id));
        self.webhooks
            .get(&id)
            .map(|channel_id| WebhookInfo {
                id,
                channel_id: *channel_id,
                name: Some("logs".to_string()),
            })
            .ok_or_else(|| LogRouterError::Transport("404 Not Found: Unknown Webhook".into()))
    }

    async fn execute_webhook(
        &self,
        webhook: &WebhookBinding,
        payload: &WebhookPayload,
    ) -> Result<Message> {
        self.record(Call::ExecuteWebhook(webhook.id, payload.clone()));
        if self.failing_webhooks.contains(&webhook.id) {
            return Err(LogRouterError::Transport("429 Too Many Requests".into()));
        }
        let target = payload.thread_id.unwrap_or(webhook.channel_id);
        Ok(self.message(target, &payload.message))
    }

    async fn current_user(&self) -> Result<BotIdentity> {
        self.record(Call::CurrentUser);
        Ok(bot_identity())
    }
}
