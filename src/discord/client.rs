use crate::config::DiscordConfig;
use crate::discord::{
    BotIdentity, ChannelId, ChannelInfo, ChatPlatform, Embed, Message, MessagePayload,
    WebhookBinding, WebhookId, WebhookInfo, WebhookPayload,
};
use crate::error::{LogRouterError, Result};
use async_trait::async_trait;
use serenity::builder::{
    Builder, CreateAllowedMentions, CreateAttachment, CreateEmbed, CreateMessage, ExecuteWebhook,
};
use serenity::http::{Http, HttpBuilder};
use std::sync::Arc;

/// Discord client covering channel lookups, message sends and webhooks
pub struct DiscordClient {
    http: Arc<Http>,
}

impl DiscordClient {
    pub fn new(config: &DiscordConfig) -> Self {
        let mut builder = HttpBuilder::new(&config.bot_token);
        if let Some(proxy) = &config.proxy_url {
            builder = builder.proxy(proxy);
        }

        Self {
            http: Arc::new(builder.build()),
        }
    }
}

fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(ref title) = embed.title {
        builder = builder.title(title);
    }
    if let Some(ref desc) = embed.description {
        builder = builder.description(desc);
    }
    if let Some(color) = embed.color {
        builder = builder.color(color);
    }
    builder
}

fn build_attachments(payload: &MessagePayload) -> Vec<CreateAttachment> {
    payload
        .files
        .iter()
        .map(|f| CreateAttachment::bytes(f.data.clone(), f.filename.clone()))
        .collect()
}

/// Log messages never ping anyone
fn build_message(payload: &MessagePayload) -> CreateMessage {
    let mut builder = CreateMessage::new()
        .embeds(payload.embeds.iter().map(build_embed).collect())
        .allowed_mentions(CreateAllowedMentions::new())
        .add_files(build_attachments(payload));
    if let Some(ref content) = payload.content {
        builder = builder.content(content);
    }
    builder
}

fn build_webhook(payload: &WebhookPayload) -> ExecuteWebhook {
    let message = &payload.message;
    let mut builder = ExecuteWebhook::new()
        .username(&payload.username)
        .avatar_url(&payload.avatar_url)
        .embeds(message.embeds.iter().map(build_embed).collect())
        .allowed_mentions(CreateAllowedMentions::new())
        .add_files(build_attachments(message));
    if let Some(ref content) = message.content {
        builder = builder.content(content);
    }
    if let Some(thread_id) = payload.thread_id {
        builder = builder.in_thread(thread_id);
    }
    builder
}

#[async_trait]
impl ChatPlatform for DiscordClient {
    async fn get_channel(&self, channel_id: ChannelId) -> Result<ChannelInfo> {
        let channel = self.http.get_channel(channel_id).await?;
        Ok(ChannelInfo::from(channel))
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        payload: &MessagePayload,
    ) -> Result<Message> {
        let message = channel_id
            .send_message(&*self.http, build_message(payload))
            .await?;
        Ok(Message::from(&message))
    }

    async fn register_webhook(&self, id: WebhookId, token: &str) -> Result<WebhookInfo> {
        let webhook = self.http.get_webhook_with_token(id, token).await?;
        let channel_id = webhook
            .channel_id
            .ok_or_else(|| LogRouterError::Transport(format!("Webhook {} has no channel", id)))?;

        Ok(WebhookInfo {
            id: webhook.id,
            channel_id,
            name: webhook.name,
        })
    }

    async fn execute_webhook(
        &self,
        webhook: &WebhookBinding,
        payload: &WebhookPayload,
    ) -> Result<Message> {
        let message = build_webhook(payload)
            .execute(&*self.http, (webhook.id, webhook.token.as_str(), true))
            .await?
            .ok_or_else(|| {
                LogRouterError::Transport(format!(
                    "Webhook {} returned no message despite wait=true",
                    webhook.id
                ))
            })?;
        Ok(Message::from(&message))
    }

    async fn current_user(&self) -> Result<BotIdentity> {
        let user = self.http.get_current_user().await?;
        Ok(BotIdentity::from(&*user))
    }
}
