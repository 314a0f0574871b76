use crate::discord::{
    BotIdentity, ChannelId, ChannelInfo, Message, MessagePayload, WebhookBinding, WebhookId,
    WebhookInfo, WebhookPayload,
};
use crate::error::Result;
use async_trait::async_trait;

/// The slice of the chat platform the log router talks to.
///
/// Every method is a single network round trip; failures come back as
/// [`LogRouterError::Transport`](crate::error::LogRouterError::Transport).
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Fetch live channel metadata
    async fn get_channel(&self, channel_id: ChannelId) -> Result<ChannelInfo>;

    /// Post a message directly into a channel or thread
    async fn send_message(&self, channel_id: ChannelId, payload: &MessagePayload)
    -> Result<Message>;

    /// Validate a webhook and learn the channel it posts into
    async fn register_webhook(&self, id: WebhookId, token: &str) -> Result<WebhookInfo>;

    /// Execute a registered webhook and wait for the created message
    async fn execute_webhook(
        &self,
        webhook: &WebhookBinding,
        payload: &WebhookPayload,
    ) -> Result<Message>;

    /// Name and avatar of the bot's own user
    async fn current_user(&self) -> Result<BotIdentity>;
}
