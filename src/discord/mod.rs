mod client;
#[cfg(test)]
pub(crate) mod mock;
mod platform;
mod transcript;
mod types;

pub use client::DiscordClient;
pub use platform::ChatPlatform;
pub use serenity::all::{ChannelId, ChannelType, MessageId, UserId, WebhookId};
pub use transcript::{CachedMessage, TranscriptEntry, compile_messages};
pub use types::{
    BotIdentity, ChannelInfo, Embed, FileAttachment, Message, MessageAttachment, MessagePayload,
    WebhookBinding, WebhookInfo, WebhookPayload,
};
