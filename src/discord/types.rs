use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, ChannelType, MessageId, UserId, WebhookId};
use serenity::model::channel::{Channel, Message as DiscordMessage};
use serenity::model::user::User;

/// Channel metadata needed to route into a channel or thread
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub kind: ChannelType,
    pub name: Option<String>,
    /// Parent text channel for threads
    pub parent_id: Option<ChannelId>,
}

impl ChannelInfo {
    pub fn is_thread(&self) -> bool {
        matches!(
            self.kind,
            ChannelType::NewsThread | ChannelType::PublicThread | ChannelType::PrivateThread
        )
    }

    /// Get display name with # prefix
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("#{}", name),
            None => self.id.to_string(),
        }
    }
}

impl From<Channel> for ChannelInfo {
    fn from(channel: Channel) -> Self {
        let id = channel.id();
        match channel.guild() {
            Some(guild) => Self {
                id,
                kind: guild.kind,
                name: Some(guild.name),
                parent_id: guild.parent_id,
            },
            None => Self {
                id,
                kind: ChannelType::Private,
                name: None,
                parent_id: None,
            },
        }
    }
}

/// A webhook that passed registration against the API.
///
/// The id is the webhook's own id; `channel_id` is where it posts.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookBinding {
    pub id: WebhookId,
    pub token: String,
    pub channel_id: ChannelId,
}

/// What registration learns about a webhook
#[derive(Debug, Clone)]
pub struct WebhookInfo {
    pub id: WebhookId,
    pub channel_id: ChannelId,
    pub name: Option<String>,
}

/// Name and avatar used when posting through webhooks
#[derive(Debug, Clone, PartialEq)]
pub struct BotIdentity {
    pub username: String,
    pub avatar_url: String,
}

impl From<&User> for BotIdentity {
    fn from(user: &User) -> Self {
        Self {
            username: user.name.clone(),
            avatar_url: user.face(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageAttachment {
    pub filename: String,
    pub url: String,
}

/// A message the platform accepted
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub content: String,
    pub author_id: UserId,
    pub author_name: String,
    pub timestamp: DateTime<Utc>,
    pub attachments: Vec<MessageAttachment>,
    pub embeds: Vec<Embed>,
}

impl From<&DiscordMessage> for Message {
    fn from(m: &DiscordMessage) -> Self {
        Self {
            id: m.id,
            channel_id: m.channel_id,
            content: m.content.clone(),
            author_id: m.author.id,
            author_name: m.author.name.clone(),
            timestamp: DateTime::from_timestamp(m.timestamp.unix_timestamp(), 0)
                .unwrap_or_default(),
            attachments: m
                .attachments
                .iter()
                .map(|a| MessageAttachment {
                    filename: a.filename.clone(),
                    url: a.url.clone(),
                })
                .collect(),
            embeds: m
                .embeds
                .iter()
                .map(|e| Embed {
                    title: e.title.clone(),
                    description: e.description.clone(),
                    color: e.colour.map(|c| c.0),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }
}

/// A file uploaded alongside a message
#[derive(Debug, Clone, PartialEq)]
pub struct FileAttachment {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Outbound message body: text, embeds and files in any combination
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePayload {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub files: Vec<FileAttachment>,
}

impl MessagePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new().with_content(content)
    }

    pub fn embed(embed: Embed) -> Self {
        Self::new().with_embed(embed)
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn with_file(mut self, filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.files.push(FileAttachment {
            filename: filename.into(),
            data: data.into(),
        });
        self
    }
}

impl From<&str> for MessagePayload {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<String> for MessagePayload {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

impl From<Embed> for MessagePayload {
    fn from(embed: Embed) -> Self {
        Self::embed(embed)
    }
}

/// A message payload adapted for webhook execution
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookPayload {
    pub message: MessagePayload,
    pub username: String,
    pub avatar_url: String,
    /// Post into this thread of the webhook's channel
    pub thread_id: Option<ChannelId>,
}

impl WebhookPayload {
    pub fn new(message: MessagePayload, identity: &BotIdentity) -> Self {
        Self {
            message,
            username: identity.username.clone(),
            avatar_url: identity.avatar_url.clone(),
            thread_id: None,
        }
    }

    pub fn with_thread(mut self, thread_id: ChannelId) -> Self {
        self.thread_id = Some(thread_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(kind: ChannelType) -> ChannelInfo {
        ChannelInfo {
            id: ChannelId::new(900),
            kind,
            name: Some("mod-logs".to_string()),
            parent_id: None,
        }
    }

    #[test]
    fn test_channel_is_thread() {
        assert!(channel(ChannelType::PublicThread).is_thread());
        assert!(channel(ChannelType::PrivateThread).is_thread());
        assert!(channel(ChannelType::NewsThread).is_thread());
        assert!(!channel(ChannelType::Text).is_thread());
        assert!(!channel(ChannelType::Forum).is_thread());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(channel(ChannelType::Text).display_name(), "#mod-logs");

        let unnamed = ChannelInfo {
            name: None,
            ..channel(ChannelType::Private)
        };
        assert_eq!(unnamed.display_name(), "900");
    }

    #[test]
    fn test_webhook_payload_carries_identity() {
        let identity = BotIdentity {
            username: "modbot".into(),
            avatar_url: "https://cdn.example/a.png".into(),
        };
        let payload = WebhookPayload::new("hi".into(), &identity).with_thread(ChannelId::new(900));
        assert_eq!(payload.username, "modbot");
        assert_eq!(payload.thread_id, Some(ChannelId::new(900)));
        assert_eq!(payload.message.content.as_deref(), Some("hi"));
    }

    #[test]
    fn test_payload_builders() {
        let payload = MessagePayload::text("hello")
            .with_embed(Embed::new().with_description("world"))
            .with_file("messages.txt", "log");
        assert_eq!(payload.content.as_deref(), Some("hello"));
        assert_eq!(payload.embeds.len(), 1);
        assert_eq!(payload.files[0].data, b"log".to_vec());
    }
}
