//! Plain-text transcripts of message history

use crate::discord::{ChannelInfo, Message, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything that can appear as one entry in a transcript
pub trait TranscriptEntry {
    fn message_id(&self) -> MessageId;

    fn render_line(&self) -> String;
}

impl<T: TranscriptEntry + ?Sized> TranscriptEntry for &T {
    fn message_id(&self) -> MessageId {
        (**self).message_id()
    }

    fn render_line(&self) -> String {
        (**self).render_line()
    }
}

/// A message kept in the bot's local cache, e.g. after it was deleted upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedMessage {
    pub id: MessageId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub attachment_urls: Vec<String>,
}

impl From<&Message> for CachedMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            author_id: message.author_id,
            author_name: message.author_name.clone(),
            content: message.content.clone(),
            timestamp: message.timestamp,
            attachment_urls: message.attachments.iter().map(|a| a.url.clone()).collect(),
        }
    }
}

fn render(
    timestamp: &DateTime<Utc>,
    author_name: &str,
    author_id: UserId,
    content: &str,
    attachment_urls: impl Iterator<Item = impl AsRef<str>>,
) -> String {
    let mut line = format!(
        "[{}] {} ({}): {}",
        timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        author_name,
        author_id,
        content
    );
    for url in attachment_urls {
        line.push_str("\n    [attachment] ");
        line.push_str(url.as_ref());
    }
    line
}

impl TranscriptEntry for Message {
    fn message_id(&self) -> MessageId {
        self.id
    }

    fn render_line(&self) -> String {
        let mut line = render(
            &self.timestamp,
            &self.author_name,
            self.author_id,
            &self.content,
            self.attachments.iter().map(|a| &a.url),
        );
        if !self.embeds.is_empty() {
            line.push_str(&format!("\n    [{} embed(s)]", self.embeds.len()));
        }
        line
    }
}

impl TranscriptEntry for CachedMessage {
    fn message_id(&self) -> MessageId {
        self.id
    }

    fn render_line(&self) -> String {
        render(
            &self.timestamp,
            &self.author_name,
            self.author_id,
            &self.content,
            self.attachment_urls.iter(),
        )
    }
}

/// Render messages in the order given, one entry per line, under a channel header
pub fn compile_messages<T: TranscriptEntry>(messages: &[T], channel: &ChannelInfo) -> String {
    let mut out = format!("Messages from {} ({})\n", channel.display_name(), channel.id);
    for message in messages {
        out.push_str(&message.render_line());
        out.push('\n');
    }
    out
}
