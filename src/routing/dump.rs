//! Message dumps: a transcript attached as a file plus an optional paste link

use crate::discord::{ChannelInfo, Embed, MessagePayload, TranscriptEntry, compile_messages};
use crate::logging::Timer;
use crate::paste::PasteService;
use std::sync::Arc;

pub const DUMP_FILENAME: &str = "messages.txt";

pub struct DumpComposer {
    paste: Arc<dyn PasteService>,
}

impl DumpComposer {
    pub fn new(paste: Arc<dyn PasteService>) -> Self {
        Self { paste }
    }

    /// Build a dump of `messages` in send order, regardless of the order given.
    ///
    /// Returns the payload and the paste URL, which is empty when the upload failed.
    pub async fn compose_dump<T: TranscriptEntry>(
        &self,
        content: &str,
        messages: &[T],
        channel: &ChannelInfo,
    ) -> (MessagePayload, String) {
        let _timer = Timer::new("compose_dump");

        let mut sorted: Vec<&T> = messages.iter().collect();
        sorted.sort_by_key(|m| m.message_id());

        let transcript = compile_messages(&sorted, channel);
        tracing::debug!(
            channel_id = %channel.id,
            messages = sorted.len(),
            bytes = transcript.len(),
            "Compiled message transcript"
        );

        self.dump_from_string(&transcript, content).await
    }

    /// Build a dump from an already compiled transcript
    pub async fn dump_from_string(
        &self,
        transcript: &str,
        content: &str,
    ) -> (MessagePayload, String) {
        let mut payload = MessagePayload::text(content).with_file(DUMP_FILENAME, transcript);

        let result = self.paste.upload(transcript).await;
        if result.is_success {
            payload = payload.with_embed(
                Embed::new().with_description(format!("[`📄 View online`]({})", result.raw_url)),
            );
        }

        (payload, result.raw_url)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::discord::{CachedMessage, ChannelId, ChannelType, MessageId, UserId};
    use crate::paste::PasteResult;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Paste service that records uploads and either succeeds or fails
    pub(crate) struct MockPaste {
        pub succeed: bool,
        pub uploads: Mutex<Vec<String>>,
    }

    impl MockPaste {
        pub fn new(succeed: bool) -> Self {
            Self {
                succeed,
                uploads: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl PasteService for MockPaste {
        async fn upload(&self, text: &str) -> PasteResult {
            self.uploads.lock().unwrap().push(text.to_string());
            if self.succeed {
                PasteResult::success("https://paste.example/raw/abc")
            } else {
                PasteResult::failure()
            }
        }
    }

    pub(crate) fn cached(id: u64) -> CachedMessage {
        CachedMessage {
            id: MessageId::new(id),
            author_id: UserId::new(7),
            author_name: "user".to_string(),
            content: format!("message {}", id),
            timestamp: Utc::now(),
            attachment_urls: vec![],
        }
    }

    pub(crate) fn channel() -> ChannelInfo {
        ChannelInfo {
            id: ChannelId::new(800),
            kind: ChannelType::Text,
            name: Some("general".to_string()),
            parent_id: None,
        }
    }

    #[tokio::test]
    async fn test_transcript_is_chronological() {
        let paste = Arc::new(MockPaste::new(true));
        let composer = DumpComposer::new(paste.clone());

        let messages = vec![cached(50), cached(10), cached(30)];
        let (payload, _) = composer
            .compose_dump("3 messages deleted", &messages, &channel())
            .await;

        let transcript = String::from_utf8(payload.files[0].data.clone()).unwrap();
        let order: Vec<&str> = transcript
            .lines()
            .skip(1)
            .map(|l| l.rsplit(": ").next().unwrap())
            .collect();
        assert_eq!(order, ["message 10", "message 30", "message 50"]);
        assert_eq!(paste.uploads.lock().unwrap()[0], transcript);
    }

    #[tokio::test]
    async fn test_successful_upload_adds_link() {
        let composer = DumpComposer::new(Arc::new(MockPaste::new(true)));

        let (payload, url) = composer.dump_from_string("log", "Purged").await;

        assert_eq!(url, "https://paste.example/raw/abc");
        assert_eq!(payload.content.as_deref(), Some("Purged"));
        assert_eq!(payload.files[0].filename, DUMP_FILENAME);
        assert_eq!(
            payload.embeds[0].description.as_deref(),
            Some("[`📄 View online`](https://paste.example/raw/abc)")
        );
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_attachment() {
        let composer = DumpComposer::new(Arc::new(MockPaste::new(false)));

        let (payload, url) = composer
            .compose_dump("Purged", &[cached(1)], &channel())
            .await;

        assert!(url.is_empty());
        assert!(payload.embeds.is_empty());
        assert_eq!(payload.files.len(), 1);
    }
}
