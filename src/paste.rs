//! Upload of long transcripts to a hastebin-compatible paste service

use crate::config::PasteConfig;
use async_trait::async_trait;
use serde::Deserialize;

/// Outcome of a paste upload. `raw_url` is empty unless the upload succeeded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PasteResult {
    pub is_success: bool,
    pub raw_url: String,
}

impl PasteResult {
    pub fn success(raw_url: impl Into<String>) -> Self {
        Self {
            is_success: true,
            raw_url: raw_url.into(),
        }
    }

    pub fn failure() -> Self {
        Self::default()
    }
}

#[async_trait]
pub trait PasteService: Send + Sync {
    /// Upload text. Never fails outright; failures come back as an unsuccessful result.
    async fn upload(&self, text: &str) -> PasteResult;
}

#[derive(Debug, Deserialize)]
struct HasteResponse {
    key: String,
}

pub struct HasteUploader {
    http: reqwest::Client,
    base_url: String,
}

impl HasteUploader {
    pub fn new(config: &PasteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn try_upload(&self, text: &str) -> Result<String, reqwest::Error> {
        let response = self
            .http
            .post(format!("{}/documents", self.base_url))
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(text.to_string())
            .send()
            .await?
            .error_for_status()?
            .json::<HasteResponse>()
            .await?;

        Ok(format!("{}/raw/{}", self.base_url, response.key))
    }
}

#[async_trait]
impl PasteService for HasteUploader {
    async fn upload(&self, text: &str) -> PasteResult {
        match self.try_upload(text).await {
            Ok(raw_url) => {
                tracing::debug!(url = %raw_url, bytes = text.len(), "Uploaded paste");
                PasteResult::success(raw_url)
            }
            Err(e) => {
                tracing::warn!(
                    base_url = %self.base_url,
                    error = %e,
                    "Paste upload failed, continuing without link"
                );
                PasteResult::failure()
            }
        }
    }
}
