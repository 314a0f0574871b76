//! Webhook resolution cache

use crate::discord::{ChatPlatform, WebhookBinding, WebhookId};
use crate::error::{LogRouterError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static WEBHOOK_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:(?:canary|ptb)\.)?discord(?:app)?\.com/api(?:/v\d+)?/webhooks/(?P<id>\d+)/(?P<token>[A-Za-z0-9_\-]+)/?$",
    )
    .expect("webhook URL pattern is valid")
});

/// Split a webhook URL into its numeric id and token
pub fn parse_webhook_url(url: &str) -> Result<(WebhookId, String)> {
    let invalid = || LogRouterError::InvalidWebhookUrl(redact(url));

    let captures = WEBHOOK_URL.captures(url.trim()).ok_or_else(invalid)?;
    let id = captures["id"]
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(invalid)?;

    Ok((WebhookId::new(id), captures["token"].to_string()))
}

/// Webhook tokens are credentials; keep them out of errors and logs.
///
/// Everything after `/webhooks/` is dropped, whatever shape it has.
fn redact(url: &str) -> String {
    const MARKER: &str = "/webhooks/";
    match url.find(MARKER) {
        Some(idx) => format!("{}{}<redacted>", &url[..idx], MARKER),
        None => "<redacted>".to_string(),
    }
}

/// Key to webhook binding map, filled once during startup
#[derive(Default)]
pub struct WebhookCache {
    entries: HashMap<String, WebhookBinding>,
}

impl WebhookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `url`, register it with the platform and store the binding under `key`
    pub async fn register(
        &mut self,
        platform: &dyn ChatPlatform,
        key: &str,
        url: &str,
    ) -> Result<WebhookBinding> {
        let (id, token) = parse_webhook_url(url)?;

        let info = platform.register_webhook(id, &token).await?;
        let binding = WebhookBinding {
            id,
            token,
            channel_id: info.channel_id,
        };

        tracing::info!(
            key = %key,
            webhook_id = %id,
            channel_id = %binding.channel_id,
            "Registered log webhook"
        );
        self.entries.insert(key.to_string(), binding.clone());
        Ok(binding)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&WebhookBinding> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (String, WebhookBinding)> {
        self.entries.into_iter()
    }
}
