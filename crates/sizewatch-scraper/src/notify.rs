//! Webhook delivery of check results.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use sizewatch_core::AppConfig;

use crate::error::NotifyError;

/// JSON body posted to webhooks. `text` is read by Slack-style consumers,
/// `content` by Discord-style ones.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
}

/// Posts messages to chat webhooks.
pub struct WebhookNotifier {
    client: Client,
    username: Option<String>,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        username: Option<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, username })
    }

    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        Self::new(
            config.notify_timeout_secs,
            &config.user_agent,
            config.notify_username.clone(),
        )
    }

    /// Posts `message` to `webhook_url`.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::InvalidUrl`]: `webhook_url` does not parse.
    /// - [`NotifyError::UnexpectedStatus`]: the webhook answered non-2xx.
    /// - [`NotifyError::Http`]: network failure or timeout.
    pub async fn send(&self, webhook_url: &str, message: &str) -> Result<(), NotifyError> {
        let url = reqwest::Url::parse(webhook_url).map_err(|e| NotifyError::InvalidUrl {
            reason: e.to_string(),
        })?;
        let payload = WebhookPayload {
            text: message,
            content: message,
            username: self.username.as_deref(),
        };

        let response = self.client.post(url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        tracing::debug!(status = status.as_u16(), "webhook notification delivered");
        Ok(())
    }
}
