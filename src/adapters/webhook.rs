use crate::domain::model::{Incident, WebhookPayload};
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Posts incidents to a chat-ops webhook (n8n, Slack incoming webhook, ...).
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WebhookNotifier {
    pub fn new(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, incident: &Incident) -> Result<u16> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(&self.url)
            .headers(headers)
            .timeout(self.timeout)
            .json(&WebhookPayload::from(incident))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                "Webhook accepted notification for {}: {}",
                incident.bucket,
                status
            );
        } else {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            tracing::warn!(
                "Webhook POST returned non-success status: status={} body={}",
                status,
                body_text
            );
        }

        Ok(status.as_u16())
    }
}
