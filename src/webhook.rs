use crate::config::RelayConfig;
use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;

const WEBHOOK_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

#[derive(Debug, Clone)]
pub struct SlackWebhookClient {
    http: reqwest::Client,
    webhook_url: Url,
}

impl SlackWebhookClient {
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")?;
        Ok(SlackWebhookClient {
            http,
            webhook_url: config.webhook_url.clone(),
        })
    }

    pub async fn post_text(&self, text: &str) -> Result<()> {
        let response = self
            .http
            .post(self.webhook_url.clone())
            .json(&WebhookPayload { text })
            .send()
            .await
            .context("slack webhook request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("slack webhook returned status {}: {}", status, body);
        }
        Ok(())
    }
}
