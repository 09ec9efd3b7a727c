//! Outbound booking log delivered to the spreadsheet collector

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::{config::BookingConfig, models::notification::BookingLogEntry};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook request timed out after {0:?}")]
    Timeout(Duration),
}

/// One-way sink for booking attempts. Delivery is best effort.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingLogger: Send + Sync {
    async fn log(&self, entry: &BookingLogEntry) -> Result<(), NotifyError>;
}

/// Posts log entries as JSON to a fixed endpoint. The response body is
/// never read.
#[derive(Clone)]
pub struct WebhookLogger {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WebhookLogger {
    pub fn new(config: &BookingConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.webhook_url.clone(),
            timeout: Duration::from_secs(config.webhook_timeout_seconds),
        }
    }
}

#[async_trait]
impl BookingLogger for WebhookLogger {
    async fn log(&self, entry: &BookingLogEntry) -> Result<(), NotifyError> {
        let request = self.client.post(&self.url).json(entry).send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| NotifyError::Timeout(self.timeout))??;

        tracing::debug!("Booking webhook answered {}", response.status());
        Ok(())
    }
}
