//! Forwarding of shaped records to the log intake endpoint.
//!
//! Delivery is best effort. Each record is posted on its own; a failed post is
//! reported and counted but never retried, and it does not stop the remaining
//! records from being sent.

use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde_json::Value;

use crate::{error::TransportError, types::ForwardReport, warning};

pub const API_KEY_HEADER: &str = "DD-API-KEY";

#[derive(Debug, Clone)]
pub struct IngestClient {
    client: Client,
    url: Url,
    api_key: String,
}

impl IngestClient {
    pub fn new(client: Client, url: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url,
            api_key: api_key.into(),
        }
    }

    /// Posts a single JSON record.
    pub async fn send(&self, record: &Value) -> Result<(), TransportError> {
        let res = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(record)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(TransportError::from_response(res).await);
        }

        Ok(())
    }

    /// Posts every record and reports how many made it.
    pub async fn forward(&self, records: &[Value]) -> ForwardReport {
        let mut report = ForwardReport::default();

        for record in records {
            match self.send(record).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    warning!("Failed to send record to intake: {}", e);
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(sent = report.sent, failed = report.failed, "forward finished");
        report
    }
}
