// src/publisher.rs

use crate::domain::Snapshot;
use crate::errors::PipelineError;
use log::info;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Posted(u16),
    /// No endpoint configured.
    Skipped,
}

/// Posts the snapshot to the market API.
pub struct MarketApiPublisher {
    api_url: Option<String>,
    token: Option<String>,
    client: Client,
}

impl MarketApiPublisher {
    pub fn new(api_url: Option<String>, token: Option<String>) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| PipelineError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            api_url,
            token,
            client,
        })
    }

    pub fn publish(&self, snapshot: &Snapshot) -> Result<PublishOutcome, PipelineError> {
        let Some(api_url) = self.api_url.as_deref() else {
            info!("MARKET_API_URL not set; skipping API POST");
            return Ok(PublishOutcome::Skipped);
        };

        let mut request = self
            .client
            .post(api_url)
            .header(CONTENT_TYPE, "application/json")
            .json(snapshot);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let resp = request
            .send()
            .map_err(|e| PipelineError::Publish(e.to_string()))?;

        let status = resp.status();
        let outcome = response_outcome(status, || {
            resp.text().unwrap_or_else(|_| "(no body)".to_string())
        })?;

        info!("posted snapshot of {} vehicles: {status}", snapshot.vehicle_count);
        Ok(outcome)
    }
}

/// Any 2xx is a successful post; the body is only read to explain a failure.
fn response_outcome(
    status: StatusCode,
    body: impl FnOnce() -> String,
) -> Result<PublishOutcome, PipelineError> {
    if !status.is_success() {
        return Err(PipelineError::Publish(format!("HTTP {status}: {}", body())));
    }
    Ok(PublishOutcome::Posted(status.as_u16()))
}
