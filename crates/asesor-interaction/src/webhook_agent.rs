//! WebhookAgent - the single HTTP contract with the remote assistant.
//!
//! One JSON POST per request to a fixed, deployment-configured endpoint;
//! the response body is arbitrary JSON. No authentication headers, no
//! retries: a failed call is settled as an error and recovery is a fresh
//! user-initiated submission.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

use asesor_core::error::{AsesorError, Result};
use asesor_core::request::OutboundRequest;

use crate::config::{WebhookConfig, load_webhook_config};

/// The seam the orchestrator depends on.
///
/// Production uses [`WebhookAgent`]; tests substitute a mock.
#[async_trait]
pub trait ConsultationAgent: Send + Sync {
    /// Sends one request and returns the raw (un-normalized) JSON reply.
    async fn ask(&self, request: &OutboundRequest) -> Result<Value>;
}

/// Agent implementation that posts to the assistant's webhook endpoint.
#[derive(Clone)]
pub struct WebhookAgent {
    client: Client,
    endpoint: String,
}

impl WebhookAgent {
    /// Creates a new agent for the given endpoint with a default client.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Builds an agent from the resolved webhook configuration
    /// (config file first, `ASESOR_WEBHOOK_URL` as fallback).
    pub fn try_from_config() -> Result<Self> {
        let config = load_webhook_config()?;
        Self::from_config(&config)
    }

    /// Builds an agent from an explicit configuration.
    pub fn from_config(config: &WebhookConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| AsesorError::internal(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: config.url.clone(),
        })
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ConsultationAgent for WebhookAgent {
    async fn ask(&self, request: &OutboundRequest) -> Result<Value> {
        tracing::debug!(
            "[WebhookAgent] POST {} (session {}, attachment: {})",
            self.endpoint,
            request.session_id,
            request.file.is_some()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| {
                AsesorError::transport(None, format!("webhook request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        response.json::<Value>().await.map_err(|err| {
            AsesorError::transport(
                Some(status.as_u16()),
                format!("webhook returned a non-JSON body: {err}"),
            )
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Maps a non-2xx response to a Transport error, preferring the agent's
/// own `{ "error": ... }` message when the body carries one.
fn map_http_error(status: StatusCode, body: String) -> AsesorError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|wrapper| wrapper.error)
        .unwrap_or(body);

    AsesorError::transport(Some(status.as_u16()), message)
}
