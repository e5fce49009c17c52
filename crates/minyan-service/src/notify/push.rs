//! Push-notification gateway client.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use minyan_core::config::MessagingConfig;

use crate::error::{ServiceError, ServiceResult};

/// Title/body payload delivered to each destination token.
#[derive(Debug, Clone, Serialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,
}

/// Per-destination delivery outcome counts, as reported by the gateway.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushReport {
    pub success_count: u32,
    pub failure_count: u32,
}

#[derive(Serialize)]
struct PushRequest<'a> {
    tokens: &'a [String],
    payload: &'a PushPayload,
}

/// Client for the push gateway. Constructed only when a gateway URL is
/// configured; an unconfigured gateway disables the channel.
#[derive(Debug, Clone)]
pub struct PushClient {
    http: reqwest::Client,
    gateway_url: String,
}

impl PushClient {
    #[must_use]
    pub fn from_config(config: &MessagingConfig) -> Option<Self> {
        config.push_gateway_url.as_ref().map(|url| Self {
            http: reqwest::Client::new(),
            gateway_url: url.clone(),
        })
    }

    /// ## Summary
    /// Sends one multicast push to the given destination tokens. One call,
    /// no retry; the gateway's per-destination counts are returned as-is.
    ///
    /// ## Errors
    /// Returns a validation error for an empty token list, an HTTP error if
    /// the call fails, or a gateway error on a non-success response.
    #[tracing::instrument(skip(self, tokens, payload), fields(destinations = tokens.len()))]
    pub async fn send(&self, tokens: &[String], payload: &PushPayload) -> ServiceResult<PushReport> {
        if tokens.is_empty() {
            return Err(ServiceError::ValidationError(
                "push requires at least one destination token".to_string(),
            ));
        }

        let response = self
            .http
            .post(&self.gateway_url)
            .json(&PushRequest { tokens, payload })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::GatewayError(format!(
                "push gateway returned {}",
                response.status()
            )));
        }

        let report: PushReport = response.json().await?;
        tracing::info!(
            success = report.success_count,
            failure = report.failure_count,
            "Push batch sent"
        );
        Ok(report)
    }
}
