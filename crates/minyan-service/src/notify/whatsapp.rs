//! WhatsApp-style messaging gateway client.

use serde::{Deserialize, Serialize};

use minyan_core::config::MessagingConfig;

use crate::error::{ServiceError, ServiceResult};

#[derive(Serialize)]
struct WhatsAppRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    to: String,
    body: &'a str,
}

#[derive(Deserialize)]
struct WhatsAppResponse {
    sid: String,
}

/// Client for the WhatsApp gateway. Constructed only when a gateway URL is
/// configured.
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    http: reqwest::Client,
    gateway_url: String,
    from: Option<String>,
    token: Option<String>,
}

impl WhatsAppClient {
    #[must_use]
    pub fn from_config(config: &MessagingConfig) -> Option<Self> {
        config.whatsapp_gateway_url.as_ref().map(|url| Self {
            http: reqwest::Client::new(),
            gateway_url: url.clone(),
            from: config.whatsapp_from.clone(),
            token: config.whatsapp_token.clone(),
        })
    }

    /// ## Summary
    /// Sends one message to one number, returning the gateway's delivery
    /// identifier. One call, no retry.
    ///
    /// Numbers are normalized to the gateway's `whatsapp:` addressing scheme
    /// when the caller passes a bare number.
    ///
    /// ## Errors
    /// Returns an HTTP error if the call fails or a gateway error on a
    /// non-success response.
    #[tracing::instrument(skip(self, phone_number, message))]
    pub async fn send(&self, phone_number: &str, message: &str) -> ServiceResult<String> {
        let to = if phone_number.starts_with("whatsapp:") {
            phone_number.to_string()
        } else {
            format!("whatsapp:{phone_number}")
        };

        let mut request = self.http.post(&self.gateway_url).json(&WhatsAppRequest {
            from: self.from.as_deref(),
            to,
            body: message,
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ServiceError::GatewayError(format!(
                "whatsapp gateway returned {}",
                response.status()
            )));
        }

        let body: WhatsAppResponse = response.json().await?;
        tracing::info!(sid = %body.sid, "WhatsApp message sent");
        Ok(body.sid)
    }
}
