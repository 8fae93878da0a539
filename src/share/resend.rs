/// Email delivery through the Resend HTTP API

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{EmailMessage, EmailTransport, ShareConfig, ShareError, ShareReceipt};

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendSent {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendFailure {
    message: Option<String>,
}

/// Sends email by POSTing to the Resend API.
pub struct ResendTransport {
    client: reqwest::Client,
    config: ShareConfig,
}

impl ResendTransport {
    /// Create a transport with a pre-configured HTTP client.
    pub fn new(config: ShareConfig) -> Result<Self, ShareError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ShareConfig {
        &self.config
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    async fn send(&self, message: &EmailMessage) -> Result<ShareReceipt, ShareError> {
        let api_key = self.config.api_key.as_deref().ok_or(ShareError::NotConfigured)?;

        let body = ResendEmail {
            from: &self.config.from,
            to: [message.to.as_str()],
            reply_to: self.config.reply_to.as_deref(),
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ResendFailure>()
                .await
                .ok()
                .and_then(|f| f.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Failed to send email").to_string());
            return Err(ShareError::Rejected { status: status.as_u16(), message });
        }

        let sent: ResendSent = response.json().await?;
        Ok(ShareReceipt { message_id: sent.id })
    }
}
