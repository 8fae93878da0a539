/// Weekly progress sharing
///
/// ShareService takes a snapshot of weekly stats, renders it as an HTML
/// email and hands it to an EmailTransport. The caller computes the snapshot
/// before anything goes over the network, so delivery never touches habit data.

pub mod email;
pub mod resend;

pub use email::{render_weekly_email, SHARE_SUBJECT};
pub use resend::ResendTransport;

use std::env;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analytics::WeeklyStat;

/// Default Resend endpoint for sending a single email.
pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Sender used when `HABIT_SHARE_FROM` is not set.
pub const DEFAULT_FROM: &str = "onboarding@resend.dev";

/// Error type for share delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// No API key is available for the email service.
    #[error("Email service not configured: set RESEND_API_KEY to enable sharing")]
    NotConfigured,

    #[error("{0}")]
    InvalidRecipient(String),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("Email request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The email service answered with a non-2xx status.
    #[error("Email service rejected the message (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Share payload: who to send to and the stats to include.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub recipient_email: String,
    pub stats: Vec<WeeklyStat>,
}

/// Successful delivery, carrying the provider's opaque message id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareReceipt {
    pub message_id: Option<String>,
}

/// A rendered email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Email delivery settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    pub api_key: Option<String>,
    pub from: String,
    pub reply_to: Option<String>,
    pub endpoint: String,
}

impl ShareConfig {
    /// Read `RESEND_API_KEY`, `HABIT_SHARE_FROM` and `HABIT_SHARE_REPLY_TO`.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("RESEND_API_KEY"),
            from: non_empty("HABIT_SHARE_FROM").unwrap_or_else(|| DEFAULT_FROM.to_string()),
            reply_to: non_empty("HABIT_SHARE_REPLY_TO"),
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from: DEFAULT_FROM.to_string(),
            reply_to: None,
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }
}

/// Something that can deliver a rendered email.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<ShareReceipt, ShareError>;
}

/// Sends weekly summaries through a transport.
pub struct ShareService<T> {
    transport: T,
}

impl<T: EmailTransport> ShareService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Validate the request, render it and deliver it.
    pub async fn share(&self, request: &ShareRequest) -> Result<ShareReceipt, ShareError> {
        let recipient = validate_recipient(&request.recipient_email)?;

        let message = EmailMessage {
            to: recipient.to_string(),
            subject: SHARE_SUBJECT.to_string(),
            html: render_weekly_email(&request.stats),
        };

        match self.transport.send(&message).await {
            Ok(receipt) => {
                tracing::info!(
                    habits = request.stats.len(),
                    message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    "Shared weekly summary"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Weekly summary delivery failed");
                Err(e)
            }
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn validate_recipient(email: &str) -> Result<&str, ShareError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ShareError::InvalidRecipient("Recipient email is required".to_string()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace) => Ok(email),
        _ => Err(ShareError::InvalidRecipient(format!("'{}' is not a valid email address", email))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<EmailMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl EmailTransport for RecordingTransport {
        async fn send(&self, message: &EmailMessage) -> Result<ShareReceipt, ShareError> {
            if self.fail {
                return Err(ShareError::Rejected { status: 403, message: "domain not verified".to_string() });
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(ShareReceipt { message_id: Some("msg_123".to_string()) })
        }
    }

    fn stats() -> Vec<WeeklyStat> {
        vec![WeeklyStat { name: "Read".to_string(), completed: 1, total: 7, percentage: 14 }]
    }

    #[tokio::test]
    async fn share_sends_rendered_summary() {
        let service = ShareService::new(RecordingTransport::default());
        let request = ShareRequest { recipient_email: " friend@example.com ".to_string(), stats: stats() };

        let receipt = service.share(&request).await.unwrap();
        assert_eq!(receipt.message_id.as_deref(), Some("msg_123"));

        let sent = service.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "friend@example.com");
        assert_eq!(sent[0].subject, SHARE_SUBJECT);
        assert!(sent[0].html.contains("1/7"));
    }

    #[tokio::test]
    async fn share_rejects_missing_recipient() {
        let service = ShareService::new(RecordingTransport::default());
        for email in ["", "   ", "no-at-sign", "@example.com", "a b@example.com"] {
            let request = ShareRequest { recipient_email: email.to_string(), stats: stats() };
            assert!(matches!(service.share(&request).await, Err(ShareError::InvalidRecipient(_))), "{:?}", email);
        }
        assert!(service.transport().sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn share_surfaces_transport_failure() {
        let service = ShareService::new(RecordingTransport { fail: true, ..Default::default() });
        let request = ShareRequest { recipient_email: "friend@example.com".to_string(), stats: stats() };

        let err = service.share(&request).await.unwrap_err();
        assert!(err.to_string().contains("domain not verified"));
    }

    #[test]
    fn request_uses_camel_case_fields() {
        let request = ShareRequest { recipient_email: "friend@example.com".to_string(), stats: stats() };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["recipientEmail"], "friend@example.com");
        assert_eq!(value["stats"][0]["percentage"], 14);
    }

    #[test]
    fn default_config_is_unconfigured() {
        let config = ShareConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.endpoint, RESEND_ENDPOINT);
    }
}
