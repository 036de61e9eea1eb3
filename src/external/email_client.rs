// ABOUTME: HTTP email API client for delivering the weekly recipe list
// ABOUTME: Implements single-message send, delivery outcomes, and a mock sender for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Email Delivery Client
//!
//! Sends one transactional email through a Resend-compatible HTTP API
//! (`POST {base_url}/emails` with a bearer token). Delivery failures never
//! abort a run: [`deliver`] folds them into a [`DeliveryOutcome`] that the
//! invocation response carries back to the caller.
//!
//! # Example
//! ```rust,no_run
//! use recipe_rotation::external::email_client::{
//!     EmailBody, EmailMessage, EmailSender, HttpEmailClient,
//! };
//! use recipe_rotation::config::EmailConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EmailConfig {
//!     api_key: Some("re_123".to_owned()),
//!     recipients: vec!["cook@example.com".to_owned()],
//!     ..EmailConfig::default()
//! };
//! let client = HttpEmailClient::new(&config)?;
//! let message = EmailMessage {
//!     from: config.sender.clone(),
//!     to: config.recipients.clone(),
//!     subject: config.subject.clone(),
//!     body: EmailBody::Html("<ul><li>Dal</li></ul>".to_owned()),
//! };
//! client.send(&message).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::EmailConfig;
use crate::constants::{env_keys, service_names};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Email body: rendered HTML or plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    /// HTML document
    Html(String),
    /// Plain text
    Text(String),
}

/// One outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Sender address
    pub from: String,
    /// Recipient addresses
    pub to: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Body
    pub body: EmailBody,
}

/// What happened to the email for this run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// Provider accepted the message
    Delivered {
        /// Provider message id, when returned
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
    },
    /// Sending failed; the run still succeeds
    Failed {
        /// Error description
        reason: String,
    },
    /// Sending was not attempted (dry run)
    Skipped {
        /// Why nothing was sent
        reason: String,
    },
}

impl DeliveryOutcome {
    /// Whether the provider accepted the message
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Anything that can send one email
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send `message`, returning the provider message id if any
    async fn send(&self, message: &EmailMessage) -> AppResult<Option<String>>;

    /// Provider label for logs
    fn provider_name(&self) -> &'static str;
}

/// Send `message` and fold any error into a [`DeliveryOutcome`]
pub async fn deliver(sender: &dyn EmailSender, message: &EmailMessage) -> DeliveryOutcome {
    match sender.send(message).await {
        Ok(message_id) => {
            info!(
                email.provider = sender.provider_name(),
                email.recipients = message.to.len(),
                email.message_id = message_id.as_deref().unwrap_or(""),
                "recipe email delivered"
            );
            DeliveryOutcome::Delivered { message_id }
        }
        Err(e) => {
            warn!(
                email.provider = sender.provider_name(),
                error.code = ?e.code,
                error.message = %e.message,
                "recipe email delivery failed"
            );
            DeliveryOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Request payload for `POST /emails`
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

impl<'a> SendEmailRequest<'a> {
    fn from_message(message: &'a EmailMessage) -> Self {
        let (html, text) = match &message.body {
            EmailBody::Html(html) => (Some(html.as_str()), None),
            EmailBody::Text(text) => (None, Some(text.as_str())),
        };
        Self {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            html,
            text,
        }
    }
}

/// Response payload for `POST /emails`
#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

/// HTTP email API client
pub struct HttpEmailClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpEmailClient {
    /// Create a client from email configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be built
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config_missing(env_keys::EMAIL_API_KEY))?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            api_key,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.base_url)
    }
}

#[async_trait]
impl EmailSender for HttpEmailClient {
    async fn send(&self, message: &EmailMessage) -> AppResult<Option<String>> {
        if message.to.is_empty() {
            return Err(AppError::invalid_input("Email has no recipients"));
        }

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest::from_message(message))
            .send()
            .await
            .map_err(|e| {
                AppError::external_unavailable(service_names::EMAIL_PROVIDER, e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::external_auth(
                service_names::EMAIL_PROVIDER,
                format!("HTTP {status}"),
            ));
        }
        if !status.is_success() {
            return Err(AppError::external_service(
                service_names::EMAIL_PROVIDER,
                format!(
                    "HTTP {}: {}",
                    status,
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let body: SendEmailResponse = response.json().await.map_err(|e| {
            AppError::external_service(
                service_names::EMAIL_PROVIDER,
                format!("JSON parse error: {e}"),
            )
        })?;

        Ok(body.id)
    }

    fn provider_name(&self) -> &'static str {
        service_names::EMAIL_PROVIDER
    }
}

/// Mock email sender for testing (no API calls)
#[derive(Clone, Default)]
pub struct MockEmailSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failure: Option<String>,
}

impl MockEmailSender {
    /// Sender that accepts every message
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender that rejects every message with `reason`
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(reason.into()),
        }
    }

    /// Messages accepted so far
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, message: &EmailMessage) -> AppResult<Option<String>> {
        if let Some(reason) = &self.failure {
            return Err(AppError::external_service("Mock email", reason.clone()));
        }
        let mut sent = self.sent.lock().await;
        sent.push(message.clone());
        Ok(Some(format!("mock-{}", sent.len())))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(body: EmailBody) -> EmailMessage {
        EmailMessage {
            from: "recipes@example.com".to_owned(),
            to: vec!["cook@example.com".to_owned()],
            subject: "This week's recipes".to_owned(),
            body,
        }
    }

    #[test]
    fn test_html_payload_omits_text() {
        let msg = message(EmailBody::Html("<ul></ul>".to_owned()));
        let json = serde_json::to_value(SendEmailRequest::from_message(&msg)).unwrap_or_default();
        assert_eq!(json["html"], "<ul></ul>");
        assert!(json.get("text").is_none());
        assert_eq!(json["to"][0], "cook@example.com");
    }

    #[test]
    fn test_text_payload_omits_html() {
        let msg = message(EmailBody::Text("Dal".to_owned()));
        let json = serde_json::to_value(SendEmailRequest::from_message(&msg)).unwrap_or_default();
        assert_eq!(json["text"], "Dal");
        assert!(json.get("html").is_none());
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(HttpEmailClient::new(&EmailConfig::default()).is_err());
        let config = EmailConfig {
            api_key: Some("re_test".to_owned()),
            api_url: "http://localhost:1/".to_owned(),
            ..EmailConfig::default()
        };
        let client = HttpEmailClient::new(&config);
        assert!(client.is_ok_and(|c| c.endpoint() == "http://localhost:1/emails"));
    }

    #[tokio::test]
    async fn test_deliver_folds_failures() {
        let msg = message(EmailBody::Text("Dal".to_owned()));

        let ok = MockEmailSender::new();
        let outcome = deliver(&ok, &msg).await;
        assert_eq!(
            outcome,
            DeliveryOutcome::Delivered {
                message_id: Some("mock-1".to_owned())
            }
        );
        assert_eq!(ok.sent().await, vec![msg.clone()]);

        let failing = MockEmailSender::failing("quota exceeded");
        let outcome = deliver(&failing, &msg).await;
        assert!(matches!(outcome, DeliveryOutcome::Failed { ref reason } if reason.contains("quota exceeded")));
        assert!(failing.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_failed_outcome() {
        let config = EmailConfig {
            api_key: Some("re_test".to_owned()),
            api_url: "http://127.0.0.1:9".to_owned(),
            timeout: std::time::Duration::from_secs(2),
            ..EmailConfig::default()
        };
        let Ok(client) = HttpEmailClient::new(&config) else {
            unreachable!("client with API key must build");
        };
        let outcome = deliver(&client, &message(EmailBody::Text("x".to_owned()))).await;
        assert!(matches!(outcome, DeliveryOutcome::Failed { .. }));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(DeliveryOutcome::Failed {
            reason: "boom".to_owned(),
        })
        .unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "status": "failed", "reason": "boom" }));
        let json = serde_json::to_value(DeliveryOutcome::Delivered { message_id: None })
            .unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "status": "delivered" }));
    }
}
