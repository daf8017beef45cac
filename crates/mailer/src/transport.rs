use crate::NotifyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A rendered outbound email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Outbound transactional email sender.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), NotifyError>;
}

/// Writes each email to the log instead of delivering it.
///
/// Used when no relay is configured, so local setups can exercise the
/// contact flow end to end.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "mail relay not configured, logging email instead of sending"
        );
        Ok(())
    }
}

/// Delivers email by POSTing it as JSON (`{from,to,subject,html}`) to an
/// HTTP mail relay.
#[derive(Debug, Clone)]
pub struct WebhookMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookMailer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Delivery(format!("failed to build relay client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(email)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Delivery(format!(
                "mail relay responded with {status}"
            )));
        }

        tracing::debug!(to = %email.to, subject = %email.subject, "email handed to relay");
        Ok(())
    }
}
