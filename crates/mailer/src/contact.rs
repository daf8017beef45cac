use crate::templates;
use crate::transport::{Email, Mailer};
use crate::NotifyError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Whether `candidate` looks like a deliverable address.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A contact-form submission.
///
/// Missing and `null` fields both decode as empty and fail [`Self::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

impl ContactMessage {
    /// Reject submissions with a blank field or a malformed address.
    pub fn validate(&self) -> Result<(), NotifyError> {
        if [&self.name, &self.email, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(NotifyError::InvalidInput(
                "name, email and message are all required".into(),
            ));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(NotifyError::InvalidInput("email address is not valid".into()));
        }
        Ok(())
    }
}

/// Addresses and branding used when composing contact emails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSettings {
    /// Inbox that receives customer requests.
    #[serde(default = "default_support_inbox")]
    pub support_inbox: String,

    /// `from` address on every outbound email. Falls back to the support inbox.
    #[serde(default)]
    pub sender: Option<String>,

    #[serde(default = "default_brand")]
    pub brand: String,

    #[serde(default = "default_hotline")]
    pub hotline: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            support_inbox: default_support_inbox(),
            sender: None,
            brand: default_brand(),
            hotline: default_hotline(),
        }
    }
}

impl ContactSettings {
    pub fn sender(&self) -> &str {
        self.sender.as_deref().unwrap_or(&self.support_inbox)
    }
}

fn default_support_inbox() -> String {
    "vgreenhotro@gmail.com".to_string()
}

fn default_brand() -> String {
    "VGreen".to_string()
}

fn default_hotline() -> String {
    "0123 456 789".to_string()
}

/// Sends the two emails of the contact flow: the request to the support
/// inbox, then a confirmation to the customer.
#[derive(Clone)]
pub struct ContactNotifier {
    mailer: Arc<dyn Mailer>,
    settings: ContactSettings,
}

impl ContactNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, settings: ContactSettings) -> Self {
        Self { mailer, settings }
    }

    pub fn settings(&self) -> &ContactSettings {
        &self.settings
    }

    /// Validate `msg` and deliver both emails.
    ///
    /// Delivery stops at the first failure; a failed confirmation is still
    /// reported even though the support inbox already has the request.
    pub async fn notify(&self, msg: &ContactMessage) -> Result<(), NotifyError> {
        msg.validate()?;
        let msg = ContactMessage {
            name: msg.name.trim().to_string(),
            email: msg.email.trim().to_string(),
            message: msg.message.clone(),
        };

        let to_support = Email {
            from: self.settings.sender().to_string(),
            to: self.settings.support_inbox.clone(),
            subject: format!("[Customer contact] {}", msg.name),
            html: templates::support_notification(&msg, &self.settings),
        };
        self.mailer.send(&to_support).await?;

        let confirmation = Email {
            from: self.settings.sender().to_string(),
            to: msg.email.clone(),
            subject: format!("[{}] Thank you for contacting us", self.settings.brand),
            html: templates::customer_confirmation(&msg, &self.settings),
        };
        self.mailer.send(&confirmation).await?;

        tracing::info!(customer = %msg.email, "contact request delivered");
        Ok(())
    }
}
