//! Contact-form notifications.
//!
//! A [`ContactNotifier`] validates a [`ContactMessage`], renders two HTML
//! emails (one to the support inbox, one confirmation to the customer) and
//! hands them to a [`Mailer`]. Two mailers ship with the crate:
//!
//! - [`LogMailer`] logs each email, for setups without a relay.
//! - [`WebhookMailer`] POSTs each email as JSON to an HTTP mail relay.

pub mod contact;
pub mod templates;
pub mod transport;

pub use contact::{is_valid_email, ContactMessage, ContactNotifier, ContactSettings};
pub use transport::{Email, LogMailer, Mailer, WebhookMailer};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("email delivery failed: {0}")]
    Delivery(String),
}
