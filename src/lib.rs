//! Workspace umbrella crate for the VGreen backend.
//!
//! This crate re-exports the instruction store, the ingredient matcher and
//! the contact mailer so callers can depend on a single crate. With the
//! default `server` feature it also exposes the HTTP surface as [`server`].

pub use mailer::{
    ContactMessage, ContactNotifier, ContactSettings, Email, LogMailer, Mailer, NotifyError,
    WebhookMailer,
};
pub use matcher::{IngredientMatcher, MatchError, Term};
#[cfg(feature = "redb")]
pub use store::RedbStore;
pub use store::{
    seed_documents, seed_from_file, InMemoryStore, InstructionQuery, InstructionRecord,
    InstructionStatus, InstructionStore, SeedReport, SortOrder, StoreConfig, StoreError,
};

#[cfg(feature = "server")]
pub use server;

use thiserror::Error;

/// Any error produced by the VGreen library crates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("match error: {0}")]
    Match(#[from] MatchError),

    #[error("notification error: {0}")]
    Notify(#[from] NotifyError),
}

impl Error {
    /// Whether the caller supplied bad input, as opposed to a dependency failing.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Match(MatchError::InvalidArgument(_))
                | Error::Match(MatchError::NotFound(_))
                | Error::Notify(NotifyError::InvalidInput(_))
        )
    }
}
