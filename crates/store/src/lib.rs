//! # Instruction Store
//!
//! Backend-agnostic storage for VGreen care and usage instruction records.
//!
//! ## Core Features
//!
//! - **Pluggable Backends** through the [`InstructionStore`] trait:
//!   - [`InMemoryStore`] keeps records in insertion order; ideal for tests.
//!   - `RedbStore` persists JSON documents in a redb file (enabled via the
//!     `backend-redb` feature).
//! - **Query by predicate**: [`InstructionQuery`] carries an active-only
//!   flag, an exact id, a case-insensitive ingredient substring, and an
//!   optional `createdAt` descending sort.
//! - **Status normalization**: [`InstructionStatus`] folds the stored
//!   encodings of "visible" into a single variant at decode time.
//! - **Fixture seeding**: [`seed_from_file`] imports a JSON array of
//!   documents by upsert on `ID`.
//!
//! ## Example Usage
//!
//! ```
//! use store::{InMemoryStore, InstructionQuery, InstructionRecord, InstructionStore};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! rt.block_on(async {
//!     let store = InMemoryStore::new();
//!     store.upsert(InstructionRecord::new("ins-1", "Fluoride")).await.unwrap();
//!
//!     let hits = store
//!         .find(&InstructionQuery::active().ingredient_contains("ride"))
//!         .await
//!         .unwrap();
//!     assert_eq!(hits.len(), 1);
//! });
//! ```

mod backend;
mod query;
mod record;
mod seed;

#[cfg(feature = "backend-redb")]
pub use backend::RedbStore;
pub use backend::{InMemoryStore, InstructionStore, StoreConfig};
pub use query::{InstructionQuery, SortOrder};
pub use record::{InstructionRecord, InstructionStatus, ACTIVE_STATUS};
pub use seed::{seed_documents, seed_from_file, SeedReport};

use thiserror::Error;

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Document encode error: {0}")]
    Encode(String),
    #[error("Document decode error: {0}")]
    Decode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn backend<E: ToString>(err: E) -> Self {
        StoreError::Backend(err.to_string())
    }

    pub fn encode<E: ToString>(err: E) -> Self {
        StoreError::Encode(err.to_string())
    }

    pub fn decode<E: ToString>(err: E) -> Self {
        StoreError::Decode(err.to_string())
    }
}
