use crate::query::InstructionQuery;
use crate::record::InstructionRecord;
use crate::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

#[cfg(feature = "backend-redb")]
pub mod redb;

#[cfg(feature = "backend-redb")]
pub use self::redb::RedbStore;

/// A document collection of instruction records.
///
/// Reads go through [`InstructionStore::find`], which evaluates an
/// [`InstructionQuery`] against a fresh snapshot. Writes exist for seeding
/// and management tooling; the matcher never calls them.
#[async_trait]
pub trait InstructionStore: Send + Sync {
    /// Return every record satisfying `query`, in the query's order (or store
    /// order when the query has no sort).
    async fn find(&self, query: &InstructionQuery) -> Result<Vec<InstructionRecord>, StoreError>;

    /// Insert a record, replacing any existing record with the same id.
    async fn upsert(&self, record: InstructionRecord) -> Result<(), StoreError>;

    /// Remove a record by id. Removing a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// First record satisfying `query`, if any.
    async fn find_one(
        &self,
        query: &InstructionQuery,
    ) -> Result<Option<InstructionRecord>, StoreError> {
        Ok(self.find(query).await?.into_iter().next())
    }
}

/// Configuration for selecting and building a store backend.
///
/// # Example
/// ```
/// use store::StoreConfig;
///
/// // In-memory (for testing)
/// let config = StoreConfig::in_memory();
///
/// // Redb (persistent)
/// let config = StoreConfig::redb("/data/instructions.redb");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Keep records in process memory. Contents are lost on restart.
    #[default]
    InMemory,
    /// Persist records in a redb database file at `path`.
    ///
    /// Requires the `backend-redb` feature.
    Redb { path: String },
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        StoreConfig::InMemory
    }

    pub fn redb<P: Into<String>>(path: P) -> Self {
        StoreConfig::Redb { path: path.into() }
    }

    /// Build the backend described by this configuration.
    pub fn build(&self) -> Result<Arc<dyn InstructionStore>, StoreError> {
        match self {
            StoreConfig::InMemory => Ok(Arc::new(InMemoryStore::new())),
            StoreConfig::Redb { path } => {
                #[cfg(feature = "backend-redb")]
                {
                    Ok(Arc::new(RedbStore::open(path)?))
                }
                #[cfg(not(feature = "backend-redb"))]
                {
                    let _ = path;
                    Err(StoreError::backend("redb backend disabled at compile time"))
                }
            }
        }
    }
}

/// An in-memory store. Iteration order is insertion order; replacing a
/// record keeps its original position.
pub struct InMemoryStore {
    records: RwLock<Vec<InstructionRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Build a store pre-populated with `records`, later ids replacing earlier ones.
    pub fn with_records(records: impl IntoIterator<Item = InstructionRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.records.write() {
            for record in records {
                upsert_in_place(&mut guard, record);
            }
        }
        store
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn upsert_in_place(records: &mut Vec<InstructionRecord>, record: InstructionRecord) {
    match records.iter_mut().find(|existing| existing.id == record.id) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

#[async_trait]
impl InstructionStore for InMemoryStore {
    async fn find(&self, query: &InstructionQuery) -> Result<Vec<InstructionRecord>, StoreError> {
        let snapshot = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .clone();
        Ok(query.apply(snapshot))
    }

    async fn upsert(&self, record: InstructionRecord) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        upsert_in_place(&mut guard, record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .retain(|record| record.id != id);
        Ok(())
    }
}
