//! Redb backend for persistent instruction storage.
//!
//! Documents are stored as JSON under their `ID`. Redb transactions are
//! blocking, so every operation runs on the tokio blocking pool.
//!
//! # Configuration Example
//! ```yaml
//! store:
//!   backend: "redb"
//!   path: "/data/instructions.redb"
//! ```

use crate::query::InstructionQuery;
use crate::record::InstructionRecord;
use crate::{InstructionStore, StoreError};
use ::redb::{Database, ReadableTable, TableDefinition};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

const INSTRUCTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("instructions");

/// Persistent store backed by a single redb file.
///
/// Iteration order is key order, i.e. records come back sorted by id when a
/// query has no explicit sort.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a database at `path`.
    ///
    /// ```no_run
    /// use store::RedbStore;
    ///
    /// let store = RedbStore::open("/tmp/instructions.redb").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(StoreError::backend)?;

        let write_txn = db.begin_write().map_err(StoreError::backend)?;
        {
            // Opening the table creates it.
            let _table = write_txn
                .open_table(INSTRUCTIONS_TABLE)
                .map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn scan_blocking(&self) -> Result<Vec<InstructionRecord>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn
            .open_table(INSTRUCTIONS_TABLE)
            .map_err(StoreError::backend)?;

        let mut records = Vec::new();
        for item in table.iter().map_err(StoreError::backend)? {
            let (_, value) = item.map_err(StoreError::backend)?;
            records.push(serde_json::from_slice(value.value()).map_err(StoreError::decode)?);
        }
        Ok(records)
    }

    fn get_blocking(&self, id: &str) -> Result<Option<InstructionRecord>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn
            .open_table(INSTRUCTIONS_TABLE)
            .map_err(StoreError::backend)?;

        match table.get(id).map_err(StoreError::backend)? {
            Some(value) => Ok(Some(
                serde_json::from_slice(value.value()).map_err(StoreError::decode)?,
            )),
            None => Ok(None),
        }
    }

    fn put_blocking(&self, record: &InstructionRecord) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(StoreError::encode)?;
        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        {
            let mut table = write_txn
                .open_table(INSTRUCTIONS_TABLE)
                .map_err(StoreError::backend)?;
            table
                .insert(record.id.as_str(), bytes.as_slice())
                .map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;
        Ok(())
    }

    fn delete_blocking(&self, id: &str) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        {
            let mut table = write_txn
                .open_table(INSTRUCTIONS_TABLE)
                .map_err(StoreError::backend)?;
            table.remove(id).map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;
        Ok(())
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(RedbStore) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || op(store))
            .await
            .map_err(StoreError::backend)?
    }
}

#[async_trait]
impl InstructionStore for RedbStore {
    async fn find(&self, query: &InstructionQuery) -> Result<Vec<InstructionRecord>, StoreError> {
        let query = query.clone();
        self.blocking(move |store| {
            // Exact id lookups skip the scan.
            let candidates = match &query.id {
                Some(id) => store.get_blocking(id)?.into_iter().collect(),
                None => store.scan_blocking()?,
            };
            Ok(query.apply(candidates))
        })
        .await
    }

    async fn upsert(&self, record: InstructionRecord) -> Result<(), StoreError> {
        self.blocking(move |store| store.put_blocking(&record)).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = id.to_string();
        self.blocking(move |store| store.delete_blocking(&id)).await
    }
}
