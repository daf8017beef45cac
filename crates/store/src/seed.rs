use crate::record::InstructionRecord;
use crate::{InstructionStore, StoreError};
use serde_json::Value;
use std::path::Path;

/// Outcome of a fixture import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Upsert a batch of raw instruction documents into `store`.
///
/// Documents without a non-empty string `ID` cannot be addressed and are
/// skipped. A document that has an `ID` but does not decode is an error.
pub async fn seed_documents(
    store: &dyn InstructionStore,
    documents: Vec<Value>,
) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();

    for (position, document) in documents.into_iter().enumerate() {
        let has_id = document
            .get("ID")
            .and_then(Value::as_str)
            .is_some_and(|id| !id.trim().is_empty());
        if !has_id {
            tracing::warn!(position, "skipping instruction document without an ID");
            report.skipped += 1;
            continue;
        }

        let record: InstructionRecord =
            serde_json::from_value(document).map_err(StoreError::decode)?;
        store.upsert(record).await?;
        report.imported += 1;
    }

    Ok(report)
}

/// Import a JSON file holding an array of instruction documents.
pub async fn seed_from_file(
    store: &dyn InstructionStore,
    path: impl AsRef<Path>,
) -> Result<SeedReport, StoreError> {
    let path = path.as_ref();
    let raw = tokio::fs::read(path).await?;
    let documents: Vec<Value> = serde_json::from_slice(&raw).map_err(StoreError::decode)?;

    let report = seed_documents(store, documents).await?;
    tracing::info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped,
        "seeded instruction store"
    );
    Ok(report)
}
