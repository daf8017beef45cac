use std::sync::Arc;
use std::time::Instant;

use store::{InMemoryStore, InstructionQuery, InstructionRecord, InstructionStore};

use crate::types::{MatchError, Term};

#[cfg(test)]
mod tests;

/// Decides which active instruction records apply to an ingredient query or
/// a product name.
///
/// The matcher holds no state besides its store handle. Every call re-reads
/// the store, so concurrent calls each observe their own snapshot.
#[derive(Clone)]
pub struct IngredientMatcher {
    store: Arc<dyn InstructionStore>,
}

impl IngredientMatcher {
    pub fn new(store: Arc<dyn InstructionStore>) -> Self {
        Self { store }
    }

    /// Convenience helper for tests and ephemeral use.
    pub fn in_memory(records: impl IntoIterator<Item = InstructionRecord>) -> Self {
        Self::new(Arc::new(InMemoryStore::with_records(records)))
    }

    pub fn store(&self) -> &Arc<dyn InstructionStore> {
        &self.store
    }

    /// Active records whose ingredient contains `ingredient_query`
    /// (case-insensitive), newest `createdAt` first.
    ///
    /// The substring predicate is evaluated by the store.
    pub async fn find_by_ingredient_substring(
        &self,
        ingredient_query: &str,
    ) -> Result<Vec<InstructionRecord>, MatchError> {
        let needle = Term::require(ingredient_query, "ingredient")?;
        self.find_with_ingredient(&needle).await
    }

    /// Active records whose ingredient occurs inside `product_name`.
    ///
    /// This is the reverse direction of [`Self::find_by_ingredient_substring`]
    /// and cannot be pushed to the store: every active record is fetched and
    /// filtered here. Records with a blank ingredient never match. The result
    /// keeps store iteration order; no sort is applied.
    pub async fn match_product(
        &self,
        product_name: &str,
    ) -> Result<Vec<InstructionRecord>, MatchError> {
        let product = Term::require(product_name, "productName")?;
        let started = Instant::now();

        let candidates = self.store.find(&InstructionQuery::active()).await?;
        let scanned = candidates.len();

        let matched: Vec<InstructionRecord> = candidates
            .into_iter()
            .filter(|record| {
                Term::parse(&record.ingredient)
                    .is_some_and(|ingredient| product.contains(&ingredient))
            })
            .collect();

        tracing::info!(
            product = %product_name,
            scanned,
            matched = matched.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "matched instructions for product"
        );

        Ok(matched)
    }

    /// The active record with exactly this id.
    pub async fn get_by_id(&self, id: &str) -> Result<InstructionRecord, MatchError> {
        self.store
            .find_one(&InstructionQuery::active().with_id(id))
            .await?
            .ok_or_else(|| MatchError::NotFound(id.to_string()))
    }

    /// All active records, newest first, optionally narrowed by an ingredient
    /// substring. A blank filter is the same as no filter.
    pub async fn list_all(
        &self,
        ingredient_filter: Option<&str>,
    ) -> Result<Vec<InstructionRecord>, MatchError> {
        match ingredient_filter.and_then(Term::parse) {
            Some(needle) => self.find_with_ingredient(&needle).await,
            None => {
                let records = self
                    .store
                    .find(&InstructionQuery::active().newest_first())
                    .await?;
                tracing::debug!(count = records.len(), "listed instructions");
                Ok(records)
            }
        }
    }

    async fn find_with_ingredient(
        &self,
        needle: &Term,
    ) -> Result<Vec<InstructionRecord>, MatchError> {
        let query = InstructionQuery::active()
            .ingredient_contains(needle.as_str())
            .newest_first();
        let records = self.store.find(&query).await?;
        tracing::debug!(ingredient = %needle, count = records.len(), "found instructions by ingredient");
        Ok(records)
    }
}
