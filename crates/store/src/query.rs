use crate::record::InstructionRecord;

/// Sort applied to a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest `createdAt` first. Records without a timestamp sort last.
    CreatedAtDesc,
}

/// Predicate and ordering for a store read.
///
/// Backends evaluate the predicate themselves; [`InstructionQuery::apply`]
/// is the shared reference evaluation they delegate to once records have
/// been decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionQuery {
    /// Restrict to records whose status normalizes to `Active`.
    pub active_only: bool,
    /// Exact identifier match.
    pub id: Option<String>,
    /// Case-insensitive substring that must occur in the record's ingredient.
    /// Stored lowercased.
    pub ingredient_contains: Option<String>,
    pub sort: Option<SortOrder>,
}

impl InstructionQuery {
    /// Every record, in store order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Active records only, in store order.
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn ingredient_contains(mut self, needle: &str) -> Self {
        self.ingredient_contains = Some(needle.to_lowercase());
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.sort = Some(SortOrder::CreatedAtDesc);
        self
    }

    /// Whether a single record satisfies the predicate part of the query.
    pub fn matches(&self, record: &InstructionRecord) -> bool {
        if self.active_only && !record.is_active() {
            return false;
        }
        if let Some(id) = &self.id {
            if &record.id != id {
                return false;
            }
        }
        if let Some(needle) = &self.ingredient_contains {
            if !record.ingredient.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        true
    }

    /// Filter and order an already-decoded record sequence.
    ///
    /// Sorting is stable, so records with equal timestamps keep store order.
    pub fn apply(&self, records: impl IntoIterator<Item = InstructionRecord>) -> Vec<InstructionRecord> {
        let mut out: Vec<InstructionRecord> =
            records.into_iter().filter(|r| self.matches(r)).collect();

        if let Some(SortOrder::CreatedAtDesc) = self.sort {
            out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        out
    }
}
