use serde::Serialize;
use store::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::IngredientMatcher`].
///
/// Every variant is terminal for the request: nothing is retried and no
/// partial result is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A required input was missing or blank after trimming.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No active record carries the requested id.
    #[error("instruction not found: {0}")]
    NotFound(String),

    /// The store could not be read.
    #[error("instruction store unavailable: {0}")]
    DependencyUnavailable(#[from] StoreError),
}

/// Trimmed, lowercased text used on both sides of a match.
///
/// A `Term` is never empty, which is what makes "an empty ingredient never
/// matches" hold without a separate check at every call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
    /// Normalize `raw`; `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Term(normalized))
        }
    }

    /// Like [`Term::parse`], but blank input is an `InvalidArgument` naming `field`.
    pub fn require(raw: &str, field: &str) -> Result<Self, MatchError> {
        Self::parse(raw)
            .ok_or_else(|| MatchError::InvalidArgument(format!("{field} must not be empty")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `needle` occurs as a contiguous substring of `self`.
    pub fn contains(&self, needle: &Term) -> bool {
        self.0.contains(needle.as_str())
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
