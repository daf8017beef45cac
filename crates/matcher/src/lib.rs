//! # Ingredient Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` answers "which care/usage instructions apply?" on top of the
//! instruction store (`store`). Ingredient tags are short catalog strings
//! ("chlorine", "fluoride") and product names are long free text, so
//! relevance is plain substring containment after trimming and lowercasing.
//!
//! ## Operations
//!
//! - [`IngredientMatcher::find_by_ingredient_substring`]: records whose
//!   ingredient contains the query, newest first. Pushed to the store.
//! - [`IngredientMatcher::match_product`]: records whose ingredient occurs
//!   inside a product name. Filtered here, store order preserved.
//! - [`IngredientMatcher::get_by_id`]: exact id lookup.
//! - [`IngredientMatcher::list_all`]: every active record, optionally
//!   narrowed by an ingredient substring.
//!
//! Only records whose status normalizes to `Active` are ever returned.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::IngredientMatcher;
//! use store::InstructionRecord;
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! rt.block_on(async {
//!     let matcher = IngredientMatcher::in_memory([
//!         InstructionRecord::new("ins-1", "fluoride"),
//!         InstructionRecord::new("ins-2", "xylitol"),
//!     ]);
//!
//!     let hits = matcher.match_product("Fluoride Toothpaste 100ml").await.unwrap();
//!     assert_eq!(hits.len(), 1);
//!     assert_eq!(hits[0].id, "ins-1");
//! });
//! ```

pub mod engine;
pub mod types;

pub use crate::engine::IngredientMatcher;
pub use crate::types::{MatchError, Term};
