use super::*;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use store::{InstructionStatus, StoreError};

fn active(id: &str, ingredient: &str) -> InstructionRecord {
    InstructionRecord::new(id, ingredient)
}

fn with_status(id: &str, ingredient: &str, status: &str) -> InstructionRecord {
    InstructionRecord::new(id, ingredient).with_status(InstructionStatus::from_raw(Some(status)))
}

fn decoded(value: Value) -> InstructionRecord {
    serde_json::from_value(value).expect("fixture should decode")
}

fn ids(records: &[InstructionRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Store whose every read fails, for exercising the error path.
struct UnreachableStore;

#[async_trait]
impl InstructionStore for UnreachableStore {
    async fn find(&self, _query: &InstructionQuery) -> Result<Vec<InstructionRecord>, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn upsert(&self, _record: InstructionRecord) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused"))
    }
}

#[tokio::test]
async fn every_active_encoding_is_eligible_for_matching() {
    let matcher = IngredientMatcher::in_memory([
        decoded(json!({ "ID": "literal", "Ingredient": "chlorine", "status": "Active" })),
        decoded(json!({ "ID": "absent", "Ingredient": "chlorine" })),
        decoded(json!({ "ID": "null", "Ingredient": "chlorine", "status": null })),
        decoded(json!({ "ID": "empty", "Ingredient": "chlorine", "status": "" })),
        decoded(json!({ "ID": "hidden", "Ingredient": "chlorine", "status": "Inactive" })),
        decoded(json!({ "ID": "draft", "Ingredient": "chlorine", "status": "Draft" })),
    ]);

    let matched = matcher.match_product("Chlorine tablets").await.unwrap();
    assert_eq!(ids(&matched), vec!["literal", "absent", "null", "empty"]);

    let found = matcher.find_by_ingredient_substring("chlor").await.unwrap();
    assert_eq!(found.len(), 4);

    let listed = matcher.list_all(None).await.unwrap();
    assert_eq!(listed.len(), 4);
    assert!(listed.iter().all(|r| r.id != "hidden" && r.id != "draft"));
}

#[tokio::test]
async fn blank_substring_query_is_invalid() {
    let matcher = IngredientMatcher::in_memory([active("a", "fluoride")]);

    for input in ["", "   ", "\t\n"] {
        let err = matcher.find_by_ingredient_substring(input).await.unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument(_)), "{input:?}");
    }
}

#[tokio::test]
async fn blank_product_name_is_invalid() {
    let matcher = IngredientMatcher::in_memory([active("a", "fluoride")]);

    let err = matcher.match_product("").await.unwrap_err();
    assert!(matches!(err, MatchError::InvalidArgument(_)));

    let err = matcher.match_product("    ").await.unwrap_err();
    assert!(matches!(err, MatchError::InvalidArgument(_)));
}

#[tokio::test]
async fn product_name_matches_contained_ingredient_only() {
    let matcher = IngredientMatcher::in_memory([
        active("fluoride", "fluoride"),
        active("xylitol", "xylitol"),
    ]);

    let matched = matcher.match_product("Fluoride Toothpaste 100ml").await.unwrap();
    assert_eq!(ids(&matched), vec!["fluoride"]);
}

#[tokio::test]
async fn product_match_trims_and_ignores_case_on_both_sides() {
    let matcher = IngredientMatcher::in_memory([active("a", "  FLUORIDE  ")]);

    let matched = matcher.match_product("   fluoride toothpaste ").await.unwrap();
    assert_eq!(ids(&matched), vec!["a"]);
}

#[tokio::test]
async fn empty_ingredient_never_matches_a_product() {
    let matcher = IngredientMatcher::in_memory([
        active("empty", ""),
        active("spaces", "   "),
        decoded(json!({ "ID": "null", "Ingredient": null })),
        decoded(json!({ "ID": "missing" })),
    ]);

    for product in ["Fluoride Toothpaste", "a", " x "] {
        let matched = matcher.match_product(product).await.unwrap();
        assert!(matched.is_empty(), "{product:?} matched {:?}", ids(&matched));
    }
}

#[tokio::test]
async fn match_direction_is_ingredient_inside_product() {
    // The product name is a substring of the ingredient, not the other way round.
    let matcher = IngredientMatcher::in_memory([active("a", "fluoride toothpaste")]);

    let matched = matcher.match_product("fluoride").await.unwrap();
    assert!(matched.is_empty());
}

#[tokio::test]
async fn substring_query_is_case_insensitive() {
    let matcher = IngredientMatcher::in_memory([active("a", "Fluoride"), active("b", "Xylitol")]);

    let found = matcher.find_by_ingredient_substring("ride").await.unwrap();
    assert_eq!(ids(&found), vec!["a"]);

    let found = matcher.find_by_ingredient_substring("  RIDE ").await.unwrap();
    assert_eq!(ids(&found), vec!["a"]);
}

#[tokio::test]
async fn zero_matches_are_not_errors() {
    let matcher = IngredientMatcher::in_memory([active("a", "fluoride")]);

    assert!(matcher.match_product("Shampoo").await.unwrap().is_empty());
    assert!(matcher.find_by_ingredient_substring("zinc").await.unwrap().is_empty());
    assert!(matcher.list_all(Some("zinc")).await.unwrap().is_empty());
}

#[tokio::test]
async fn get_by_id_hides_inactive_records() {
    let matcher = IngredientMatcher::in_memory([
        active("visible", "fluoride"),
        with_status("hidden", "fluoride", "Inactive"),
        with_status("archived", "fluoride", "Archived"),
    ]);

    assert_eq!(matcher.get_by_id("visible").await.unwrap().id, "visible");

    for id in ["hidden", "archived", "missing"] {
        let err = matcher.get_by_id(id).await.unwrap_err();
        assert!(matches!(err, MatchError::NotFound(ref got) if got == id));
    }
}

#[tokio::test]
async fn get_by_id_is_exact() {
    let matcher = IngredientMatcher::in_memory([active("ins-10", "fluoride")]);
    assert!(matches!(
        matcher.get_by_id("ins-1").await,
        Err(MatchError::NotFound(_))
    ));
}

#[tokio::test]
async fn list_all_orders_newest_first() {
    let t1 = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 2, 20, 8, 0, 0).unwrap();
    let t3 = Utc.with_ymd_and_hms(2024, 3, 30, 8, 0, 0).unwrap();

    let matcher = IngredientMatcher::in_memory([
        active("t1", "a").with_created_at(t1),
        active("t3", "b").with_created_at(t3),
        active("t2", "c").with_created_at(t2),
    ]);

    let listed = matcher.list_all(None).await.unwrap();
    assert_eq!(ids(&listed), vec!["t3", "t2", "t1"]);
}

#[tokio::test]
async fn list_all_with_filter_equals_substring_search() {
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let matcher = IngredientMatcher::in_memory([
        active("old", "Fluoride").with_created_at(t1),
        active("other", "Zinc").with_created_at(t2),
        active("new", "Stannous fluoride").with_created_at(t2),
    ]);

    let filtered = matcher.list_all(Some("FLUOR")).await.unwrap();
    let searched = matcher.find_by_ingredient_substring("fluor").await.unwrap();
    assert_eq!(ids(&filtered), vec!["new", "old"]);
    assert_eq!(filtered, searched);
}

#[tokio::test]
async fn list_all_treats_blank_filter_as_absent() {
    let matcher = IngredientMatcher::in_memory([active("a", "x"), active("b", "y")]);
    assert_eq!(matcher.list_all(Some("  ")).await.unwrap().len(), 2);
}

#[tokio::test]
async fn match_product_keeps_store_order() {
    // Timestamps deliberately disagree with insertion order; the result must
    // follow the store, not createdAt.
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let matcher = IngredientMatcher::in_memory([
        active("older", "mint").with_created_at(t1),
        active("newer", "fluoride").with_created_at(t2),
    ]);

    let matched = matcher.match_product("Mint Fluoride Gel").await.unwrap();
    assert_eq!(ids(&matched), vec!["older", "newer"]);
}

#[tokio::test]
async fn store_failures_surface_as_dependency_unavailable() {
    let matcher = IngredientMatcher::new(Arc::new(UnreachableStore));

    let results = [
        matcher.match_product("Fluoride").await.map(|_| ()),
        matcher.find_by_ingredient_substring("fluoride").await.map(|_| ()),
        matcher.list_all(None).await.map(|_| ()),
        matcher.get_by_id("a").await.map(|_| ()),
    ];

    for result in results {
        match result {
            Err(MatchError::DependencyUnavailable(err)) => {
                assert!(err.to_string().contains("connection refused"));
            }
            other => panic!("expected DependencyUnavailable, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn validation_happens_before_the_store_is_touched() {
    let matcher = IngredientMatcher::new(Arc::new(UnreachableStore));
    assert!(matches!(
        matcher.match_product(" ").await,
        Err(MatchError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn every_query_rereads_the_store() {
    let matcher = IngredientMatcher::in_memory([active("a", "fluoride")]);
    assert_eq!(matcher.match_product("fluoride gel").await.unwrap().len(), 1);

    matcher
        .store()
        .upsert(active("b", "gel"))
        .await
        .unwrap();
    assert_eq!(matcher.match_product("fluoride gel").await.unwrap().len(), 2);
}
