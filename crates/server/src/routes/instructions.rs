//! Instruction lookups.
//!
//! Handlers only extract parameters and shape responses; all filtering is
//! done by [`matcher::IngredientMatcher`].

use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use store::InstructionRecord;

/// Query parameters for `GET /api/instructions`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub ingredient: Option<String>,
}

/// Query parameters for the product-name routes
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(default, rename = "productName")]
    pub product_name: Option<String>,
}

/// `{success, data: [...], count}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<InstructionRecord>,
    pub count: usize,
}

impl ListResponse {
    fn new(data: Vec<InstructionRecord>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{success, data: {...}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub success: bool,
    pub data: InstructionRecord,
}

/// List active instructions, newest first, optionally filtered by ingredient.
pub async fn list_instructions(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ServerResult<impl IntoResponse> {
    let Query(query) = query?;
    let records = state.matcher.list_all(query.ingredient.as_deref()).await?;
    Ok(Json(ListResponse::new(records)))
}

/// Instructions whose ingredient appears in `productName`.
///
/// Served on both `/search` and `/match-product`.
pub async fn match_product(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ServerResult<impl IntoResponse> {
    let Query(query) = query?;
    let product_name = query.product_name.unwrap_or_default();
    let records = state.matcher.match_product(&product_name).await?;
    Ok(Json(ListResponse::new(records)))
}

/// Instructions whose ingredient contains the path segment.
pub async fn by_ingredient(
    State(state): State<Arc<ServerState>>,
    Path(ingredient): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let records = state
        .matcher
        .find_by_ingredient_substring(&ingredient)
        .await?;
    Ok(Json(ListResponse::new(records)))
}

/// A single active instruction by `ID`.
pub async fn get_instruction(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let record = state.matcher.get_by_id(&id).await?;
    Ok(Json(ItemResponse {
        success: true,
        data: record,
    }))
}
