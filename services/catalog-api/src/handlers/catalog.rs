//! Catalog Query Handlers
//!
//! Read-side endpoints over the in-memory product catalog.

use axum::{
    extract::{Query, State},
    response::Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LevelQuery {
    #[serde(default)]
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub query: String,
}

/// Product projection for level listings and product search
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub name: String,
    pub unit_price: Decimal,
    pub part_number: String,
}

/// Part-number projection for level listings
#[derive(Debug, Serialize)]
pub struct PartNumberResponse {
    pub part_number: String,
    pub name: String,
}

/// Part-number projection for part-number search
#[derive(Debug, Serialize)]
pub struct PartNumberSearchResponse {
    pub part_number: String,
    pub name: String,
    pub unit_price: Decimal,
}

/// List the distinct levels present in the catalog
///
/// GET /catalog/levels
pub async fn get_levels(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.repository.list_levels().await)
}

/// List products for one level
///
/// GET /catalog/products?level=L
pub async fn get_products(
    State(state): State<AppState>,
    Query(params): Query<LevelQuery>,
) -> Json<Vec<ProductResponse>> {
    let products = state.repository.find_by_level(&params.level).await;

    Json(
        products
            .into_iter()
            .map(|product| ProductResponse {
                name: product.name,
                unit_price: product.unit_price,
                part_number: product.part_number,
            })
            .collect(),
    )
}

/// List part numbers for one level
///
/// GET /catalog/part_numbers?level=L
pub async fn get_part_numbers(
    State(state): State<AppState>,
    Query(params): Query<LevelQuery>,
) -> Json<Vec<PartNumberResponse>> {
    let products = state.repository.find_by_level(&params.level).await;

    Json(
        products
            .into_iter()
            .map(|product| PartNumberResponse {
                part_number: product.part_number,
                name: product.name,
            })
            .collect(),
    )
}

/// Search products within a level by name substring
///
/// GET /catalog/search_products?level=L&query=Q
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<ProductResponse>> {
    let products = state
        .repository
        .search_products(&params.level, &params.query)
        .await;

    Json(
        products
            .into_iter()
            .map(|product| ProductResponse {
                name: product.name,
                unit_price: product.unit_price,
                part_number: product.part_number,
            })
            .collect(),
    )
}

/// Search part numbers within a level by substring
///
/// GET /catalog/search_part_numbers?level=L&query=Q
pub async fn search_part_numbers(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<PartNumberSearchResponse>> {
    let products = state
        .repository
        .search_part_numbers(&params.level, &params.query)
        .await;

    Json(
        products
            .into_iter()
            .map(|product| PartNumberSearchResponse {
                part_number: product.part_number,
                name: product.name,
                unit_price: product.unit_price,
            })
            .collect(),
    )
}
