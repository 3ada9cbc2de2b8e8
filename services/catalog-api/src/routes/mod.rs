use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/import", post(import_price_list))
        .route("/levels", get(get_levels))
        .route("/products", get(get_products))
        .route("/part_numbers", get(get_part_numbers))
        .route("/search_products", get(search_products))
        .route("/search_part_numbers", get(search_part_numbers))
        .route("/calculate_days", get(calculate_days))
        .route("/quote", get(quote))
}
