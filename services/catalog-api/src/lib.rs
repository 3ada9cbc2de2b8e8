//! # Pricebook Catalog API
//!
//! HTTP service exposing price-list import, catalog lookups, and prorated
//! pricing over an in-memory product catalog.

pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use pricebook_catalog::{CatalogRepository, CatalogStore};
use pricebook_utils::{AppConfig, CatalogImporter, LevelMap};

use middleware::request_id_middleware;

#[derive(Clone)]
pub struct AppState {
    pub repository: CatalogRepository,
    pub store: CatalogStore,
    pub importer: Arc<CatalogImporter>,
    pub config: AppConfig,
}

/// Build the application router over a fresh, empty catalog
pub fn build_app(config: &AppConfig) -> Router {
    let store = CatalogStore::new();
    let repository = CatalogRepository::new(store.clone());
    let importer = Arc::new(
        CatalogImporter::new(LevelMap::default())
            .with_duplicate_policy(config.import.on_duplicate_part_number),
    );

    Router::new()
        // Operational endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/detailed", get(handlers::detailed_health_check))
        .route("/metrics", get(handlers::metrics_handler))
        // Catalog routes
        .nest("/catalog", routes::create_catalog_routes())
        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        // Application state
        .with_state(AppState {
            repository,
            store,
            importer,
            config: config.clone(),
        })
}
