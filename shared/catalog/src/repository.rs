//! Catalog repository
//!
//! Read-side queries over the catalog store. Lookups never fail: unknown
//! levels, blank search parameters, and empty catalogs all yield empty
//! collections.

use std::collections::BTreeSet;

use pricebook_models::Product;

use crate::store::CatalogStore;

/// Read-only query interface over the shared catalog.
#[derive(Clone)]
pub struct CatalogRepository {
    store: CatalogStore,
}

impl CatalogRepository {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Distinct non-blank levels in ascending order.
    pub async fn list_levels(&self) -> Vec<String> {
        let products = self.store.read().await;
        let levels: BTreeSet<String> = products
            .iter()
            .filter(|product| !product.level.trim().is_empty())
            .map(|product| product.level.clone())
            .collect();
        levels.into_iter().collect()
    }

    /// All products whose level matches exactly.
    pub async fn find_by_level(&self, level: &str) -> Vec<Product> {
        let products = self.store.read().await;
        products
            .iter()
            .filter(|product| product.level == level)
            .cloned()
            .collect()
    }

    /// Products in a level whose name contains the query as a
    /// case-sensitive substring. Blank level or query means no results.
    pub async fn search_products(&self, level: &str, query: &str) -> Vec<Product> {
        if level.trim().is_empty() || query.trim().is_empty() {
            return Vec::new();
        }
        let products = self.store.read().await;
        products
            .iter()
            .filter(|product| product.level == level && product.name_matches(query))
            .cloned()
            .collect()
    }

    /// Products in a level whose part number contains the query as a
    /// case-sensitive substring. Blank level or query means no results.
    pub async fn search_part_numbers(&self, level: &str, query: &str) -> Vec<Product> {
        if level.trim().is_empty() || query.trim().is_empty() {
            return Vec::new();
        }
        let products = self.store.read().await;
        products
            .iter()
            .filter(|product| product.level == level && product.part_number_matches(query))
            .cloned()
            .collect()
    }

    /// Number of products currently in the catalog.
    pub async fn count(&self) -> usize {
        self.store.count().await
    }
}
