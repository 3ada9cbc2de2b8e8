//! Catalog store
//!
//! In-memory product catalog shared across request handlers. Imports stage
//! a complete product list first and swap it in here, so readers observe
//! either the previous catalog or the new one, never a partial state.

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

use pricebook_models::Product;

/// Cloneable handle to the shared product catalog.
#[derive(Clone, Default)]
pub struct CatalogStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replaces the whole catalog and returns the new product count.
    pub async fn replace(&self, products: Vec<Product>) -> usize {
        let mut guard = self.products.write().await;
        *guard = products;
        guard.len()
    }

    /// Number of products currently in the catalog.
    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(name: &str, level: &str, part_number: &str) -> Product {
        Product::new(
            name.to_string(),
            level.to_string(),
            Decimal::new(10000, 2),
            part_number.to_string(),
        )
    }

    #[tokio::test]
    async fn test_replace_swaps_whole_catalog() {
        let store = CatalogStore::new();
        assert_eq!(store.count().await, 0);

        let imported = store
            .replace(vec![
                product("Widget", "Level 1", "PN-A"),
                product("Gadget", "Level 2", "PN-B"),
            ])
            .await;
        assert_eq!(imported, 2);
        assert_eq!(store.count().await, 2);

        // A second import does not accumulate on top of the first.
        let imported = store.replace(vec![product("Widget", "Level 1", "PN-A")]).await;
        assert_eq!(imported, 1);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_the_same_catalog() {
        let store = CatalogStore::new();
        let handle = store.clone();

        store.replace(vec![product("Widget", "Level 1", "PN-A")]).await;
        assert_eq!(handle.count().await, 1);
    }
}
