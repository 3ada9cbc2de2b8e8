//! # Pricebook Catalog
//!
//! The in-memory product catalog shared by the HTTP handlers: a store that
//! each successful import replaces in a single atomic swap, and a read-side
//! repository for the level, product, and part number lookups.

pub mod repository;
pub mod store;

pub use repository::CatalogRepository;
pub use store::CatalogStore;
