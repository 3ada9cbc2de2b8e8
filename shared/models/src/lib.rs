//! # Pricebook Core Domain Models
//!
//! This module contains the core domain models for the Pricebook catalog
//! pricing system. All models implement proper serialization/deserialization
//! with serde and validation with the validator crate.
//!
//! ## Key Models
//!
//! - **Product**: A product imported from a price list row, carrying a
//!   normalized tier level, a decimal unit price, and a unique part number
//!
//! ## Pricing
//!
//! The `pricing` module holds the prorated pricing arithmetic: whole days
//! elapsed since an anniversary date, and the daily-rate proration of an
//! annual list price.

pub mod pricing;
pub mod product;


pub use product::Product;
