//! Product catalog domain models for the Pricebook pricing system.
//!
//! This module defines the catalog product record produced by a price list
//! import, together with its validation rules.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A catalog product: one admitted price list row carrying the product
/// family name, its normalized tier level, the per-year (or per-transaction)
/// list price, and a part number that is unique within the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Product {
    pub id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Level is required"))]
    pub level: String,
    #[validate(custom = "validate_unit_price")]
    pub unit_price: Decimal,
    #[validate(length(min = 1, max = 100, message = "Part number is required"))]
    pub part_number: String,
    pub created_at: DateTime<Utc>,
}

// Custom validation function
fn validate_unit_price(unit_price: &Decimal) -> Result<(), ValidationError> {
    if *unit_price <= Decimal::ZERO {
        return Err(ValidationError::new("unit_price_not_positive"));
    }
    Ok(())
}

impl Product {
    /// Creates a product with a fresh id and the current timestamp.
    pub fn new(name: String, level: String, unit_price: Decimal, part_number: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            level,
            unit_price,
            part_number,
            created_at: Utc::now(),
        }
    }

    /// Checks whether the product name contains the query as a
    /// case-sensitive substring.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.contains(query)
    }

    /// Checks whether the part number contains the query as a
    /// case-sensitive substring.
    pub fn part_number_matches(&self, query: &str) -> bool {
        self.part_number.contains(query)
    }
}
