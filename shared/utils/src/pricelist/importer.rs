//! Catalog Importer
//!
//! Turns parsed price-list rows into staged catalog products, applying the
//! admission rules and level normalization the catalog expects.

use std::collections::HashSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::normalizer::LevelMap;
use super::parser::ParsedPriceList;
use crate::error::{PricebookError, PricebookResult};
use crate::validation::validate_model;
use pricebook_models::Product;

/// How the importer treats a part number already staged in the same batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first occurrence, skip later ones
    #[default]
    Skip,
    /// Fail the whole import on the first duplicate
    Abort,
}

/// Staged catalog contents built from one parsed price list
#[derive(Debug, Clone)]
pub struct StagedImport {
    pub products: Vec<Product>,
    pub total_rows: usize,
    pub skipped_rows: usize,
    pub skipped_duplicates: usize,
    pub warnings: Vec<String>,
}

/// Builds catalog products from parsed price-list rows
pub struct CatalogImporter {
    level_map: LevelMap,
    on_duplicate: DuplicatePolicy,
}

impl Default for CatalogImporter {
    fn default() -> Self {
        Self {
            level_map: LevelMap::default(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

impl CatalogImporter {
    pub fn new(level_map: LevelMap) -> Self {
        Self {
            level_map,
            on_duplicate: DuplicatePolicy::default(),
        }
    }

    /// Configure duplicate part number handling
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// Build staged products from a parsed price list.
    ///
    /// Rows missing a name, level, or usable unit price are skipped with a
    /// warning; a skipped row never claims its part number. Nothing here
    /// touches the live catalog; callers swap the staged products in only
    /// after the whole list builds cleanly.
    pub fn build(&self, parsed: &ParsedPriceList) -> PricebookResult<StagedImport> {
        let mut products = Vec::new();
        let mut warnings = Vec::new();
        let mut seen_part_numbers = HashSet::new();
        let mut skipped_rows = 0;
        let mut skipped_duplicates = 0;

        for row in &parsed.rows {
            let (name, raw_level, raw_price) = match (&row.name, &row.level, &row.unit_price) {
                (Some(name), Some(level), Some(price)) => (name, level, price),
                _ => {
                    let message = format!(
                        "Row {}: Missing name, level, or unit price, skipped",
                        row.row_number
                    );
                    tracing::debug!("{}", message);
                    warnings.push(message);
                    skipped_rows += 1;
                    continue;
                }
            };

            let unit_price = match parse_price(raw_price) {
                Some(price) => price,
                None => {
                    let message = format!(
                        "Row {}: Invalid unit price '{}', skipped",
                        row.row_number, raw_price
                    );
                    tracing::debug!("{}", message);
                    warnings.push(message);
                    skipped_rows += 1;
                    continue;
                }
            };

            let level = self.level_map.normalize(raw_level);
            let part_number = match &row.part_number {
                Some(part_number) => part_number.clone(),
                None => synthetic_part_number(row.row_number, &level),
            };

            if seen_part_numbers.contains(&part_number) {
                match self.on_duplicate {
                    DuplicatePolicy::Skip => {
                        let message = format!(
                            "Row {}: Duplicate part number '{}', skipped",
                            row.row_number, part_number
                        );
                        tracing::warn!("{}", message);
                        warnings.push(message);
                        skipped_duplicates += 1;
                        continue;
                    }
                    DuplicatePolicy::Abort => {
                        return Err(PricebookError::duplicate_part_number(part_number));
                    }
                }
            }

            let product = Product::new(name.clone(), level, unit_price, part_number);
            if let Err(error) = validate_model(&product) {
                let message = format!("Row {}: {}, skipped", row.row_number, error);
                tracing::debug!("{}", message);
                warnings.push(message);
                skipped_rows += 1;
                continue;
            }

            seen_part_numbers.insert(product.part_number.clone());
            products.push(product);
        }

        Ok(StagedImport {
            products,
            total_rows: parsed.total_rows,
            skipped_rows,
            skipped_duplicates,
            warnings,
        })
    }
}

/// Parse a price cell into a positive amount.
///
/// Accepts currency formatting like `$1,200.00`. Anything non-numeric or
/// not strictly positive is rejected.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let value = Decimal::from_str(cleaned.trim()).ok()?;
    if value > Decimal::ZERO {
        Some(value)
    } else {
        None
    }
}

/// Part number assigned to rows that carry none: `PN-<row>-<level>` with
/// whitespace squeezed out of the level.
pub fn synthetic_part_number(row_number: usize, level: &str) -> String {
    let compact: String = level.split_whitespace().collect();
    format!("PN-{}-{}", row_number, compact)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::pricelist::parser::{PriceListFormat, PriceListRow};
    use proptest::prelude::*;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use uuid::Uuid;

    fn row(
        row_number: usize,
        name: Option<&str>,
        level: Option<&str>,
        price: Option<&str>,
        part_number: Option<&str>,
    ) -> PriceListRow {
        PriceListRow {
            row_number,
            name: name.map(String::from),
            level: level.map(String::from),
            unit_price: price.map(String::from),
            part_number: part_number.map(String::from),
        }
    }

    fn parsed_list(rows: Vec<PriceListRow>) -> ParsedPriceList {
        ParsedPriceList {
            id: Uuid::new_v4(),
            filename: "list.csv".to_string(),
            format: PriceListFormat::Csv,
            total_rows: rows.len(),
            rows,
            column_headers: vec![],
            parse_warnings: vec![],
        }
    }

    /// Captures emitted events as (level, message) pairs.
    #[derive(Clone, Default)]
    struct RecordingLayer {
        events: Arc<Mutex<Vec<(Level, String)>>>,
    }

    impl<S: Subscriber> Layer<S> for RecordingLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            self.events
                .lock()
                .unwrap()
                .push((*event.metadata().level(), message));
        }
    }

    struct MessageVisitor<'a>(&'a mut String);

    impl Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                *self.0 = format!("{:?}", value);
            }
        }
    }

    #[test]
    fn test_builds_products_from_admitted_rows() {
        let parsed = parsed_list(vec![
            row(1, Some("Widget Cloud Suite"), Some("Level 1 1 - 9"), Some("$1,200.00"), Some("WID-100")),
            row(2, Some("Gadget Analytics"), Some("Tier 1 1 to 999 Transactions"), Some("499.00"), Some("GAD-200")),
        ]);

        let staged = CatalogImporter::default().build(&parsed).unwrap();

        assert_eq!(staged.products.len(), 2);
        assert_eq!(staged.skipped_rows, 0);
        assert_eq!(staged.skipped_duplicates, 0);
        assert!(staged.warnings.is_empty());

        assert_eq!(staged.products[0].name, "Widget Cloud Suite");
        assert_eq!(staged.products[0].level, "Level 1");
        assert_eq!(staged.products[0].unit_price, Decimal::new(120000, 2));
        assert_eq!(staged.products[0].part_number, "WID-100");
        assert_eq!(staged.products[1].level, "Tier 1");
    }

    #[test]
    fn test_skips_rows_missing_required_fields() {
        let parsed = parsed_list(vec![
            row(1, Some("Widget"), None, Some("100.00"), Some("WID-1")),
            row(2, None, Some("Level 1 1 - 9"), Some("100.00"), Some("WID-2")),
            row(3, Some("Widget"), Some("Level 1 1 - 9"), None, Some("WID-3")),
        ]);

        let staged = CatalogImporter::default().build(&parsed).unwrap();

        assert!(staged.products.is_empty());
        assert_eq!(staged.skipped_rows, 3);
        assert!(staged.warnings[0].contains("Missing name, level, or unit price"));
    }

    #[test]
    fn test_skips_unparseable_and_non_positive_prices() {
        let parsed = parsed_list(vec![
            row(1, Some("Widget"), Some("Level 1 1 - 9"), Some("N/A"), Some("WID-1")),
            row(2, Some("Widget"), Some("Level 1 1 - 9"), Some("0.00"), Some("WID-2")),
            row(3, Some("Widget"), Some("Level 1 1 - 9"), Some("-5"), Some("WID-3")),
        ]);

        let staged = CatalogImporter::default().build(&parsed).unwrap();

        assert!(staged.products.is_empty());
        assert_eq!(staged.skipped_rows, 3);
        assert!(staged.warnings.iter().all(|w| w.contains("Invalid unit price")));
    }

    #[test]
    fn test_synthesizes_part_numbers_from_row_and_level() {
        let parsed = parsed_list(vec![
            row(1, Some("Widget"), None, Some("100.00"), None),
            row(2, Some("Gadget"), Some("Tier 1 1 to 999 Transactions"), Some("200.00"), None),
        ]);

        let staged = CatalogImporter::default().build(&parsed).unwrap();

        // Row 1 was skipped, yet the synthesized number keeps its ordinal.
        assert_eq!(staged.products.len(), 1);
        assert_eq!(staged.products[0].part_number, "PN-2-Tier1");
    }

    #[test]
    fn test_skip_policy_keeps_first_duplicate() {
        let parsed = parsed_list(vec![
            row(1, Some("Widget"), Some("Level 1 1 - 9"), Some("100.00"), Some("WID-1")),
            row(2, Some("Widget v2"), Some("Level 2 10 - 49"), Some("200.00"), Some("WID-1")),
        ]);

        let staged = CatalogImporter::default().build(&parsed).unwrap();

        assert_eq!(staged.products.len(), 1);
        assert_eq!(staged.products[0].name, "Widget");
        assert_eq!(staged.skipped_duplicates, 1);
        assert!(staged.warnings[0].contains("Duplicate part number 'WID-1'"));
    }

    #[test]
    fn test_abort_policy_fails_on_duplicate() {
        let parsed = parsed_list(vec![
            row(1, Some("Widget"), Some("Level 1 1 - 9"), Some("100.00"), Some("WID-1")),
            row(2, Some("Widget v2"), Some("Level 2 10 - 49"), Some("200.00"), Some("WID-1")),
        ]);

        let importer = CatalogImporter::default().with_duplicate_policy(DuplicatePolicy::Abort);
        let error = importer.build(&parsed).unwrap_err();
        assert_eq!(error.error_code(), "DUPLICATE_PART_NUMBER");
    }

    #[test]
    fn test_validation_skipped_row_releases_its_part_number() {
        let oversized_name = "X".repeat(300);
        let parsed = parsed_list(vec![
            row(1, Some(oversized_name.as_str()), Some("Level 1 1 - 9"), Some("100.00"), Some("SHARED-1")),
            row(2, Some("Widget"), Some("Level 1 1 - 9"), Some("100.00"), Some("SHARED-1")),
        ]);

        let staged = CatalogImporter::default().build(&parsed).unwrap();

        // The rejected first row must not shadow the valid second one.
        assert_eq!(staged.products.len(), 1);
        assert_eq!(staged.products[0].part_number, "SHARED-1");
        assert_eq!(staged.products[0].name, "Widget");
        assert_eq!(staged.skipped_rows, 1);
        assert_eq!(staged.skipped_duplicates, 0);
    }

    #[test]
    fn test_skipped_rows_trace_at_debug_and_duplicates_at_warn() {
        let layer = RecordingLayer::default();
        let events = Arc::clone(&layer.events);
        let subscriber = tracing_subscriber::registry().with(layer);

        let parsed = parsed_list(vec![
            row(1, Some("Widget"), None, Some("100.00"), Some("WID-1")),
            row(2, Some("Widget"), Some("Level 1 1 - 9"), Some("100.00"), Some("WID-2")),
            row(3, Some("Widget v2"), Some("Level 2 10 - 49"), Some("200.00"), Some("WID-2")),
        ]);

        tracing::subscriber::with_default(subscriber, || {
            CatalogImporter::default().build(&parsed).unwrap();
        });

        let events = events.lock().unwrap();
        assert!(events
            .iter()
            .any(|(level, message)| *level == Level::DEBUG && message.contains("Row 1")));
        assert!(events.iter().any(|(level, message)| {
            *level == Level::WARN && message.contains("Duplicate part number 'WID-2'")
        }));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("499.00"), Some(Decimal::new(49900, 2)));
        assert_eq!(parse_price("$1,200.00"), Some(Decimal::new(120000, 2)));
        assert_eq!(parse_price(" 42 "), Some(Decimal::from(42)));
        assert_eq!(parse_price("0"), None);
        assert_eq!(parse_price("-10.00"), None);
        assert_eq!(parse_price("N/A"), None);
    }

    #[test]
    fn test_synthetic_part_number_squeezes_whitespace() {
        assert_eq!(synthetic_part_number(1, "Level 1"), "PN-1-Level1");
        assert_eq!(synthetic_part_number(12, "Tier A"), "PN-12-TierA");
        assert_eq!(synthetic_part_number(3, "Unknown"), "PN-3-Unknown");
    }

    #[test]
    fn test_duplicate_policy_deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<DuplicatePolicy>("\"skip\"").unwrap(),
            DuplicatePolicy::Skip
        );
        assert_eq!(
            serde_json::from_str::<DuplicatePolicy>("\"abort\"").unwrap(),
            DuplicatePolicy::Abort
        );
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Skip);
    }

    proptest! {
        /// Imported, skipped, and duplicate counts always add up to the
        /// number of parsed rows.
        #[test]
        fn prop_import_accounting_is_complete(keep in proptest::collection::vec(any::<bool>(), 0..20)) {
            let rows: Vec<PriceListRow> = keep
                .iter()
                .enumerate()
                .map(|(idx, admit)| {
                    if *admit {
                        row(idx + 1, Some("Widget"), Some("Level 1 1 - 9"), Some("100.00"), None)
                    } else {
                        row(idx + 1, Some("Widget"), None, Some("100.00"), None)
                    }
                })
                .collect();
            let parsed = parsed_list(rows);

            let staged = CatalogImporter::default().build(&parsed).unwrap();

            prop_assert_eq!(
                staged.products.len() + staged.skipped_rows + staged.skipped_duplicates,
                parsed.total_rows
            );
        }
    }
}
