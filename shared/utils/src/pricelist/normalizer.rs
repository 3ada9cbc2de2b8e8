//! Level label normalization.
//!
//! Vendor price lists describe tiers with verbose labels such as
//! `Level 2 10 - 49` or `Tier A 1 to 999 Transactions (VIP Select 3 year
//! commit)`. The catalog stores the short canonical form (`Level 2`,
//! `Tier A`) so lookups and groupings stay stable across list revisions.

use std::collections::HashMap;

/// Fallback level assigned when a row carries no usable level label.
pub const UNKNOWN_LEVEL: &str = "Unknown";

/// Maps verbose level labels from price-list files to canonical level names.
#[derive(Debug, Clone)]
pub struct LevelMap {
    mappings: HashMap<String, String>,
}

impl Default for LevelMap {
    fn default() -> Self {
        Self::from_pairs([
            ("Level 1 1 - 9", "Level 1"),
            ("Level 2 10 - 49", "Level 2"),
            ("Level 3 50 - 99", "Level 3"),
            ("Level 4 100+", "Level 4"),
            ("Level 12 10 - 49 (VIP Select 3 year commit)", "Level 12"),
            ("Level 13 50 - 99 (VIP Select 3 year commit)", "Level 13"),
            ("Level 14 100+ (VIP Select 3 year commit)", "Level 14"),
            ("Tier 1 1 to 999 Transactions", "Tier 1"),
            ("Tier 2 1000 to 2499 Transactions", "Tier 2"),
            ("Tier 3 2500 to 4999 Transactions", "Tier 3"),
            (
                "Tier A 1 to 999 Transactions (VIP Select 3 year commit)",
                "Tier A",
            ),
            (
                "Tier B 1000 to 2499 Transactions (VIP Select 3 year commit)",
                "Tier B",
            ),
        ])
    }
}

impl LevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mappings = pairs
            .into_iter()
            .map(|(raw, canonical)| (raw.into(), canonical.into()))
            .collect();
        Self { mappings }
    }

    /// Resolves a raw level label to its canonical form.
    ///
    /// Mapped labels return the canonical name, unmapped labels pass through
    /// trimmed, and blank labels become [`UNKNOWN_LEVEL`].
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return UNKNOWN_LEVEL.to_string();
        }

        match self.mappings.get(trimmed) {
            Some(canonical) => canonical.clone(),
            None => trimmed.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_known_labels_to_canonical_levels() {
        let map = LevelMap::new();
        assert_eq!(map.normalize("Level 1 1 - 9"), "Level 1");
        assert_eq!(map.normalize("Level 14 100+ (VIP Select 3 year commit)"), "Level 14");
        assert_eq!(map.normalize("Tier 2 1000 to 2499 Transactions"), "Tier 2");
        assert_eq!(
            map.normalize("Tier B 1000 to 2499 Transactions (VIP Select 3 year commit)"),
            "Tier B"
        );
    }

    #[test]
    fn test_unmapped_labels_pass_through_trimmed() {
        let map = LevelMap::new();
        assert_eq!(map.normalize("Level 99 experimental"), "Level 99 experimental");
        assert_eq!(map.normalize("  Custom Tier  "), "Custom Tier");
    }

    #[test]
    fn test_blank_labels_become_unknown() {
        let map = LevelMap::new();
        assert_eq!(map.normalize(""), UNKNOWN_LEVEL);
        assert_eq!(map.normalize("   "), UNKNOWN_LEVEL);
    }

    #[test]
    fn test_default_table_is_complete() {
        let map = LevelMap::default();
        assert_eq!(map.len(), 12);
    }

    #[test]
    fn test_custom_tables_override_defaults() {
        let map = LevelMap::from_pairs([("Gold 1-10 seats", "Gold")]);
        assert_eq!(map.normalize("Gold 1-10 seats"), "Gold");
        assert_eq!(map.normalize("Level 1 1 - 9"), "Level 1 1 - 9");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let map = LevelMap::new();
        for raw in [
            "Level 1 1 - 9",
            "Tier 3 2500 to 4999 Transactions",
            "Unmapped Label",
            "",
        ] {
            let once = map.normalize(raw);
            assert_eq!(map.normalize(&once), once);
        }
    }
}
