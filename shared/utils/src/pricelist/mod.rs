pub mod importer;
pub mod normalizer;
pub mod parser;

pub use importer::{CatalogImporter, DuplicatePolicy, StagedImport};
pub use normalizer::{LevelMap, UNKNOWN_LEVEL};
pub use parser::{find_header_index, ParsedPriceList, PriceListFormat, PriceListParser, PriceListRow, HEADER_MARKER};
