//! Price List File Parser
//!
//! Multi-format parser supporting CSV and Excel price-list files. Vendor
//! exports put banner and preamble lines above the real header, so parsing
//! locates the header row by its marker cell before reading data rows.

use anyhow::{Context, Result};
use std::path::Path;
use uuid::Uuid;

/// Literal cell text that identifies the header row of a price-list file.
pub const HEADER_MARKER: &str = "Product Family";

/// Supported price-list file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceListFormat {
    Csv,
    Excel, // XLSX/XLS
}

impl PriceListFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Detect format from content type header
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "text/csv" | "application/csv" | "text/plain" => Some(Self::Csv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Excel),
            "application/vnd.ms-excel" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// Returns the index of the first line containing [`HEADER_MARKER`].
///
/// The match is case-sensitive and may occur anywhere in the line, so both
/// a bare `Product Family` cell and a quoted variant are found.
pub fn find_header_index<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.as_ref().contains(HEADER_MARKER))
}

/// Parsed price-list row before admission and level normalization.
///
/// Fields hold trimmed cell text; blank or absent cells are `None`.
#[derive(Debug, Clone)]
pub struct PriceListRow {
    pub row_number: usize,
    pub name: Option<String>,
    pub level: Option<String>,
    pub unit_price: Option<String>,
    pub part_number: Option<String>,
}

/// Complete parsed price list with metadata
#[derive(Debug, Clone)]
pub struct ParsedPriceList {
    pub id: Uuid,
    pub filename: String,
    pub format: PriceListFormat,
    pub rows: Vec<PriceListRow>,
    pub column_headers: Vec<String>,
    pub total_rows: usize,
    pub parse_warnings: Vec<String>,
}

/// Resolved column positions for one file's header row
struct ColumnLayout {
    name: Option<usize>,
    level: Option<usize>,
    unit_price: Option<usize>,
    part_number: Option<usize>,
}

/// Main price-list parser
pub struct PriceListParser {
    /// Column name mappings for different price-list exports
    name_columns: Vec<String>,
    level_columns: Vec<String>,
    unit_price_columns: Vec<String>,
    part_number_columns: Vec<String>,
}

impl Default for PriceListParser {
    fn default() -> Self {
        Self {
            name_columns: vec![
                "product family".to_string(),
                "product name".to_string(),
                "product_name".to_string(),
                "product".to_string(),
            ],
            level_columns: vec![
                "level detail".to_string(),
                "level".to_string(),
            ],
            unit_price_columns: vec![
                "unit dtp per year / per txn".to_string(),
                "unit dtp per year/per txn".to_string(),
                "dtp price".to_string(),
                "dtp_price".to_string(),
                "dtp".to_string(),
            ],
            part_number_columns: vec![
                "part number".to_string(),
                "part_number".to_string(),
            ],
        }
    }
}

impl PriceListParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse price-list file from bytes
    pub fn parse_bytes(
        &self,
        filename: &str,
        data: &[u8],
        format: Option<PriceListFormat>,
    ) -> Result<ParsedPriceList> {
        let format = format
            .or_else(|| PriceListFormat::from_extension(Path::new(filename)))
            .context("Could not determine file format")?;

        match format {
            PriceListFormat::Csv => self.parse_csv(filename, data),
            PriceListFormat::Excel => self.parse_excel(filename, data),
        }
    }

    /// Parse CSV format
    fn parse_csv(&self, filename: &str, data: &[u8]) -> Result<ParsedPriceList> {
        let text = std::str::from_utf8(data).context("File is not valid UTF-8")?;
        let lines: Vec<&str> = text.lines().collect();

        let header_index = find_header_index(&lines).with_context(|| {
            format!("Header row not found: no line contains \"{}\"", HEADER_MARKER)
        })?;

        let table = lines[header_index..].join("\n");
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(table.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(|h| h.to_lowercase().trim().to_string())
            .collect();

        let mut warnings = Vec::new();
        let layout = self.resolve_columns(&headers, &mut warnings);

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let cells: Vec<String> = record.iter().map(|v| v.to_string()).collect();
                    rows.push(row_from_cells(idx + 1, &cells, &layout));
                }
                Err(e) => {
                    warnings.push(format!("Row {}: Parse error - {}", idx + 1, e));
                }
            }
        }

        Ok(ParsedPriceList {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            format: PriceListFormat::Csv,
            total_rows: rows.len(),
            rows,
            column_headers: headers,
            parse_warnings: warnings,
        })
    }

    /// Parse Excel format
    fn parse_excel(&self, filename: &str, data: &[u8]) -> Result<ParsedPriceList> {
        use calamine::{open_workbook_from_rs, DataType, Reader, Xlsx};

        let cursor = std::io::Cursor::new(data);
        let mut workbook: Xlsx<_> =
            open_workbook_from_rs(cursor).context("Failed to open Excel workbook")?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .context("No sheets found in workbook")?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .context("Failed to read worksheet")??;

        let all_rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell: &DataType| cell.to_string()).collect())
            .collect();

        let header_index = all_rows
            .iter()
            .position(|row| row.iter().any(|cell| cell.contains(HEADER_MARKER)))
            .with_context(|| {
                format!("Header row not found: no row contains \"{}\"", HEADER_MARKER)
            })?;

        let headers: Vec<String> = all_rows[header_index]
            .iter()
            .map(|h| h.to_lowercase().trim().to_string())
            .collect();

        let mut warnings = Vec::new();
        let layout = self.resolve_columns(&headers, &mut warnings);

        let rows: Vec<PriceListRow> = all_rows[header_index + 1..]
            .iter()
            .enumerate()
            .map(|(idx, cells)| row_from_cells(idx + 1, cells, &layout))
            .collect();

        Ok(ParsedPriceList {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            format: PriceListFormat::Excel,
            total_rows: rows.len(),
            rows,
            column_headers: headers,
            parse_warnings: warnings,
        })
    }

    /// Resolve column positions, warning on anything missing
    fn resolve_columns(&self, headers: &[String], warnings: &mut Vec<String>) -> ColumnLayout {
        let layout = ColumnLayout {
            name: find_column(&self.name_columns, headers),
            level: find_column(&self.level_columns, headers),
            unit_price: find_column(&self.unit_price_columns, headers),
            part_number: find_column(&self.part_number_columns, headers),
        };

        if layout.name.is_none() {
            warnings.push(format!(
                "Product name column not found (looked for: {})",
                self.name_columns.join(", ")
            ));
        }
        if layout.level.is_none() {
            warnings.push(format!(
                "Level column not found (looked for: {})",
                self.level_columns.join(", ")
            ));
        }
        if layout.unit_price.is_none() {
            warnings.push(format!(
                "Unit price column not found (looked for: {})",
                self.unit_price_columns.join(", ")
            ));
        }
        if layout.part_number.is_none() {
            warnings.push("Part number column not found, part numbers will be synthesized".to_string());
        }

        layout
    }
}

/// Find the first candidate column name present in the headers
fn find_column(candidates: &[String], headers: &[String]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|header| header == candidate))
}

fn row_from_cells(row_number: usize, cells: &[String], layout: &ColumnLayout) -> PriceListRow {
    PriceListRow {
        row_number,
        name: field_at(cells, layout.name),
        level: field_at(cells, layout.level),
        unit_price: field_at(cells, layout.unit_price),
        part_number: field_at(cells, layout.part_number),
    }
}

fn field_at(cells: &[String], index: Option<usize>) -> Option<String> {
    let value = cells.get(index?)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
