//! Price List Import Handler
//!
//! Handles price-list file uploads that replace the in-memory catalog.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;
use pricebook_utils::pricelist::{PriceListFormat, PriceListParser};
use pricebook_utils::{validate_file_type, ErrorResponse, PricebookError};

use super::error_response;

/// Price-list import response
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub import_id: Uuid,
    pub filename: String,
    pub format: String,
    pub imported: usize,
    pub total_rows: usize,
    pub skipped_rows: usize,
    pub skipped_duplicates: usize,
    pub warnings: Vec<String>,
}

/// Upload a price list and replace the catalog with its contents
///
/// POST /catalog/import
pub async fn import_price_list(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Get file from multipart
    let field = multipart
        .next_field()
        .await
        .map_err(|e| {
            error_response(PricebookError::validation(
                "file",
                format!("Failed to read upload: {}", e),
            ))
        })?
        .ok_or_else(|| error_response(PricebookError::validation("file", "No file provided")))?;

    let format_hint = field
        .content_type()
        .and_then(PriceListFormat::from_content_type);

    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown.csv".to_string());

    // Without a recognized content type the extension is the only signal
    if format_hint.is_none() {
        validate_file_type(&filename, &["csv", "txt", "xlsx", "xls"]).map_err(error_response)?;
    }

    let data = field.bytes().await.map_err(|e| {
        error_response(PricebookError::validation(
            "file",
            format!("Failed to read file data: {}", e),
        ))
    })?;

    // Parse price list
    let parser = PriceListParser::new();
    let parsed = parser
        .parse_bytes(&filename, &data, format_hint)
        .map_err(|e| error_response(PricebookError::parse(e.to_string())))?;

    // Stage products; nothing replaces the live catalog until this succeeds
    let staged = state.importer.build(&parsed).map_err(error_response)?;

    // Combine warnings
    let mut warnings = parsed.parse_warnings.clone();
    warnings.extend(staged.warnings.clone());

    let imported = state.store.replace(staged.products).await;

    tracing::info!(
        filename = %filename,
        imported,
        total_rows = parsed.total_rows,
        skipped_rows = staged.skipped_rows,
        skipped_duplicates = staged.skipped_duplicates,
        "Price list imported"
    );

    let format = match parsed.format {
        PriceListFormat::Csv => "CSV",
        PriceListFormat::Excel => "Excel",
    };

    Ok(Json(ImportResponse {
        import_id: parsed.id,
        filename,
        format: format.to_string(),
        imported,
        total_rows: parsed.total_rows,
        skipped_rows: staged.skipped_rows,
        skipped_duplicates: staged.skipped_duplicates,
        warnings,
    }))
}
