pub mod catalog;
pub mod health;
pub mod import;
pub mod pricing;

pub use catalog::*;
pub use health::*;
pub use import::*;
pub use pricing::*;

use axum::{http::StatusCode, response::Json};
use pricebook_utils::{ErrorResponse, PricebookError};

/// Convert a domain error into its HTTP response shape
pub(crate) fn error_response(error: PricebookError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(error)))
}
