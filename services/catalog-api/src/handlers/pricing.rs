//! Pricing Handlers
//!
//! Anniversary day counting and prorated quote endpoints.

use std::str::FromStr;

use axum::{extract::Query, http::StatusCode, response::Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use pricebook_models::pricing::{elapsed_days, parse_iso_date, prorated_price};

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    #[serde(default)]
    pub anniversary_date: String,
    #[serde(default)]
    pub current_date: String,
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    #[serde(default)]
    pub unit_price: String,
    #[serde(default)]
    pub anniversary_date: String,
    #[serde(default)]
    pub current_date: String,
}

/// Prorated quote; fields are null when inputs are missing or invalid
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub days: Option<i64>,
    pub price: Option<Decimal>,
}

/// Count whole days from the anniversary date to the current date
///
/// GET /catalog/calculate_days?anniversary_date=A&current_date=C
pub async fn calculate_days(
    Query(params): Query<DaysQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let anniversary = parse_iso_date(&params.anniversary_date).ok_or_else(invalid_dates)?;
    let current = parse_iso_date(&params.current_date).ok_or_else(invalid_dates)?;

    Ok(Json(json!({ "days": elapsed_days(anniversary, current) })))
}

fn invalid_dates() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid date format" })),
    )
}

/// Quote a prorated price for the elapsed span.
///
/// Mirrors the original order-form behavior: the day count renders whenever
/// both dates parse, and the price renders only when the day count and the
/// unit price are both nonzero. Bad input blanks fields instead of failing,
/// and so does a price too large to prorate.
///
/// GET /catalog/quote?unit_price=P&anniversary_date=A&current_date=C
pub async fn quote(Query(params): Query<QuoteQuery>) -> Json<QuoteResponse> {
    let anniversary = parse_iso_date(&params.anniversary_date);
    let current = parse_iso_date(&params.current_date);
    let unit_price = Decimal::from_str(params.unit_price.trim()).ok();

    let days = match (anniversary, current) {
        (Some(anniversary), Some(current)) => Some(elapsed_days(anniversary, current)),
        _ => None,
    };

    let price = match (days, unit_price) {
        (Some(days), Some(unit_price)) if days != 0 && !unit_price.is_zero() => {
            prorated_price(unit_price, days)
        }
        _ => None,
    };

    Json(QuoteResponse { days, price })
}
