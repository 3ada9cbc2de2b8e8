//! Prorated pricing arithmetic.
//!
//! A product's `unit_price` is an annual (or per-transaction) list price.
//! Quotes charge the daily rate `unit_price / 365` for the whole days
//! elapsed between the customer's anniversary date and the current date.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Day count of the pricing year used for the daily rate.
pub const PRICING_YEAR_DAYS: i64 = 365;

/// Signed whole days from `anniversary` to `current`. Negative when the
/// current date precedes the anniversary.
pub fn elapsed_days(anniversary: NaiveDate, current: NaiveDate) -> i64 {
    current.signed_duration_since(anniversary).num_days()
}

/// Prorated price for `days` at the daily rate, rounded to cents.
///
/// Returns `None` when the multiplication overflows `Decimal`, so extreme
/// magnitudes degrade instead of panicking. The result carries two decimal
/// places; exact divisions would otherwise serialize without their cents
/// digits.
pub fn prorated_price(unit_price: Decimal, days: i64) -> Option<Decimal> {
    let mut price = unit_price
        .checked_div(Decimal::from(PRICING_YEAR_DAYS))?
        .checked_mul(Decimal::from(days))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(2);
    Some(price)
}

/// Parses a `YYYY-MM-DD` date string, tolerating surrounding whitespace.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
