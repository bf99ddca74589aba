//! Display formatting for prices, aggregates and dates.
//!
//! Output follows the en-US conventions of the dashboard page. Dates are
//! shown in UTC.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Most fraction digits shown for an aggregate.
const MAX_AGGREGATE_FRACTION_DIGITS: u32 = 3;

/// Format an aggregate with thousands separators (`12345.6` -> `12,345.6`).
///
/// Fraction digits are kept as delivered, up to three, with trailing zeros
/// dropped.
#[must_use]
pub fn grouped(value: Decimal) -> String {
    let normalized = value.round_dp(MAX_AGGREGATE_FRACTION_DIGITS).normalize();
    let text = normalized.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').map_or((text.as_str(), None), |(i, f)| (i, Some(f)));

    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::with_capacity(text.len() + digits.len() / 3 + 1);
    if normalized.is_sign_negative() && !normalized.is_zero() {
        out.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*digit);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an aggregate money amount (`$12,345.6`).
#[must_use]
pub fn grouped_money(value: Decimal) -> String {
    format!("${}", grouped(value))
}

/// Short date (`10/15/2025`).
#[must_use]
pub fn short_date(value: &DateTime<Utc>) -> String {
    value.format("%-m/%-d/%Y").to_string()
}

/// Date with time of day (`Oct 15, 2025, 02:30 PM`).
#[must_use]
pub fn date_time(value: &DateTime<Utc>) -> String {
    value.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Text field fallback for empty optional values.
#[must_use]
pub fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}
