//! Display formatting for amounts and percentages in alert text.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol prefixed to amounts.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Two decimals with thousands separators, e.g. `12,345.60`.
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Amount with the currency symbol, e.g. `₹850.00`.
#[must_use]
pub fn format_money(value: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", format_amount(value))
}

/// One decimal place, e.g. `85.0`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}")
}
