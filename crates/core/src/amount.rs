//! Money amounts as they are stored: `DECIMAL(16, 2)`.

use rust_decimal::Decimal;
use thiserror::Error;

/// Decimal places kept by the amount columns.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest storable amount, `99_999_999_999_999.99`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x6FC0_FFFF, 0x0023_86F2, 0, false, AMOUNT_SCALE);

/// Why an amount cannot be stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Zero or negative.
    #[error("amount must be greater than zero, got {0}")]
    NonPositive(Decimal),

    /// More fractional digits than the column keeps; storing would round.
    #[error("amount must have at most 2 decimal places, got {0}")]
    TooManyDecimals(Decimal),

    /// More integer digits than the column keeps.
    #[error("amount must not exceed 99999999999999.99, got {0}")]
    TooLarge(Decimal),
}

/// Accept a positive amount that round-trips through storage unchanged.
///
/// Trailing zeros do not count against the scale, so `10.500` is accepted.
///
/// # Errors
///
/// Returns the first rule the amount breaks.
pub fn check(amount: Decimal) -> Result<(), AmountError> {
    if amount <= Decimal::ZERO {
        return Err(AmountError::NonPositive(amount));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(AmountError::TooManyDecimals(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(AmountError::TooLarge(amount));
    }
    Ok(())
}
