//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64` on the contract record and converted to
//! `Decimal` for every arithmetic step. Intermediate results are normalized
//! to 15 fractional digits after each multiplication or division so binary
//! floating-point noise never compounds across tiers.

use crate::contracts::ContractError;
use rust_decimal::prelude::*;

/// Fractional digits kept by [`normalize`]
pub const NORMALIZE_DECIMAL_PLACES: u32 = 15;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price in contract currency
pub const MAX_UNIT_PRICE: f64 = 1_000_000_000_000.0;
/// Maximum allowed exchange rate
pub const MAX_EXCHANGE_RATE: f64 = 1_000_000_000.0;
/// Maximum hours in one monthly period (31 days * 24h)
pub const MAX_PERIOD_HOURS: f64 = 744.0;
/// Maximum percentage of the unit price billed per period
pub const MAX_PERCENTAGE: f64 = 1_000.0;

/// Convert f64 to Decimal for calculation; non-finite input becomes zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Round a decimal to [`NORMALIZE_DECIMAL_PLACES`]
#[inline]
pub fn normalize_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        NORMALIZE_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Normalize a monetary value to 15 fractional digits
///
/// Rounds through the exact decimal expansion of the float, so the result
/// is the closest `f64` to the rounded value and a second pass is a no-op.
/// `NaN` and infinities normalize to `0`.
pub fn normalize(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    format!("{:.*}", NORMALIZE_DECIMAL_PLACES as usize, value)
        .parse()
        .unwrap_or_default()
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff <= MONEY_TOLERANCE
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field_name: &str) -> Result<(), ContractError> {
    if !value.is_finite() {
        return Err(ContractError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate that a payment amount is finite and strictly positive
pub fn require_positive_amount(value: f64, field_name: &str) -> Result<(), ContractError> {
    require_finite(value, field_name)?;
    if value <= 0.0 {
        return Err(ContractError::InvalidInput(format!(
            "{} must be positive, got {}",
            field_name, value
        )));
    }
    Ok(())
}
