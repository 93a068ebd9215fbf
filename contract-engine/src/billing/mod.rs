//! Billing calculator
//!
//! Pure functions turning a billing configuration and the hours worked into
//! a planned and an actual amount in local currency.
//!
//! - **tiers**: the fixed overtime schedule used by the Percentage method
//! - **calculator**: `plan_amount` / `compute_actual`

pub mod calculator;
pub mod tiers;

pub use calculator::{compute_actual, compute_actual_for, plan_amount, plan_amount_for};
pub use tiers::{OVERTIME_SCHEDULE, OvertimeTier};

use shared::contract::TierBreakdown;
use thiserror::Error;

/// A billing field is missing, non-positive or inconsistent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid billing configuration: {field} {reason}")]
pub struct InvalidBillingConfiguration {
    /// Record field the operator has to fix
    pub field: &'static str,
    pub reason: String,
}

impl InvalidBillingConfiguration {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Result of [`compute_actual`]
#[derive(Debug, Clone, PartialEq)]
pub struct BillingComputation {
    /// Payable amount in local currency; `None` when no hours were billed
    /// under the Percentage method
    pub actual_amount: Option<f64>,
    /// `actual_hours / standard_hours`, tracked for every method
    pub man_month_coefficient: f64,
    /// `sum(amount_foreign) / unit_price` (Percentage only)
    pub effective_coefficient: Option<f64>,
    /// Per-tier audit records (Percentage only)
    pub breakdown: Vec<TierBreakdown>,
}
