//! Shared types for contract payments

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Side / Status
// ============================================================================

/// Which counterparty a contract payment is held against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractSide {
    /// Agency ↔ client contract, submitted by sales
    Client,
    /// Agency ↔ partner (subcontractor) contract, verified by an accountant
    Partner,
}

impl ContractSide {
    /// The side a paired contract payment lives on
    pub fn opposite(&self) -> Self {
        match self {
            ContractSide::Client => ContractSide::Partner,
            ContractSide::Partner => ContractSide::Client,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractSide::Client => "client",
            ContractSide::Partner => "partner",
        }
    }
}

impl fmt::Display for ContractSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract approval status
///
/// The partner side never uses `Submitted` or `NeedMoreInformation`.
/// `Rejected` is transient: it is recorded in the event stream and the
/// contract payment immediately resets to `Draft`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    #[default]
    Draft,
    Submitted,
    NeedMoreInformation,
    Verified,
    Approved,
    Rejected,
}

impl ContractStatus {
    /// Whether billing configuration has been verified (Verified or Approved)
    pub fn is_verified(&self) -> bool {
        matches!(self, ContractStatus::Verified | ContractStatus::Approved)
    }
}

/// Payment progress status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Invoiced,
    PartiallyPaid,
    Paid,
}

impl PaymentStatus {
    /// Billing has started once the payment left `Pending`
    pub fn billing_started(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

// ============================================================================
// Billing
// ============================================================================

/// Billing method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationMethod {
    /// Percentage of the unit rate, with a tiered overtime schedule
    Percentage,
    /// Fixed amount regardless of hours worked
    Fixed,
}

/// Billing configuration supplied when a contract payment is verified
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingConfig {
    /// Unit price in the contract currency (mirrors `fixed_amount` for Fixed)
    pub unit_price_foreign_currency: f64,
    /// ISO currency code of the unit price
    pub currency_code: String,
    /// Operator-entered rate from contract currency to local currency
    pub exchange_rate: f64,
    pub calculation_method: CalculationMethod,
    /// Required iff method is Percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_value: Option<f64>,
    /// Required iff method is Fixed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<f64>,
    /// Hours that make up one full billing unit
    pub standard_hours: f64,
}

/// One bracket of the overtime schedule, kept for audit display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierBreakdown {
    /// Human-readable hour range, e.g. `181-200h`
    pub label: String,
    /// Hours consumed by this tier
    pub hours: f64,
    /// Base hourly rate in contract currency
    pub rate: f64,
    pub multiplier: f64,
    pub amount_foreign: f64,
    pub amount_local: f64,
}

// ============================================================================
// Evidence
// ============================================================================

/// A file the caller already uploaded to the document store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceInput {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl EvidenceInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

// ============================================================================
// Period / Exchange rate
// ============================================================================

/// Calendar month of a project period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PeriodMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl PeriodMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Whether the date falls within this calendar month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.pred_opt())
    }
}

impl fmt::Display for PeriodMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Advisory rate quote from a third-party source
///
/// Operators copy a value into `BillingConfig::exchange_rate`; quotes are
/// never applied automatically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRateQuote {
    pub currency_code: String,
    pub buy: f64,
    pub sell: f64,
    pub transfer: f64,
    /// Unix milliseconds
    pub as_of: i64,
}
