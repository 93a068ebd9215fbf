//! Contract payment record - state computed by applying contract events

use super::types::{
    BillingConfig, CalculationMethod, ContractSide, ContractStatus, PaymentStatus, TierBreakdown,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Contract payment for one talent assignment in one project period
///
/// Client and partner contract payments share this record; `side` selects
/// which transition table applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractPayment {
    pub id: String,
    pub side: ContractSide,
    /// Owning project period
    pub project_period_id: String,
    /// Owning talent placement
    pub talent_assignment_id: String,
    /// Human-readable number, unique per side
    pub contract_number: String,

    // === Billing configuration (set on verify, cleared on reject) ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price_foreign_currency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_method: Option<CalculationMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_hours: Option<f64>,

    // === Computed ===
    /// Defined iff the contract has been verified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_amount_local_currency: Option<f64>,
    /// Hours reported when billing started
    #[serde(skip_serializing_if = "Option::is_none", alias = "reported_hours")]
    pub actual_work_hours: Option<f64>,
    /// actual hours / standard hours (informational for Fixed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub man_month_coefficient: Option<f64>,
    /// Sum of tier amounts / unit price (Percentage only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_coefficient: Option<f64>,
    /// Defined iff billing has started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_amount_local_currency: Option<f64>,
    #[serde(default)]
    pub tier_breakdown: Vec<TierBreakdown>,

    // === Lifecycle ===
    pub contract_status: ContractStatus,
    pub payment_status: PaymentStatus,
    /// Terminal flag; overrides status display once set
    #[serde(default)]
    pub is_finished: bool,

    // === Payment tracking ===
    #[serde(default)]
    pub total_paid_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoiced_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<i64>,

    // === Audit ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Bumped by every applied event
    pub version: u64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Pre-transition state a write is conditioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedState {
    pub contract_status: ContractStatus,
    pub payment_status: PaymentStatus,
    pub version: u64,
}

impl ContractPayment {
    /// Create a Draft contract payment for a period/assignment pairing
    pub fn new(
        id: impl Into<String>,
        side: ContractSide,
        project_period_id: impl Into<String>,
        talent_assignment_id: impl Into<String>,
        contract_number: impl Into<String>,
    ) -> Self {
        let now = crate::util::now_millis();
        Self {
            id: id.into(),
            side,
            project_period_id: project_period_id.into(),
            talent_assignment_id: talent_assignment_id.into(),
            contract_number: contract_number.into(),
            unit_price_foreign_currency: None,
            currency_code: None,
            exchange_rate: None,
            calculation_method: None,
            percentage_value: None,
            fixed_amount: None,
            standard_hours: None,
            planned_amount_local_currency: None,
            actual_work_hours: None,
            man_month_coefficient: None,
            effective_coefficient: None,
            actual_amount_local_currency: None,
            tier_breakdown: Vec::new(),
            contract_status: ContractStatus::Draft,
            payment_status: PaymentStatus::Pending,
            is_finished: false,
            total_paid_amount: 0.0,
            invoice_number: None,
            invoiced_at: None,
            last_payment_date: None,
            paid_at: None,
            rejection_reason: None,
            notes: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reassemble the verified billing configuration, if complete
    pub fn billing_config(&self) -> Option<BillingConfig> {
        Some(BillingConfig {
            unit_price_foreign_currency: self.unit_price_foreign_currency?,
            currency_code: self.currency_code.clone()?,
            exchange_rate: self.exchange_rate?,
            calculation_method: self.calculation_method?,
            percentage_value: self.percentage_value,
            fixed_amount: self.fixed_amount,
            standard_hours: self.standard_hours?,
        })
    }

    fn set_billing_config(&mut self, billing: &BillingConfig) {
        self.unit_price_foreign_currency = Some(billing.unit_price_foreign_currency);
        self.currency_code = Some(billing.currency_code.clone());
        self.exchange_rate = Some(billing.exchange_rate);
        self.calculation_method = Some(billing.calculation_method);
        self.percentage_value = billing.percentage_value;
        self.fixed_amount = billing.fixed_amount;
        self.standard_hours = Some(billing.standard_hours);
    }

    /// Drop billing configuration and every value derived from it
    pub fn clear_billing(&mut self) {
        self.unit_price_foreign_currency = None;
        self.currency_code = None;
        self.exchange_rate = None;
        self.calculation_method = None;
        self.percentage_value = None;
        self.fixed_amount = None;
        self.standard_hours = None;
        self.planned_amount_local_currency = None;
        self.actual_work_hours = None;
        self.man_month_coefficient = None;
        self.effective_coefficient = None;
        self.actual_amount_local_currency = None;
        self.tier_breakdown.clear();
    }

    /// Apply a verified billing configuration together with its planned amount
    pub fn apply_verified_billing(&mut self, billing: &BillingConfig, planned_amount: f64) {
        self.set_billing_config(billing);
        self.planned_amount_local_currency = Some(planned_amount);
    }

    /// `(project_period_id, talent_assignment_id)` shared with the paired contract
    pub fn pair_key(&self) -> (&str, &str) {
        (&self.project_period_id, &self.talent_assignment_id)
    }

    pub fn expected_state(&self) -> ExpectedState {
        ExpectedState {
            contract_status: self.contract_status,
            payment_status: self.payment_status,
            version: self.version,
        }
    }

    /// Status label shown to operators; `FINISHED` wins once set
    pub fn display_status(&self) -> &'static str {
        if self.is_finished {
            return "FINISHED";
        }
        match self.payment_status {
            PaymentStatus::Pending => match self.contract_status {
                ContractStatus::Draft => "DRAFT",
                ContractStatus::Submitted => "SUBMITTED",
                ContractStatus::NeedMoreInformation => "NEED_MORE_INFORMATION",
                ContractStatus::Verified => "VERIFIED",
                ContractStatus::Approved => "APPROVED",
                ContractStatus::Rejected => "REJECTED",
            },
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Invoiced => "INVOICED",
            PaymentStatus::PartiallyPaid => "PARTIALLY_PAID",
            PaymentStatus::Paid => "PAID",
        }
    }
}
