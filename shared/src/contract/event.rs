//! Contract events - immutable facts recorded after command processing

use super::types::{BillingConfig, ContractSide, ContractStatus, TierBreakdown};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Contract event - immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractEvent {
    /// Event unique ID
    pub event_id: String,
    pub contract_id: String,
    pub side: ContractSide,
    /// Contract version after this event is applied
    pub version: u64,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Client timestamp preserved from the command
    pub client_timestamp: i64,
    pub operator_id: String,
    pub operator_name: String,
    /// Command that triggered this event
    pub command_id: String,
    pub event_type: ContractEventType,
    pub payload: ContractEventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractEventType {
    // Approval
    Submitted,
    InformationRequested,
    Verified,
    Approved,
    Rejected,
    ResetToDraft,

    // Billing
    BillingStarted,
    Invoiced,
    PaymentRecorded,
    MarkedAsPaid,

    // Other
    NoteAdded,
}

impl std::fmt::Display for ContractEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractEventType::Submitted => write!(f, "SUBMITTED"),
            ContractEventType::InformationRequested => write!(f, "INFORMATION_REQUESTED"),
            ContractEventType::Verified => write!(f, "VERIFIED"),
            ContractEventType::Approved => write!(f, "APPROVED"),
            ContractEventType::Rejected => write!(f, "REJECTED"),
            ContractEventType::ResetToDraft => write!(f, "RESET_TO_DRAFT"),
            ContractEventType::BillingStarted => write!(f, "BILLING_STARTED"),
            ContractEventType::Invoiced => write!(f, "INVOICED"),
            ContractEventType::PaymentRecorded => write!(f, "PAYMENT_RECORDED"),
            ContractEventType::MarkedAsPaid => write!(f, "MARKED_AS_PAID"),
            ContractEventType::NoteAdded => write!(f, "NOTE_ADDED"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractEventPayload {
    // ========== Approval ==========
    Submitted {
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    InformationRequested {
        note: String,
    },
    Verified {
        /// Normalized configuration (local currency rate forced to 1,
        /// fixed amount mirrored into the unit price)
        billing: BillingConfig,
        planned_amount_local_currency: f64,
    },
    Approved {
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    Rejected {
        reason: String,
        from_status: ContractStatus,
    },
    ResetToDraft {
        reason: String,
    },

    // ========== Billing ==========
    BillingStarted {
        actual_work_hours: f64,
        man_month_coefficient: f64,
        actual_amount_local_currency: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        effective_coefficient: Option<f64>,
        #[serde(default)]
        tier_breakdown: Vec<TierBreakdown>,
    },
    Invoiced {
        #[serde(skip_serializing_if = "Option::is_none")]
        invoice_number: Option<String>,
    },
    PaymentRecorded {
        amount: f64,
        payment_date: NaiveDate,
        /// Running total after this payment
        total_paid_amount: f64,
        fully_paid: bool,
    },
    MarkedAsPaid {
        paid_amount: f64,
        payment_date: NaiveDate,
    },

    // ========== Other ==========
    NoteAdded {
        note: String,
    },
}

impl ContractEventPayload {
    pub fn event_type(&self) -> ContractEventType {
        match self {
            Self::Submitted { .. } => ContractEventType::Submitted,
            Self::InformationRequested { .. } => ContractEventType::InformationRequested,
            Self::Verified { .. } => ContractEventType::Verified,
            Self::Approved { .. } => ContractEventType::Approved,
            Self::Rejected { .. } => ContractEventType::Rejected,
            Self::ResetToDraft { .. } => ContractEventType::ResetToDraft,
            Self::BillingStarted { .. } => ContractEventType::BillingStarted,
            Self::Invoiced { .. } => ContractEventType::Invoiced,
            Self::PaymentRecorded { .. } => ContractEventType::PaymentRecorded,
            Self::MarkedAsPaid { .. } => ContractEventType::MarkedAsPaid,
            Self::NoteAdded { .. } => ContractEventType::NoteAdded,
        }
    }
}
