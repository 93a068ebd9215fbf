//! Contract commands - requests from operators to move a contract payment

use super::types::{BillingConfig, ContractSide, EvidenceInput};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract command envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractCommand {
    /// Command unique ID (for audit tracing)
    pub command_id: String,
    /// Target contract payment
    pub contract_id: String,
    pub side: ContractSide,
    /// Operator who issued the command
    pub operator_id: String,
    /// Operator name (snapshot for audit)
    pub operator_name: String,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
    pub payload: ContractCommandPayload,
}

impl ContractCommand {
    pub fn new(
        contract_id: impl Into<String>,
        side: ContractSide,
        operator_id: impl Into<String>,
        operator_name: impl Into<String>,
        payload: ContractCommandPayload,
    ) -> Self {
        Self {
            command_id: crate::util::new_id(),
            contract_id: contract_id.into(),
            side,
            operator_id: operator_id.into(),
            operator_name: operator_name.into(),
            timestamp: crate::util::now_millis(),
            payload,
        }
    }
}

/// Command payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractCommandPayload {
    /// Sales submits the SOW (client only). Optional when resubmitting after
    /// an information request and the SOW is still attached.
    Submit {
        #[serde(skip_serializing_if = "Option::is_none")]
        sow: Option<EvidenceInput>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Accountant asks sales for more information (client only)
    RequestInformation { note: String },
    /// Accountant verifies the billing configuration. Partner verification
    /// also carries the purchase order and signed contract.
    Verify {
        billing: BillingConfig,
        #[serde(skip_serializing_if = "Option::is_none")]
        purchase_order: Option<EvidenceInput>,
        #[serde(skip_serializing_if = "Option::is_none")]
        contract_document: Option<EvidenceInput>,
    },
    Approve {
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Revert to Draft, invalidating billing configuration and evidence
    Reject { reason: String },
    /// Report hours worked and compute the actual amount
    StartBilling {
        actual_hours: f64,
        /// May be omitted when a timesheet is already attached
        #[serde(skip_serializing_if = "Option::is_none")]
        timesheet: Option<EvidenceInput>,
    },
    /// Issue the client invoice
    Invoice {
        #[serde(skip_serializing_if = "Option::is_none")]
        invoice_number: Option<String>,
    },
    /// Record a (possibly partial) client payment
    RecordPayment {
        amount: f64,
        payment_date: NaiveDate,
        #[serde(skip_serializing_if = "Option::is_none")]
        proof: Option<EvidenceInput>,
    },
    /// Settle the partner payment in full
    MarkAsPaid {
        paid_amount: f64,
        payment_date: NaiveDate,
        proof: EvidenceInput,
        receipt: EvidenceInput,
    },
    AddNote { note: String },
}

impl ContractCommandPayload {
    pub fn kind(&self) -> ContractCommandKind {
        match self {
            Self::Submit { .. } => ContractCommandKind::Submit,
            Self::RequestInformation { .. } => ContractCommandKind::RequestInformation,
            Self::Verify { .. } => ContractCommandKind::Verify,
            Self::Approve { .. } => ContractCommandKind::Approve,
            Self::Reject { .. } => ContractCommandKind::Reject,
            Self::StartBilling { .. } => ContractCommandKind::StartBilling,
            Self::Invoice { .. } => ContractCommandKind::Invoice,
            Self::RecordPayment { .. } => ContractCommandKind::RecordPayment,
            Self::MarkAsPaid { .. } => ContractCommandKind::MarkAsPaid,
            Self::AddNote { .. } => ContractCommandKind::AddNote,
        }
    }
}

/// Payload discriminant, used by the transition tables
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractCommandKind {
    Submit,
    RequestInformation,
    Verify,
    Approve,
    Reject,
    StartBilling,
    Invoice,
    RecordPayment,
    MarkAsPaid,
    AddNote,
}

impl fmt::Display for ContractCommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Submit => "submit",
            Self::RequestInformation => "request information on",
            Self::Verify => "verify",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::StartBilling => "start billing on",
            Self::Invoice => "invoice",
            Self::RecordPayment => "record payment on",
            Self::MarkAsPaid => "mark as paid",
            Self::AddNote => "add note to",
        };
        f.write_str(name)
    }
}
