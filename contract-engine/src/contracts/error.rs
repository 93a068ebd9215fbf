use super::ports::PortError;
use crate::billing::InvalidBillingConfiguration;
use chrono::NaiveDate;
use shared::contract::{
    ContractCommandKind, ContractSide, ContractStatus, DocumentKind, PaymentStatus, PeriodMonth,
};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Contract engine errors
///
/// Every variant is recoverable: the operator is re-prompted with the field
/// at fault. Side-effect failures never show up here, they are reported as
/// warnings on a successful [`TransitionReport`](super::TransitionReport).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("Contract payment not found: {0}")]
    NotFound(String),

    #[error("Invalid billing configuration: {field} {reason}")]
    InvalidBillingConfiguration { field: &'static str, reason: String },

    #[error(
        "Cannot {command} a {side} contract payment in {contract_status:?}/{payment_status:?}"
    )]
    InvalidTransition {
        side: ContractSide,
        command: ContractCommandKind,
        contract_status: ContractStatus,
        payment_status: PaymentStatus,
    },

    #[error("Missing required evidence: {0}")]
    MissingRequiredEvidence(DocumentKind),

    #[error("Document type not registered: {0}")]
    DocumentTypeNotRegistered(String),

    #[error("Amount mismatch: expected {expected}, got {actual}")]
    AmountMismatch { expected: f64, actual: f64 },

    #[error("Payment date {date} is outside period {period}")]
    DateOutOfRange { date: NaiveDate, period: PeriodMonth },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<InvalidBillingConfiguration> for ContractError {
    fn from(err: InvalidBillingConfiguration) -> Self {
        ContractError::InvalidBillingConfiguration {
            field: err.field,
            reason: err.reason,
        }
    }
}

impl From<PortError> for ContractError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound(id) => ContractError::NotFound(id),
            PortError::Conflict(msg) => ContractError::ConcurrentModification(msg),
            PortError::Unavailable(msg) => ContractError::Storage(msg),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_default()
}

impl From<ContractError> for AppError {
    fn from(err: ContractError) -> Self {
        let message = err.to_string();
        match err {
            ContractError::NotFound(id) => AppError::with_message(ErrorCode::ContractNotFound, message)
                .with_detail("contract_id", id),
            ContractError::InvalidBillingConfiguration { field, .. } => {
                AppError::with_message(ErrorCode::InvalidBillingConfiguration, message)
                    .with_detail("field", field)
            }
            ContractError::InvalidTransition {
                side,
                command,
                contract_status,
                payment_status,
            } => AppError::with_message(ErrorCode::InvalidTransition, message)
                .with_detail("side", to_json(&side))
                .with_detail("command", to_json(&command))
                .with_detail("contract_status", to_json(&contract_status))
                .with_detail("payment_status", to_json(&payment_status)),
            ContractError::MissingRequiredEvidence(kind) => {
                AppError::with_message(ErrorCode::MissingRequiredEvidence, message)
                    .with_detail("document_type", kind.registry_name())
            }
            ContractError::DocumentTypeNotRegistered(name) => {
                AppError::with_message(ErrorCode::DocumentTypeNotRegistered, message)
                    .with_detail("document_type", name)
            }
            ContractError::AmountMismatch { expected, actual } => {
                AppError::with_message(ErrorCode::AmountMismatch, message)
                    .with_detail("field", "paid_amount")
                    .with_detail("expected", expected)
                    .with_detail("actual", actual)
            }
            ContractError::DateOutOfRange { date, period } => {
                AppError::with_message(ErrorCode::DateOutOfRange, message)
                    .with_detail("field", "payment_date")
                    .with_detail("payment_date", date.to_string())
                    .with_detail("period", period.to_string())
            }
            ContractError::InvalidInput(_) => AppError::validation(message),
            ContractError::ConcurrentModification(_) => {
                AppError::with_message(ErrorCode::ConcurrentModification, message)
            }
            ContractError::Storage(e) => {
                tracing::error!(error = %e, "Contract storage error occurred");
                AppError::with_message(ErrorCode::StorageError, message)
            }
        }
    }
}
