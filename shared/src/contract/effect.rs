//! Declarative side effects produced by transitions
//!
//! Transitions never perform I/O. They describe what has to happen to the
//! collaborators (document store, paired contract) and the caller executes
//! the intents: evidence uploads together with the state change, deletions
//! and the partner cascade after it has been committed.

use super::document::DocumentKind;
use super::types::ContractSide;
use serde::{Deserialize, Serialize};

/// Side-effect intent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SideEffect {
    /// Create a document record for evidence supplied with the command
    AttachDocument {
        contract_id: String,
        side: ContractSide,
        kind: DocumentKind,
        document_type_id: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        file_name: Option<String>,
    },
    /// Delete every document attached to the contract payment
    DeleteDocuments {
        contract_id: String,
        side: ContractSide,
    },
    /// Reject the partner contract payment of the same period/assignment pair
    CascadeRejectPartner {
        project_period_id: String,
        talent_assignment_id: String,
        reason: String,
    },
}

/// Failure of a side effect after the primary transition committed
///
/// Warnings never undo the primary transition; they are reported so an
/// operator can finish the cleanup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SideEffectWarning {
    DocumentListFailed {
        contract_id: String,
        message: String,
    },
    DocumentDeleteFailed {
        contract_id: String,
        document_id: String,
        attempts: u32,
        message: String,
    },
    CascadeRejectFailed {
        #[serde(skip_serializing_if = "Option::is_none")]
        partner_id: Option<String>,
        message: String,
    },
}

impl SideEffectWarning {
    pub fn message(&self) -> &str {
        match self {
            Self::DocumentListFailed { message, .. }
            | Self::DocumentDeleteFailed { message, .. }
            | Self::CascadeRejectFailed { message, .. } => message,
        }
    }
}
