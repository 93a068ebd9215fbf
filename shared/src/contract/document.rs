//! Evidence documents attached to contract payments

use super::types::ContractSide;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of evidence a transition may require
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    /// Client-facing SOW submitted by sales
    StatementOfWork,
    PurchaseOrder,
    /// Signed partner contract
    Contract,
    Timesheet,
    /// Proof of payment
    PaymentOrder,
    Receipt,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::StatementOfWork,
        DocumentKind::PurchaseOrder,
        DocumentKind::Contract,
        DocumentKind::Timesheet,
        DocumentKind::PaymentOrder,
        DocumentKind::Receipt,
    ];

    /// Name under which the document type registry knows this kind
    pub fn registry_name(&self) -> &'static str {
        match self {
            DocumentKind::StatementOfWork => "Statement of Work",
            DocumentKind::PurchaseOrder => "Purchase Order",
            DocumentKind::Contract => "Contract",
            DocumentKind::Timesheet => "Timesheet",
            DocumentKind::PaymentOrder => "Payment Order",
            DocumentKind::Receipt => "Receipt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registry_name())
    }
}

/// Document type as resolved from the registry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentType {
    pub id: String,
    pub name: String,
}

/// Document record held by the document store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub contract_id: String,
    pub side: ContractSide,
    pub document_type_id: String,
    pub kind: DocumentKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Unix milliseconds
    pub uploaded_at: i64,
}

/// Input for creating a document record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDocument {
    pub contract_id: String,
    pub side: ContractSide,
    pub document_type_id: String,
    pub kind: DocumentKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl NewDocument {
    /// Materialize a stored record with a fresh id
    pub fn into_document(self, uploaded_at: i64) -> Document {
        Document {
            id: crate::util::new_id(),
            contract_id: self.contract_id,
            side: self.side,
            document_type_id: self.document_type_id,
            kind: self.kind,
            url: self.url,
            file_name: self.file_name,
            uploaded_at,
        }
    }
}
