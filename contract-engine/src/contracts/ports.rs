//! Collaborator ports
//!
//! The engine never talks to a database, file store or rate feed directly.
//! Persistence and lookups go through these traits; the service holds them
//! as `Arc<dyn ...>` so adapters can be swapped per deployment or per test.

use async_trait::async_trait;
use shared::contract::{
    ContractPayment, ContractSide, Document, DocumentKind, DocumentType, ExchangeRateQuote,
    ExpectedState, NewDocument, PeriodMonth,
};
use thiserror::Error;

/// Errors reported by port adapters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("not found: {0}")]
    NotFound(String),

    /// The stored record no longer matches the expected pre-transition state
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Contract payment persistence
#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn load(&self, id: &str) -> Result<Option<ContractPayment>, PortError>;

    /// Find the contract payment of `side` sharing the period/assignment pair
    async fn find_paired(
        &self,
        project_period_id: &str,
        talent_assignment_id: &str,
        side: ContractSide,
    ) -> Result<Option<ContractPayment>, PortError>;

    /// Persist `contract` only if the stored record still matches `expected`
    async fn save(&self, contract: &ContractPayment, expected: ExpectedState)
    -> Result<(), PortError>;
}

/// Evidence document records
///
/// File upload happens before a command is issued; commands carry the
/// resulting URL.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document_record(&self, document: NewDocument) -> Result<Document, PortError>;

    async fn list_documents(&self, contract_id: &str) -> Result<Vec<Document>, PortError>;

    async fn delete_document(&self, document_id: &str) -> Result<(), PortError>;
}

/// Document type catalog, resolved by display name
pub trait DocumentTypeRegistry: Send + Sync {
    /// Case-insensitive lookup
    fn find_type_by_name(&self, name: &str) -> Option<DocumentType>;
}

/// Advisory exchange rates; never applied to a contract automatically
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn get_rate(&self, currency_code: &str) -> Result<Option<ExchangeRateQuote>, PortError>;
}

/// Calendar month owning a project period
#[async_trait]
pub trait PeriodLookup: Send + Sync {
    async fn period_month(&self, project_period_id: &str) -> Result<Option<PeriodMonth>, PortError>;
}

/// Fixed, in-process document type catalog
#[derive(Debug, Clone, Default)]
pub struct StaticDocumentTypeRegistry {
    types: Vec<DocumentType>,
}

impl StaticDocumentTypeRegistry {
    pub fn new(types: Vec<DocumentType>) -> Self {
        Self { types }
    }

    /// Catalog holding one entry per [`DocumentKind`]
    pub fn with_defaults() -> Self {
        let types = DocumentKind::ALL
            .iter()
            .map(|kind| DocumentType {
                id: format!(
                    "doc-type-{}",
                    kind.registry_name().to_lowercase().replace(' ', "-")
                ),
                name: kind.registry_name().to_string(),
            })
            .collect();
        Self { types }
    }

    pub fn without(mut self, kind: DocumentKind) -> Self {
        self.types
            .retain(|t| !t.name.eq_ignore_ascii_case(kind.registry_name()));
        self
    }
}

impl DocumentTypeRegistry for StaticDocumentTypeRegistry {
    fn find_type_by_name(&self, name: &str) -> Option<DocumentType> {
        let name = name.trim();
        self.types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .cloned()
    }
}
