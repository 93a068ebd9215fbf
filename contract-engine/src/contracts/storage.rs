//! In-memory port adapters
//!
//! DashMap-backed implementations of the collaborator ports, used by the
//! service tests and by embedders that keep contract payments in process.

use super::ports::{
    ContractRepository, DocumentStore, ExchangeRateProvider, PeriodLookup, PortError,
};
use async_trait::async_trait;
use dashmap::DashMap;
use shared::contract::{
    ContractPayment, ContractSide, Document, ExchangeRateQuote, ExpectedState, NewDocument,
    PeriodMonth,
};

/// Contract payments keyed by id
#[derive(Debug, Default)]
pub struct InMemoryContractRepository {
    contracts: DashMap<String, ContractPayment>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record without any state check
    pub fn insert(&self, contract: ContractPayment) {
        self.contracts.insert(contract.id.clone(), contract);
    }

    pub fn get(&self, id: &str) -> Option<ContractPayment> {
        self.contracts.get(id).map(|c| c.clone())
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn load(&self, id: &str) -> Result<Option<ContractPayment>, PortError> {
        Ok(self.get(id))
    }

    async fn find_paired(
        &self,
        project_period_id: &str,
        talent_assignment_id: &str,
        side: ContractSide,
    ) -> Result<Option<ContractPayment>, PortError> {
        Ok(self
            .contracts
            .iter()
            .find(|entry| {
                let c = entry.value();
                c.side == side
                    && c.project_period_id == project_period_id
                    && c.talent_assignment_id == talent_assignment_id
            })
            .map(|entry| entry.value().clone()))
    }

    async fn save(
        &self,
        contract: &ContractPayment,
        expected: ExpectedState,
    ) -> Result<(), PortError> {
        let mut stored = self
            .contracts
            .get_mut(&contract.id)
            .ok_or_else(|| PortError::NotFound(contract.id.clone()))?;

        if stored.expected_state() != expected {
            return Err(PortError::Conflict(format!(
                "contract payment {} is at version {} ({:?}/{:?}), expected version {}",
                contract.id,
                stored.version,
                stored.contract_status,
                stored.payment_status,
                expected.version
            )));
        }

        *stored = contract.clone();
        Ok(())
    }
}

/// Document records keyed by document id
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<String, Document>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create_document_record(&self, document: NewDocument) -> Result<Document, PortError> {
        let document = document.into_document(shared::util::now_millis());
        self.documents.insert(document.id.clone(), document.clone());
        Ok(document)
    }

    async fn list_documents(&self, contract_id: &str) -> Result<Vec<Document>, PortError> {
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| entry.value().contract_id == contract_id)
            .map(|entry| entry.value().clone())
            .collect();
        documents.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then(a.id.cmp(&b.id)));
        Ok(documents)
    }

    async fn delete_document(&self, document_id: &str) -> Result<(), PortError> {
        self.documents
            .remove(document_id)
            .map(|_| ())
            .ok_or_else(|| PortError::NotFound(document_id.to_string()))
    }
}

/// Period id to calendar month table
#[derive(Debug, Default)]
pub struct PeriodCalendar {
    periods: DashMap<String, PeriodMonth>,
}

impl PeriodCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, project_period_id: impl Into<String>, month: PeriodMonth) {
        self.periods.insert(project_period_id.into(), month);
    }
}

#[async_trait]
impl PeriodLookup for PeriodCalendar {
    async fn period_month(&self, project_period_id: &str) -> Result<Option<PeriodMonth>, PortError> {
        Ok(self.periods.get(project_period_id).map(|m| *m))
    }
}

/// Fixed exchange-rate quotes keyed by upper-case currency code
#[derive(Debug, Default)]
pub struct StaticExchangeRates {
    quotes: DashMap<String, ExchangeRateQuote>,
}

impl StaticExchangeRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, quote: ExchangeRateQuote) {
        self.quotes
            .insert(quote.currency_code.to_ascii_uppercase(), quote);
    }
}

#[async_trait]
impl ExchangeRateProvider for StaticExchangeRates {
    async fn get_rate(&self, currency_code: &str) -> Result<Option<ExchangeRateQuote>, PortError> {
        Ok(self
            .quotes
            .get(&currency_code.trim().to_ascii_uppercase())
            .map(|q| q.clone()))
    }
}
