//! Contract service - saga executor
//!
//! Runs one command end to end:
//!
//! 1. Take the per-contract lock (serializes commands on the same id)
//! 2. Load the record and its attached documents
//! 3. Run the pure `transition`
//! 4. Create the uploaded evidence records
//! 5. Save with the pre-transition state as the optimistic expectation
//! 6. Release the lock, then execute the remaining side effects
//!
//! Evidence is part of the change: if an upload cannot be recorded, or the
//! save fails, the documents created for the command are deleted again and
//! the command fails. Deletions and the partner cascade run after the commit;
//! a failure there becomes a warning on the report and never rolls the
//! committed change back.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use super::coupling::cascade_target;
use super::error::ContractError;
use super::invalidation::purge_documents;
use super::machine::{TransitionOutcome, transition};
use super::ports::{
    ContractRepository, DocumentStore, DocumentTypeRegistry, ExchangeRateProvider, PeriodLookup,
};
use super::traits::TransitionContext;
use crate::core::EngineConfig;
use shared::contract::{
    ContractCommand, ContractCommandKind, ContractCommandPayload, ContractEvent, ContractPayment,
    ContractSide, ContractStatus, Document, ExchangeRateQuote, NewDocument, SideEffect,
    SideEffectWarning,
};

/// Collaborators the service runs against
#[derive(Clone)]
pub struct ContractPorts {
    pub repository: Arc<dyn ContractRepository>,
    pub documents: Arc<dyn DocumentStore>,
    pub registry: Arc<dyn DocumentTypeRegistry>,
    pub exchange_rates: Arc<dyn ExchangeRateProvider>,
    pub periods: Arc<dyn PeriodLookup>,
}

/// Committed transition plus the outcome of its side effects
#[derive(Debug, Clone)]
pub struct TransitionReport {
    pub contract: ContractPayment,
    pub events: Vec<ContractEvent>,
    pub side_effects: Vec<SideEffect>,
    pub warnings: Vec<SideEffectWarning>,
}

impl TransitionReport {
    /// The transition committed but at least one side effect failed
    pub fn is_partial_failure(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub struct ContractService {
    ports: ContractPorts,
    config: EngineConfig,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ContractService {
    pub fn new(ports: ContractPorts, config: EngineConfig) -> Self {
        Self {
            ports,
            config,
            locks: DashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn load(&self, contract_id: &str) -> Result<ContractPayment, ContractError> {
        self.ports
            .repository
            .load(contract_id)
            .await?
            .ok_or_else(|| ContractError::NotFound(contract_id.to_string()))
    }

    /// Execute a command and its side effects
    pub async fn execute(&self, command: ContractCommand) -> Result<TransitionReport, ContractError> {
        let outcome = self.commit(&command).await?;

        let mut warnings = Vec::new();
        for effect in &outcome.side_effects {
            match effect {
                SideEffect::CascadeRejectPartner {
                    project_period_id,
                    talent_assignment_id,
                    reason,
                } => {
                    warnings.extend(
                        self.cascade_reject(&command, project_period_id, talent_assignment_id, reason)
                            .await,
                    );
                }
                other => warnings.extend(self.run_post_commit_effect(other).await),
            }
        }

        if !warnings.is_empty() {
            tracing::warn!(
                contract_id = %outcome.contract.id,
                command = %command.payload.kind(),
                warnings = warnings.len(),
                "Transition committed with side-effect warnings"
            );
        }

        Ok(TransitionReport {
            contract: outcome.contract,
            events: outcome.events,
            side_effects: outcome.side_effects,
            warnings,
        })
    }

    /// Advisory exchange rate; local currency is always at parity
    pub async fn exchange_rate_hint(
        &self,
        currency_code: &str,
    ) -> Result<Option<ExchangeRateQuote>, ContractError> {
        if self.config.is_local_currency(currency_code) {
            return Ok(Some(ExchangeRateQuote {
                currency_code: self.config.local_currency.clone(),
                buy: 1.0,
                sell: 1.0,
                transfer: 1.0,
                as_of: shared::util::now_millis(),
            }));
        }
        Ok(self.ports.exchange_rates.get_rate(currency_code).await?)
    }

    fn lock_for(&self, contract_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(contract_id.to_string())
            .or_default()
            .clone()
    }

    /// Read, transition and write one record under its lock
    async fn commit(&self, command: &ContractCommand) -> Result<TransitionOutcome, ContractError> {
        let lock = self.lock_for(&command.contract_id);
        let _guard = lock.lock().await;

        let contract = self.load(&command.contract_id).await?;
        let documents = self.ports.documents.list_documents(&contract.id).await?;
        let kind = command.payload.kind();
        let period_month = match kind {
            ContractCommandKind::MarkAsPaid => {
                self.ports
                    .periods
                    .period_month(&contract.project_period_id)
                    .await?
            }
            _ => None,
        };

        let outcome = {
            let ctx = TransitionContext::new(self.ports.registry.as_ref(), &self.config.local_currency)
                .with_documents(&documents)
                .with_period_month(period_month);
            transition(&contract, command, &ctx)?
        };

        let attached = self.attach_documents(&outcome.side_effects).await?;
        if let Err(e) = self
            .ports
            .repository
            .save(&outcome.contract, contract.expected_state())
            .await
        {
            self.discard_documents(&attached).await;
            return Err(e.into());
        }

        tracing::info!(
            contract_id = %contract.id,
            side = %contract.side,
            command = %kind,
            operator_id = %command.operator_id,
            status = outcome.contract.display_status(),
            version = outcome.contract.version,
            "Contract transition committed"
        );

        Ok(outcome)
    }

    /// Reject the paired partner with the client's reason
    async fn cascade_reject(
        &self,
        origin: &ContractCommand,
        project_period_id: &str,
        talent_assignment_id: &str,
        reason: &str,
    ) -> Vec<SideEffectWarning> {
        let paired = match self
            .ports
            .repository
            .find_paired(project_period_id, talent_assignment_id, ContractSide::Partner)
            .await
        {
            Ok(paired) => paired,
            Err(e) => {
                tracing::warn!(
                    project_period_id,
                    talent_assignment_id,
                    error = %e,
                    "Failed to look up paired partner contract"
                );
                return vec![SideEffectWarning::CascadeRejectFailed {
                    partner_id: None,
                    message: e.to_string(),
                }];
            }
        };

        let Some(partner) = cascade_target(paired) else {
            tracing::debug!(
                project_period_id,
                talent_assignment_id,
                "No partner contract to cascade reject"
            );
            return Vec::new();
        };

        let command = ContractCommand::new(
            partner.id.clone(),
            ContractSide::Partner,
            origin.operator_id.clone(),
            origin.operator_name.clone(),
            ContractCommandPayload::Reject {
                reason: reason.to_string(),
            },
        );

        match self.commit(&command).await {
            Ok(outcome) => {
                let mut warnings = Vec::new();
                for effect in &outcome.side_effects {
                    warnings.extend(self.run_post_commit_effect(effect).await);
                }
                warnings
            }
            // Reset concurrently: already where the cascade would put it
            Err(ContractError::InvalidTransition {
                contract_status: ContractStatus::Draft,
                ..
            }) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    partner_id = %partner.id,
                    error = %e,
                    "Cascade reject of partner contract failed"
                );
                vec![SideEffectWarning::CascadeRejectFailed {
                    partner_id: Some(partner.id),
                    message: e.to_string(),
                }]
            }
        }
    }

    /// Record every `AttachDocument` intent, all or nothing
    async fn attach_documents(&self, effects: &[SideEffect]) -> Result<Vec<Document>, ContractError> {
        let mut attached = Vec::new();
        for effect in effects {
            let SideEffect::AttachDocument {
                contract_id,
                side,
                kind,
                document_type_id,
                url,
                file_name,
            } = effect
            else {
                continue;
            };

            let document = NewDocument {
                contract_id: contract_id.clone(),
                side: *side,
                document_type_id: document_type_id.clone(),
                kind: *kind,
                url: url.clone(),
                file_name: file_name.clone(),
            };
            match self.ports.documents.create_document_record(document).await {
                Ok(document) => attached.push(document),
                Err(e) => {
                    tracing::warn!(contract_id = %contract_id, %kind, error = %e, "Failed to attach document");
                    self.discard_documents(&attached).await;
                    return Err(e.into());
                }
            }
        }
        Ok(attached)
    }

    /// Best-effort removal of documents created for a command that did not commit
    async fn discard_documents(&self, documents: &[Document]) {
        for document in documents {
            if let Err(e) = self.ports.documents.delete_document(&document.id).await {
                tracing::error!(
                    contract_id = %document.contract_id,
                    document_id = %document.id,
                    error = %e,
                    "Failed to discard document of an uncommitted transition"
                );
            }
        }
    }

    async fn run_post_commit_effect(&self, effect: &SideEffect) -> Vec<SideEffectWarning> {
        match effect {
            SideEffect::DeleteDocuments { contract_id, .. } => {
                purge_documents(
                    self.ports.documents.as_ref(),
                    contract_id,
                    self.config.document_delete_retries,
                )
                .await
            }
            // Recorded before the save
            SideEffect::AttachDocument { .. } => Vec::new(),
            // Cascades only originate from client rejects, handled in `execute`
            SideEffect::CascadeRejectPartner { .. } => Vec::new(),
        }
    }
}
