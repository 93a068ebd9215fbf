//! Transition handler and event applier traits
//!
//! Actions validate a command against the current record and emit events
//! plus side-effect intents. Appliers fold events into the record. Neither
//! performs I/O.

use enum_dispatch::enum_dispatch;

use super::error::ContractError;
use super::ports::DocumentTypeRegistry;
use crate::utils::validation::{MAX_URL_LEN, validate_required_text};
use shared::contract::{
    ContractCommand, ContractEvent, ContractEventPayload, ContractPayment, ContractSide, Document,
    DocumentKind, EvidenceInput, PeriodMonth, SideEffect,
};

/// Read-only inputs a transition may consult
pub struct TransitionContext<'a> {
    pub registry: &'a dyn DocumentTypeRegistry,
    /// Documents currently attached to the contract payment
    pub documents: &'a [Document],
    /// Currency whose exchange rate is pinned to 1
    pub local_currency: &'a str,
    /// Month of the owning project period, when it was resolved
    pub period_month: Option<PeriodMonth>,
}

impl<'a> TransitionContext<'a> {
    pub fn new(registry: &'a dyn DocumentTypeRegistry, local_currency: &'a str) -> Self {
        Self {
            registry,
            documents: &[],
            local_currency,
            period_month: None,
        }
    }

    pub fn with_documents(mut self, documents: &'a [Document]) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_period_month(mut self, period_month: Option<PeriodMonth>) -> Self {
        self.period_month = period_month;
        self
    }

    pub fn has_document(&self, kind: DocumentKind) -> bool {
        self.documents.iter().any(|d| d.kind == kind)
    }

    pub fn is_local_currency(&self, currency_code: &str) -> bool {
        currency_code.trim().eq_ignore_ascii_case(self.local_currency)
    }

    /// Build an attach intent for freshly uploaded evidence
    pub fn attach(
        &self,
        contract: &ContractPayment,
        kind: DocumentKind,
        evidence: &EvidenceInput,
    ) -> Result<SideEffect, ContractError> {
        validate_required_text(&evidence.url, "evidence url", MAX_URL_LEN)?;
        let document_type = self
            .registry
            .find_type_by_name(kind.registry_name())
            .ok_or_else(|| ContractError::DocumentTypeNotRegistered(kind.registry_name().into()))?;

        Ok(SideEffect::AttachDocument {
            contract_id: contract.id.clone(),
            side: contract.side,
            kind,
            document_type_id: document_type.id,
            url: evidence.url.clone(),
            file_name: evidence.file_name.clone(),
        })
    }

    /// Attach `evidence` when supplied, otherwise require an attached document
    pub fn attach_or_require(
        &self,
        contract: &ContractPayment,
        kind: DocumentKind,
        evidence: Option<&EvidenceInput>,
    ) -> Result<Option<SideEffect>, ContractError> {
        match evidence {
            Some(evidence) => self.attach(contract, kind, evidence).map(Some),
            None if self.has_document(kind) => Ok(None),
            None => Err(ContractError::MissingRequiredEvidence(kind)),
        }
    }
}

/// Command metadata carried onto every emitted event
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub operator_id: String,
    pub operator_name: String,
    pub timestamp: i64,
}

impl From<&ContractCommand> for CommandMetadata {
    fn from(cmd: &ContractCommand) -> Self {
        Self {
            command_id: cmd.command_id.clone(),
            operator_id: cmd.operator_id.clone(),
            operator_name: cmd.operator_name.clone(),
            timestamp: cmd.timestamp,
        }
    }
}

/// Events and side effects produced by one action
#[derive(Debug)]
pub struct ActionOutput {
    contract_id: String,
    side: ContractSide,
    next_version: u64,
    metadata: CommandMetadata,
    pub events: Vec<ContractEvent>,
    pub side_effects: Vec<SideEffect>,
}

impl ActionOutput {
    pub fn new(contract: &ContractPayment, metadata: &CommandMetadata) -> Self {
        Self {
            contract_id: contract.id.clone(),
            side: contract.side,
            next_version: contract.version + 1,
            metadata: metadata.clone(),
            events: Vec::new(),
            side_effects: Vec::new(),
        }
    }

    /// Append an event with the next record version
    pub fn event(mut self, payload: ContractEventPayload) -> Self {
        let version = self.next_version;
        self.next_version += 1;
        self.events.push(ContractEvent {
            event_id: shared::util::new_id(),
            contract_id: self.contract_id.clone(),
            side: self.side,
            version,
            timestamp: shared::util::now_millis(),
            client_timestamp: self.metadata.timestamp,
            operator_id: self.metadata.operator_id.clone(),
            operator_name: self.metadata.operator_name.clone(),
            command_id: self.metadata.command_id.clone(),
            event_type: payload.event_type(),
            payload,
        });
        self
    }

    pub fn effect(mut self, effect: SideEffect) -> Self {
        self.side_effects.push(effect);
        self
    }

    pub fn effects(mut self, effects: impl IntoIterator<Item = SideEffect>) -> Self {
        self.side_effects.extend(effects);
        self
    }
}

/// Command handler trait
///
/// Called after the side policy accepted the command for the current
/// status; handlers validate the payload and evidence.
pub trait TransitionHandler {
    fn execute(
        &self,
        contract: &ContractPayment,
        ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError>;
}

/// Event applier trait
///
/// Appliers are pure: they mutate the record and nothing else.
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent);
}
