//! Approval lifecycle appliers

use super::touch;
use crate::contracts::traits::EventApplier;
use shared::contract::{ContractEvent, ContractEventPayload, ContractPayment, ContractStatus};

/// Submitted applier
pub struct SubmittedApplier;

impl EventApplier for SubmittedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::Submitted { note } = &event.payload {
            contract.contract_status = ContractStatus::Submitted;
            contract.rejection_reason = None;
            if let Some(note) = note {
                contract.notes = Some(note.clone());
            }
            touch(contract, event);
        }
    }
}

/// InformationRequested applier
pub struct InformationRequestedApplier;

impl EventApplier for InformationRequestedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::InformationRequested { note } = &event.payload {
            contract.contract_status = ContractStatus::NeedMoreInformation;
            contract.notes = Some(note.clone());
            touch(contract, event);
        }
    }
}

/// Verified applier - fixes billing configuration and planned amount
pub struct VerifiedApplier;

impl EventApplier for VerifiedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::Verified {
            billing,
            planned_amount_local_currency,
        } = &event.payload
        {
            contract.apply_verified_billing(billing, *planned_amount_local_currency);
            contract.contract_status = ContractStatus::Verified;
            contract.rejection_reason = None;
            touch(contract, event);
        }
    }
}

/// Approved applier
pub struct ApprovedApplier;

impl EventApplier for ApprovedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::Approved { note } = &event.payload {
            contract.contract_status = ContractStatus::Approved;
            if let Some(note) = note {
                contract.notes = Some(note.clone());
            }
            touch(contract, event);
        }
    }
}

/// Rejected applier
pub struct RejectedApplier;

impl EventApplier for RejectedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::Rejected { reason, .. } = &event.payload {
            contract.contract_status = ContractStatus::Rejected;
            contract.rejection_reason = Some(reason.clone());
            touch(contract, event);
        }
    }
}

/// ResetToDraft applier - clears billing, keeps the rejection reason
pub struct ResetToDraftApplier;

impl EventApplier for ResetToDraftApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::ResetToDraft { reason } = &event.payload {
            contract.contract_status = ContractStatus::Draft;
            contract.clear_billing();
            contract.rejection_reason = Some(reason.clone());
            touch(contract, event);
        }
    }
}

/// NoteAdded applier
///
/// Empty note string clears the note (sets to None).
pub struct NoteAddedApplier;

impl EventApplier for NoteAddedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::NoteAdded { note } = &event.payload {
            contract.notes = if note.is_empty() {
                None
            } else {
                Some(note.clone())
            };
            touch(contract, event);
        }
    }
}
