//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles
//! one specific event type. Appliers are PURE functions.

use enum_dispatch::enum_dispatch;

use crate::contracts::traits::EventApplier;
use shared::contract::{ContractEvent, ContractEventPayload, ContractPayment};

mod billing;
mod lifecycle;

pub use billing::{
    BillingStartedApplier, InvoicedApplier, MarkedAsPaidApplier, PaymentRecordedApplier,
};
pub use lifecycle::{
    ApprovedApplier, InformationRequestedApplier, NoteAddedApplier, RejectedApplier,
    ResetToDraftApplier, SubmittedApplier, VerifiedApplier,
};

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    Submitted(SubmittedApplier),
    InformationRequested(InformationRequestedApplier),
    Verified(VerifiedApplier),
    Approved(ApprovedApplier),
    Rejected(RejectedApplier),
    ResetToDraft(ResetToDraftApplier),
    BillingStarted(BillingStartedApplier),
    Invoiced(InvoicedApplier),
    PaymentRecorded(PaymentRecordedApplier),
    MarkedAsPaid(MarkedAsPaidApplier),
    NoteAdded(NoteAddedApplier),
}

/// Convert ContractEvent reference to EventAction
///
/// This is the ONLY place with a match on ContractEventPayload.
impl From<&ContractEvent> for EventAction {
    fn from(event: &ContractEvent) -> Self {
        match &event.payload {
            ContractEventPayload::Submitted { .. } => EventAction::Submitted(SubmittedApplier),
            ContractEventPayload::InformationRequested { .. } => {
                EventAction::InformationRequested(InformationRequestedApplier)
            }
            ContractEventPayload::Verified { .. } => EventAction::Verified(VerifiedApplier),
            ContractEventPayload::Approved { .. } => EventAction::Approved(ApprovedApplier),
            ContractEventPayload::Rejected { .. } => EventAction::Rejected(RejectedApplier),
            ContractEventPayload::ResetToDraft { .. } => {
                EventAction::ResetToDraft(ResetToDraftApplier)
            }
            ContractEventPayload::BillingStarted { .. } => {
                EventAction::BillingStarted(BillingStartedApplier)
            }
            ContractEventPayload::Invoiced { .. } => EventAction::Invoiced(InvoicedApplier),
            ContractEventPayload::PaymentRecorded { .. } => {
                EventAction::PaymentRecorded(PaymentRecordedApplier)
            }
            ContractEventPayload::MarkedAsPaid { .. } => {
                EventAction::MarkedAsPaid(MarkedAsPaidApplier)
            }
            ContractEventPayload::NoteAdded { .. } => EventAction::NoteAdded(NoteAddedApplier),
        }
    }
}

/// Fold a sequence of events into a record
pub fn apply_events(contract: &mut ContractPayment, events: &[ContractEvent]) {
    for event in events {
        EventAction::from(event).apply(contract, event);
    }
}

/// Version and timestamp bookkeeping shared by every applier
fn touch(contract: &mut ContractPayment, event: &ContractEvent) {
    contract.version = event.version;
    contract.updated_at = event.timestamp;
}

#[cfg(test)]
fn event(contract: &ContractPayment, version: u64, payload: ContractEventPayload) -> ContractEvent {
    ContractEvent {
        event_id: format!("evt-{version}"),
        contract_id: contract.id.clone(),
        side: contract.side,
        version,
        timestamp: 1_700_000_000_000 + version as i64,
        client_timestamp: 1_700_000_000_000,
        operator_id: "op-1".to_string(),
        operator_name: "Test Operator".to_string(),
        command_id: "cmd-1".to_string(),
        event_type: payload.event_type(),
        payload,
    }
}
