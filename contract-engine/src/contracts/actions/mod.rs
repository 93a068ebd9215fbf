//! Command action implementations
//!
//! Each action implements the `TransitionHandler` trait and handles
//! one specific command type.

use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use shared::contract::{ContractCommand, ContractCommandPayload, ContractPayment};

mod add_note;
mod approve;
mod invoice;
mod mark_as_paid;
mod record_payment;
mod reject;
mod request_information;
mod start_billing;
mod submit;
mod verify;

pub use add_note::AddNoteAction;
pub use approve::ApproveAction;
pub use invoice::InvoiceAction;
pub use mark_as_paid::MarkAsPaidAction;
pub use record_payment::RecordPaymentAction;
pub use reject::RejectAction;
pub use request_information::RequestInformationAction;
pub use start_billing::StartBillingAction;
pub use submit::SubmitAction;
pub use verify::VerifyAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    Submit(SubmitAction),
    RequestInformation(RequestInformationAction),
    Verify(VerifyAction),
    Approve(ApproveAction),
    Reject(RejectAction),
    StartBilling(StartBillingAction),
    Invoice(InvoiceAction),
    RecordPayment(RecordPaymentAction),
    MarkAsPaid(MarkAsPaidAction),
    AddNote(AddNoteAction),
}

/// Manual implementation of TransitionHandler for CommandAction
impl TransitionHandler for CommandAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        match self {
            CommandAction::Submit(action) => action.execute(contract, ctx, metadata),
            CommandAction::RequestInformation(action) => action.execute(contract, ctx, metadata),
            CommandAction::Verify(action) => action.execute(contract, ctx, metadata),
            CommandAction::Approve(action) => action.execute(contract, ctx, metadata),
            CommandAction::Reject(action) => action.execute(contract, ctx, metadata),
            CommandAction::StartBilling(action) => action.execute(contract, ctx, metadata),
            CommandAction::Invoice(action) => action.execute(contract, ctx, metadata),
            CommandAction::RecordPayment(action) => action.execute(contract, ctx, metadata),
            CommandAction::MarkAsPaid(action) => action.execute(contract, ctx, metadata),
            CommandAction::AddNote(action) => action.execute(contract, ctx, metadata),
        }
    }
}

/// Convert ContractCommand to CommandAction
///
/// This is the ONLY place with a match on ContractCommandPayload.
impl From<&ContractCommand> for CommandAction {
    fn from(cmd: &ContractCommand) -> Self {
        match &cmd.payload {
            ContractCommandPayload::Submit { sow, note } => CommandAction::Submit(SubmitAction {
                sow: sow.clone(),
                note: note.clone(),
            }),
            ContractCommandPayload::RequestInformation { note } => {
                CommandAction::RequestInformation(RequestInformationAction { note: note.clone() })
            }
            ContractCommandPayload::Verify {
                billing,
                purchase_order,
                contract_document,
            } => CommandAction::Verify(VerifyAction {
                billing: billing.clone(),
                purchase_order: purchase_order.clone(),
                contract_document: contract_document.clone(),
            }),
            ContractCommandPayload::Approve { note } => {
                CommandAction::Approve(ApproveAction { note: note.clone() })
            }
            ContractCommandPayload::Reject { reason } => CommandAction::Reject(RejectAction {
                reason: reason.clone(),
            }),
            ContractCommandPayload::StartBilling {
                actual_hours,
                timesheet,
            } => CommandAction::StartBilling(StartBillingAction {
                actual_hours: *actual_hours,
                timesheet: timesheet.clone(),
            }),
            ContractCommandPayload::Invoice { invoice_number } => {
                CommandAction::Invoice(InvoiceAction {
                    invoice_number: invoice_number.clone(),
                })
            }
            ContractCommandPayload::RecordPayment {
                amount,
                payment_date,
                proof,
            } => CommandAction::RecordPayment(RecordPaymentAction {
                amount: *amount,
                payment_date: *payment_date,
                proof: proof.clone(),
            }),
            ContractCommandPayload::MarkAsPaid {
                paid_amount,
                payment_date,
                proof,
                receipt,
            } => CommandAction::MarkAsPaid(MarkAsPaidAction {
                paid_amount: *paid_amount,
                payment_date: *payment_date,
                proof: proof.clone(),
                receipt: receipt.clone(),
            }),
            ContractCommandPayload::AddNote { note } => {
                CommandAction::AddNote(AddNoteAction { note: note.clone() })
            }
        }
    }
}
