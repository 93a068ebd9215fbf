//! Side policies - which commands are legal from which status
//!
//! Client and partner contract payments share one record type and one set
//! of actions. The only difference between the two lifecycles is captured
//! here, as two independent transition tables.
//!
//! ```text
//! Client:  Draft ─submit─▶ Submitted ─verify─▶ Verified ─approve─▶ Approved
//!            ▲               │   ▲                                   │
//!            │   request_info▼   │ submit                 start_billing
//!            │        NeedMoreInformation                            ▼
//!            └──────── reject (any non-Draft, billing not started)  Processing ─invoice─▶ Invoiced
//!                                                                    └──record_payment──▶ PartiallyPaid ─▶ Paid
//!
//! Partner: Draft ─verify─▶ Verified ─approve─▶ Approved
//!                              └──────┬───────────┘
//!                               start_billing ─▶ Processing ─mark_as_paid─▶ Paid
//! ```

use super::error::ContractError;
use shared::contract::{
    ContractCommandKind, ContractPayment, ContractSide, ContractStatus, PaymentStatus,
};

use ContractCommandKind as Cmd;
use ContractStatus as C;
use PaymentStatus as P;

/// Reject is open until billing starts, from any status but Draft
fn can_reject(contract_status: ContractStatus, payment_status: PaymentStatus) -> bool {
    contract_status != C::Draft && payment_status == P::Pending
}

fn client_allows(kind: ContractCommandKind, c: ContractStatus, p: PaymentStatus) -> bool {
    match kind {
        Cmd::Submit => matches!(c, C::Draft | C::NeedMoreInformation) && p == P::Pending,
        Cmd::RequestInformation => c == C::Submitted && p == P::Pending,
        Cmd::Verify => c == C::Submitted && p == P::Pending,
        Cmd::Approve => c == C::Verified && p == P::Pending,
        Cmd::Reject => can_reject(c, p),
        Cmd::StartBilling => c == C::Approved && p == P::Pending,
        Cmd::Invoice => c == C::Approved && p == P::Processing,
        Cmd::RecordPayment => {
            c == C::Approved && matches!(p, P::Processing | P::Invoiced | P::PartiallyPaid)
        }
        Cmd::MarkAsPaid => false,
        Cmd::AddNote => true,
    }
}

fn partner_allows(kind: ContractCommandKind, c: ContractStatus, p: PaymentStatus) -> bool {
    match kind {
        Cmd::Submit | Cmd::RequestInformation | Cmd::Invoice | Cmd::RecordPayment => false,
        Cmd::Verify => c == C::Draft && p == P::Pending,
        Cmd::Approve => c == C::Verified && p == P::Pending,
        Cmd::Reject => can_reject(c, p),
        Cmd::StartBilling => matches!(c, C::Verified | C::Approved) && p == P::Pending,
        Cmd::MarkAsPaid => matches!(c, C::Verified | C::Approved) && p == P::Processing,
        Cmd::AddNote => true,
    }
}

/// Whether `kind` is legal for a `side` record in the given statuses
pub fn is_allowed(
    side: ContractSide,
    kind: ContractCommandKind,
    contract_status: ContractStatus,
    payment_status: PaymentStatus,
) -> bool {
    match side {
        ContractSide::Client => client_allows(kind, contract_status, payment_status),
        ContractSide::Partner => partner_allows(kind, contract_status, payment_status),
    }
}

/// Status-checked precondition for a command
///
/// Finished records only accept notes.
pub fn ensure_allowed(
    contract: &ContractPayment,
    kind: ContractCommandKind,
) -> Result<(), ContractError> {
    let finished_block = contract.is_finished && kind != Cmd::AddNote;
    if finished_block
        || !is_allowed(
            contract.side,
            kind,
            contract.contract_status,
            contract.payment_status,
        )
    {
        return Err(ContractError::InvalidTransition {
            side: contract.side,
            command: kind,
            contract_status: contract.contract_status,
            payment_status: contract.payment_status,
        });
    }
    Ok(())
}
