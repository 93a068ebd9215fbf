//! Client/partner coupling
//!
//! A client and a partner contract payment sharing a period/assignment pair
//! are derived from the same statement of work. Rejecting the client side
//! pulls the partner side back to Draft with the same reason.

use shared::contract::{ContractPayment, ContractSide, ContractStatus, SideEffect};

/// Cascade intent emitted by a client reject; partner rejects do not cascade
pub fn cascade_effect(contract: &ContractPayment, reason: &str) -> Option<SideEffect> {
    match contract.side {
        ContractSide::Client => Some(SideEffect::CascadeRejectPartner {
            project_period_id: contract.project_period_id.clone(),
            talent_assignment_id: contract.talent_assignment_id.clone(),
            reason: reason.to_string(),
        }),
        ContractSide::Partner => None,
    }
}

/// The paired partner that still has to be rejected, if any
///
/// A missing partner or one already back in Draft is a no-op.
pub fn cascade_target(partner: Option<ContractPayment>) -> Option<ContractPayment> {
    partner.filter(|p| p.side == ContractSide::Partner && p.contract_status != ContractStatus::Draft)
}
