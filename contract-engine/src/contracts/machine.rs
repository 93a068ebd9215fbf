//! Contract payment state machine
//!
//! `transition` is pure: it checks the side policy, runs the action for the
//! command and folds the emitted events into a copy of the record. The
//! caller persists the new record and executes the side effects.

use super::actions::CommandAction;
use super::appliers::apply_events;
use super::error::ContractError;
use super::policy;
use super::traits::{CommandMetadata, TransitionContext, TransitionHandler};
use shared::contract::{ContractCommand, ContractEvent, ContractPayment, SideEffect};

/// Result of a successful transition
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub contract: ContractPayment,
    pub events: Vec<ContractEvent>,
    pub side_effects: Vec<SideEffect>,
}

/// Apply `command` to `contract`
pub fn transition(
    contract: &ContractPayment,
    command: &ContractCommand,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionOutcome, ContractError> {
    if command.contract_id != contract.id || command.side != contract.side {
        return Err(ContractError::InvalidInput(format!(
            "command targets {} contract payment {}, got {} {}",
            command.side, command.contract_id, contract.side, contract.id
        )));
    }

    let kind = command.payload.kind();
    policy::ensure_allowed(contract, kind)?;

    let metadata = CommandMetadata::from(command);
    let output = CommandAction::from(command).execute(contract, ctx, &metadata)?;

    let mut next = contract.clone();
    apply_events(&mut next, &output.events);

    tracing::debug!(
        contract_id = %contract.id,
        side = %contract.side,
        command = %kind,
        from = ?contract.contract_status,
        to = ?next.contract_status,
        payment = ?next.payment_status,
        events = output.events.len(),
        "transition computed"
    );

    Ok(TransitionOutcome {
        contract: next,
        events: output.events,
        side_effects: output.side_effects,
    })
}
