//! Approve command handler

use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use shared::contract::{ContractEventPayload, ContractPayment};

/// Approve action
#[derive(Debug, Clone)]
pub struct ApproveAction {
    pub note: Option<String>,
}

impl TransitionHandler for ApproveAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        _ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        validate_optional_text(&self.note, "note", MAX_NOTE_LEN)?;

        Ok(ActionOutput::new(contract, metadata).event(ContractEventPayload::Approved {
            note: self.note.clone(),
        }))
    }
}
