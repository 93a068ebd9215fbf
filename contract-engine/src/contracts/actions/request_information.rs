//! RequestInformation command handler
//!
//! A reviewer sends a submitted client contract payment back to sales.

use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use shared::contract::{ContractEventPayload, ContractPayment};

/// RequestInformation action
#[derive(Debug, Clone)]
pub struct RequestInformationAction {
    pub note: String,
}

impl TransitionHandler for RequestInformationAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        _ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        validate_required_text(&self.note, "note", MAX_NOTE_LEN)?;

        Ok(ActionOutput::new(contract, metadata).event(
            ContractEventPayload::InformationRequested {
                note: self.note.trim().to_string(),
            },
        ))
    }
}
