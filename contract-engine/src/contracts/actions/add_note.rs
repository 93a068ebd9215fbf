//! AddNote command handler
//!
//! Replaces the note (not append). Empty string clears it. Legal in every
//! status, including finished records.

use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use shared::contract::{ContractEventPayload, ContractPayment};

/// AddNote action
#[derive(Debug, Clone)]
pub struct AddNoteAction {
    pub note: String,
}

impl TransitionHandler for AddNoteAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        _ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        // Empty string clears the note
        if !self.note.is_empty() {
            validate_required_text(&self.note, "note", MAX_NOTE_LEN)?;
        }

        Ok(ActionOutput::new(contract, metadata).event(ContractEventPayload::NoteAdded {
            note: self.note.clone(),
        }))
    }
}
