//! Submit command handler
//!
//! Sales submits a client contract payment with its statement of work.
//! Resubmission after an information request may replace the SOW; without
//! a new upload the attached one is reused.

use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use shared::contract::{ContractEventPayload, ContractPayment, DocumentKind, EvidenceInput};

/// Submit action
#[derive(Debug, Clone)]
pub struct SubmitAction {
    pub sow: Option<EvidenceInput>,
    pub note: Option<String>,
}

impl TransitionHandler for SubmitAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        validate_optional_text(&self.note, "note", MAX_NOTE_LEN)?;

        let attach =
            ctx.attach_or_require(contract, DocumentKind::StatementOfWork, self.sow.as_ref())?;

        Ok(ActionOutput::new(contract, metadata)
            .event(ContractEventPayload::Submitted {
                note: self.note.clone(),
            })
            .effects(attach))
    }
}
