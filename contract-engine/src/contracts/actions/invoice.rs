//! Invoice command handler

use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_optional_text};
use shared::contract::{ContractEventPayload, ContractPayment};

/// Invoice action
#[derive(Debug, Clone)]
pub struct InvoiceAction {
    pub invoice_number: Option<String>,
}

impl TransitionHandler for InvoiceAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        _ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        validate_optional_text(&self.invoice_number, "invoice_number", MAX_SHORT_TEXT_LEN)?;
        let invoice_number = self
            .invoice_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(ActionOutput::new(contract, metadata)
            .event(ContractEventPayload::Invoiced { invoice_number }))
    }
}
