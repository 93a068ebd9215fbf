//! Verify command handler
//!
//! Fixes the billing configuration and computes the planned amount.
//!
//! - Client: the statement of work must already be attached (submit).
//! - Partner: a purchase order and a signed contract are required, either
//!   uploaded with this command or already attached.
//!
//! The exchange rate is pinned to 1 for local-currency contracts and a
//! Fixed contract's unit price mirrors its fixed amount.

use crate::billing::plan_amount_for;
use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use shared::contract::{
    BillingConfig, CalculationMethod, ContractEventPayload, ContractPayment, ContractSide,
    DocumentKind, EvidenceInput,
};

/// Verify action
#[derive(Debug, Clone)]
pub struct VerifyAction {
    pub billing: BillingConfig,
    pub purchase_order: Option<EvidenceInput>,
    pub contract_document: Option<EvidenceInput>,
}

impl VerifyAction {
    fn normalized_billing(&self, ctx: &TransitionContext<'_>) -> Result<BillingConfig, ContractError> {
        let mut billing = self.billing.clone();

        validate_required_text(&billing.currency_code, "currency_code", MAX_SHORT_TEXT_LEN)
            .map_err(|_| ContractError::InvalidBillingConfiguration {
                field: "currency_code",
                reason: "is required".to_string(),
            })?;
        billing.currency_code = billing.currency_code.trim().to_ascii_uppercase();

        if ctx.is_local_currency(&billing.currency_code) {
            billing.exchange_rate = 1.0;
        }
        if billing.calculation_method == CalculationMethod::Fixed
            && let Some(fixed) = billing.fixed_amount
        {
            billing.unit_price_foreign_currency = fixed;
        }
        Ok(billing)
    }
}

impl TransitionHandler for VerifyAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        let billing = self.normalized_billing(ctx)?;
        let planned = plan_amount_for(&billing)?;

        let attachments = match contract.side {
            ContractSide::Client => {
                if !ctx.has_document(DocumentKind::StatementOfWork) {
                    return Err(ContractError::MissingRequiredEvidence(
                        DocumentKind::StatementOfWork,
                    ));
                }
                Vec::new()
            }
            ContractSide::Partner => {
                let po = ctx.attach_or_require(
                    contract,
                    DocumentKind::PurchaseOrder,
                    self.purchase_order.as_ref(),
                )?;
                let signed = ctx.attach_or_require(
                    contract,
                    DocumentKind::Contract,
                    self.contract_document.as_ref(),
                )?;
                po.into_iter().chain(signed).collect()
            }
        };

        Ok(ActionOutput::new(contract, metadata)
            .event(ContractEventPayload::Verified {
                billing,
                planned_amount_local_currency: planned,
            })
            .effects(attachments))
    }
}
