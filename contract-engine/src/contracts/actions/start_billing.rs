//! StartBilling command handler
//!
//! Records the hours worked and computes the actual amount. Moves the
//! payment status from Pending to Processing. A timesheet is required,
//! uploaded here or already synchronized from the other side.

use crate::billing::compute_actual_for;
use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::money::{MAX_PERIOD_HOURS, require_finite};
use shared::contract::{ContractEventPayload, ContractPayment, DocumentKind, EvidenceInput};

/// StartBilling action
#[derive(Debug, Clone)]
pub struct StartBillingAction {
    pub actual_hours: f64,
    pub timesheet: Option<EvidenceInput>,
}

impl TransitionHandler for StartBillingAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        require_finite(self.actual_hours, "actual_hours")?;
        if self.actual_hours <= 0.0 || self.actual_hours > MAX_PERIOD_HOURS {
            return Err(ContractError::InvalidBillingConfiguration {
                field: "actual_work_hours",
                reason: format!(
                    "must be within (0, {MAX_PERIOD_HOURS}], got {}",
                    self.actual_hours
                ),
            });
        }

        let billing = contract
            .billing_config()
            .ok_or_else(|| ContractError::InvalidBillingConfiguration {
                field: "calculation_method",
                reason: "contract payment has no verified billing configuration".to_string(),
            })?;
        let planned = contract.planned_amount_local_currency.ok_or_else(|| {
            ContractError::InvalidBillingConfiguration {
                field: "planned_amount_local_currency",
                reason: "contract payment has no planned amount".to_string(),
            }
        })?;

        let attach =
            ctx.attach_or_require(contract, DocumentKind::Timesheet, self.timesheet.as_ref())?;

        let computation = compute_actual_for(&billing, self.actual_hours, planned)?;
        let actual = computation.actual_amount.ok_or_else(|| {
            ContractError::InvalidBillingConfiguration {
                field: "actual_work_hours",
                reason: "no billable hours".to_string(),
            }
        })?;

        Ok(ActionOutput::new(contract, metadata)
            .event(ContractEventPayload::BillingStarted {
                actual_work_hours: self.actual_hours,
                man_month_coefficient: computation.man_month_coefficient,
                actual_amount_local_currency: actual,
                effective_coefficient: computation.effective_coefficient,
                tier_breakdown: computation.breakdown,
            })
            .effects(attach))
    }
}
