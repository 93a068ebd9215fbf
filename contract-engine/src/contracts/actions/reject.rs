//! Reject command handler
//!
//! Rejecting sends a contract payment back to Draft: a `Rejected` event
//! followed by `ResetToDraft`. Billing configuration is cleared, every
//! attached document is scheduled for deletion and a client reject
//! cascades to the paired partner.

use crate::contracts::coupling::cascade_effect;
use crate::contracts::invalidation::invalidation_effect;
use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use shared::contract::{ContractEventPayload, ContractPayment};

/// Reject action
#[derive(Debug, Clone)]
pub struct RejectAction {
    pub reason: String,
}

impl TransitionHandler for RejectAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        _ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        validate_required_text(&self.reason, "reason", MAX_NOTE_LEN)?;
        let reason = self.reason.trim().to_string();

        Ok(ActionOutput::new(contract, metadata)
            .event(ContractEventPayload::Rejected {
                reason: reason.clone(),
                from_status: contract.contract_status,
            })
            .event(ContractEventPayload::ResetToDraft {
                reason: reason.clone(),
            })
            .effect(invalidation_effect(contract))
            .effects(cascade_effect(contract, &reason)))
    }
}

#[cfg(test)]
mod tests {
    use crate::contracts::test_support::*;
    use crate::contracts::ContractError;
    use shared::contract::{
        ContractCommandPayload, ContractEventType, ContractStatus, DocumentKind, PaymentStatus,
        SideEffect,
    };

    fn reject(reason: &str) -> ContractCommandPayload {
        ContractCommandPayload::Reject {
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_client_reject_resets_and_cascades() {
        let contract = client(ContractStatus::Verified);
        let docs = [document(&contract, DocumentKind::StatementOfWork)];
        let outcome = run(&contract, &docs, reject("SOW expired")).unwrap();

        let types: Vec<_> = outcome.events.iter().map(|e| e.event_type).collect();
        assert_eq!(
            types,
            vec![ContractEventType::Rejected, ContractEventType::ResetToDraft]
        );
        assert_eq!(outcome.events[1].version, contract.version + 2);

        let reset = &outcome.contract;
        assert_eq!(reset.contract_status, ContractStatus::Draft);
        assert_eq!(reset.rejection_reason.as_deref(), Some("SOW expired"));
        assert!(reset.billing_config().is_none());
        assert!(reset.planned_amount_local_currency.is_none());

        assert_eq!(
            outcome.side_effects,
            vec![
                SideEffect::DeleteDocuments {
                    contract_id: "c-1".into(),
                    side: contract.side,
                },
                SideEffect::CascadeRejectPartner {
                    project_period_id: "pp-1".into(),
                    talent_assignment_id: "ta-1".into(),
                    reason: "SOW expired".into(),
                },
            ]
        );
    }

    #[test]
    fn test_partner_reject_does_not_cascade() {
        let contract = partner(ContractStatus::Approved);
        let outcome = run(&contract, &[], reject("Wrong rate")).unwrap();
        assert_eq!(outcome.contract.contract_status, ContractStatus::Draft);
        assert_eq!(outcome.side_effects.len(), 1);
        assert!(matches!(
            outcome.side_effects[0],
            SideEffect::DeleteDocuments { .. }
        ));
    }

    #[test]
    fn test_reject_requires_reason() {
        let contract = client(ContractStatus::Verified);
        assert!(matches!(
            run(&contract, &[], reject("")),
            Err(ContractError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reject_after_billing_started_is_invalid() {
        let contract = billed(client(ContractStatus::Approved));
        assert_eq!(contract.payment_status, PaymentStatus::Processing);
        assert!(matches!(
            run(&contract, &[], reject("late")),
            Err(ContractError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reject_draft_is_invalid() {
        let contract = client(ContractStatus::Draft);
        assert!(matches!(
            run(&contract, &[], reject("nothing to reject")),
            Err(ContractError::InvalidTransition { .. })
        ));
    }
}
