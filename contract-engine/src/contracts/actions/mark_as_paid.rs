//! MarkAsPaid command handler
//!
//! Settles a partner contract payment in one payment. The paid amount must
//! equal the actual amount (within 0.01) and the payment date must fall in
//! the owning period's calendar month. Proof of payment and the partner's
//! receipt are attached.

use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::money::{money_eq, normalize, require_positive_amount};
use chrono::NaiveDate;
use shared::contract::{ContractEventPayload, ContractPayment, DocumentKind, EvidenceInput};

/// MarkAsPaid action
#[derive(Debug, Clone)]
pub struct MarkAsPaidAction {
    pub paid_amount: f64,
    pub payment_date: NaiveDate,
    pub proof: EvidenceInput,
    pub receipt: EvidenceInput,
}

impl TransitionHandler for MarkAsPaidAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        require_positive_amount(self.paid_amount, "paid_amount")?;

        let actual = contract.actual_amount_local_currency.ok_or_else(|| {
            ContractError::InvalidBillingConfiguration {
                field: "actual_amount_local_currency",
                reason: "billing has not been computed".to_string(),
            }
        })?;
        if !money_eq(self.paid_amount, actual) {
            return Err(ContractError::AmountMismatch {
                expected: actual,
                actual: self.paid_amount,
            });
        }

        let period = ctx.period_month.ok_or_else(|| {
            ContractError::InvalidInput(format!(
                "period month of project period {} is unknown",
                contract.project_period_id
            ))
        })?;
        if !period.contains(self.payment_date) {
            return Err(ContractError::DateOutOfRange {
                date: self.payment_date,
                period,
            });
        }

        let proof = ctx.attach(contract, DocumentKind::PaymentOrder, &self.proof)?;
        let receipt = ctx.attach(contract, DocumentKind::Receipt, &self.receipt)?;

        Ok(ActionOutput::new(contract, metadata)
            .event(ContractEventPayload::MarkedAsPaid {
                paid_amount: normalize(self.paid_amount),
                payment_date: self.payment_date,
            })
            .effect(proof)
            .effect(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::ports::StaticDocumentTypeRegistry;
    use crate::contracts::test_support::*;
    use shared::contract::{ContractCommandPayload, ContractStatus, PaymentStatus, PeriodMonth};

    fn mark_paid(amount: f64, date: NaiveDate) -> ContractCommandPayload {
        ContractCommandPayload::MarkAsPaid {
            paid_amount: amount,
            payment_date: date,
            proof: evidence("payment-order"),
            receipt: evidence("receipt"),
        }
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_mark_as_paid_finishes_partner() {
        let contract = billed(partner(ContractStatus::Verified));
        let outcome = run(&contract, &[], mark_paid(84_375_000.0, march(31))).unwrap();

        let paid = outcome.contract;
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert!(paid.is_finished);
        assert_eq!(paid.total_paid_amount, 84_375_000.0);
        assert!(paid.paid_at.is_some());
        assert_eq!(
            attached_kinds(&outcome.side_effects),
            vec![DocumentKind::PaymentOrder, DocumentKind::Receipt]
        );
    }

    #[test]
    fn test_amount_beyond_tolerance_mismatches() {
        let contract = billed(partner(ContractStatus::Verified));
        for amount in [84_374_999.98, 84_375_000.02, 84_000_000.0] {
            assert!(matches!(
                run(&contract, &[], mark_paid(amount, march(15))),
                Err(ContractError::AmountMismatch { .. })
            ));
        }
        assert!(run(&contract, &[], mark_paid(84_375_000.005, march(15))).is_ok());
    }

    #[test]
    fn test_payment_date_outside_period_month() {
        let contract = billed(partner(ContractStatus::Verified));
        let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(
            run(&contract, &[], mark_paid(84_375_000.0, april)).unwrap_err(),
            ContractError::DateOutOfRange {
                date: april,
                period: PeriodMonth::new(2024, 3),
            }
        );
    }

    #[test]
    fn test_unknown_period_month() {
        let contract = billed(partner(ContractStatus::Verified));
        let registry = StaticDocumentTypeRegistry::with_defaults();
        let ctx = TransitionContext::new(&registry, LOCAL_CURRENCY);
        let action = MarkAsPaidAction {
            paid_amount: 84_375_000.0,
            payment_date: march(10),
            proof: evidence("payment-order"),
            receipt: evidence("receipt"),
        };
        assert!(matches!(
            action.execute(&contract, &ctx, &metadata()),
            Err(ContractError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_client_cannot_mark_as_paid() {
        let contract = billed(client(ContractStatus::Approved));
        assert!(matches!(
            run(&contract, &[], mark_paid(84_375_000.0, march(10))),
            Err(ContractError::InvalidTransition { .. })
        ));
    }
}
