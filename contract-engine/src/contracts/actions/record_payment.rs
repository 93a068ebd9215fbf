//! RecordPayment command handler
//!
//! Accumulates client payments. The contract payment is PartiallyPaid until
//! the total reaches the actual amount (within 0.01), then Paid and
//! finished. Overpaying is rejected.

use crate::contracts::traits::{ActionOutput, CommandMetadata, TransitionContext, TransitionHandler};
use crate::contracts::ContractError;
use crate::money::{
    MONEY_TOLERANCE, money_eq, normalize_decimal, require_positive_amount, to_decimal, to_f64,
};
use chrono::NaiveDate;
use shared::contract::{ContractEventPayload, ContractPayment, DocumentKind, EvidenceInput};

/// RecordPayment action
#[derive(Debug, Clone)]
pub struct RecordPaymentAction {
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub proof: Option<EvidenceInput>,
}

impl TransitionHandler for RecordPaymentAction {
    fn execute(
        &self,
        contract: &ContractPayment,
        ctx: &TransitionContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<ActionOutput, ContractError> {
        require_positive_amount(self.amount, "amount")?;

        let actual = contract.actual_amount_local_currency.ok_or_else(|| {
            ContractError::InvalidBillingConfiguration {
                field: "actual_amount_local_currency",
                reason: "billing has not been computed".to_string(),
            }
        })?;

        let actual_dec = to_decimal(actual);
        let already_paid = to_decimal(contract.total_paid_amount);
        let total = normalize_decimal(already_paid + to_decimal(self.amount));
        if total > actual_dec + MONEY_TOLERANCE {
            return Err(ContractError::AmountMismatch {
                expected: to_f64(actual_dec - already_paid),
                actual: self.amount,
            });
        }
        let total_paid_amount = to_f64(total);
        let fully_paid = money_eq(total_paid_amount, actual);

        let attach = match &self.proof {
            Some(proof) => Some(ctx.attach(contract, DocumentKind::PaymentOrder, proof)?),
            None => None,
        };

        Ok(ActionOutput::new(contract, metadata)
            .event(ContractEventPayload::PaymentRecorded {
                amount: self.amount,
                payment_date: self.payment_date,
                total_paid_amount,
                fully_paid,
            })
            .effects(attach))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::test_support::*;
    use shared::contract::{ContractCommandPayload, ContractStatus, PaymentStatus};

    fn pay(amount: f64) -> ContractCommandPayload {
        ContractCommandPayload::RecordPayment {
            amount,
            payment_date: NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
            proof: None,
        }
    }

    #[test]
    fn test_partial_then_full_payment() {
        let contract = billed(client(ContractStatus::Approved));

        let first = run(&contract, &[], pay(40_000_000.0)).unwrap();
        assert_eq!(first.contract.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(first.contract.total_paid_amount, 40_000_000.0);
        assert!(!first.contract.is_finished);

        let second = run(&first.contract, &[], pay(44_375_000.0)).unwrap();
        assert_eq!(second.contract.payment_status, PaymentStatus::Paid);
        assert_eq!(second.contract.total_paid_amount, 84_375_000.0);
        assert!(second.contract.is_finished);
        assert_eq!(second.contract.display_status(), "FINISHED");
        assert_eq!(
            second.contract.last_payment_date,
            NaiveDate::from_ymd_opt(2024, 4, 5)
        );
    }

    #[test]
    fn test_payment_within_tolerance_settles() {
        let contract = billed(client(ContractStatus::Approved));
        let outcome = run(&contract, &[], pay(84_374_999.995)).unwrap();
        assert_eq!(outcome.contract.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_overpayment_rejected() {
        let contract = billed(client(ContractStatus::Approved));
        let err = run(&contract, &[], pay(90_000_000.0)).unwrap_err();
        assert_eq!(
            err,
            ContractError::AmountMismatch {
                expected: 84_375_000.0,
                actual: 90_000_000.0,
            }
        );
    }

    #[test]
    fn test_payment_with_proof_attaches_payment_order() {
        let contract = billed(client(ContractStatus::Approved));
        let outcome = run(
            &contract,
            &[],
            ContractCommandPayload::RecordPayment {
                amount: 1_000.0,
                payment_date: NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
                proof: Some(evidence("bank-transfer")),
            },
        )
        .unwrap();
        assert_eq!(
            attached_kinds(&outcome.side_effects),
            vec![DocumentKind::PaymentOrder]
        );
    }

    #[test]
    fn test_zero_payment_rejected() {
        let contract = billed(client(ContractStatus::Approved));
        assert!(matches!(
            run(&contract, &[], pay(0.0)),
            Err(ContractError::InvalidInput(_))
        ));
    }
}
