//! Billing and payment appliers

use super::touch;
use crate::contracts::traits::EventApplier;
use shared::contract::{ContractEvent, ContractEventPayload, ContractPayment, PaymentStatus};

/// BillingStarted applier
pub struct BillingStartedApplier;

impl EventApplier for BillingStartedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::BillingStarted {
            actual_work_hours,
            man_month_coefficient,
            actual_amount_local_currency,
            effective_coefficient,
            tier_breakdown,
        } = &event.payload
        {
            contract.actual_work_hours = Some(*actual_work_hours);
            contract.man_month_coefficient = Some(*man_month_coefficient);
            contract.actual_amount_local_currency = Some(*actual_amount_local_currency);
            contract.effective_coefficient = *effective_coefficient;
            contract.tier_breakdown = tier_breakdown.clone();
            contract.payment_status = PaymentStatus::Processing;
            touch(contract, event);
        }
    }
}

/// Invoiced applier
pub struct InvoicedApplier;

impl EventApplier for InvoicedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::Invoiced { invoice_number } = &event.payload {
            contract.payment_status = PaymentStatus::Invoiced;
            contract.invoice_number = invoice_number.clone();
            contract.invoiced_at = Some(event.timestamp);
            touch(contract, event);
        }
    }
}

/// PaymentRecorded applier
pub struct PaymentRecordedApplier;

impl EventApplier for PaymentRecordedApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::PaymentRecorded {
            payment_date,
            total_paid_amount,
            fully_paid,
            ..
        } = &event.payload
        {
            contract.total_paid_amount = *total_paid_amount;
            contract.last_payment_date = Some(*payment_date);
            if *fully_paid {
                contract.payment_status = PaymentStatus::Paid;
                contract.is_finished = true;
                contract.paid_at = Some(event.timestamp);
            } else {
                contract.payment_status = PaymentStatus::PartiallyPaid;
            }
            touch(contract, event);
        }
    }
}

/// MarkedAsPaid applier - settles the record in a single payment
pub struct MarkedAsPaidApplier;

impl EventApplier for MarkedAsPaidApplier {
    fn apply(&self, contract: &mut ContractPayment, event: &ContractEvent) {
        if let ContractEventPayload::MarkedAsPaid {
            paid_amount,
            payment_date,
        } = &event.payload
        {
            contract.total_paid_amount = *paid_amount;
            contract.last_payment_date = Some(*payment_date);
            contract.payment_status = PaymentStatus::Paid;
            contract.is_finished = true;
            contract.paid_at = Some(event.timestamp);
            touch(contract, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::event;
    use super::*;
    use chrono::NaiveDate;
    use shared::contract::{ContractSide, ContractStatus};

    #[test]
    fn test_billing_started_moves_to_processing() {
        let mut contract = ContractPayment::new("c-1", ContractSide::Client, "pp", "ta", "CC-1");
        contract.contract_status = ContractStatus::Approved;
        let started = event(
            &contract,
            1,
            ContractEventPayload::BillingStarted {
                actual_work_hours: 176.0,
                man_month_coefficient: 1.1,
                actual_amount_local_currency: 82_500_000.0,
                effective_coefficient: Some(1.1),
                tier_breakdown: Vec::new(),
            },
        );
        BillingStartedApplier.apply(&mut contract, &started);

        assert_eq!(contract.payment_status, PaymentStatus::Processing);
        assert_eq!(contract.contract_status, ContractStatus::Approved);
        assert_eq!(contract.actual_amount_local_currency, Some(82_500_000.0));
        assert_eq!(contract.display_status(), "PROCESSING");
    }

    #[test]
    fn test_partial_payment_keeps_record_open() {
        let mut contract = ContractPayment::new("c-1", ContractSide::Client, "pp", "ta", "CC-1");
        contract.payment_status = PaymentStatus::Invoiced;
        let recorded = event(
            &contract,
            1,
            ContractEventPayload::PaymentRecorded {
                amount: 10.0,
                payment_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                total_paid_amount: 10.0,
                fully_paid: false,
            },
        );
        PaymentRecordedApplier.apply(&mut contract, &recorded);

        assert_eq!(contract.payment_status, PaymentStatus::PartiallyPaid);
        assert!(!contract.is_finished);
        assert!(contract.paid_at.is_none());
    }

    #[test]
    fn test_marked_as_paid_finishes_record() {
        let mut contract = ContractPayment::new("p-1", ContractSide::Partner, "pp", "ta", "PC-1");
        contract.payment_status = PaymentStatus::Processing;
        let paid = event(
            &contract,
            5,
            ContractEventPayload::MarkedAsPaid {
                paid_amount: 50_000_000.0,
                payment_date: NaiveDate::from_ymd_opt(2024, 3, 28).unwrap(),
            },
        );
        MarkedAsPaidApplier.apply(&mut contract, &paid);

        assert!(contract.is_finished);
        assert_eq!(contract.total_paid_amount, 50_000_000.0);
        assert_eq!(contract.paid_at, Some(paid.timestamp));
        assert_eq!(contract.version, 5);
    }
}
