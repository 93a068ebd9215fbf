//! Fixtures shared by the action and applier unit tests

use super::machine::{TransitionOutcome, transition};
use super::ports::StaticDocumentTypeRegistry;
use super::traits::{CommandMetadata, TransitionContext};
use super::ContractError;
use shared::contract::{
    BillingConfig, CalculationMethod, ContractCommand, ContractCommandPayload, ContractPayment,
    ContractSide, ContractStatus, Document, DocumentKind, EvidenceInput, PaymentStatus,
    PeriodMonth, SideEffect,
};

pub const LOCAL_CURRENCY: &str = "VND";

pub fn metadata() -> CommandMetadata {
    CommandMetadata {
        command_id: "cmd-1".to_string(),
        operator_id: "op-1".to_string(),
        operator_name: "Test Operator".to_string(),
        timestamp: 1_700_000_000_000,
    }
}

pub fn registry() -> StaticDocumentTypeRegistry {
    StaticDocumentTypeRegistry::with_defaults()
}

pub fn evidence(name: &str) -> EvidenceInput {
    EvidenceInput::new(format!("https://files.example/{name}.pdf")).with_file_name(format!("{name}.pdf"))
}

pub fn document(contract: &ContractPayment, kind: DocumentKind) -> Document {
    Document {
        id: format!("doc-{kind:?}"),
        contract_id: contract.id.clone(),
        side: contract.side,
        document_type_id: format!("type-{kind:?}"),
        kind,
        url: format!("https://files.example/{kind:?}.pdf"),
        file_name: None,
        uploaded_at: 0,
    }
}

pub fn percentage_billing() -> BillingConfig {
    BillingConfig {
        unit_price_foreign_currency: 3000.0,
        currency_code: "USD".to_string(),
        exchange_rate: 25000.0,
        calculation_method: CalculationMethod::Percentage,
        percentage_value: Some(100.0),
        fixed_amount: None,
        standard_hours: 160.0,
    }
}

pub fn fixed_billing() -> BillingConfig {
    BillingConfig {
        unit_price_foreign_currency: 2000.0,
        currency_code: "USD".to_string(),
        exchange_rate: 25000.0,
        calculation_method: CalculationMethod::Fixed,
        percentage_value: None,
        fixed_amount: Some(2000.0),
        standard_hours: 160.0,
    }
}

pub fn client(status: ContractStatus) -> ContractPayment {
    let mut contract = ContractPayment::new("c-1", ContractSide::Client, "pp-1", "ta-1", "CC-001");
    contract.contract_status = status;
    if status.is_verified() {
        contract.apply_verified_billing(&percentage_billing(), 75_000_000.0);
    }
    contract
}

pub fn partner(status: ContractStatus) -> ContractPayment {
    let mut contract = ContractPayment::new("p-1", ContractSide::Partner, "pp-1", "ta-1", "PC-001");
    contract.contract_status = status;
    if status.is_verified() {
        contract.apply_verified_billing(&percentage_billing(), 75_000_000.0);
    }
    contract
}

/// Record with billing started at 180 hours (84,375,000)
pub fn billed(mut contract: ContractPayment) -> ContractPayment {
    contract.payment_status = PaymentStatus::Processing;
    contract.actual_work_hours = Some(180.0);
    contract.man_month_coefficient = Some(1.125);
    contract.actual_amount_local_currency = Some(84_375_000.0);
    contract
}

pub fn command(contract: &ContractPayment, payload: ContractCommandPayload) -> ContractCommand {
    ContractCommand::new(
        contract.id.clone(),
        contract.side,
        "op-1",
        "Test Operator",
        payload,
    )
}

/// Run a full transition with the given attached documents
pub fn run(
    contract: &ContractPayment,
    documents: &[Document],
    payload: ContractCommandPayload,
) -> Result<TransitionOutcome, ContractError> {
    let registry = registry();
    let ctx = TransitionContext::new(&registry, LOCAL_CURRENCY)
        .with_documents(documents)
        .with_period_month(Some(PeriodMonth::new(2024, 3)));
    transition(contract, &command(contract, payload), &ctx)
}

pub fn attached_kinds(effects: &[SideEffect]) -> Vec<DocumentKind> {
    effects
        .iter()
        .filter_map(|e| match e {
            SideEffect::AttachDocument { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect()
}
