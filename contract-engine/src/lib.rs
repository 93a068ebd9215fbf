//! Contract payment calculation and approval engine
//!
//! # Module structure
//!
//! ```text
//! contract-engine/src/
//! ├── money.rs       # Decimal conversion and normalization
//! ├── billing/       # Planned / actual amount, overtime schedule
//! ├── contracts/     # State machine, policies, ports, saga service
//! ├── core/          # Configuration
//! └── utils/         # Logging, input validation
//! ```

pub mod billing;
pub mod contracts;
pub mod core;
pub mod money;
pub mod utils;

// Re-export public types
pub use billing::{BillingComputation, InvalidBillingConfiguration, compute_actual, plan_amount};
pub use contracts::{
    ContractError, ContractPorts, ContractService, TransitionOutcome, TransitionReport, transition,
};
pub use core::EngineConfig;
pub use money::normalize;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read configuration and install the logger
pub fn setup_environment() -> anyhow::Result<EngineConfig> {
    dotenv::dotenv().ok();
    let config = EngineConfig::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    )?;
    tracing::info!(
        local_currency = %config.local_currency,
        document_delete_retries = config.document_delete_retries,
        "Contract engine configured"
    );
    Ok(config)
}
