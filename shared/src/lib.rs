//! Shared types for the contract payment engine
//!
//! Record, command, event, side-effect and document types for contract
//! payments, plus the unified error code system.

pub mod contract;
pub mod error;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use contract::{
    ContractCommand, ContractCommandPayload, ContractEvent, ContractPayment, SideEffect,
};
pub use error::{AppError, ErrorCategory, ErrorCode};
