//! Contract Payment Module
//!
//! This module implements the approval and billing workflow of contract
//! payments:
//!
//! - **policy**: per-side transition tables (client / partner)
//! - **actions**: command handlers producing events and side-effect intents
//! - **appliers**: pure event folding into the record
//! - **machine**: the pure `transition` entry point
//! - **coupling** / **invalidation**: cross-contract reject and document cleanup
//! - **service**: saga executor running transitions against the ports
//!
//! # Data Flow
//!
//! ```text
//! ContractCommand → ContractService (per-id lock)
//!                        ↓ load + list documents
//!                  transition() → events + side effects
//!                        ↓ save (expected state)
//!                  side effects → warnings
//! ```

// Must precede `appliers`: enum_dispatch registers `EventApplier` first
pub mod traits;

pub mod actions;
pub mod appliers;
pub mod coupling;
pub mod error;
pub mod invalidation;
pub mod machine;
pub mod policy;
pub mod ports;
pub mod service;
pub mod storage;

#[cfg(test)]
mod test_support;

// Re-exports
pub use error::ContractError;
pub use machine::{TransitionOutcome, transition};
pub use ports::{
    ContractRepository, DocumentStore, DocumentTypeRegistry, ExchangeRateProvider, PeriodLookup,
    PortError, StaticDocumentTypeRegistry,
};
pub use service::{ContractPorts, ContractService, TransitionReport};
pub use storage::{
    InMemoryContractRepository, InMemoryDocumentStore, PeriodCalendar, StaticExchangeRates,
};
pub use traits::TransitionContext;
