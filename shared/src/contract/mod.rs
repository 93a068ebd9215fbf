//! Contract Payment Module
//!
//! This module provides the types for the contract payment approval engine:
//! - Commands: Requests from operators to move a contract payment
//! - Events: Immutable facts recorded after command processing
//! - Record: Contract payment state computed from events
//! - Side effects: Declarative intents executed after a transition commits

pub mod command;
pub mod document;
pub mod effect;
pub mod event;
pub mod record;
pub mod types;

// Re-exports
pub use command::{ContractCommand, ContractCommandKind, ContractCommandPayload};
pub use document::{Document, DocumentKind, DocumentType, NewDocument};
pub use effect::{SideEffect, SideEffectWarning};
pub use event::{ContractEvent, ContractEventPayload, ContractEventType};
pub use record::{ContractPayment, ExpectedState};
pub use types::*;
