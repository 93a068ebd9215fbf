//! Unified error codes for the contract payment engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Contract errors
//! - 5xxx: Payment errors
//! - 6xxx: Document errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 4xxx: Contract ====================
    /// Contract payment not found
    ContractNotFound = 4001,
    /// Command not legal from the current status
    InvalidTransition = 4002,
    /// Billing method, rate or amount fields are missing or inconsistent
    InvalidBillingConfiguration = 4003,
    /// Contract payment changed between read and write
    ConcurrentModification = 4004,

    // ==================== 5xxx: Payment ====================
    /// Paid amount differs from the actual amount
    AmountMismatch = 5001,
    /// Payment date outside the owning period's month
    DateOutOfRange = 5002,

    // ==================== 6xxx: Document ====================
    /// A required evidence document is not attached
    MissingRequiredEvidence = 6001,
    /// Document type is not known to the registry
    DocumentTypeNotRegistered = 6002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Persistence backend error
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field missing",

            // Contract
            ErrorCode::ContractNotFound => "Contract payment not found",
            ErrorCode::InvalidTransition => "Operation not allowed in the current status",
            ErrorCode::InvalidBillingConfiguration => "Invalid billing configuration",
            ErrorCode::ConcurrentModification => "Contract payment was modified concurrently",

            // Payment
            ErrorCode::AmountMismatch => "Paid amount does not match the actual amount",
            ErrorCode::DateOutOfRange => "Payment date is outside the period month",

            // Document
            ErrorCode::MissingRequiredEvidence => "Required evidence document is missing",
            ErrorCode::DocumentTypeNotRegistered => "Document type is not registered",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Contract
            4001 => Ok(ErrorCode::ContractNotFound),
            4002 => Ok(ErrorCode::InvalidTransition),
            4003 => Ok(ErrorCode::InvalidBillingConfiguration),
            4004 => Ok(ErrorCode::ConcurrentModification),

            // Payment
            5001 => Ok(ErrorCode::AmountMismatch),
            5002 => Ok(ErrorCode::DateOutOfRange),

            // Document
            6001 => Ok(ErrorCode::MissingRequiredEvidence),
            6002 => Ok(ErrorCode::DocumentTypeNotRegistered),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
