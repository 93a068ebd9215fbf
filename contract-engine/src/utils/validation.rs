//! Input validation helpers
//!
//! Centralized text length constants and validation functions for
//! operator-supplied notes, reasons and evidence references.

use crate::contracts::ContractError;

// ── Text length limits ──────────────────────────────────────────────

/// Notes and rejection reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: invoice numbers, currency codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Evidence URLs
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), ContractError> {
    if value.trim().is_empty() {
        return Err(ContractError::InvalidInput(format!(
            "{field} must not be empty"
        )));
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), ContractError> {
    if let Some(v) = value {
        validate_len(v, field, max_len)?;
    }
    Ok(())
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), ContractError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ContractError::InvalidInput(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}
