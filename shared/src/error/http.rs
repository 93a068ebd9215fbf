//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::ContractNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::InvalidTransition | Self::ConcurrentModification => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (operator must fix a specific field)
            Self::InvalidBillingConfiguration
            | Self::AmountMismatch
            | Self::DateOutOfRange
            | Self::MissingRequiredEvidence
            | Self::DocumentTypeNotRegistered => StatusCode::UNPROCESSABLE_ENTITY,

            // 400 Bad Request
            Self::ValidationFailed | Self::InvalidRequest | Self::RequiredField => {
                StatusCode::BAD_REQUEST
            }

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::StorageError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
