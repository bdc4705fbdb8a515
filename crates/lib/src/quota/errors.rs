//! Error types for quota configuration validation.

use thiserror::Error;

/// Structured error types for quota validation.
///
/// All variants describe a rejected configuration; none are retryable. The
/// containment variant embeds the canonical renderings of both maps so the
/// failure can be reported upstream without further formatting.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum QuotaError {
    /// The configured role is missing or malformed
    #[error("invalid quota role '{role}': {reason}")]
    InvalidRole { role: String, reason: String },

    /// A guarantee carries a value the resource model cannot accept
    #[error("invalid guarantee configuration {{'{name}': {value}}}: {reason}")]
    InvalidGuarantee {
        name: String,
        value: f64,
        reason: String,
    },

    /// A limit carries a value the resource model cannot accept
    #[error("invalid limit configuration {{'{name}': {value}}}: {reason}")]
    InvalidLimit {
        name: String,
        value: f64,
        reason: String,
    },

    /// The guarantees ask for more than the limits allow
    #[error("guarantees {guarantees} are not contained within the limits {limits}")]
    GuaranteesExceedLimits { guarantees: String, limits: String },
}

impl QuotaError {
    /// Check if this error concerns the role field.
    pub fn is_role_error(&self) -> bool {
        matches!(self, QuotaError::InvalidRole { .. })
    }

    /// Check if this error concerns a scalar value.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            QuotaError::InvalidGuarantee { .. } | QuotaError::InvalidLimit { .. }
        )
    }

    /// Check if this error is the guarantees-within-limits failure.
    pub fn is_containment_error(&self) -> bool {
        matches!(self, QuotaError::GuaranteesExceedLimits { .. })
    }
}

// Conversion from QuotaError to the main Error type
impl From<QuotaError> for crate::Error {
    fn from(err: QuotaError) -> Self {
        crate::Error::Quota(err)
    }
}
