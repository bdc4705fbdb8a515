//! Error types for parsing resource quantities and limits.
//!
//! All variants here describe malformed user input and are recoverable by
//! the caller. Contract violations (negative amounts passed to `add`,
//! non-scalar resources passed to `from_scalar_resources`) are caller bugs
//! and panic instead of surfacing here.

use thiserror::Error;

/// Structured error types for the resource-map parsers.
///
/// Every variant embeds the offending substring so the failure can be
/// reported upstream verbatim. Parsing is all-or-nothing: the first failure
/// aborts and no partial map is returned.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A `name:value` token did not split into exactly two fields
    #[error("failed to parse '{token}': missing or extra ':'")]
    MalformedToken { token: String },

    /// The value half of a token was not a valid number
    #[error("failed to parse '{text}': {reason}")]
    InvalidScalar { text: String, reason: String },

    /// The value half of a token was a range or a set
    #[error("failed to parse '{text}': only scalar values are allowed")]
    NonScalarValue { text: String },

    /// The value half of a token was negative
    #[error("failed to parse '{text}': negative values are not allowed")]
    NegativeValue { text: String },

    /// A resource name occurred twice in one limits string
    #[error("failed to parse '{name}': duplicate names are not allowed")]
    DuplicateName { name: String },
}

impl ResourceError {
    /// Check if this error is a tokenization failure.
    pub fn is_malformed_token(&self) -> bool {
        matches!(self, ResourceError::MalformedToken { .. })
    }

    /// Check if this error rejected the value half of a token.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            ResourceError::InvalidScalar { .. }
                | ResourceError::NonScalarValue { .. }
                | ResourceError::NegativeValue { .. }
        )
    }

    /// Check if this error is a duplicate limit name.
    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, ResourceError::DuplicateName { .. })
    }
}

// Conversion from ResourceError to the main Error type
impl From<ResourceError> for crate::Error {
    fn from(err: ResourceError) -> Self {
        crate::Error::Resource(err)
    }
}
