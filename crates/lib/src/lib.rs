//!
//! Tally: a resource-accounting algebra for cluster resource managers.
//! This library provides the ordered-map value types a scheduler uses to
//! represent, combine, and compare quantities and limits of named resources
//! during offer generation, allocation, and quota enforcement.
//!
//! ## Core Concepts
//!
//! * **Scalar (`resources::Scalar`)**: a bounded-precision resource amount.
//!   All arithmetic and comparison use three decimal digits of fixed-point
//!   precision so results are reproducible across the cluster.
//! * **Quantities (`resources::ResourceQuantities`)**: amounts of named
//!   resources held or requested. A missing name means zero; entries are
//!   always strictly positive and strictly sorted by name.
//! * **Limits (`resources::ResourceLimits`)**: per-resource ceilings. A
//!   missing name means unlimited; an explicit zero entry means forbidden.
//! * **Quota (`quota::QuotaConfig`)**: a per-role pairing of guaranteed
//!   quantities and limits, validated so that the limits always permit the
//!   guarantees.
//!
//! Both map types parse from and render to the same `name:value; ...` text
//! format, and every binary operation is a linear merge-walk over the two
//! sorted operands.

pub mod quota;
pub mod resources;

pub use resources::{ResourceLimits, ResourceQuantities, Scalar};

/// Result type used throughout the tally library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the tally library.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured parse errors from the resources module
    #[error(transparent)]
    Resource(resources::ResourceError),

    /// Structured validation errors from the quota module
    #[error(transparent)]
    Quota(quota::QuotaError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Resource(_) => "resources",
            Error::Quota(_) => "quota",
        }
    }

    /// Check if this error came from parsing malformed resource text.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Resource(_))
    }

    /// Check if this error came from quota validation.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Quota(_))
    }
}
