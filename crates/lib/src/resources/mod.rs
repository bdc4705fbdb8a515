//! Ordered-map algebras for resource quantities and limits.
//!
//! This module provides the two value types a resource allocator reasons
//! with continuously:
//!
//! - [`ResourceQuantities`] - amounts of named resources held or requested.
//!   Absence of a name means zero, so entries are always strictly positive.
//! - [`ResourceLimits`] - per-resource ceilings. Absence of a name means
//!   unlimited, and an explicit zero entry means the resource is forbidden.
//!
//! Both keep their entries strictly sorted and deduplicated by name, which
//! makes combination and comparison linear merge-walks and makes iteration,
//! rendering, and structural equality deterministic. Both are plain value
//! types: no interior mutability, no synchronization, full deep copies.
//!
//! The shared numeric primitive is [`Scalar`], a bounded-precision amount
//! with three decimal digits of fixed-point precision.
//!
//! # Absence semantics
//!
//! The same missing key means opposite things in the two maps, so the
//! lookup shapes differ by design: `ResourceQuantities::get` returns a
//! concrete `Scalar` (zero when absent) while `ResourceLimits::get` returns
//! `Option<Scalar>` (`None` when unlimited).

// Declare the value module first since the map types build on it.
pub mod value;

pub mod errors;
pub mod limits;
pub mod quantities;

pub use errors::ResourceError;
pub use limits::ResourceLimits;
pub use quantities::ResourceQuantities;
pub use value::{Scalar, Value};
