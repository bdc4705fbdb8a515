//! Scalar values and the token-parsing glue shared by the map types.
//!
//! This module provides `Scalar`, the bounded-precision numeric type used for
//! all resource amounts, and `Value`, the kind discriminator produced when
//! parsing the value half of a `name:value` token. Range and set syntax are
//! recognized only far enough to be rejected by the scalar-only map parsers.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ResourceError;

/// A bounded-precision numeric amount of a resource.
///
/// Scalars support three decimal digits of precision: every arithmetic
/// operation and comparison goes through a fixed-point image obtained by
/// rounding `value * 1000` to the nearest integer. This keeps results like
/// `0.1 + 0.2` exactly equal to `0.3`, which matters because these values
/// feed allocation decisions that must be reproducible.
///
/// Negative scalars can be constructed and subtracted into at this layer;
/// the map types clamp or reject them at their own boundaries.
///
/// # Examples
///
/// ```
/// use tally::resources::Scalar;
///
/// let a = Scalar::new(0.1);
/// let b = Scalar::new(0.2);
/// assert_eq!(a + b, Scalar::new(0.3));
/// assert_eq!((a + b).to_string(), "0.3");
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(f64);

impl Scalar {
    /// The zero amount.
    pub const ZERO: Scalar = Scalar(0.0);

    /// Creates a scalar from a floating-point value.
    pub fn new(value: f64) -> Self {
        Scalar(value)
    }

    /// Returns the underlying floating-point value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether this scalar equals zero under fixed-point comparison.
    pub fn is_zero(&self) -> bool {
        self.to_fixed() == 0
    }

    // Fixed-point image with three decimal digits of precision. All
    // arithmetic and comparison must go through this to stay associative.
    fn to_fixed(self) -> i64 {
        (self.0 * 1000.0).round() as i64
    }

    fn from_fixed(fixed: i64) -> Self {
        Scalar(fixed as f64 / 1000.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.to_fixed() == other.to_fixed()
    }
}

// The fixed-point image is a total order (the float-to-int cast saturates),
// so Eq and Ord are lawful even though the backing type is f64.
impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_fixed().cmp(&other.to_fixed())
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::from_fixed(self.to_fixed() + rhs.to_fixed())
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self = *self + rhs;
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar::from_fixed(self.to_fixed() - rhs.to_fixed())
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = *self - rhs;
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar(value)
    }
}

impl From<Scalar> for f64 {
    fn from(scalar: Scalar) -> Self {
        scalar.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Render the fixed-point-rounded value so output round-trips through
        // parsing: `2` rather than `2.000`, `1.5` rather than `1.4999999`.
        write!(f, "{}", self.to_fixed() as f64 / 1000.0)
    }
}

impl FromStr for Scalar {
    type Err = ResourceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|err: std::num::ParseFloatError| ResourceError::InvalidScalar {
                text: trimmed.to_string(),
                reason: err.to_string(),
            })?;

        if !value.is_finite() {
            return Err(ResourceError::InvalidScalar {
                text: trimmed.to_string(),
                reason: "not a finite number".to_string(),
            });
        }

        Ok(Scalar(value))
    }
}

/// A parsed token value with a kind discriminator.
///
/// The map parsers only accept scalars; range (`[1-9]`) and set (`{a,b}`)
/// syntax is classified so the caller can report "only scalar values are
/// allowed" with the offending substring, but their interiors are not
/// modelled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// A scalar amount.
    Scalar(Scalar),
    /// Range syntax, e.g. `[1-9]`.
    Ranges,
    /// Set syntax, e.g. `{a,b}`.
    Set,
}

impl Value {
    /// Parses the value half of a `name:value` token.
    pub fn parse(text: &str) -> Result<Self, ResourceError> {
        let trimmed = text.trim();
        if trimmed.starts_with('[') {
            return Ok(Value::Ranges);
        }
        if trimmed.starts_with('{') {
            return Ok(Value::Set);
        }
        Ok(Value::Scalar(trimmed.parse()?))
    }

    /// Returns the scalar if this value is one.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    /// The kind name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Ranges => "ranges",
            Value::Set => "set",
        }
    }
}

/// Splits `text` on `delimiter`, dropping empty fields so consecutive or
/// trailing delimiters collapse. Fields are not trimmed; a whitespace-only
/// field is kept and fails downstream as malformed.
pub(crate) fn tokenize(text: &str, delimiter: char) -> impl Iterator<Item = &str> {
    text.split(delimiter).filter(|field| !field.is_empty())
}

/// Parses one `name:value` token into a trimmed name and a non-negative
/// scalar. Shared by both map parsers; the zero-value and duplicate-name
/// policies diverge at the call sites.
pub(crate) fn parse_resource_token(token: &str) -> Result<(&str, Scalar), ResourceError> {
    let fields: Vec<&str> = tokenize(token, ':').collect();
    if fields.len() != 2 {
        return Err(ResourceError::MalformedToken {
            token: token.trim().to_string(),
        });
    }

    let value = Value::parse(fields[1])?;
    let scalar = value.as_scalar().ok_or_else(|| ResourceError::NonScalarValue {
        text: fields[1].trim().to_string(),
    })?;

    if scalar < Scalar::ZERO {
        return Err(ResourceError::NegativeValue {
            text: fields[1].trim().to_string(),
        });
    }

    Ok((fields[0].trim(), scalar))
}
