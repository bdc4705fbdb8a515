//! Quantities of resources, as an ordered name-to-scalar map.
//!
//! `ResourceQuantities` represents amounts of named resources held or
//! requested: CPU cores, memory, disk, GPUs, or operator-defined resources.
//! A name that is absent from the map means zero, so no entry ever stores a
//! zero value. Entries are kept strictly sorted by name, which lets every
//! binary operation run as a linear merge-walk over both operands.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
// Do not `use std::ops::{Add, Sub}` here: having those traits in scope makes
// `result.add(name, scalar)` resolve to the by-value `Add::add` instead of the
// inherent `add`, since method probing prefers a by-value receiver match.
use std::ops::{AddAssign, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ResourceError;
use super::value::{Scalar, Value, parse_resource_token, tokenize};

/// An ordered map of resource names to strictly-positive scalar amounts.
///
/// Absence of a name is semantically zero: `get` returns `Scalar::ZERO` for
/// missing names, adding zero is a no-op, and subtraction drops an entry
/// whose amount would reach zero. Iteration order is always strictly
/// increasing by name.
///
/// # Examples
///
/// ```
/// use tally::resources::{ResourceQuantities, Scalar};
///
/// let a: ResourceQuantities = "cpus:2;mem:10".parse().unwrap();
/// let b: ResourceQuantities = "mem:5;disk:1".parse().unwrap();
///
/// assert_eq!((a + b).to_string(), "cpus:2; disk:1; mem:15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Scalar>",
    into = "BTreeMap<String, Scalar>"
)]
pub struct ResourceQuantities {
    quantities: Vec<(String, Scalar)>,
}

impl Default for ResourceQuantities {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceQuantities {
    /// Create a new empty `ResourceQuantities`.
    pub fn new() -> Self {
        Self {
            // Pre-reserve space for first-class resources.
            // [cpus, disk, gpus, mem, ports]
            quantities: Vec::with_capacity(5),
        }
    }

    /// Builds quantities by summing the scalar amount of every input
    /// resource under its name.
    ///
    /// # Panics
    ///
    /// Panics if any input value is not a scalar. Callers are expected to
    /// have filtered to scalar resources already; a range or set here is a
    /// caller bug, not bad user input.
    pub fn from_scalar_resources<I, S>(resources: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut result = Self::new();
        for (name, value) in resources {
            match value.as_scalar() {
                Some(scalar) => result.add(name, scalar),
                None => panic!(
                    "non-scalar resource of kind '{}' passed to from_scalar_resources",
                    value.kind()
                ),
            }
        }
        result
    }

    /// Accumulates `scalar` under `name`, preserving the sort order.
    ///
    /// Adding zero is a no-op. The scan is linear; resource sets are small
    /// (typically under a few dozen entries), so binary search is not worth
    /// the trouble.
    ///
    /// # Panics
    ///
    /// Panics if `scalar` is negative. Negative amounts are a caller bug
    /// here; user input is rejected earlier with a recoverable error.
    pub fn add(&mut self, name: impl Into<String>, scalar: Scalar) {
        let name = name.into();
        assert!(
            scalar >= Scalar::ZERO,
            "negative quantity {scalar} for resource '{name}'"
        );

        // Ignore adding zero.
        if scalar.is_zero() {
            return;
        }

        let mut index = self.quantities.len();
        for (i, (existing, amount)) in self.quantities.iter_mut().enumerate() {
            if *existing == name {
                *amount += scalar;
                return;
            }
            if existing.as_str() > name.as_str() {
                index = i;
                break;
            }
        }

        self.quantities.insert(index, (name, scalar));
    }

    /// Returns the amount held under `name`, or zero if absent.
    ///
    /// Absence means zero for quantities; contrast with
    /// [`ResourceLimits::get`](super::ResourceLimits::get), where absence
    /// means "no limit".
    pub fn get(&self, name: &str) -> Scalar {
        for (existing, amount) in &self.quantities {
            if existing == name {
                return *amount;
            }
            if existing.as_str() > name {
                // Names are sorted, so we can stop early.
                break;
            }
        }

        Scalar::ZERO
    }

    /// Whether this map holds at least as much of every resource as `right`.
    ///
    /// A name present on the right but absent on the left counts as held at
    /// zero, so any positive right-hand amount fails the check.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally::resources::ResourceQuantities;
    ///
    /// let held: ResourceQuantities = "cpus:4;mem:32".parse().unwrap();
    /// let asked: ResourceQuantities = "cpus:2".parse().unwrap();
    ///
    /// assert!(held.contains(&asked));
    /// assert!(!asked.contains(&held));
    /// ```
    pub fn contains(&self, right: &ResourceQuantities) -> bool {
        let mut left_index = 0;
        let mut right_index = 0;

        // Both sides are sorted by name, so walk them together.
        while left_index < self.quantities.len() && right_index < right.quantities.len() {
            let (left_name, left_amount) = &self.quantities[left_index];
            let (right_name, right_amount) = &right.quantities[right_index];

            match left_name.cmp(right_name) {
                Ordering::Less => {
                    // Present on the left but not on the right.
                    left_index += 1;
                }
                Ordering::Greater => {
                    // Present on the right but not on the left.
                    return false;
                }
                Ordering::Equal => {
                    if left_amount < right_amount {
                        return false;
                    }
                    left_index += 1;
                    right_index += 1;
                }
            }
        }

        // Right holds names the left never reached.
        right_index == right.quantities.len()
    }

    /// Iterates entries in strictly increasing name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Scalar)> {
        self.quantities
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    /// The number of distinct resource names held.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Whether no resources are held.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

impl FromStr for ResourceQuantities {
    type Err = ResourceError;

    /// Parses semicolon-separated `name:value` tokens, e.g.
    /// `"cpus:4; mem:1024"`.
    ///
    /// Whitespace around each token and around the value is trimmed, but
    /// whitespace inside a name is preserved: `"c p us:10"` yields an entry
    /// literally named `"c p us"`. Negative values are rejected; zero values
    /// are silently dropped, since a zero quantity is indistinguishable from
    /// absence. Duplicate names accumulate. The first bad token aborts the
    /// parse with no partial result.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut result = ResourceQuantities::new();

        for token in tokenize(text, ';') {
            let (name, scalar) = parse_resource_token(token)?;
            // A zero value is silently dropped (`add` ignores it).
            result.add(name, scalar);
        }

        Ok(result)
    }
}

impl AddAssign<&ResourceQuantities> for ResourceQuantities {
    fn add_assign(&mut self, right: &ResourceQuantities) {
        let mut left_index = 0;
        let mut right_index = 0;

        while left_index < self.quantities.len() && right_index < right.quantities.len() {
            let (right_name, right_amount) = &right.quantities[right_index];

            match self.quantities[left_index].0.cmp(right_name) {
                Ordering::Less => {
                    left_index += 1;
                }
                Ordering::Greater => {
                    // Insert absent entries at their sorted position.
                    self.quantities
                        .insert(left_index, (right_name.clone(), *right_amount));
                    left_index += 1;
                    right_index += 1;
                }
                Ordering::Equal => {
                    self.quantities[left_index].1 += *right_amount;
                    left_index += 1;
                    right_index += 1;
                }
            }
        }

        // Copy the remaining right-hand entries.
        self.quantities
            .extend_from_slice(&right.quantities[right_index..]);
    }
}

impl AddAssign for ResourceQuantities {
    fn add_assign(&mut self, right: ResourceQuantities) {
        *self += &right;
    }
}

impl SubAssign<&ResourceQuantities> for ResourceQuantities {
    /// Subtraction clamps at zero: an entry whose amount would become zero
    /// or negative is removed, and names present only on the right are
    /// skipped rather than producing a negative entry. Subtraction never
    /// introduces new names.
    fn sub_assign(&mut self, right: &ResourceQuantities) {
        let mut left_index = 0;
        let mut right_index = 0;

        while left_index < self.quantities.len() && right_index < right.quantities.len() {
            let (right_name, right_amount) = &right.quantities[right_index];

            match self.quantities[left_index].0.cmp(right_name) {
                Ordering::Less => {
                    left_index += 1;
                }
                Ordering::Greater => {
                    // Present on the right but not on the left (i.e. zero);
                    // subtracting would go negative, so skip it.
                    right_index += 1;
                }
                Ordering::Equal => {
                    if self.quantities[left_index].1 <= *right_amount {
                        // Drop entries that would become zero or negative.
                        self.quantities.remove(left_index);
                    } else {
                        self.quantities[left_index].1 -= *right_amount;
                        left_index += 1;
                    }
                    right_index += 1;
                }
            }
        }
    }
}

impl SubAssign for ResourceQuantities {
    fn sub_assign(&mut self, right: ResourceQuantities) {
        *self -= &right;
    }
}

impl std::ops::Add for ResourceQuantities {
    type Output = ResourceQuantities;

    fn add(mut self, right: ResourceQuantities) -> ResourceQuantities {
        self += &right;
        self
    }
}

impl std::ops::Add for &ResourceQuantities {
    type Output = ResourceQuantities;

    fn add(self, right: &ResourceQuantities) -> ResourceQuantities {
        let mut result = self.clone();
        result += right;
        result
    }
}

impl std::ops::Sub for ResourceQuantities {
    type Output = ResourceQuantities;

    fn sub(mut self, right: ResourceQuantities) -> ResourceQuantities {
        self -= &right;
        self
    }
}

impl std::ops::Sub for &ResourceQuantities {
    type Output = ResourceQuantities;

    fn sub(self, right: &ResourceQuantities) -> ResourceQuantities {
        let mut result = self.clone();
        result -= right;
        result
    }
}

impl FromIterator<(String, Scalar)> for ResourceQuantities {
    /// Collects `(name, amount)` pairs through [`add`](Self::add), so input
    /// order is irrelevant and duplicates accumulate.
    ///
    /// # Panics
    ///
    /// Panics if any amount is negative, per `add`'s contract.
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        let mut result = ResourceQuantities::new();
        for (name, scalar) in iter {
            result.add(name, scalar);
        }
        result
    }
}

impl TryFrom<BTreeMap<String, Scalar>> for ResourceQuantities {
    type Error = ResourceError;

    /// Ordered-insertion construction from an external name-to-scalar map,
    /// e.g. a decoded wire message. Zero amounts are dropped; negative
    /// amounts are rejected rather than asserted on, since the map may come
    /// from outside the process.
    fn try_from(map: BTreeMap<String, Scalar>) -> Result<Self, Self::Error> {
        let mut result = ResourceQuantities::new();
        for (name, scalar) in map {
            if scalar < Scalar::ZERO {
                return Err(ResourceError::NegativeValue {
                    text: scalar.to_string(),
                });
            }
            result.add(name, scalar);
        }
        Ok(result)
    }
}

impl From<ResourceQuantities> for BTreeMap<String, Scalar> {
    fn from(quantities: ResourceQuantities) -> Self {
        quantities.quantities.into_iter().collect()
    }
}

impl fmt::Display for ResourceQuantities {
    /// Renders sorted `name:value` tokens joined by `"; "`, or `{}` when
    /// empty. This is the canonical inverse of parsing, modulo whitespace
    /// normalization and zero-dropping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantities.is_empty() {
            return write!(f, "{{}}");
        }

        for (i, (name, amount)) in self.quantities.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{name}:{amount}")?;
        }

        Ok(())
    }
}
