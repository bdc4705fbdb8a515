//! Per-resource ceilings, as an ordered name-to-scalar map.
//!
//! `ResourceLimits` inverts the absence semantics of
//! [`ResourceQuantities`](super::ResourceQuantities): a missing name means
//! "no limit" (an infinite ceiling), while an explicit zero entry means the
//! resource is capped at zero, i.e. forbidden. The two must never be
//! conflated, which is why `get` returns an `Option` here.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ResourceError;
use super::quantities::ResourceQuantities;
use super::value::{Scalar, parse_resource_token, tokenize};

/// An ordered map of resource names to scalar ceilings.
///
/// Zero is a meaningful, storable value; absence means unlimited. Entries
/// are kept strictly sorted by name with no duplicates.
///
/// # Examples
///
/// ```
/// use tally::resources::{ResourceLimits, ResourceQuantities};
///
/// let limits: ResourceLimits = "cpus:4;gpus:0".parse().unwrap();
///
/// // gpus are forbidden, mem is unconstrained.
/// assert!(limits.permits(&"cpus:4; mem:1024".parse::<ResourceQuantities>().unwrap()));
/// assert!(!limits.permits(&"gpus:1".parse::<ResourceQuantities>().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Scalar>", into = "BTreeMap<String, Scalar>")]
pub struct ResourceLimits {
    limits: Vec<(String, Scalar)>,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLimits {
    /// Create a new empty `ResourceLimits`.
    pub fn new() -> Self {
        Self {
            // Pre-reserve space for first-class resources.
            // [cpus, disk, gpus, mem, ports]
            limits: Vec::with_capacity(5),
        }
    }

    /// Sets the ceiling for `name`, overwriting any existing entry and
    /// preserving the sort order.
    ///
    /// Negative ceilings are out of contract; parsing is the guarded entry
    /// point for external input.
    pub fn set(&mut self, name: impl Into<String>, scalar: Scalar) {
        let name = name.into();

        let mut index = self.limits.len();
        for (i, (existing, limit)) in self.limits.iter_mut().enumerate() {
            if *existing == name {
                // Overwrite if it exists.
                *limit = scalar;
                return;
            }
            if existing.as_str() > name.as_str() {
                index = i;
                break;
            }
        }

        self.limits.insert(index, (name, scalar));
    }

    /// Returns the ceiling for `name`, or `None` if the resource is not
    /// limited.
    ///
    /// `None` ("no limit") is strictly distinct from `Some(Scalar::ZERO)`
    /// ("capped at zero"); callers must not collapse the two.
    pub fn get(&self, name: &str) -> Option<Scalar> {
        for (existing, limit) in &self.limits {
            if existing == name {
                return Some(*limit);
            }
            if existing.as_str() > name {
                // Names are sorted, so we can stop early.
                break;
            }
        }

        None
    }

    /// Whether every ceiling in this map is at least as permissive as the
    /// corresponding ceiling in `right`.
    ///
    /// A finite limit on the left with no limit on the right fails
    /// immediately: the right side permits more than the left allows. Extra
    /// finite limits on the right are skipped.
    pub fn contains(&self, right: &ResourceLimits) -> bool {
        let mut left_index = 0;
        let mut right_index = 0;

        // Both sides are sorted by name, so walk them together.
        while left_index < self.limits.len() && right_index < right.limits.len() {
            let (left_name, left_limit) = &self.limits[left_index];
            let (right_name, right_limit) = &right.limits[right_index];

            match left_name.cmp(right_name) {
                Ordering::Less => {
                    // Finite limit on the left, no limit on the right.
                    return false;
                }
                Ordering::Greater => {
                    // No limit on the left, finite limit on the right.
                    right_index += 1;
                }
                Ordering::Equal => {
                    if left_limit < right_limit {
                        return false;
                    }
                    left_index += 1;
                    right_index += 1;
                }
            }
        }

        // Finite limits on the left that the right never matched.
        left_index == self.limits.len()
    }

    /// Whether a proposed allocation stays within these ceilings.
    ///
    /// Each quantity is checked against the limit of the same name; names
    /// with no limit entry impose no constraint. This is the check the
    /// scheduler runs before granting an allocation.
    pub fn permits(&self, quantities: &ResourceQuantities) -> bool {
        quantities
            .iter()
            .all(|(name, quantity)| match self.get(name) {
                Some(limit) => limit >= quantity,
                None => true,
            })
    }

    /// Iterates entries in strictly increasing name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Scalar)> {
        self.limits
            .iter()
            .map(|(name, limit)| (name.as_str(), *limit))
    }

    /// The number of resources with a finite limit.
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    /// Whether no resource is limited.
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

impl FromStr for ResourceLimits {
    type Err = ResourceError;

    /// Parses semicolon-separated `name:value` tokens, with the same
    /// tokenization as [`ResourceQuantities`] and two divergences: a zero
    /// value is kept as an explicit "no allowance" limit, and a duplicate
    /// name within one input string is an error.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut result = ResourceLimits::new();

        for token in tokenize(text, ';') {
            let (name, scalar) = parse_resource_token(token)?;

            if result.get(name).is_some() {
                return Err(ResourceError::DuplicateName {
                    name: name.to_string(),
                });
            }

            // Zero values are preserved.
            result.set(name, scalar);
        }

        Ok(result)
    }
}

impl From<BTreeMap<String, Scalar>> for ResourceLimits {
    /// Ordered-insertion construction from an external name-to-scalar map;
    /// iteration order is irrelevant since insertion sorts.
    fn from(map: BTreeMap<String, Scalar>) -> Self {
        let mut result = ResourceLimits::new();
        for (name, scalar) in map {
            result.set(name, scalar);
        }
        result
    }
}

impl From<ResourceLimits> for BTreeMap<String, Scalar> {
    fn from(limits: ResourceLimits) -> Self {
        limits.limits.into_iter().collect()
    }
}

impl FromIterator<(String, Scalar)> for ResourceLimits {
    /// Collects `(name, ceiling)` pairs through [`set`](Self::set); later
    /// duplicates overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        let mut result = ResourceLimits::new();
        for (name, scalar) in iter {
            result.set(name, scalar);
        }
        result
    }
}

impl fmt::Display for ResourceLimits {
    /// Renders sorted `name:value` tokens joined by `"; "`, or `{}` when
    /// empty. Explicit zero limits are rendered; only unlimited resources
    /// are absent from the output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.limits.is_empty() {
            return write!(f, "{{}}");
        }

        for (i, (name, limit)) in self.limits.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{name}:{limit}")?;
        }

        Ok(())
    }
}
