//! Per-role quota configuration built on the resource-map algebra.
//!
//! A quota pairs a role with guaranteed resource quantities and optional
//! per-resource limits. Configurations arrive as JSON through the operator
//! API and must be validated before they reach the allocator: a guarantee
//! the limits do not permit would make the quota unsatisfiable.

pub mod errors;

pub use errors::QuotaError;

use serde::{Deserialize, Serialize};

use crate::resources::{ResourceLimits, ResourceQuantities};

/// A per-role quota: guaranteed quantities plus optional ceilings.
///
/// `guarantees` is a quantity map (absence means no guarantee) and `limits`
/// is a limit map (absence means unlimited), so an empty config is valid
/// and means "no quota".
///
/// # Examples
///
/// ```
/// use tally::quota::QuotaConfig;
///
/// let config = QuotaConfig::from_json(
///     r#"{"role": "analytics", "guarantees": {"cpus": 4.0}, "limits": {"cpus": 8.0}}"#,
/// ).unwrap();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// The role this quota applies to.
    pub role: String,
    /// Resource quantities guaranteed to the role.
    #[serde(default)]
    pub guarantees: ResourceQuantities,
    /// Per-resource ceilings for the role.
    #[serde(default)]
    pub limits: ResourceLimits,
}

impl QuotaConfig {
    /// Creates a quota configuration for `role`.
    pub fn new(
        role: impl Into<String>,
        guarantees: ResourceQuantities,
        limits: ResourceLimits,
    ) -> Self {
        Self {
            role: role.into(),
            guarantees,
            limits,
        }
    }

    /// Decodes a configuration from its JSON wire form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes this configuration to its JSON wire form.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validates this configuration.
    ///
    /// Checks that the role is well formed (non-empty, not the default `*`
    /// role, no malformed path components), that every guarantee and limit
    /// value is a finite non-negative number, and that the limits permit
    /// the guarantees.
    pub fn validate(&self) -> Result<(), QuotaError> {
        tracing::debug!(role = %self.role, "validating quota config");

        validate_role(&self.role)?;

        for (name, quantity) in self.guarantees.iter() {
            if let Err(reason) = validate_input_scalar(quantity.value()) {
                return Err(QuotaError::InvalidGuarantee {
                    name: name.to_string(),
                    value: quantity.value(),
                    reason,
                });
            }
        }

        for (name, limit) in self.limits.iter() {
            if let Err(reason) = validate_input_scalar(limit.value()) {
                return Err(QuotaError::InvalidLimit {
                    name: name.to_string(),
                    value: limit.value(),
                    reason,
                });
            }
        }

        // Validate guarantees <= limits.
        if !self.limits.permits(&self.guarantees) {
            return Err(QuotaError::GuaranteesExceedLimits {
                guarantees: self.guarantees.to_string(),
                limits: self.limits.to_string(),
            });
        }

        Ok(())
    }
}

// Roles are hierarchical slash-separated paths, e.g. "engineering/backend".
fn validate_role(role: &str) -> Result<(), QuotaError> {
    let invalid = |reason: &str| QuotaError::InvalidRole {
        role: role.to_string(),
        reason: reason.to_string(),
    };

    if role.is_empty() {
        return Err(invalid("a role must be specified"));
    }

    if role == "*" {
        return Err(invalid(
            "setting quota for the default '*' role is not supported",
        ));
    }

    for component in role.split('/') {
        if component.is_empty() {
            return Err(invalid("role components must be non-empty"));
        }
        if component == "." || component == ".." {
            return Err(invalid("role components must not be '.' or '..'"));
        }
        if component == "*" {
            return Err(invalid("role components must not be '*'"));
        }
        if component.chars().any(char::is_whitespace) {
            return Err(invalid("role components must not contain whitespace"));
        }
    }

    Ok(())
}

fn validate_input_scalar(value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err("must be a finite number".to_string());
    }
    if value < 0.0 {
        return Err("must not be negative".to_string());
    }
    Ok(())
}
