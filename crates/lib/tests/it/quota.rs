//! Quota configuration tests: the JSON surface and end-to-end validation.

use tally::quota::QuotaConfig;
use tally::resources::{ResourceLimits, ResourceQuantities};

fn parse_quantities(text: &str) -> ResourceQuantities {
    text.parse().expect("valid quantities")
}

fn parse_limits(text: &str) -> ResourceLimits {
    text.parse().expect("valid limits")
}

#[test]
fn test_valid_config_passes() {
    let config = QuotaConfig::new(
        "analytics",
        parse_quantities("cpus:4;mem:1024"),
        parse_limits("cpus:8;mem:2048"),
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_guarantees_must_fit_limits() {
    let config = QuotaConfig::new(
        "analytics",
        parse_quantities("cpus:4;mem:4096"),
        parse_limits("cpus:8;mem:2048"),
    );

    let err = config.validate().unwrap_err();
    assert!(err.is_containment_error());

    // The message carries both canonical renderings for the operator.
    let message = err.to_string();
    assert!(message.contains("cpus:4; mem:4096"));
    assert!(message.contains("cpus:8; mem:2048"));
}

#[test]
fn test_unlimited_resources_accept_any_guarantee() {
    let config = QuotaConfig::new(
        "analytics",
        parse_quantities("gpus:16"),
        parse_limits("cpus:8"),
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_star_role_is_rejected() {
    let config = QuotaConfig::new("*", ResourceQuantities::new(), ResourceLimits::new());
    assert!(config.validate().unwrap_err().is_role_error());
}

#[test]
fn test_json_wire_round_trip() {
    let config = QuotaConfig::new(
        "eng/backend",
        parse_quantities("cpus:4;mem:1024"),
        parse_limits("cpus:8;gpus:0"),
    );

    let json = config.to_json().expect("encodes");
    let decoded = QuotaConfig::from_json(&json).expect("decodes");
    assert_eq!(decoded, config);
    assert!(decoded.validate().is_ok());
}

#[test]
fn test_json_rejects_negative_guarantee() {
    let err = QuotaConfig::from_json(r#"{"role": "dev", "guarantees": {"cpus": -1.0}}"#)
        .unwrap_err();
    // The rejection surfaces through the serde layer.
    assert_eq!(err.module(), "serialize");
    assert!(err.to_string().contains("negative values are not allowed"));
}

#[test]
fn test_json_zero_guarantee_is_dropped_but_zero_limit_kept() {
    let config = QuotaConfig::from_json(
        r#"{"role": "dev", "guarantees": {"gpus": 0.0}, "limits": {"gpus": 0.0}}"#,
    )
    .expect("decodes");

    assert!(config.guarantees.is_empty());
    assert_eq!(config.limits.len(), 1);
    assert!(config.validate().is_ok());
}
