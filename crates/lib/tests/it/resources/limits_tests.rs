//! Limit-map tests: parsing, lookup, and containment against both map kinds.

use tally::resources::{ResourceLimits, Scalar};

use super::{limits, quantities};

#[test]
fn test_string_round_trip() {
    for text in ["cpus:4", "cpus:0; gpus:0", "cpus:8; disk:1024; mem:2048"] {
        let ceilings = limits(text);
        assert_eq!(limits(&ceilings.to_string()), ceilings, "for input {text:?}");
    }
}

#[test]
fn test_sort_invariant_under_set() {
    let mut ceilings = ResourceLimits::new();
    for name in ["mem", "cpus", "zebra", "disk", "cpus"] {
        ceilings.set(name, Scalar::new(1.0));
    }

    let names: Vec<&str> = ceilings.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["cpus", "disk", "mem", "zebra"]);
}

#[test]
fn test_zero_limit_renders_and_round_trips() {
    let ceilings = limits("gpus:0");
    assert_eq!(ceilings.to_string(), "gpus:0");
    assert_eq!(limits("gpus:0"), ceilings);
}

#[test]
fn test_contains_requires_matching_finite_limits() {
    // A finite limit on the left with no limit on the right fails.
    assert!(!limits("cpus:4").contains(&limits("mem:10")));

    // Extra finite limits on the right are fine.
    assert!(limits("cpus:4").contains(&limits("cpus:2;mem:10")));

    // Matched names compare by value.
    assert!(limits("cpus:4").contains(&limits("cpus:4")));
    assert!(!limits("cpus:2").contains(&limits("cpus:4")));

    // The empty limit map (everything unlimited) contains any limits.
    assert!(ResourceLimits::new().contains(&limits("cpus:1;gpus:0")));
}

#[test]
fn test_permits_boundary_conditions() {
    let ceilings = limits("cpus:4;gpus:0");

    // Exact equality is permitted.
    assert!(ceilings.permits(&quantities("cpus:4")));
    assert!(!ceilings.permits(&quantities("cpus:4.001")));

    // A zero limit forbids any positive quantity but permits absence.
    assert!(!ceilings.permits(&quantities("gpus:0.001")));
    assert!(ceilings.permits(&quantities("cpus:1;mem:10")));

    // No limits at all permits everything.
    assert!(ResourceLimits::new().permits(&quantities("cpus:1000000")));
}

#[test]
fn test_parse_errors_match_quantities_except_duplicates() {
    assert!("cpus:-1".parse::<ResourceLimits>().is_err());
    assert!("cpus:1:2".parse::<ResourceLimits>().is_err());
    assert!("ports:[1-9]".parse::<ResourceLimits>().is_err());

    let err = "cpus:1;mem:2;cpus:3".parse::<ResourceLimits>().unwrap_err();
    assert!(err.is_duplicate_name());
    assert!(err.to_string().contains("duplicate names are not allowed"));
}

#[test]
fn test_set_overwrites_rather_than_accumulates() {
    let mut ceilings = limits("cpus:4");
    ceilings.set("cpus", Scalar::new(2.0));
    assert_eq!(ceilings.get("cpus"), Some(Scalar::new(2.0)));
}
