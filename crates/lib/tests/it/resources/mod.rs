//! Resource-map integration tests
//!
//! These exercise the quantity and limit algebras together, with a focus on
//! the properties the allocator depends on: canonical ordering, the opposed
//! absence semantics of the two maps, and containment under boundary
//! conditions.

mod limits_tests;
mod quantities_tests;

use tally::resources::{ResourceLimits, ResourceQuantities};

pub fn quantities(text: &str) -> ResourceQuantities {
    text.parse().expect("valid quantities")
}

pub fn limits(text: &str) -> ResourceLimits {
    text.parse().expect("valid limits")
}

/// The same missing name means zero in one map and unlimited in the other;
/// the lookup shapes must keep the two impossible to confuse.
#[test]
fn test_absence_semantics_diverge() {
    let held = quantities("cpus:1");
    let ceilings = limits("cpus:1;gpus:0");

    assert!(held.get("mem").is_zero());
    assert_eq!(ceilings.get("mem"), None);

    // An explicit zero limit is present, not missing.
    assert!(ceilings.get("gpus").expect("gpus is capped").is_zero());
}

/// The same input string parses differently per map: quantities drop zero
/// values and accumulate duplicates, limits keep zeros and reject
/// duplicates.
#[test]
fn test_parse_policies_diverge() {
    assert!(quantities("cpus:0").is_empty());
    assert_eq!(limits("cpus:0").len(), 1);

    assert_eq!(quantities("cpus:1;cpus:2"), quantities("cpus:3"));
    assert!("cpus:1;cpus:2".parse::<ResourceLimits>().is_err());
}

#[test]
fn test_containment_asymmetry() {
    let ceilings = limits("cpus:4");

    assert!(!ceilings.permits(&quantities("cpus:5")));
    assert!(ceilings.permits(&quantities("mem:10")));
}

#[test]
fn test_containment_is_reflexive() {
    for text in ["", "cpus:2", "cpus:2;mem:10;disk:0.5"] {
        let held = quantities(text);
        assert!(held.contains(&held.clone()), "quantities {text:?}");
    }

    for text in ["", "cpus:2", "cpus:0;mem:10"] {
        let ceilings = limits(text);
        assert!(ceilings.contains(&ceilings.clone()), "limits {text:?}");
        // A limit map always permits its own ceilings read as quantities.
        assert!(ceilings.permits(&text.parse().unwrap()), "limits {text:?}");
    }
}
