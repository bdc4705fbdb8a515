//! Quantity-map algebra tests: parsing, arithmetic, and invariants.

use tally::resources::{ResourceQuantities, Scalar};

use super::quantities;

#[test]
fn test_string_round_trip() {
    // Note the empty map renders as "{}", which is display-only and does
    // not parse back; round-tripping applies to non-empty maps.
    for text in [
        "cpus:2",
        "cpus:0.5; mem:512",
        "cpus:2; disk:1024; gpus:1; mem:512; ports:8",
    ] {
        let held = quantities(text);
        assert_eq!(quantities(&held.to_string()), held, "for input {text:?}");
    }
}

/// Iteration stays strictly increasing by name after any mix of mutations.
#[test]
fn test_sort_invariant_under_mutation() {
    let mut held = quantities("mem:10");
    held.add("zebra", Scalar::new(1.0));
    held.add("cpus", Scalar::new(4.0));
    held += &quantities("disk:7;gpus:2");
    held -= &quantities("gpus:2;mem:3");

    let names: Vec<&str> = held.iter().map(|(name, _)| name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert_eq!(names, vec!["cpus", "disk", "mem", "zebra"]);
}

/// No operation may leave a zero-valued entry behind.
#[test]
fn test_zero_drop_invariant() {
    let mut held = quantities("cpus:2;mem:10");
    held.add("disk", Scalar::ZERO);
    held -= &quantities("mem:10");

    assert!(held.iter().all(|(_, amount)| !amount.is_zero()));
    assert_eq!(held, quantities("cpus:2"));
}

/// The literal seed example for merge arithmetic.
#[test]
fn test_merge_example() {
    let a = quantities("cpus:2;mem:10");
    let b = quantities("mem:5;disk:1");

    assert_eq!(&a + &b, quantities("cpus:2;disk:1;mem:15"));
    assert_eq!(&a - &b, quantities("cpus:2;mem:5"));

    // Owned operators agree with the borrowed ones.
    assert_eq!(a.clone() + b.clone(), &a + &b);
    assert_eq!(a.clone() - b.clone(), &a - &b);
}

#[test]
fn test_add_then_subtract_returns_to_start() {
    let start = quantities("cpus:2;mem:10");
    let delta = quantities("cpus:0.5;disk:100");

    let mut held = start.clone();
    held += &delta;
    held -= &delta;
    assert_eq!(held, start);
}

#[test]
fn test_subtract_from_empty_is_empty() {
    let empty = ResourceQuantities::new();
    assert_eq!(&empty - &quantities("cpus:4"), empty);
}

#[test]
fn test_fixed_point_accumulation() {
    // Ten additions of 0.1 cpus must reach exactly 1 cpu.
    let mut held = ResourceQuantities::new();
    for _ in 0..10 {
        held.add("cpus", Scalar::new(0.1));
    }
    assert_eq!(held, quantities("cpus:1"));

    held -= &quantities("cpus:1");
    assert!(held.is_empty());
}

#[test]
fn test_parse_errors_name_the_offending_token() {
    let err = "cpus:1;mem:1:2".parse::<ResourceQuantities>().unwrap_err();
    assert!(err.to_string().contains("mem:1:2"));
    assert!(err.to_string().contains("missing or extra ':'"));

    let err = "cpus:-1".parse::<ResourceQuantities>().unwrap_err();
    assert!(err.to_string().contains("negative values are not allowed"));

    let err = "ports:[1-9]".parse::<ResourceQuantities>().unwrap_err();
    assert!(err.to_string().contains("only scalar values are allowed"));
}

#[test]
fn test_parse_is_all_or_nothing() {
    // The valid leading token must not leak out as a partial result.
    assert!("cpus:1;bogus".parse::<ResourceQuantities>().is_err());
}
