//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Conformance tests for [`JsonOps`] against the [`DynamicOps`] contract.
//!
//! [`JsonOps`]: crate::ops::json::JsonOps
//! [`DynamicOps`]: crate::ops::DynamicOps

use serde_json::json;

use super::json::JSON_OPS;
use super::{DynamicOps, Numeric};

//---------------------------------------------------------------------------//
//                                  Tests
//---------------------------------------------------------------------------//

/// Test to make sure the type predicates are mutually exclusive and complete over
/// everything the backend produces.
#[test]
fn predicate_exclusivity() {
    let samples = vec![
        json!(null),
        json!(true),
        json!(42),
        json!(1.5),
        json!("text"),
        json!([1, 2, 3]),
        json!({"a": 1}),
    ];

    for sample in &samples {
        let hits = [
            JSON_OPS.is_map(sample),
            JSON_OPS.is_list(sample),
            JSON_OPS.is_string(sample),
            JSON_OPS.is_number(sample),
            JSON_OPS.is_boolean(sample),
        ].iter().filter(|hit| **hit).count();

        // At most one predicate fires. Null fires none: it's the empty value.
        if *sample == json!(null) {
            assert_eq!(hits, 0, "predicates fired on the empty value");
        } else {
            assert_eq!(hits, 1, "predicates not exclusive for {sample}");
        }
    }
}

/// Test for the primitive create/read pairs.
#[test]
fn primitive_round_trips() {
    assert_eq!(JSON_OPS.boolean_value(&JSON_OPS.create_boolean(true)).ok(), Some(true));
    assert_eq!(JSON_OPS.string_value(&JSON_OPS.create_string("hello")).ok(), Some("hello".to_owned()));
    assert_eq!(JSON_OPS.byte_value(&JSON_OPS.create_byte(-4)).ok(), Some(-4));
    assert_eq!(JSON_OPS.short_value(&JSON_OPS.create_short(1000)).ok(), Some(1000));
    assert_eq!(JSON_OPS.int_value(&JSON_OPS.create_int(123_456)).ok(), Some(123_456));
    assert_eq!(JSON_OPS.long_value(&JSON_OPS.create_long(1 << 40)).ok(), Some(1 << 40));
    assert_eq!(JSON_OPS.double_value(&JSON_OPS.create_double(2.5)).ok(), Some(2.5));
    assert_eq!(JSON_OPS.numeric_value(&JSON_OPS.create_numeric(Numeric::Int(7))).ok(), Some(Numeric::Int(7)));

    // Mismatched reads fail.
    assert!(JSON_OPS.boolean_value(&json!(1)).is_error());
    assert!(JSON_OPS.string_value(&json!(1)).is_error());
    assert!(JSON_OPS.numeric_value(&json!("1")).is_error());
}

/// Test to make sure absent fields are distinct from present-but-null fields.
#[test]
fn absent_vs_null() {
    let map = json!({"present": null});

    assert_eq!(JSON_OPS.get_field(&map, "present"), Some(json!(null)));
    assert_eq!(JSON_OPS.get_field(&map, "absent"), None);
    assert!(JSON_OPS.has_field(&map, "present"));
    assert!(!JSON_OPS.has_field(&map, "absent"));
}

/// Test to make sure the mutators never touch their inputs.
#[test]
fn mutators_are_pure() {
    let map = json!({"a": 1, "b": 2});
    let snapshot = map.clone();

    let with_field = JSON_OPS.set_field(&map, "c", json!(3));
    let without_field = JSON_OPS.remove_field(&map, "a");
    let merged = JSON_OPS.merge_to_map(&map, json!("d"), json!(4)).ok().unwrap();

    assert_eq!(map, snapshot);
    assert_eq!(with_field, json!({"a": 1, "b": 2, "c": 3}));
    assert_eq!(without_field, json!({"b": 2}));
    assert_eq!(merged, json!({"a": 1, "b": 2, "d": 4}));

    let list = json!([1, 2]);
    let list_snapshot = list.clone();
    let appended = JSON_OPS.merge_to_list(&list, json!(3)).ok().unwrap();

    assert_eq!(list, list_snapshot);
    assert_eq!(appended, json!([1, 2, 3]));
}

/// Test for `set_field` and `remove_field` over non-map inputs.
#[test]
fn field_ops_on_non_maps() {
    assert_eq!(JSON_OPS.set_field(&json!(5), "a", json!(1)), json!({"a": 1}));
    assert_eq!(JSON_OPS.remove_field(&json!(5), "a"), json!(5));
}

/// Test to make sure `create_map` skips entries with non-string keys.
#[test]
fn create_map_skips_bad_keys() {
    let map = JSON_OPS.create_map(vec![
        (json!("good"), json!(1)),
        (json!(42), json!(2)),
        (json!("fine"), json!(3)),
    ]);

    assert_eq!(map, json!({"good": 1, "fine": 3}));
}

/// Test for the merge operations over empty inputs and shape mismatches.
#[test]
fn merges() {
    assert_eq!(JSON_OPS.merge_to_list(&json!(null), json!(1)).ok(), Some(json!([1])));
    assert_eq!(JSON_OPS.merge_to_map(&json!(null), json!("a"), json!(1)).ok(), Some(json!({"a": 1})));
    assert_eq!(
        JSON_OPS.merge_maps(&json!({"a": 1, "b": 1}), &json!({"b": 2})).ok(),
        Some(json!({"a": 1, "b": 2}))
    );

    assert!(JSON_OPS.merge_to_list(&json!(5), json!(1)).is_error());
    assert!(JSON_OPS.merge_to_map(&json!({"a": 1}), json!(5), json!(1)).is_error());
    assert!(JSON_OPS.merge_maps(&json!(5), &json!({"a": 1})).is_error());
}

/// Test for `convert_to` idempotence: converting to the same ops rebuilds an equal value.
#[test]
fn convert_to_is_idempotent() {
    let samples = vec![
        json!(true),
        json!(42),
        json!(2.5),
        json!("text"),
        json!([1, "two", {"three": 3.0}]),
        json!({"nested": {"list": [true, null]}}),
        json!(null),
    ];

    for sample in samples {
        assert_eq!(JSON_OPS.convert_to(&JSON_OPS, &sample), sample);
    }
}

/// Test for the `convert_to` shape fallback: an unconvertible value becomes `empty()`.
#[test]
fn convert_to_fallback() {
    assert_eq!(JSON_OPS.convert_to(&JSON_OPS, &json!(null)), json!(null));
}
