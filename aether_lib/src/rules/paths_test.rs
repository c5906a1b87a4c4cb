//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Tests for the dotted-path parsing and the field-operation rules.

use serde_json::json;

use crate::dynamic::Dynamic;
use crate::error::Error;
use crate::ops::json::{JsonOps, JSON_OPS};
use crate::rules::{BatchTransform, Rules, Typed};

use super::paths::{get_at, set_at, FieldPath};

/// Helper building a passthrough-typed datum over a JSON document.
fn typed(value: serde_json::Value) -> Typed<JsonOps> {
    Typed::passthrough(Dynamic::new(JSON_OPS, value))
}

/// Helper running a rule and returning the resulting JSON document.
fn run(rule: &crate::rules::Rule<JsonOps>, value: serde_json::Value) -> Option<serde_json::Value> {
    let input = typed(value);
    rule.rewrite(input.element_type(), &input).map(|output| output.into_value().into_value())
}

//---------------------------------------------------------------------------//
//                                  Tests
//---------------------------------------------------------------------------//

/// Test for path parsing: segments, memoization, and the contract errors.
#[test]
fn path_parsing() {
    let path = FieldPath::parse("a.b.c").unwrap();
    assert_eq!(path.raw(), "a.b.c");
    assert_eq!(path.segments(), &["a".to_owned(), "b".to_owned(), "c".to_owned()]);
    assert_eq!(path.leaf(), "c");

    // The cache hands the same parse back.
    let again = FieldPath::parse("a.b.c").unwrap();
    assert!(std::sync::Arc::ptr_eq(&path, &again));

    // Empty paths and empty segments are contract errors.
    assert!(matches!(FieldPath::parse(""), Err(Error::InvalidPath(..))));
    assert!(matches!(FieldPath::parse("a..b"), Err(Error::InvalidPath(..))));
    assert!(matches!(FieldPath::parse(".a"), Err(Error::InvalidPath(..))));
}

/// Test for the single-pass path helpers.
#[test]
fn path_helpers() {
    let document = Dynamic::new(JSON_OPS, json!({"a": {"b": {"c": 1}}}));
    let path = FieldPath::parse("a.b.c").unwrap();

    assert_eq!(get_at(&document, &path).unwrap().value(), &json!(1));

    let updated = set_at(&document, &path, json!(2), false).unwrap();
    assert_eq!(updated.value(), &json!({"a": {"b": {"c": 2}}}));

    // Missing parents error without create_parents, and are built with it.
    let deep = FieldPath::parse("a.x.y").unwrap();
    assert!(matches!(set_at(&document, &deep, json!(1), false), Err(Error::PathParentMissing(..))));

    let created = set_at(&document, &deep, json!(1), true).unwrap();
    assert_eq!(created.value(), &json!({"a": {"b": {"c": 1}, "x": {"y": 1}}}));

    assert!(matches!(get_at(&document, &deep), Err(Error::PathParentMissing(..))));
}

/// Test for the flat field rules: rename, remove, add, transform.
#[test]
fn flat_field_rules() {
    let rename = Rules::rename_field(JSON_OPS, "playerName", "name");
    assert_eq!(run(&rename, json!({"playerName": "Ada", "xp": 5})), Some(json!({"name": "Ada", "xp": 5})));
    assert_eq!(run(&rename, json!({"xp": 5})), None);

    let remove = Rules::remove_field(JSON_OPS, "legacy");
    assert_eq!(run(&remove, json!({"legacy": 1, "xp": 5})), Some(json!({"xp": 5})));
    assert_eq!(run(&remove, json!({"xp": 5})), None);

    let add = Rules::add_field(JSON_OPS, "level", || json!(1));
    assert_eq!(run(&add, json!({"xp": 5})), Some(json!({"xp": 5, "level": 1})));

    // An existing field is kept, and non-maps don't match.
    assert_eq!(run(&add, json!({"level": 7})), Some(json!({"level": 7})));
    assert_eq!(run(&add, json!(5)), None);

    let double = Rules::transform_field(JSON_OPS, "xp", |field| {
        let doubled = field.as_int().value_or(0) * 2;
        Dynamic::new(JSON_OPS, json!(doubled))
    });
    assert_eq!(run(&double, json!({"xp": 5})), Some(json!({"xp": 10})));
    assert_eq!(run(&double, json!({})), None);
}

/// Test for `rename_fields` and `remove_fields`: batch variants always match and skip
/// the missing ones.
#[test]
fn multi_field_rules() {
    let renames = Rules::rename_fields(JSON_OPS, vec![
        ("a".to_owned(), "x".to_owned()),
        ("missing".to_owned(), "y".to_owned()),
    ]);
    assert_eq!(run(&renames, json!({"a": 1, "b": 2})), Some(json!({"x": 1, "b": 2})));

    let removals = Rules::remove_fields(JSON_OPS, vec!["a".to_owned(), "missing".to_owned()]);
    assert_eq!(run(&removals, json!({"a": 1, "b": 2})), Some(json!({"b": 2})));
}

/// Test for the dotted-path rule variants.
#[test]
fn path_rules() {
    let transform = Rules::transform_field_at(JSON_OPS, "stats.hp", |field| {
        let value = field.as_int().value_or(0) + 10;
        Dynamic::new(JSON_OPS, json!(value))
    }).unwrap();
    assert_eq!(
        run(&transform, json!({"stats": {"hp": 5}})),
        Some(json!({"stats": {"hp": 15}}))
    );
    assert_eq!(run(&transform, json!({"stats": {}})), None);

    let rename = Rules::rename_field_at(JSON_OPS, "stats.hp", "health").unwrap();
    assert_eq!(
        run(&rename, json!({"stats": {"hp": 5, "mp": 3}})),
        Some(json!({"stats": {"health": 5, "mp": 3}}))
    );

    let remove = Rules::remove_field_at(JSON_OPS, "stats.hp").unwrap();
    assert_eq!(
        run(&remove, json!({"stats": {"hp": 5, "mp": 3}})),
        Some(json!({"stats": {"mp": 3}}))
    );

    let add = Rules::add_field_at(JSON_OPS, "stats.stamina", || json!(100)).unwrap();
    assert_eq!(
        run(&add, json!({"stats": {"hp": 5}})),
        Some(json!({"stats": {"hp": 5, "stamina": 100}}))
    );

    // Missing parents are created on add.
    assert_eq!(run(&add, json!({})), Some(json!({"stats": {"stamina": 100}})));

    // Existing values are kept.
    assert_eq!(
        run(&add, json!({"stats": {"stamina": 1}})),
        Some(json!({"stats": {"stamina": 1}}))
    );

    // Bad paths are contract errors at construction time.
    assert!(Rules::remove_field_at(JSON_OPS, "a..b").is_err());
    assert!(Rules::transform_field_at(JSON_OPS, "", |field: Dynamic<JsonOps>| field).is_err());
}

/// Test for `group_fields`: listed order, skipped absents, overwritten target.
#[test]
fn group_fields() {
    let group = Rules::group_fields(JSON_OPS, "position", vec!["x".to_owned(), "y".to_owned(), "z".to_owned()]);

    assert_eq!(
        run(&group, json!({"x": 1.0, "y": 2.0, "z": 3.0, "name": "Ada"})),
        Some(json!({"name": "Ada", "position": {"x": 1.0, "y": 2.0, "z": 3.0}}))
    );

    // Absent fields are skipped silently.
    assert_eq!(
        run(&group, json!({"x": 1.0, "name": "Ada"})),
        Some(json!({"name": "Ada", "position": {"x": 1.0}}))
    );

    // Zero listed fields produce an empty sub-map.
    let empty = Rules::group_fields(JSON_OPS, "position", vec![]);
    assert_eq!(run(&empty, json!({"name": "Ada"})), Some(json!({"name": "Ada", "position": {}})));

    // An existing target is overwritten.
    assert_eq!(
        run(&group, json!({"x": 1.0, "position": "legacy"})),
        Some(json!({"position": {"x": 1.0}}))
    );
}

/// Test for `flatten_field`, the inverse of grouping.
#[test]
fn flatten_field() {
    let flatten = Rules::flatten_field(JSON_OPS, "position");

    assert_eq!(
        run(&flatten, json!({"name": "Ada", "position": {"x": 1.0, "y": 2.0}})),
        Some(json!({"name": "Ada", "x": 1.0, "y": 2.0}))
    );

    // The sub-map wins on collisions.
    assert_eq!(
        run(&flatten, json!({"x": 9.0, "position": {"x": 1.0}})),
        Some(json!({"x": 1.0}))
    );

    // Missing or non-map fields don't match.
    assert_eq!(run(&flatten, json!({"name": "Ada"})), None);
    assert_eq!(run(&flatten, json!({"position": 5})), None);
}

/// Test for `move_field` and `copy_field`.
#[test]
fn move_and_copy() {
    let relocate = Rules::move_field(JSON_OPS, "old.score", "stats.score").unwrap();
    assert_eq!(
        run(&relocate, json!({"old": {"score": 9}})),
        Some(json!({"old": {}, "stats": {"score": 9}}))
    );

    // A missing source is a no-op, not an error and not a non-match.
    assert_eq!(run(&relocate, json!({"other": 1})), Some(json!({"other": 1})));

    let duplicate = Rules::copy_field(JSON_OPS, "name", "display.name").unwrap();
    assert_eq!(
        run(&duplicate, json!({"name": "Ada"})),
        Some(json!({"name": "Ada", "display": {"name": "Ada"}}))
    );
    assert_eq!(run(&duplicate, json!({})), Some(json!({})));
}

/// Test for the conditional rules and their single-pass counterparts.
#[test]
fn conditionals() {
    let bump = Rules::transform_field(JSON_OPS, "xp", |field| {
        let value = field.as_int().value_or(0) + 1;
        Dynamic::new(JSON_OPS, json!(value))
    });

    let when_exists = Rules::if_field_exists(JSON_OPS, "premium", bump.clone());
    assert_eq!(run(&when_exists, json!({"premium": true, "xp": 1})), Some(json!({"premium": true, "xp": 2})));
    assert_eq!(run(&when_exists, json!({"xp": 1})), Some(json!({"xp": 1})));

    let when_missing = Rules::if_field_missing(JSON_OPS, "premium", bump.clone());
    assert_eq!(run(&when_missing, json!({"xp": 1})), Some(json!({"xp": 2})));
    assert_eq!(run(&when_missing, json!({"premium": true, "xp": 1})), Some(json!({"premium": true, "xp": 1})));

    let when_equals = Rules::if_field_equals(JSON_OPS, "kind", json!("player"), bump);
    assert_eq!(run(&when_equals, json!({"kind": "player", "xp": 1})), Some(json!({"kind": "player", "xp": 2})));
    assert_eq!(run(&when_equals, json!({"kind": "monster", "xp": 1})), Some(json!({"kind": "monster", "xp": 1})));

    // Single-pass counterparts.
    let document = Dynamic::new(JSON_OPS, json!({"premium": true}));
    let touched = crate::rules::if_field_exists_value(&document, "premium", |value| value.set("touched", json!(true)));
    assert_eq!(touched.value(), &json!({"premium": true, "touched": true}));

    let untouched = crate::rules::if_field_missing_value(&document, "premium", |value| value.set("touched", json!(true)));
    assert_eq!(untouched.value(), &json!({"premium": true}));

    let equals = crate::rules::if_field_equals_value(&document, "premium", &json!(true), |value| value.set("ok", json!(1)));
    assert_eq!(equals.value(), &json!({"premium": true, "ok": 1}));
}

/// Test for the batch builder: every queued step runs in one pass, in order.
#[test]
fn batch() {
    let batch = BatchTransform::new(JSON_OPS)
        .rename("playerName", "name")
        .remove("legacy")
        .add("level", || json!(1))
        .transform("xp", |field| {
            let value = field.as_int().value_or(0) * 2;
            Dynamic::new(JSON_OPS, json!(value))
        })
        .move_to("pos.x", "position.x").unwrap();

    let rule = Rules::batch(batch);
    let input = json!({"playerName": "Ada", "legacy": true, "xp": 5, "pos": {"x": 1.0}});
    assert_eq!(
        run(&rule, input),
        Some(json!({"name": "Ada", "xp": 10, "level": 1, "pos": {}, "position": {"x": 1.0}}))
    );

    // Batches only match maps.
    let batch = BatchTransform::new(JSON_OPS).rename("a", "b");
    assert_eq!(run(&Rules::batch(batch), json!(5)), None);
}
