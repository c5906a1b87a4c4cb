//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Tests for the codec algebra: primitive round-trips, combinator laws, map codecs and
//! record composition.

use float_eq::assert_float_eq;
use serde_json::json;

use crate::ops::json::JSON_OPS;
use crate::ops::Numeric;
use crate::result::DataResult;

use super::primitives::*;
use super::record::{record2, record3};
use super::{Codec, Codecs, Decoder, Either, MapCodec};

//---------------------------------------------------------------------------//
//                                  Tests
//---------------------------------------------------------------------------//

/// Test for the round-trip law over every primitive codec.
#[test]
fn primitive_round_trips() {
    for value in [true, false] {
        assert_eq!(BOOL.parse(&JSON_OPS, &BOOL.encode_start(&JSON_OPS, &value).ok().unwrap()).ok(), Some(value));
    }

    for value in [i8::MIN, -1, 0, 1, i8::MAX] {
        assert_eq!(BYTE.parse(&JSON_OPS, &BYTE.encode_start(&JSON_OPS, &value).ok().unwrap()).ok(), Some(value));
    }

    for value in [i16::MIN, -1, 0, 1, i16::MAX] {
        assert_eq!(SHORT.parse(&JSON_OPS, &SHORT.encode_start(&JSON_OPS, &value).ok().unwrap()).ok(), Some(value));
    }

    for value in [i32::MIN, -1, 0, 1, i32::MAX] {
        assert_eq!(INT.parse(&JSON_OPS, &INT.encode_start(&JSON_OPS, &value).ok().unwrap()).ok(), Some(value));
    }

    for value in [i64::MIN, -1, 0, 1, i64::MAX] {
        assert_eq!(LONG.parse(&JSON_OPS, &LONG.encode_start(&JSON_OPS, &value).ok().unwrap()).ok(), Some(value));
    }

    for value in [-2.5f32, 0.0, 1.25] {
        let decoded = FLOAT.parse(&JSON_OPS, &FLOAT.encode_start(&JSON_OPS, &value).ok().unwrap()).ok().unwrap();
        assert_float_eq!(decoded, value, abs <= 0.000_001);
    }

    for value in [-2.5f64, 0.0, 1.25] {
        let decoded = DOUBLE.parse(&JSON_OPS, &DOUBLE.encode_start(&JSON_OPS, &value).ok().unwrap()).ok().unwrap();
        assert_float_eq!(decoded, value, abs <= 0.000_000_001);
    }

    for value in ["", "hello", "与"] {
        let value = value.to_owned();
        assert_eq!(STRING.parse(&JSON_OPS, &STRING.encode_start(&JSON_OPS, &value).ok().unwrap()).ok(), Some(value));
    }

    for value in [Numeric::Int(42), Numeric::Float(2.5)] {
        assert_eq!(NUMERIC.parse(&JSON_OPS, &NUMERIC.encode_start(&JSON_OPS, &value).ok().unwrap()).ok(), Some(value));
    }
}

/// Test for `xmap` functoriality: mapping twice behaves like mapping the composition.
#[test]
fn xmap_functoriality() {
    let identity_mapped = INT.xmap(|value: &i32| *value, |value: &i32| *value);
    assert_eq!(identity_mapped.parse(&JSON_OPS, &json!(7)).ok(), Some(7));
    assert_eq!(identity_mapped.encode_start(&JSON_OPS, &7).ok(), Some(json!(7)));

    let chained = INT
        .xmap(|value: &i32| value + 1, |value: &i32| value - 1)
        .xmap(|value: &i32| value * 2, |value: &i32| value / 2);
    let composed = INT.xmap(|value: &i32| (value + 1) * 2, |value: &i32| value / 2 - 1);

    for input in [0, 3, 10] {
        let encoded = json!(input);
        assert_eq!(chained.parse(&JSON_OPS, &encoded).ok(), composed.parse(&JSON_OPS, &encoded).ok());
    }

    for value in [2, 8, 22] {
        assert_eq!(
            chained.encode_start(&JSON_OPS, &value).ok(),
            composed.encode_start(&JSON_OPS, &value).ok()
        );
    }
}

/// Test for `flat_xmap`: failures surface as errors on the right side.
#[test]
fn flat_xmap_failures() {
    let even_only = INT.flat_xmap(
        |value: &i32| if value % 2 == 0 { DataResult::success(*value) } else { DataResult::error(|| "odd".to_owned()) },
        |value: &i32| DataResult::success(*value),
    );

    assert_eq!(even_only.parse(&JSON_OPS, &json!(4)).ok(), Some(4));
    assert!(even_only.parse(&JSON_OPS, &json!(5)).is_error());
}

/// Test for the list codec: round-trip and per-element error context.
#[test]
fn list_codec() {
    let codec = INT.list();

    let encoded = codec.encode_start(&JSON_OPS, &vec![1, 2, 3]).ok().unwrap();
    assert_eq!(encoded, json!([1, 2, 3]));
    assert_eq!(codec.parse(&JSON_OPS, &encoded).ok(), Some(vec![1, 2, 3]));

    let failed = codec.parse(&JSON_OPS, &json!([1, "two", 3]));
    assert!(failed.is_error());
    assert!(failed.error_message().unwrap().contains("element 1"));
}

/// Test for the optional codec: decode failures become `None`.
#[test]
fn optional_codec() {
    let codec = INT.optional();

    assert_eq!(codec.parse(&JSON_OPS, &json!(7)).ok(), Some(Some(7)));
    assert_eq!(codec.parse(&JSON_OPS, &json!("nope")).ok(), Some(None));
    assert_eq!(codec.encode_start(&JSON_OPS, &Some(7)).ok(), Some(json!(7)));
    assert_eq!(codec.encode_start(&JSON_OPS, &None).ok(), Some(json!(null)));
}

/// Test for `Codecs::pair` over field codecs: decoding threads the remainder.
#[test]
fn pair_codec() {
    let codec = Codecs::pair(INT.field_of("first"), STRING.field_of("second"));
    let value = (7, "seven".to_owned());

    let encoded = codec.encode_start(&JSON_OPS, &value).ok().unwrap();
    assert_eq!(encoded, json!({"first": 7, "second": "seven"}));

    let (decoded, rest) = codec.decode(&JSON_OPS, &encoded).ok().unwrap();
    assert_eq!(decoded, value);
    assert_eq!(rest, json!({}));

    // Unknown fields survive in the remainder.
    let (_, rest) = codec.decode(&JSON_OPS, &json!({"first": 7, "second": "seven", "extra": true})).ok().unwrap();
    assert_eq!(rest, json!({"extra": true}));
}

/// Test for `Codecs::either`: decoding is left-biased.
#[test]
fn either_codec() {
    let codec = Codecs::either(INT, STRING);

    assert_eq!(codec.parse(&JSON_OPS, &json!(7)).ok(), Some(Either::Left(7)));
    assert_eq!(codec.parse(&JSON_OPS, &json!("seven")).ok(), Some(Either::Right("seven".to_owned())));
    assert!(codec.parse(&JSON_OPS, &json!([1])).is_error());

    assert_eq!(codec.encode_start(&JSON_OPS, &Either::Left(7)).ok(), Some(json!(7)));
    assert_eq!(codec.encode_start(&JSON_OPS, &Either::Right("seven".to_owned())).ok(), Some(json!("seven")));
}

/// Test for `or_else`: the fallback runs on failure, the first error is reported when
/// both fail.
#[test]
fn or_else_codec() {
    let lenient_int = INT.or_else(STRING.flat_xmap(
        |value: &String| match value.parse::<i32>() {
            Ok(parsed) => DataResult::success(parsed),
            Err(_) => {
                let value = value.clone();
                DataResult::error(move || format!("Not a numeric string: {value}"))
            },
        },
        |value: &i32| DataResult::success(value.to_string()),
    ));

    assert_eq!(lenient_int.parse(&JSON_OPS, &json!(7)).ok(), Some(7));
    assert_eq!(lenient_int.parse(&JSON_OPS, &json!("8")).ok(), Some(8));

    let failed = lenient_int.parse(&JSON_OPS, &json!(true));
    assert!(failed.is_error());
    assert!(failed.error_message().unwrap().contains("Not a number"));
}

/// Test for `Codecs::unit`: decoding consumes nothing, encoding changes nothing.
#[test]
fn unit_codec() {
    let codec = Codecs::unit(42);

    let (value, rest) = codec.decode(&JSON_OPS, &json!({"anything": true})).ok().unwrap();
    assert_eq!(value, 42);
    assert_eq!(rest, json!({"anything": true}));
    assert_eq!(codec.encode_start(&JSON_OPS, &42).ok(), Some(json!(null)));
}

/// Test for `with_error_context`: the prefix lands on the message.
#[test]
fn error_context() {
    let codec = INT.with_error_context("While reading the counter");
    let failed = codec.parse(&JSON_OPS, &json!("nope"));

    assert!(failed.error_message().unwrap().starts_with("While reading the counter"));
}

/// Test for `optional_field_of`: absent decodes to `None`, `None` encodes to no field.
#[test]
fn optional_field() {
    let codec = INT.optional_field_of("xp");

    assert_eq!(codec.decode_fields(&JSON_OPS, &json!({})).ok(), Some(None));
    assert_eq!(codec.decode_fields(&JSON_OPS, &json!({"xp": 5})).ok(), Some(Some(5)));

    // Present but malformed is an error, not a silent None.
    assert!(codec.decode_fields(&JSON_OPS, &json!({"xp": "five"})).is_error());

    assert_eq!(codec.encode_fields(&None, &JSON_OPS, json!({})).ok(), Some(json!({})));
    assert_eq!(codec.encode_fields(&Some(5), &JSON_OPS, json!({})).ok(), Some(json!({"xp": 5})));
}

/// Test for `optional_field_of_or`: the default is substituted on absence and omitted
/// on equality, in both directions.
#[test]
fn optional_field_with_default() {
    let codec = INT.optional_field_of_or("xp", 10);

    for value in [0, 9, 10, 11, 100] {
        let encoded = codec.encode_fields(&value, &JSON_OPS, json!({})).ok().unwrap();
        if value == 10 {
            assert_eq!(encoded, json!({}));
        } else {
            assert_eq!(encoded, json!({"xp": value}));
        }

        assert_eq!(codec.decode_fields(&JSON_OPS, &encoded).ok(), Some(value));
    }

    assert_eq!(codec.decode_fields(&JSON_OPS, &json!({})).ok(), Some(10));
}

#[derive(Clone, Debug, PartialEq)]
struct Player {
    name: String,
    xp: i32,
    alive: bool,
}

/// Test for record composition: round-trip, unknown-field tolerance, failure context,
/// and idempotent re-encoding.
#[test]
fn record_codec() {
    let codec = record3(
        STRING.field_of("name"), |player: &Player| &player.name,
        INT.field_of("xp"), |player: &Player| &player.xp,
        BOOL.field_of("alive"), |player: &Player| &player.alive,
        |name, xp, alive| Player { name, xp, alive },
    );

    let player = Player { name: "Ada".to_owned(), xp: 5, alive: true };

    let encoded = codec.encode_start(&JSON_OPS, &player).ok().unwrap();
    assert_eq!(encoded, json!({"name": "Ada", "xp": 5, "alive": true}));

    let decoded = codec.parse(&JSON_OPS, &encoded).ok().unwrap();
    assert_eq!(decoded, player);

    // Idempotent encoding: re-encoding the parsed value reproduces the document.
    assert_eq!(codec.encode_start(&JSON_OPS, &decoded).ok(), Some(encoded));

    // A single bad field fails the whole record, with the field as context.
    let failed = codec.parse(&JSON_OPS, &json!({"name": "Ada", "xp": "five", "alive": true}));
    assert!(failed.is_error());
    assert!(failed.error_message().unwrap().contains("\"xp\""));

    // A missing field names itself.
    let missing = codec.parse(&JSON_OPS, &json!({"name": "Ada", "alive": true}));
    assert!(missing.error_message().unwrap().contains("\"xp\""));
}

/// Test for records with defaulted fields, the common "new field with fallback" shape.
#[test]
fn record_codec_with_default() {
    let codec = record2(
        STRING.field_of("name"), |player: &(String, i32)| &player.0,
        INT.optional_field_of_or("level", 1), |player: &(String, i32)| &player.1,
        |name, level| (name, level),
    );

    let decoded = codec.parse(&JSON_OPS, &json!({"name": "Ada"})).ok().unwrap();
    assert_eq!(decoded, ("Ada".to_owned(), 1));

    let encoded = codec.encode_start(&JSON_OPS, &decoded).ok().unwrap();
    assert_eq!(encoded, json!({"name": "Ada"}));
}
