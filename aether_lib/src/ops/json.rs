//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains [`JsonOps`], the reference [`DynamicOps`] backend over
//! [`serde_json::Value`].
//!
//! Numeric sub-categories collapse the way JSON itself does: byte/short/int/long all
//! become one integral shape (`i64` under the hood), and float/double become `f64`.
//! Non-finite floats are not representable in JSON, so creating one yields `null`.

use serde_json::{Map, Number, Value};

use crate::ops::{DynamicOps, Numeric};
use crate::result::DataResult;

/// Shared instance for the stateless JSON backend.
pub const JSON_OPS: JsonOps = JsonOps;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct is the [`DynamicOps`] implementation over [`serde_json::Value`].
///
/// It's stateless: use the [`JSON_OPS`] constant instead of building your own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonOps;

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl DynamicOps for JsonOps {
    type Value = Value;

    fn name(&self) -> &str {
        "JSON"
    }

    fn empty(&self) -> Value {
        Value::Null
    }

    fn is_map(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn is_list(&self, value: &Value) -> bool {
        value.is_array()
    }

    fn is_string(&self, value: &Value) -> bool {
        value.is_string()
    }

    fn is_number(&self, value: &Value) -> bool {
        value.is_number()
    }

    fn is_boolean(&self, value: &Value) -> bool {
        value.is_boolean()
    }

    fn create_boolean(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn create_string(&self, value: &str) -> Value {
        Value::String(value.to_owned())
    }

    fn create_numeric(&self, value: Numeric) -> Value {
        match value {
            Numeric::Int(value) => Value::Number(Number::from(value)),

            // NaN and infinities have no JSON representation.
            Numeric::Float(value) => match Number::from_f64(value) {
                Some(number) => Value::Number(number),
                None => Value::Null,
            },
        }
    }

    fn boolean_value(&self, value: &Value) -> DataResult<bool> {
        match value {
            Value::Bool(boolean) => DataResult::success(*boolean),
            other => {
                let other = other.clone();
                DataResult::error(move || format!("Not a boolean: {other}"))
            },
        }
    }

    fn string_value(&self, value: &Value) -> DataResult<String> {
        match value {
            Value::String(string) => DataResult::success(string.clone()),
            other => {
                let other = other.clone();
                DataResult::error(move || format!("Not a string: {other}"))
            },
        }
    }

    fn numeric_value(&self, value: &Value) -> DataResult<Numeric> {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(int) => DataResult::success(Numeric::Int(int)),
                None => match number.as_f64() {
                    Some(float) => DataResult::success(Numeric::Float(float)),
                    None => {
                        let number = number.clone();
                        DataResult::error(move || format!("Not a representable number: {number}"))
                    },
                },
            },
            other => {
                let other = other.clone();
                DataResult::error(move || format!("Not a number: {other}"))
            },
        }
    }

    fn create_list<I: IntoIterator<Item = Value>>(&self, values: I) -> Value {
        Value::Array(values.into_iter().collect())
    }

    fn list_values(&self, value: &Value) -> DataResult<Vec<Value>> {
        match value {
            Value::Array(values) => DataResult::success(values.clone()),
            other => {
                let other = other.clone();
                DataResult::error(move || format!("Not a list: {other}"))
            },
        }
    }

    fn merge_to_list(&self, list: &Value, value: Value) -> DataResult<Value> {
        match list {
            Value::Null => DataResult::success(Value::Array(vec![value])),
            Value::Array(values) => {
                let mut values = values.clone();
                values.push(value);
                DataResult::success(Value::Array(values))
            },
            other => {
                let rendered = other.clone();
                DataResult::partial_error(move || format!("Cannot append to a non-list: {rendered}"), other.clone())
            },
        }
    }

    fn create_map<I: IntoIterator<Item = (Value, Value)>>(&self, entries: I) -> Value {
        let mut map = Map::new();
        for (key, value) in entries {
            match key {
                Value::String(key) => { map.insert(key, value); },
                other => log::warn!("Dropped a map entry with a non-string key: {other}"),
            }
        }
        Value::Object(map)
    }

    fn map_entries(&self, value: &Value) -> DataResult<Vec<(Value, Value)>> {
        match value {
            Value::Object(map) => DataResult::success(
                map.iter().map(|(key, value)| (Value::String(key.clone()), value.clone())).collect()
            ),
            other => {
                let other = other.clone();
                DataResult::error(move || format!("Not a map: {other}"))
            },
        }
    }

    fn merge_to_map(&self, map: &Value, key: Value, value: Value) -> DataResult<Value> {
        let key = match key {
            Value::String(key) => key,
            other => {
                let rendered = other.clone();
                return DataResult::partial_error(move || format!("Cannot use a non-string key: {rendered}"), map.clone());
            },
        };

        match map {
            Value::Null => {
                let mut new_map = Map::new();
                new_map.insert(key, value);
                DataResult::success(Value::Object(new_map))
            },
            Value::Object(entries) => {
                let mut entries = entries.clone();
                entries.insert(key, value);
                DataResult::success(Value::Object(entries))
            },
            other => {
                let rendered = other.clone();
                DataResult::partial_error(move || format!("Cannot insert into a non-map: {rendered}"), other.clone())
            },
        }
    }

    fn merge_maps(&self, first: &Value, second: &Value) -> DataResult<Value> {
        match (first, second) {
            (Value::Null, Value::Null) => DataResult::success(Value::Object(Map::new())),
            (Value::Null, Value::Object(entries)) => DataResult::success(Value::Object(entries.clone())),
            (Value::Object(entries), Value::Null) => DataResult::success(Value::Object(entries.clone())),
            (Value::Object(first), Value::Object(second)) => {
                let mut merged = first.clone();
                for (key, value) in second {
                    merged.insert(key.clone(), value.clone());
                }
                DataResult::success(Value::Object(merged))
            },
            (first, second) => {
                let first = first.clone();
                let second = second.clone();
                DataResult::error(move || format!("Cannot merge non-maps: {first} and {second}"))
            },
        }
    }

    fn get_field(&self, map: &Value, key: &str) -> Option<Value> {
        match map {
            Value::Object(entries) => entries.get(key).cloned(),
            _ => None,
        }
    }

    fn set_field(&self, value: &Value, key: &str, new_value: Value) -> Value {
        match value {
            Value::Object(entries) => {
                let mut entries = entries.clone();
                entries.insert(key.to_owned(), new_value);
                Value::Object(entries)
            },
            _ => {
                let mut entries = Map::new();
                entries.insert(key.to_owned(), new_value);
                Value::Object(entries)
            },
        }
    }

    fn remove_field(&self, value: &Value, key: &str) -> Value {
        match value {
            Value::Object(entries) if entries.contains_key(key) => {
                let mut entries = entries.clone();
                entries.remove(key);
                Value::Object(entries)
            },
            other => other.clone(),
        }
    }
}
