//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the [`DynamicOps`] trait, the format-agnostic interface every
//! serialization backend must implement, and the [`Numeric`] open-world number type.
//!
//! # The contract, in short
//!
//! | Group | Operations | Notes |
//! | ----- | ---------- | ----- |
//! | Empties | `empty`, `empty_map`, `empty_list` | Never fail. |
//! | Predicates | `is_map`, `is_list`, `is_string`, `is_number`, `is_boolean` | Mutually exclusive and complete over anything the backend produces. |
//! | Creators | `create_boolean`, `create_byte` … `create_double`, `create_string`, `create_numeric` | Never fail. |
//! | Readers | `boolean_value`, `string_value`, `numeric_value` + sized variants | Fail when the value is not that primitive. |
//! | Lists | `create_list`, `list_values`, `merge_to_list` | Merging into a non-list, non-empty value fails. |
//! | Maps | `create_map`, `map_entries`, `merge_to_map`, `merge_maps` | `create_map` silently skips entries with non-string keys. |
//! | Fields | `get_field`, `set_field`, `remove_field`, `has_field` | Absent is distinct from present-but-null. |
//! | Conversion | `convert_to` | Probes boolean → number → string → list → map, falls back to `empty()`. |
//!
//! Every operation taking a value is **purely functional**: implementations must never
//! mutate their inputs, and must return deep-copied values wherever the backend would
//! otherwise alias. Callers are allowed to keep using their inputs concurrently after
//! any call.

use std::fmt;
use std::fmt::Debug;

use crate::result::DataResult;

pub mod json;

#[cfg(test)] mod json_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This enum is the open-world numeric category: an integral or a floating value.
///
/// Backends that cannot tell integer widths apart (JSON folds byte/short/int/long into
/// one integral shape) still preserve the int/float split through this type, so
/// conversions between richer backends don't corrupt the sub-category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl Numeric {

    /// This function returns the value as an `i64`, truncating floats.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Int(value) => value,
            Self::Float(value) => value as i64,
        }
    }

    /// This function returns the value as an `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait defines the operations over an opaque backend value that the rest of the
/// lib is written against.
///
/// Implementations must be cheap to clone: stateless ones are zero-sized, and ones
/// carrying configuration (a mapper, an options struct) must keep it behind an `Arc`
/// and must not reconfigure it once the ops is in use.
pub trait DynamicOps: Clone + Send + Sync + 'static {

    /// The opaque backend value this ops manipulates.
    type Value: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// This function returns the name of the backend, for error messages.
    fn name(&self) -> &str;

    /// This function returns the canonical "no value" element of the backend.
    fn empty(&self) -> Self::Value;

    /// This function returns an empty map.
    fn empty_map(&self) -> Self::Value {
        self.create_map(std::iter::empty())
    }

    /// This function returns an empty list.
    fn empty_list(&self) -> Self::Value {
        self.create_list(std::iter::empty())
    }

    /// This function returns true if the value is a map.
    fn is_map(&self, value: &Self::Value) -> bool;

    /// This function returns true if the value is a list.
    fn is_list(&self, value: &Self::Value) -> bool;

    /// This function returns true if the value is a string.
    fn is_string(&self, value: &Self::Value) -> bool;

    /// This function returns true if the value is a number.
    fn is_number(&self, value: &Self::Value) -> bool;

    /// This function returns true if the value is a boolean.
    fn is_boolean(&self, value: &Self::Value) -> bool;

    /// This function creates a boolean value.
    fn create_boolean(&self, value: bool) -> Self::Value;

    /// This function creates a byte value.
    fn create_byte(&self, value: i8) -> Self::Value {
        self.create_numeric(Numeric::Int(i64::from(value)))
    }

    /// This function creates a short value.
    fn create_short(&self, value: i16) -> Self::Value {
        self.create_numeric(Numeric::Int(i64::from(value)))
    }

    /// This function creates an int value.
    fn create_int(&self, value: i32) -> Self::Value {
        self.create_numeric(Numeric::Int(i64::from(value)))
    }

    /// This function creates a long value.
    fn create_long(&self, value: i64) -> Self::Value {
        self.create_numeric(Numeric::Int(value))
    }

    /// This function creates a float value.
    fn create_float(&self, value: f32) -> Self::Value {
        self.create_numeric(Numeric::Float(f64::from(value)))
    }

    /// This function creates a double value.
    fn create_double(&self, value: f64) -> Self::Value {
        self.create_numeric(Numeric::Float(value))
    }

    /// This function creates a string value.
    fn create_string(&self, value: &str) -> Self::Value;

    /// This function creates a numeric value of whatever category the backend supports.
    fn create_numeric(&self, value: Numeric) -> Self::Value;

    /// This function tries to read the value as a boolean.
    fn boolean_value(&self, value: &Self::Value) -> DataResult<bool>;

    /// This function tries to read the value as a string.
    fn string_value(&self, value: &Self::Value) -> DataResult<String>;

    /// This function tries to read the value as a number.
    fn numeric_value(&self, value: &Self::Value) -> DataResult<Numeric>;

    /// This function tries to read the value as a byte.
    fn byte_value(&self, value: &Self::Value) -> DataResult<i8> {
        self.numeric_value(value).map(|numeric| numeric.as_i64() as i8)
    }

    /// This function tries to read the value as a short.
    fn short_value(&self, value: &Self::Value) -> DataResult<i16> {
        self.numeric_value(value).map(|numeric| numeric.as_i64() as i16)
    }

    /// This function tries to read the value as an int.
    fn int_value(&self, value: &Self::Value) -> DataResult<i32> {
        self.numeric_value(value).map(|numeric| numeric.as_i64() as i32)
    }

    /// This function tries to read the value as a long.
    fn long_value(&self, value: &Self::Value) -> DataResult<i64> {
        self.numeric_value(value).map(Numeric::as_i64)
    }

    /// This function tries to read the value as a float.
    fn float_value(&self, value: &Self::Value) -> DataResult<f32> {
        self.numeric_value(value).map(|numeric| numeric.as_f64() as f32)
    }

    /// This function tries to read the value as a double.
    fn double_value(&self, value: &Self::Value) -> DataResult<f64> {
        self.numeric_value(value).map(Numeric::as_f64)
    }

    /// This function creates a list from the provided values.
    ///
    /// The iterator is consumed exactly once.
    fn create_list<I: IntoIterator<Item = Self::Value>>(&self, values: I) -> Self::Value;

    /// This function tries to read the value as a list, returning its elements.
    fn list_values(&self, value: &Self::Value) -> DataResult<Vec<Self::Value>>;

    /// This function appends a value to a list, returning the new list.
    ///
    /// It fails if the first argument is neither a list nor `empty()`, carrying the
    /// unchanged input as a partial payload.
    fn merge_to_list(&self, list: &Self::Value, value: Self::Value) -> DataResult<Self::Value>;

    /// This function creates a map from the provided entries.
    ///
    /// Entries whose key is not a string are skipped, with a logged warning. The
    /// iterator is consumed exactly once.
    fn create_map<I: IntoIterator<Item = (Self::Value, Self::Value)>>(&self, entries: I) -> Self::Value;

    /// This function tries to read the value as a map, returning its entries.
    fn map_entries(&self, value: &Self::Value) -> DataResult<Vec<(Self::Value, Self::Value)>>;

    /// This function inserts a key/value pair into a map, returning the new map.
    ///
    /// It fails if the map argument is neither a map nor `empty()`, or if the key is
    /// not a string, carrying the unchanged input as a partial payload.
    fn merge_to_map(&self, map: &Self::Value, key: Self::Value, value: Self::Value) -> DataResult<Self::Value>;

    /// This function merges two maps, with the second one's entries winning on conflict.
    ///
    /// It fails if either argument is neither a map nor `empty()`.
    fn merge_maps(&self, first: &Self::Value, second: &Self::Value) -> DataResult<Self::Value>;

    /// This function reads a field from a map.
    ///
    /// Absence is reported as `None`, which is distinct from a present field holding
    /// the backend's null: callers rely on that distinction.
    fn get_field(&self, map: &Self::Value, key: &str) -> Option<Self::Value>;

    /// This function sets a field, returning the new value.
    ///
    /// A non-map input produces a fresh map holding just this field.
    fn set_field(&self, value: &Self::Value, key: &str, new_value: Self::Value) -> Self::Value;

    /// This function removes a field, returning the new value.
    ///
    /// A non-map input is returned unchanged.
    fn remove_field(&self, value: &Self::Value, key: &str) -> Self::Value;

    /// This function returns true if the value is a map containing the provided key.
    fn has_field(&self, value: &Self::Value, key: &str) -> bool {
        self.get_field(value, key).is_some()
    }

    /// This function rebuilds the value using another ops' constructors.
    ///
    /// Variants are probed in a fixed order: boolean → number → string → list → map.
    /// Boolean goes first so backends encoding booleans as 0/1 integers aren't misread
    /// as numbers; backends where that order is wrong must override this method.
    /// A value matching none of the probes becomes `other.empty()`. Never panics.
    fn convert_to<U: DynamicOps>(&self, other: &U, value: &Self::Value) -> U::Value {
        if let Some(boolean) = self.boolean_value(value).ok() {
            return other.create_boolean(boolean);
        }

        if let Some(numeric) = self.numeric_value(value).ok() {
            return other.create_numeric(numeric);
        }

        if let Some(string) = self.string_value(value).ok() {
            return other.create_string(&string);
        }

        if let Some(items) = self.list_values(value).ok() {
            return other.create_list(items.iter().map(|item| self.convert_to(other, item)));
        }

        if let Some(entries) = self.map_entries(value).ok() {
            return other.create_map(entries.iter().map(|(key, entry)|
                (self.convert_to(other, key), self.convert_to(other, entry))
            ));
        }

        other.empty()
    }
}
