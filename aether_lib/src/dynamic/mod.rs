//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains [`Dynamic`], the user-facing carrier of untyped-but-navigable data.
//!
//! A [`Dynamic`] is just an `(ops, value)` pair with convenience navigation on top.
//! It's an immutable shell: every "mutation" returns a new [`Dynamic`] and leaves the
//! original untouched, matching the purity contract of [`DynamicOps`].

use std::fmt;

use crate::ops::{DynamicOps, Numeric};
use crate::result::DataResult;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct is a pointer into some backend document: the ops that knows how to
/// manipulate it, plus the current value.
#[derive(Clone, Debug)]
pub struct Dynamic<O: DynamicOps> {

    /// The ops of the backend this value belongs to.
    ops: O,

    /// The current value.
    value: O::Value,
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl<O: DynamicOps> Dynamic<O> {

    /// This function builds a new `Dynamic` over the provided value.
    pub fn new(ops: O, value: O::Value) -> Self {
        Self { ops, value }
    }

    /// This function builds a `Dynamic` over the ops' empty value.
    pub fn empty(ops: O) -> Self {
        let value = ops.empty();
        Self { ops, value }
    }

    /// This function returns a reference to the ops.
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// This function returns a reference to the inner value.
    pub fn value(&self) -> &O::Value {
        &self.value
    }

    /// This function consumes the `Dynamic`, returning the inner value.
    pub fn into_value(self) -> O::Value {
        self.value
    }

    /// This function returns true if the inner value is the ops' empty value.
    pub fn is_empty(&self) -> bool {
        self.value == self.ops.empty()
    }

    /// This function returns true if the inner value is a map.
    pub fn is_map(&self) -> bool {
        self.ops.is_map(&self.value)
    }

    /// This function returns true if the inner value is a list.
    pub fn is_list(&self) -> bool {
        self.ops.is_list(&self.value)
    }

    /// This function reads a field, if the inner value is a map holding it.
    pub fn get(&self, key: &str) -> Option<Self> {
        self.ops.get_field(&self.value, key).map(|value| Self::new(self.ops.clone(), value))
    }

    /// This function returns true if the inner value is a map holding the provided key.
    pub fn has(&self, key: &str) -> bool {
        self.ops.has_field(&self.value, key)
    }

    /// This function sets a field, returning the new `Dynamic`.
    pub fn set(&self, key: &str, value: O::Value) -> Self {
        Self::new(self.ops.clone(), self.ops.set_field(&self.value, key, value))
    }

    /// This function removes a field, returning the new `Dynamic`.
    pub fn remove(&self, key: &str) -> Self {
        Self::new(self.ops.clone(), self.ops.remove_field(&self.value, key))
    }

    /// This function transforms the value under a field, returning the new `Dynamic`.
    ///
    /// If the field is absent, the `Dynamic` is returned unchanged.
    pub fn update(&self, key: &str, op: impl FnOnce(Self) -> Self) -> Self {
        match self.get(key) {
            Some(field) => self.set(key, op(field).into_value()),
            None => self.clone(),
        }
    }

    /// This function tries to read the inner value as a string.
    pub fn as_string(&self) -> DataResult<String> {
        self.ops.string_value(&self.value)
    }

    /// This function tries to read the inner value as a boolean.
    pub fn as_boolean(&self) -> DataResult<bool> {
        self.ops.boolean_value(&self.value)
    }

    /// This function tries to read the inner value as a number.
    pub fn as_numeric(&self) -> DataResult<Numeric> {
        self.ops.numeric_value(&self.value)
    }

    /// This function tries to read the inner value as an int.
    pub fn as_int(&self) -> DataResult<i32> {
        self.ops.int_value(&self.value)
    }

    /// This function tries to read the inner value as a long.
    pub fn as_long(&self) -> DataResult<i64> {
        self.ops.long_value(&self.value)
    }

    /// This function tries to read the inner value as a double.
    pub fn as_double(&self) -> DataResult<f64> {
        self.ops.double_value(&self.value)
    }

    /// This function returns the map entries with string keys, if the inner value is a map.
    ///
    /// Entries whose key is somehow not a string are skipped.
    pub fn map_values(&self) -> Option<Vec<(String, Self)>> {
        let entries = self.ops.map_entries(&self.value).ok()?;
        Some(entries.into_iter()
            .filter_map(|(key, value)| {
                let key = self.ops.string_value(&key).ok()?;
                Some((key, Self::new(self.ops.clone(), value)))
            })
            .collect())
    }

    /// This function returns the list elements, if the inner value is a list.
    pub fn list_items(&self) -> Option<Vec<Self>> {
        let items = self.ops.list_values(&self.value).ok()?;
        Some(items.into_iter().map(|value| Self::new(self.ops.clone(), value)).collect())
    }

    /// This function rebuilds the value under another ops.
    pub fn convert<U: DynamicOps>(&self, other: U) -> Dynamic<U> {
        let value = self.ops.convert_to(&other, &self.value);
        Dynamic::new(other, value)
    }
}

/// Equality compares the inner values. Two `Dynamic`s over the same backend are equal
/// iff their documents are.
impl<O: DynamicOps> PartialEq for Dynamic<O> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<O: DynamicOps> fmt::Display for Dynamic<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}
