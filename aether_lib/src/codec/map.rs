//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains [`MapCodec`], the restricted codec that reads and writes fields
//! of a pre-existing map, and the three field-lifting codecs built on it.
//!
//! Map codecs are the building blocks of records: each one owns its field names, writes
//! them into a shared map on encode, and reads them back from the same map on decode.
//! Every map codec here is also a full [`Codec`](super::Codec) over a standalone map,
//! with the decode remainder being the input minus the consumed fields.
//!
//! One deliberate strictness: a *present but malformed* optional field is an error, not
//! a silent `None`. Lenient swallowing hides data corruption behind defaults.

use crate::ops::DynamicOps;
use crate::result::DataResult;

use super::{Codec, Decoder, Encoder};

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait is the field-level half of the codec algebra: encoding into and decoding
/// from a map that may hold other codecs' fields too.
pub trait MapCodec<A>: Send + Sync {

    /// This method returns the field names this codec owns.
    fn fields(&self) -> Vec<String>;

    /// This method writes the value's fields into the provided map.
    fn encode_fields<O: DynamicOps>(&self, value: &A, ops: &O, map: O::Value) -> DataResult<O::Value>;

    /// This method reads the value back from the provided map.
    fn decode_fields<O: DynamicOps>(&self, ops: &O, map: &O::Value) -> DataResult<A>;
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct lifts a codec into a mandatory field of a map. See
/// [`Codec::field_of`](super::Codec::field_of).
pub struct FieldCodec<C> {
    name: String,
    element: C,
}

/// This struct lifts a codec into an optional field of a map. See
/// [`Codec::optional_field_of`](super::Codec::optional_field_of).
pub struct OptionalFieldCodec<C> {
    name: String,
    element: C,
}

/// This struct lifts a codec into an optional field with a default. See
/// [`Codec::optional_field_of_or`](super::Codec::optional_field_of_or).
pub struct DefaultFieldCodec<C, A> {
    name: String,
    element: C,
    default: A,
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl<C> FieldCodec<C> {

    /// This function builds a new `FieldCodec` for the provided field name.
    pub fn new(name: impl Into<String>, element: C) -> Self {
        Self { name: name.into(), element }
    }
}

impl<C> OptionalFieldCodec<C> {

    /// This function builds a new `OptionalFieldCodec` for the provided field name.
    pub fn new(name: impl Into<String>, element: C) -> Self {
        Self { name: name.into(), element }
    }
}

impl<C, A> DefaultFieldCodec<C, A> {

    /// This function builds a new `DefaultFieldCodec` for the provided field name and default.
    pub fn new(name: impl Into<String>, element: C, default: A) -> Self {
        Self { name: name.into(), element, default }
    }
}

impl<A, C: Codec<A>> MapCodec<A> for FieldCodec<C> {

    fn fields(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn encode_fields<O: DynamicOps>(&self, value: &A, ops: &O, map: O::Value) -> DataResult<O::Value> {
        self.element.encode_start(ops, value)
            .map(|encoded| ops.set_field(&map, &self.name, encoded))
            .map_error(format!("In field \"{}\"", self.name))
    }

    fn decode_fields<O: DynamicOps>(&self, ops: &O, map: &O::Value) -> DataResult<A> {
        match ops.get_field(map, &self.name) {
            Some(value) => self.element.parse(ops, &value).map_error(format!("In field \"{}\"", self.name)),
            None => {
                let name = self.name.clone();
                DataResult::error(move || format!("No key \"{name}\" in the input map"))
            },
        }
    }
}

impl<A, C: Codec<A>> MapCodec<Option<A>> for OptionalFieldCodec<C> {

    fn fields(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn encode_fields<O: DynamicOps>(&self, value: &Option<A>, ops: &O, map: O::Value) -> DataResult<O::Value> {
        match value {
            Some(value) => self.element.encode_start(ops, value)
                .map(|encoded| ops.set_field(&map, &self.name, encoded))
                .map_error(format!("In field \"{}\"", self.name)),
            None => DataResult::success(map),
        }
    }

    fn decode_fields<O: DynamicOps>(&self, ops: &O, map: &O::Value) -> DataResult<Option<A>> {
        match ops.get_field(map, &self.name) {
            Some(value) => self.element.parse(ops, &value)
                .map(Some)
                .map_error(format!("In field \"{}\"", self.name)),
            None => DataResult::success(None),
        }
    }
}

impl<A: Clone + PartialEq + Send + Sync, C: Codec<A>> MapCodec<A> for DefaultFieldCodec<C, A> {

    fn fields(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn encode_fields<O: DynamicOps>(&self, value: &A, ops: &O, map: O::Value) -> DataResult<O::Value> {

        // A value equal to the default is not written at all.
        if *value == self.default {
            return DataResult::success(map);
        }

        self.element.encode_start(ops, value)
            .map(|encoded| ops.set_field(&map, &self.name, encoded))
            .map_error(format!("In field \"{}\"", self.name))
    }

    fn decode_fields<O: DynamicOps>(&self, ops: &O, map: &O::Value) -> DataResult<A> {
        match ops.get_field(map, &self.name) {
            Some(value) => self.element.parse(ops, &value).map_error(format!("In field \"{}\"", self.name)),
            None => DataResult::success(self.default.clone()),
        }
    }
}

/// This function is the shared top-level encode of every map codec: an empty prefix
/// becomes a fresh map, a map prefix is written into, anything else is an error.
pub(crate) fn encode_into_prefix<A, M: MapCodec<A>, O: DynamicOps>(
    codec: &M,
    value: &A,
    ops: &O,
    prefix: O::Value,
) -> DataResult<O::Value> {
    if prefix == ops.empty() {
        codec.encode_fields(value, ops, ops.empty_map())
    } else if ops.is_map(&prefix) {
        codec.encode_fields(value, ops, prefix)
    } else {
        let rendered = format!("{prefix:?}");
        DataResult::error(move || format!("Cannot encode map fields into a non-map prefix: {rendered}"))
    }
}

/// This function is the shared top-level decode of every map codec: the remainder is
/// the input minus the consumed fields.
pub(crate) fn decode_with_remainder<A, M: MapCodec<A>, O: DynamicOps>(
    codec: &M,
    ops: &O,
    input: &O::Value,
) -> DataResult<(A, O::Value)> {
    codec.decode_fields(ops, input).map(|value| {
        let mut rest = input.clone();
        for field in codec.fields() {
            rest = ops.remove_field(&rest, &field);
        }
        (value, rest)
    })
}

impl<A, C: Codec<A>> Encoder<A> for FieldCodec<C> {
    fn encode<O: DynamicOps>(&self, value: &A, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        encode_into_prefix(self, value, ops, prefix)
    }
}

impl<A, C: Codec<A>> Decoder<A> for FieldCodec<C> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(A, O::Value)> {
        decode_with_remainder(self, ops, input)
    }
}

impl<A, C: Codec<A>> Encoder<Option<A>> for OptionalFieldCodec<C> {
    fn encode<O: DynamicOps>(&self, value: &Option<A>, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        encode_into_prefix(self, value, ops, prefix)
    }
}

impl<A, C: Codec<A>> Decoder<Option<A>> for OptionalFieldCodec<C> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(Option<A>, O::Value)> {
        decode_with_remainder(self, ops, input)
    }
}

impl<A: Clone + PartialEq + Send + Sync, C: Codec<A>> Encoder<A> for DefaultFieldCodec<C, A> {
    fn encode<O: DynamicOps>(&self, value: &A, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        encode_into_prefix(self, value, ops, prefix)
    }
}

impl<A: Clone + PartialEq + Send + Sync, C: Codec<A>> Decoder<A> for DefaultFieldCodec<C, A> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(A, O::Value)> {
        decode_with_remainder(self, ops, input)
    }
}
