//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the primitive codecs, one per primitive category.
//!
//! Each of them is a thin wrapper over the matching [`DynamicOps`] create/read pair.
//! They only encode into an empty prefix: a primitive cannot be appended to a
//! half-built document.

use crate::ops::{DynamicOps, Numeric};
use crate::result::DataResult;

use super::{Decoder, Encoder};

/// Codec for boolean values.
pub const BOOL: BoolCodec = BoolCodec;

/// Codec for byte values.
pub const BYTE: ByteCodec = ByteCodec;

/// Codec for short values.
pub const SHORT: ShortCodec = ShortCodec;

/// Codec for int values.
pub const INT: IntCodec = IntCodec;

/// Codec for long values.
pub const LONG: LongCodec = LongCodec;

/// Codec for float values.
pub const FLOAT: FloatCodec = FloatCodec;

/// Codec for double values.
pub const DOUBLE: DoubleCodec = DoubleCodec;

/// Codec for string values.
pub const STRING: StringCodec = StringCodec;

/// Codec for open-world numeric values.
pub const NUMERIC: NumericCodec = NumericCodec;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

macro_rules! primitive_codec {
    ($struct_name:ident, $rust_ty:ty, $create:ident, $read:ident) => {

        #[doc = concat!("Codec over `", stringify!($rust_ty), "`, wrapping `", stringify!($create), "`/`", stringify!($read), "`.")]
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $struct_name;

        impl Encoder<$rust_ty> for $struct_name {
            fn encode<O: DynamicOps>(&self, value: &$rust_ty, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
                if prefix == ops.empty() {
                    DataResult::success(ops.$create(*value))
                } else {
                    let rendered = format!("{prefix:?}");
                    DataResult::error(move || format!("Cannot encode a primitive into a non-empty prefix: {rendered}"))
                }
            }
        }

        impl Decoder<$rust_ty> for $struct_name {
            fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<($rust_ty, O::Value)> {
                ops.$read(input).map(|value| (value, ops.empty()))
            }
        }
    };
}

primitive_codec!(BoolCodec, bool, create_boolean, boolean_value);
primitive_codec!(ByteCodec, i8, create_byte, byte_value);
primitive_codec!(ShortCodec, i16, create_short, short_value);
primitive_codec!(IntCodec, i32, create_int, int_value);
primitive_codec!(LongCodec, i64, create_long, long_value);
primitive_codec!(FloatCodec, f32, create_float, float_value);
primitive_codec!(DoubleCodec, f64, create_double, double_value);
primitive_codec!(NumericCodec, Numeric, create_numeric, numeric_value);

/// Codec for string values.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringCodec;

impl Encoder<String> for StringCodec {
    fn encode<O: DynamicOps>(&self, value: &String, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        if prefix == ops.empty() {
            DataResult::success(ops.create_string(value))
        } else {
            let rendered = format!("{prefix:?}");
            DataResult::error(move || format!("Cannot encode a primitive into a non-empty prefix: {rendered}"))
        }
    }
}

impl Decoder<String> for StringCodec {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(String, O::Value)> {
        ops.string_value(input).map(|value| (value, ops.empty()))
    }
}
