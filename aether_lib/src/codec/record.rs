//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the record codec builders: fixed-arity groupings of
//! [`MapCodec`]s plus a constructor and one getter per field.
//!
//! Encoding merges each field into the running map, in group order. Decoding runs every
//! field codec against the same map and assembles the result through the constructor;
//! the first failing field fails the whole record, with its name as context, and no
//! partial assembly happens.
//!
//! ```ignore
//! let codec = record2(
//!     STRING.field_of("name"), |player: &Player| &player.name,
//!     INT.field_of("xp"), |player: &Player| &player.xp,
//!     |name, xp| Player { name, xp },
//! );
//! ```

use std::marker::PhantomData;

use crate::ops::DynamicOps;
use crate::result::DataResult;

use super::map::{decode_with_remainder, encode_into_prefix, MapCodec};
use super::{Decoder, Encoder};

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

macro_rules! record_codec {
    ($struct_name:ident, $func_name:ident, $(($field:ident, $getter:ident, $codec_ty:ident, $getter_ty:ident, $value_ty:ident)),+) => {

        #[doc = concat!("Record codec produced by [`", stringify!($func_name), "`].")]
        pub struct $struct_name<$($codec_ty, $getter_ty,)+ C, $($value_ty,)+ A> {
            $($field: $codec_ty,)+
            $($getter: $getter_ty,)+
            construct: C,
            _types: PhantomData<fn() -> ($($value_ty,)+ A)>,
        }

        /// This function groups the provided `(map codec, getter)` pairs and a
        /// constructor into a record codec.
        pub fn $func_name<A, C, $($codec_ty, $getter_ty, $value_ty,)+>(
            $($field: $codec_ty, $getter: $getter_ty,)+
            construct: C,
        ) -> $struct_name<$($codec_ty, $getter_ty,)+ C, $($value_ty,)+ A>
        where
            $($codec_ty: MapCodec<$value_ty>,)+
            $($getter_ty: Fn(&A) -> &$value_ty + Send + Sync,)+
            C: Fn($($value_ty),+) -> A + Send + Sync,
        {
            $struct_name { $($field, $getter,)+ construct, _types: PhantomData }
        }

        impl<A, C, $($codec_ty, $getter_ty, $value_ty,)+> MapCodec<A>
            for $struct_name<$($codec_ty, $getter_ty,)+ C, $($value_ty,)+ A>
        where
            $($codec_ty: MapCodec<$value_ty>,)+
            $($getter_ty: Fn(&A) -> &$value_ty + Send + Sync,)+
            C: Fn($($value_ty),+) -> A + Send + Sync,
        {
            fn fields(&self) -> Vec<String> {
                let mut fields = Vec::new();
                $(fields.extend(self.$field.fields());)+
                fields
            }

            fn encode_fields<O: DynamicOps>(&self, value: &A, ops: &O, map: O::Value) -> DataResult<O::Value> {
                let result = DataResult::success(map);
                $(let result = result.flat_map(|map| self.$field.encode_fields((self.$getter)(value), ops, map));)+
                result
            }

            fn decode_fields<O: DynamicOps>(&self, ops: &O, map: &O::Value) -> DataResult<A> {
                $(let $field = match self.$field.decode_fields(ops, map) {
                    DataResult::Success { value, .. } => value,
                    DataResult::Error { message, .. } => return DataResult::Error { message, partial: None },
                };)+
                DataResult::success((self.construct)($($field),+))
            }
        }

        impl<A, C, $($codec_ty, $getter_ty, $value_ty,)+> Encoder<A>
            for $struct_name<$($codec_ty, $getter_ty,)+ C, $($value_ty,)+ A>
        where
            $($codec_ty: MapCodec<$value_ty>,)+
            $($getter_ty: Fn(&A) -> &$value_ty + Send + Sync,)+
            C: Fn($($value_ty),+) -> A + Send + Sync,
        {
            fn encode<O: DynamicOps>(&self, value: &A, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
                encode_into_prefix(self, value, ops, prefix)
            }
        }

        impl<A, C, $($codec_ty, $getter_ty, $value_ty,)+> Decoder<A>
            for $struct_name<$($codec_ty, $getter_ty,)+ C, $($value_ty,)+ A>
        where
            $($codec_ty: MapCodec<$value_ty>,)+
            $($getter_ty: Fn(&A) -> &$value_ty + Send + Sync,)+
            C: Fn($($value_ty),+) -> A + Send + Sync,
        {
            fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(A, O::Value)> {
                decode_with_remainder(self, ops, input)
            }
        }
    };
}

record_codec!(Record1, record1,
    (field1, getter1, M1, G1, F1));

record_codec!(Record2, record2,
    (field1, getter1, M1, G1, F1),
    (field2, getter2, M2, G2, F2));

record_codec!(Record3, record3,
    (field1, getter1, M1, G1, F1),
    (field2, getter2, M2, G2, F2),
    (field3, getter3, M3, G3, F3));

record_codec!(Record4, record4,
    (field1, getter1, M1, G1, F1),
    (field2, getter2, M2, G2, F2),
    (field3, getter3, M3, G3, F3),
    (field4, getter4, M4, G4, F4));

record_codec!(Record5, record5,
    (field1, getter1, M1, G1, F1),
    (field2, getter2, M2, G2, F2),
    (field3, getter3, M3, G3, F3),
    (field4, getter4, M4, G4, F4),
    (field5, getter5, M5, G5, F5));

record_codec!(Record6, record6,
    (field1, getter1, M1, G1, F1),
    (field2, getter2, M2, G2, F2),
    (field3, getter3, M3, G3, F3),
    (field4, getter4, M4, G4, F4),
    (field5, getter5, M5, G5, F5),
    (field6, getter6, M6, G6, F6));
