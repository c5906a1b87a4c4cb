//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the codec algebra: the [`Encoder`]/[`Decoder`] trait pair, the
//! [`Codec`] combinators built on top of them, and the primitive/map/record codecs in
//! the submodules.
//!
//! A codec is bidirectional and composable. Encoding writes a value into a backend
//! *prefix* (usually `ops.empty()`, or a partially-built map when composing records).
//! Decoding returns the value *plus the unconsumed remainder* of the input, which is
//! what makes sequential composition ([`Codecs::pair`]) work; the top-level
//! [`parse`](Codec::parse) discards the remainder.
//!
//! Lawful codecs round-trip: `parse(ops, encode_start(ops, a))` succeeds with `a` for
//! every `a` the codec accepts, and re-encoding the parsed value reproduces the same
//! backend value within a single ops.

use std::marker::PhantomData;

use crate::ops::DynamicOps;
use crate::result::DataResult;

pub mod map;
pub mod primitives;
pub mod record;

#[cfg(test)] mod codec_test;

pub use self::map::{DefaultFieldCodec, FieldCodec, MapCodec, OptionalFieldCodec};

//---------------------------------------------------------------------------//
//                            Trait Definitions
//---------------------------------------------------------------------------//

/// This trait covers the encoding half of a codec: writing a value into a backend prefix.
pub trait Encoder<A>: Send + Sync {

    /// This method encodes the value on top of the provided prefix.
    fn encode<O: DynamicOps>(&self, value: &A, ops: &O, prefix: O::Value) -> DataResult<O::Value>;
}

/// This trait covers the decoding half of a codec: reading a value out of a backend input.
pub trait Decoder<A>: Send + Sync {

    /// This method decodes a value, returning it together with the unconsumed remainder
    /// of the input.
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(A, O::Value)>;
}

/// This trait is the combinator surface of a full codec. Anything implementing both
/// [`Encoder`] and [`Decoder`] gets it for free.
pub trait Codec<A>: Encoder<A> + Decoder<A> {

    /// This method encodes the value into a fresh `ops.empty()` prefix.
    fn encode_start<O: DynamicOps>(&self, ops: &O, value: &A) -> DataResult<O::Value> {
        self.encode(value, ops, ops.empty())
    }

    /// This method decodes a value, discarding the remainder.
    fn parse<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<A> {
        self.decode(ops, input).map(|(value, _)| value)
    }

    /// This method maps the codec through an infallible bijection.
    fn xmap<B, F, G>(self, to: F, from: G) -> XMap<Self, F, G, A>
    where
        Self: Sized,
        F: Fn(&A) -> B + Send + Sync,
        G: Fn(&B) -> A + Send + Sync,
    {
        XMap { inner: self, to, from, _types: PhantomData }
    }

    /// This method maps the codec through a fallible bijection.
    fn flat_xmap<B, F, G>(self, to: F, from: G) -> FlatXMap<Self, F, G, A>
    where
        Self: Sized,
        F: Fn(&A) -> DataResult<B> + Send + Sync,
        G: Fn(&B) -> DataResult<A> + Send + Sync,
    {
        FlatXMap { inner: self, to, from, _types: PhantomData }
    }

    /// This method maps the codec with a fallible decode side and an infallible encode side.
    fn comap_flat_map<B, F, G>(self, to: F, from: G) -> ComapFlatMap<Self, F, G, A>
    where
        Self: Sized,
        F: Fn(&A) -> DataResult<B> + Send + Sync,
        G: Fn(&B) -> A + Send + Sync,
    {
        ComapFlatMap { inner: self, to, from, _types: PhantomData }
    }

    /// This method maps the codec with an infallible decode side and a fallible encode side.
    fn flat_comap_map<B, F, G>(self, to: F, from: G) -> FlatComapMap<Self, F, G, A>
    where
        Self: Sized,
        F: Fn(&A) -> B + Send + Sync,
        G: Fn(&B) -> DataResult<A> + Send + Sync,
    {
        FlatComapMap { inner: self, to, from, _types: PhantomData }
    }

    /// This method lifts the codec into a codec of lists.
    fn list(self) -> ListCodec<Self>
    where
        Self: Sized,
    {
        ListCodec { element: self }
    }

    /// This method lifts the codec into a codec of optional values. A failed decode
    /// becomes `None` instead of an error.
    fn optional(self) -> OptionalCodec<Self>
    where
        Self: Sized,
    {
        OptionalCodec { element: self }
    }

    /// This method lifts the codec into a [`MapCodec`] reading/writing the named field
    /// of a pre-existing map.
    fn field_of(self, name: impl Into<String>) -> FieldCodec<Self>
    where
        Self: Sized,
    {
        FieldCodec::new(name, self)
    }

    /// This method lifts the codec into a [`MapCodec`] of an optional field: absent
    /// decodes to `None`, and `None` encodes to no field at all.
    fn optional_field_of(self, name: impl Into<String>) -> OptionalFieldCodec<Self>
    where
        Self: Sized,
    {
        OptionalFieldCodec::new(name, self)
    }

    /// This method lifts the codec into a [`MapCodec`] with a default: an absent field
    /// decodes to the default, and a value equal to the default is omitted on encode.
    fn optional_field_of_or(self, name: impl Into<String>, default: A) -> DefaultFieldCodec<Self, A>
    where
        Self: Sized,
        A: Clone + PartialEq + Send + Sync,
    {
        DefaultFieldCodec::new(name, self, default)
    }

    /// This method chains a fallback codec, tried whenever this one fails. If both
    /// fail, the original error is the one reported.
    fn or_else<C>(self, other: C) -> OrElseCodec<Self, C>
    where
        Self: Sized,
        C: Codec<A>,
    {
        OrElseCodec { first: self, second: other }
    }

    /// This method prefixes every error this codec produces with the provided context.
    fn with_error_context(self, context: impl Into<String>) -> WithContext<Self>
    where
        Self: Sized,
    {
        WithContext { context: context.into(), inner: self }
    }
}

impl<A, C: Encoder<A> + Decoder<A>> Codec<A> for C {}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This enum is a plain left/right sum, the value type of [`Codecs::either`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

/// Namespace for the static codec constructors.
pub struct Codecs;

/// See [`Codec::xmap`].
pub struct XMap<C, F, G, A> {
    inner: C,
    to: F,
    from: G,
    _types: PhantomData<fn() -> A>,
}

/// See [`Codec::flat_xmap`].
pub struct FlatXMap<C, F, G, A> {
    inner: C,
    to: F,
    from: G,
    _types: PhantomData<fn() -> A>,
}

/// See [`Codec::comap_flat_map`].
pub struct ComapFlatMap<C, F, G, A> {
    inner: C,
    to: F,
    from: G,
    _types: PhantomData<fn() -> A>,
}

/// See [`Codec::flat_comap_map`].
pub struct FlatComapMap<C, F, G, A> {
    inner: C,
    to: F,
    from: G,
    _types: PhantomData<fn() -> A>,
}

/// See [`Codec::list`].
pub struct ListCodec<C> {
    element: C,
}

/// See [`Codec::optional`].
pub struct OptionalCodec<C> {
    element: C,
}

/// See [`Codec::or_else`].
pub struct OrElseCodec<C1, C2> {
    first: C1,
    second: C2,
}

/// See [`Codec::with_error_context`].
pub struct WithContext<C> {
    context: String,
    inner: C,
}

/// See [`Codecs::unit`].
pub struct UnitCodec<A> {
    value: A,
}

/// See [`Codecs::pair`].
pub struct PairCodec<C1, C2> {
    first: C1,
    second: C2,
}

/// See [`Codecs::either`].
pub struct EitherCodec<C1, C2> {
    left: C1,
    right: C2,
}

/// See [`Codecs::of`].
pub struct OfCodec<E, D> {
    encoder: E,
    decoder: D,
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl Codecs {

    /// This function builds a codec that decodes to a fixed value without consuming
    /// input, and encodes to the unchanged prefix.
    pub fn unit<A: Clone + Send + Sync>(value: A) -> UnitCodec<A> {
        UnitCodec { value }
    }

    /// This function builds a codec of pairs: the first codec runs, then the second
    /// runs over whatever the first one left unconsumed.
    pub fn pair<A, B, C1: Codec<A>, C2: Codec<B>>(first: C1, second: C2) -> PairCodec<C1, C2> {
        PairCodec { first, second }
    }

    /// This function builds a left-biased sum codec.
    pub fn either<A, B, C1: Codec<A>, C2: Codec<B>>(left: C1, right: C2) -> EitherCodec<C1, C2> {
        EitherCodec { left, right }
    }

    /// This function glues an arbitrary encoder and decoder into a codec.
    pub fn of<A, E: Encoder<A>, D: Decoder<A>>(encoder: E, decoder: D) -> OfCodec<E, D> {
        OfCodec { encoder, decoder }
    }
}

impl<A, B, C, F, G> Encoder<B> for XMap<C, F, G, A>
where
    C: Codec<A>,
    F: Fn(&A) -> B + Send + Sync,
    G: Fn(&B) -> A + Send + Sync,
{
    fn encode<O: DynamicOps>(&self, value: &B, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        self.inner.encode(&(self.from)(value), ops, prefix)
    }
}

impl<A, B, C, F, G> Decoder<B> for XMap<C, F, G, A>
where
    C: Codec<A>,
    F: Fn(&A) -> B + Send + Sync,
    G: Fn(&B) -> A + Send + Sync,
{
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(B, O::Value)> {
        self.inner.decode(ops, input).map(|(value, rest)| ((self.to)(&value), rest))
    }
}

impl<A, B, C, F, G> Encoder<B> for FlatXMap<C, F, G, A>
where
    C: Codec<A>,
    F: Fn(&A) -> DataResult<B> + Send + Sync,
    G: Fn(&B) -> DataResult<A> + Send + Sync,
{
    fn encode<O: DynamicOps>(&self, value: &B, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        (self.from)(value).flat_map(|mapped| self.inner.encode(&mapped, ops, prefix))
    }
}

impl<A, B, C, F, G> Decoder<B> for FlatXMap<C, F, G, A>
where
    C: Codec<A>,
    F: Fn(&A) -> DataResult<B> + Send + Sync,
    G: Fn(&B) -> DataResult<A> + Send + Sync,
{
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(B, O::Value)> {
        self.inner.decode(ops, input).flat_map(|(value, rest)| (self.to)(&value).map(|mapped| (mapped, rest)))
    }
}

impl<A, B, C, F, G> Encoder<B> for ComapFlatMap<C, F, G, A>
where
    C: Codec<A>,
    F: Fn(&A) -> DataResult<B> + Send + Sync,
    G: Fn(&B) -> A + Send + Sync,
{
    fn encode<O: DynamicOps>(&self, value: &B, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        self.inner.encode(&(self.from)(value), ops, prefix)
    }
}

impl<A, B, C, F, G> Decoder<B> for ComapFlatMap<C, F, G, A>
where
    C: Codec<A>,
    F: Fn(&A) -> DataResult<B> + Send + Sync,
    G: Fn(&B) -> A + Send + Sync,
{
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(B, O::Value)> {
        self.inner.decode(ops, input).flat_map(|(value, rest)| (self.to)(&value).map(|mapped| (mapped, rest)))
    }
}

impl<A, B, C, F, G> Encoder<B> for FlatComapMap<C, F, G, A>
where
    C: Codec<A>,
    F: Fn(&A) -> B + Send + Sync,
    G: Fn(&B) -> DataResult<A> + Send + Sync,
{
    fn encode<O: DynamicOps>(&self, value: &B, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        (self.from)(value).flat_map(|mapped| self.inner.encode(&mapped, ops, prefix))
    }
}

impl<A, B, C, F, G> Decoder<B> for FlatComapMap<C, F, G, A>
where
    C: Codec<A>,
    F: Fn(&A) -> B + Send + Sync,
    G: Fn(&B) -> DataResult<A> + Send + Sync,
{
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(B, O::Value)> {
        self.inner.decode(ops, input).map(|(value, rest)| ((self.to)(&value), rest))
    }
}

impl<A, C: Codec<A>> Encoder<Vec<A>> for ListCodec<C> {
    fn encode<O: DynamicOps>(&self, value: &Vec<A>, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        let mut items = Vec::with_capacity(value.len());
        for (index, element) in value.iter().enumerate() {
            match self.element.encode_start(ops, element) {
                DataResult::Success { value, .. } => items.push(value),
                error => return error.map_error(format!("In list element {index}")),
            }
        }

        if prefix == ops.empty() {
            return DataResult::success(ops.create_list(items));
        }

        let mut merged = DataResult::success(prefix);
        for item in items {
            merged = merged.flat_map(|list| ops.merge_to_list(&list, item));
        }
        merged
    }
}

impl<A, C: Codec<A>> Decoder<Vec<A>> for ListCodec<C> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(Vec<A>, O::Value)> {
        let values = match ops.list_values(input) {
            DataResult::Success { value, .. } => value,
            DataResult::Error { message, .. } => return DataResult::Error { message, partial: None },
        };

        let mut decoded = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            match self.element.parse(ops, value) {
                DataResult::Success { value, .. } => decoded.push(value),
                DataResult::Error { message, .. } => return DataResult::Error { message, partial: None }
                    .map_error(format!("In list element {index}")),
            }
        }

        DataResult::success((decoded, ops.empty()))
    }
}

impl<A, C: Codec<A>> Encoder<Option<A>> for OptionalCodec<C> {
    fn encode<O: DynamicOps>(&self, value: &Option<A>, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        match value {
            Some(value) => self.element.encode(value, ops, prefix),
            None => DataResult::success(prefix),
        }
    }
}

impl<A, C: Codec<A>> Decoder<Option<A>> for OptionalCodec<C> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(Option<A>, O::Value)> {
        match self.element.decode(ops, input) {
            DataResult::Success { value: (value, rest), .. } => DataResult::success((Some(value), rest)),
            DataResult::Error { .. } => DataResult::success((None, input.clone())),
        }
    }
}

impl<A, C1: Codec<A>, C2: Codec<A>> Encoder<A> for OrElseCodec<C1, C2> {
    fn encode<O: DynamicOps>(&self, value: &A, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        let fallback_prefix = prefix.clone();
        self.first.encode(value, ops, prefix)
            .or_else(move || self.second.encode(value, ops, fallback_prefix))
    }
}

impl<A, C1: Codec<A>, C2: Codec<A>> Decoder<A> for OrElseCodec<C1, C2> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(A, O::Value)> {
        self.first.decode(ops, input).or_else(|| self.second.decode(ops, input))
    }
}

impl<A, C: Codec<A>> Encoder<A> for WithContext<C> {
    fn encode<O: DynamicOps>(&self, value: &A, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        self.inner.encode(value, ops, prefix).map_error(self.context.clone())
    }
}

impl<A, C: Codec<A>> Decoder<A> for WithContext<C> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(A, O::Value)> {
        self.inner.decode(ops, input).map_error(self.context.clone())
    }
}

impl<A: Clone + Send + Sync> Encoder<A> for UnitCodec<A> {
    fn encode<O: DynamicOps>(&self, _value: &A, _ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        DataResult::success(prefix)
    }
}

impl<A: Clone + Send + Sync> Decoder<A> for UnitCodec<A> {
    fn decode<O: DynamicOps>(&self, _ops: &O, input: &O::Value) -> DataResult<(A, O::Value)> {
        DataResult::success((self.value.clone(), input.clone()))
    }
}

impl<A, B, C1: Codec<A>, C2: Codec<B>> Encoder<(A, B)> for PairCodec<C1, C2> {
    fn encode<O: DynamicOps>(&self, value: &(A, B), ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        self.first.encode(&value.0, ops, prefix)
            .flat_map(|partial| self.second.encode(&value.1, ops, partial))
    }
}

impl<A, B, C1: Codec<A>, C2: Codec<B>> Decoder<(A, B)> for PairCodec<C1, C2> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<((A, B), O::Value)> {
        self.first.decode(ops, input)
            .flat_map(|(first, rest)| self.second.decode(ops, &rest)
                .map(|(second, rest)| ((first, second), rest)))
    }
}

impl<A, B, C1: Codec<A>, C2: Codec<B>> Encoder<Either<A, B>> for EitherCodec<C1, C2> {
    fn encode<O: DynamicOps>(&self, value: &Either<A, B>, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        match value {
            Either::Left(value) => self.left.encode(value, ops, prefix),
            Either::Right(value) => self.right.encode(value, ops, prefix),
        }
    }
}

impl<A, B, C1: Codec<A>, C2: Codec<B>> Decoder<Either<A, B>> for EitherCodec<C1, C2> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(Either<A, B>, O::Value)> {
        self.left.decode(ops, input).map(|(value, rest)| (Either::Left(value), rest))
            .or_else(|| self.right.decode(ops, input).map(|(value, rest)| (Either::Right(value), rest)))
    }
}

impl<A, E: Encoder<A>, D: Decoder<A>> Encoder<A> for OfCodec<E, D> {
    fn encode<O: DynamicOps>(&self, value: &A, ops: &O, prefix: O::Value) -> DataResult<O::Value> {
        self.encoder.encode(value, ops, prefix)
    }
}

impl<A, E: Encoder<A>, D: Decoder<A>> Decoder<A> for OfCodec<E, D> {
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Value) -> DataResult<(A, O::Value)> {
        self.decoder.decode(ops, input)
    }
}
