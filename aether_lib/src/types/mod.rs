//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the structural [`Type`] DSL.
//!
//! A [`Type`] describes the shape of dynamic data at one schema version. Its codec is
//! derived mechanically per variant: [`read`](Type::read) validates a backend value
//! against the shape and returns it normalized, and since the dynamic representation is
//! its own encoded form, [`write`](Type::write) shares that normalization.
//!
//! Two types are considered the *same* for rule matching iff their references are
//! equal. [`describe`](Type::describe) renders the human-readable structural form used
//! verbatim in error messages and diagnostic logs.

use itertools::Itertools;

use std::collections::BTreeMap;
use std::fmt;

use crate::ops::DynamicOps;
use crate::result::DataResult;
use crate::schema::TypeReference;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This enum defines every primitive category a [`Type`] can describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Numeric,
}

/// This enum defines every structural shape the type system supports.
#[derive(Clone, Debug)]
pub enum Type {

    /// A named primitive of some category.
    Primitive {
        name: String,
        kind: PrimitiveKind,
    },

    /// A homogeneous list.
    List(Box<Type>),

    /// A value that may be the backend's empty value instead.
    Optional(Box<Type>),

    /// Both shapes at once, merged over the same map. Only meaningful when the
    /// components are field-like.
    Product(Box<Type>, Box<Type>),

    /// One of two shapes, left-biased.
    Sum(Box<Type>, Box<Type>),

    /// A single field of a map. The rest of the map passes through untouched.
    Field {
        name: String,
        optional: bool,
        element: Box<Type>,
    },

    /// An alias, giving a structure a stable name for references and diagnostics.
    Named {
        name: String,
        element: Box<Type>,
    },

    /// The identity lens: any shape, kept as-is.
    Passthrough,

    /// A discriminated union: a map holding a tag field plus the payload fields of
    /// the variant the tag selects.
    TaggedChoice {
        tag_field: String,
        variants: BTreeMap<String, Type>,
    },
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl PrimitiveKind {

    /// This function returns the conventional name of the category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Numeric => "number",
        }
    }

    /// This function validates a value against the category, rebuilding it through the
    /// matching create/read pair of the ops.
    fn normalize<O: DynamicOps>(self, ops: &O, value: &O::Value) -> DataResult<O::Value> {
        match self {
            Self::Bool => ops.boolean_value(value).map(|value| ops.create_boolean(value)),
            Self::Byte => ops.byte_value(value).map(|value| ops.create_byte(value)),
            Self::Short => ops.short_value(value).map(|value| ops.create_short(value)),
            Self::Int => ops.int_value(value).map(|value| ops.create_int(value)),
            Self::Long => ops.long_value(value).map(|value| ops.create_long(value)),
            Self::Float => ops.float_value(value).map(|value| ops.create_float(value)),
            Self::Double => ops.double_value(value).map(|value| ops.create_double(value)),
            Self::String => ops.string_value(value).map(|value| ops.create_string(&value)),
            Self::Numeric => ops.numeric_value(value).map(|value| ops.create_numeric(value)),
        }
    }
}

impl Type {

    /// This function builds a primitive type with a custom name.
    pub fn primitive(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self::Primitive { name: name.into(), kind }
    }

    /// This function builds the standard bool type.
    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Bool.name(), PrimitiveKind::Bool)
    }

    /// This function builds the standard byte type.
    pub fn byte() -> Self {
        Self::primitive(PrimitiveKind::Byte.name(), PrimitiveKind::Byte)
    }

    /// This function builds the standard short type.
    pub fn short() -> Self {
        Self::primitive(PrimitiveKind::Short.name(), PrimitiveKind::Short)
    }

    /// This function builds the standard int type.
    pub fn int() -> Self {
        Self::primitive(PrimitiveKind::Int.name(), PrimitiveKind::Int)
    }

    /// This function builds the standard long type.
    pub fn long() -> Self {
        Self::primitive(PrimitiveKind::Long.name(), PrimitiveKind::Long)
    }

    /// This function builds the standard float type.
    pub fn float() -> Self {
        Self::primitive(PrimitiveKind::Float.name(), PrimitiveKind::Float)
    }

    /// This function builds the standard double type.
    pub fn double() -> Self {
        Self::primitive(PrimitiveKind::Double.name(), PrimitiveKind::Double)
    }

    /// This function builds the standard string type.
    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String.name(), PrimitiveKind::String)
    }

    /// This function builds the standard open-world number type.
    pub fn numeric() -> Self {
        Self::primitive(PrimitiveKind::Numeric.name(), PrimitiveKind::Numeric)
    }

    /// This function builds a list type.
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// This function builds an optional type.
    pub fn optional(element: Type) -> Self {
        Self::Optional(Box::new(element))
    }

    /// This function builds a product (pair) type.
    pub fn product(first: Type, second: Type) -> Self {
        Self::Product(Box::new(first), Box::new(second))
    }

    /// This function builds a sum (either) type.
    pub fn sum(left: Type, right: Type) -> Self {
        Self::Sum(Box::new(left), Box::new(right))
    }

    /// This function builds a mandatory field type.
    pub fn field(name: impl Into<String>, element: Type) -> Self {
        Self::Field { name: name.into(), optional: false, element: Box::new(element) }
    }

    /// This function builds an optional field type.
    pub fn optional_field(name: impl Into<String>, element: Type) -> Self {
        Self::Field { name: name.into(), optional: true, element: Box::new(element) }
    }

    /// This function builds a named alias of another type.
    pub fn named(name: impl Into<String>, element: Type) -> Self {
        Self::Named { name: name.into(), element: Box::new(element) }
    }

    /// This function builds the passthrough type.
    pub fn passthrough() -> Self {
        Self::Passthrough
    }

    /// This function builds a tagged choice from its tag field and variants.
    pub fn tagged_choice(tag_field: impl Into<String>, variants: impl IntoIterator<Item = (String, Type)>) -> Self {
        Self::TaggedChoice {
            tag_field: tag_field.into(),
            variants: variants.into_iter().collect(),
        }
    }

    /// This function returns the reference identifying this type for rule matching.
    ///
    /// Primitives and named types use their name; every other shape derives a stable
    /// structural reference from its description.
    pub fn reference(&self) -> TypeReference {
        match self {
            Self::Primitive { name, .. } | Self::Named { name, .. } => TypeReference::new(name.clone()),
            other => TypeReference::new(other.describe()),
        }
    }

    /// This function returns true if both types share the same reference.
    pub fn same(&self, other: &Type) -> bool {
        self.reference() == other.reference()
    }

    /// This function returns the ordered list of direct sub-types.
    pub fn children(&self) -> Vec<&Type> {
        match self {
            Self::Primitive { .. } | Self::Passthrough => vec![],
            Self::List(element) | Self::Optional(element) => vec![element],
            Self::Product(first, second) => vec![first, second],
            Self::Sum(left, right) => vec![left, right],
            Self::Field { element, .. } | Self::Named { element, .. } => vec![element],
            Self::TaggedChoice { variants, .. } => variants.values().collect(),
        }
    }

    /// This function returns the human-readable structural description of the type.
    pub fn describe(&self) -> String {
        match self {
            Self::Primitive { name, .. } => name.clone(),
            Self::List(element) => format!("List<{}>", element.describe()),
            Self::Optional(element) => format!("Optional<{}>", element.describe()),
            Self::Product(first, second) => format!("({} × {})", first.describe(), second.describe()),
            Self::Sum(left, right) => format!("({} | {})", left.describe(), right.describe()),
            Self::Field { name, optional, element } => if *optional {
                format!("?{}: {}", name, element.describe())
            } else {
                format!("{}: {}", name, element.describe())
            },
            Self::Named { name, .. } => name.clone(),
            Self::Passthrough => "passthrough".to_owned(),
            Self::TaggedChoice { tag_field, variants } => format!(
                "TaggedChoice<{}>{{{}}}",
                tag_field,
                variants.iter().map(|(tag, variant)| format!("{} -> {}", tag, variant.describe())).join(", ")
            ),
        }
    }

    /// This function validates a backend value against the type, returning it
    /// normalized through the matching ops constructors.
    pub fn read<O: DynamicOps>(&self, ops: &O, value: &O::Value) -> DataResult<O::Value> {
        match self {
            Self::Primitive { name, kind } => kind.normalize(ops, value).map_error(format!("In type \"{name}\"")),

            Self::List(element) => {
                let items = match ops.list_values(value) {
                    DataResult::Success { value, .. } => value,
                    DataResult::Error { message, .. } => return DataResult::Error { message, partial: None },
                };

                let mut normalized = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match element.read(ops, item) {
                        DataResult::Success { value, .. } => normalized.push(value),
                        error => return error.map_error(format!("In list element {index}")),
                    }
                }
                DataResult::success(ops.create_list(normalized))
            },

            Self::Optional(element) => if *value == ops.empty() {
                DataResult::success(ops.empty())
            } else {
                element.read(ops, value)
            },

            Self::Product(first, second) => first.read(ops, value)
                .flat_map(|first_read| second.read(ops, value)
                    .flat_map(|second_read| ops.merge_maps(&first_read, &second_read))),

            Self::Sum(left, right) => left.read(ops, value).or_else(|| right.read(ops, value)),

            Self::Field { name, optional, element } => match ops.get_field(value, name) {
                Some(field) => element.read(ops, &field)
                    .map(|normalized| ops.set_field(value, name, normalized))
                    .map_error(format!("In field \"{name}\"")),
                None => if *optional {
                    DataResult::success(value.clone())
                } else {
                    let name = name.clone();
                    DataResult::error(move || format!("No key \"{name}\" in the input map"))
                },
            },

            Self::Named { element, .. } => element.read(ops, value),

            Self::Passthrough => DataResult::success(value.clone()),

            Self::TaggedChoice { variants, .. } => self.read_tagged(ops, value)
                .flat_map(|(tag, payload)| match variants.get(&tag) {
                    Some(variant) => variant.read(ops, &payload).map_error(format!("In variant \"{tag}\"")),
                    None => DataResult::error(move || format!("Unknown tag \"{tag}\"")),
                }),
        }
    }

    /// This function validates a backend value for encoding.
    ///
    /// The dynamic representation is its own encoded form, so this shares the
    /// normalization of [`read`](Self::read).
    pub fn write<O: DynamicOps>(&self, ops: &O, value: &O::Value) -> DataResult<O::Value> {
        self.read(ops, value)
    }

    /// This function reads the tag of a tagged choice and hands back the whole input,
    /// tag field included, as the payload.
    ///
    /// It fails on anything that is not a tagged choice, on a missing or non-string
    /// tag field, and on a tag with no registered variant.
    pub fn read_tagged<O: DynamicOps>(&self, ops: &O, value: &O::Value) -> DataResult<(String, O::Value)> {
        match self {
            Self::TaggedChoice { tag_field, variants } => {
                let tag_value = match ops.get_field(value, tag_field) {
                    Some(tag_value) => tag_value,
                    None => {
                        let tag_field = tag_field.clone();
                        return DataResult::error(move || format!("Input does not contain a key \"{tag_field}\""));
                    },
                };

                ops.string_value(&tag_value)
                    .map_error(format!("In tag field \"{tag_field}\""))
                    .flat_map(|tag| if variants.contains_key(&tag) {
                        DataResult::success((tag, value.clone()))
                    } else {
                        DataResult::error(move || format!("Unknown tag \"{tag}\""))
                    })
            },

            other => {
                let described = other.describe();
                DataResult::error(move || format!("Not a tagged choice: {described}"))
            },
        }
    }

    /// This function encodes a `(tag, payload)` pair of a tagged choice: a map holding
    /// the tag field, with the payload's fields merged in.
    ///
    /// The payload must be a map or empty; an empty payload encodes to the bare
    /// `{tag_field: tag}` map.
    pub fn write_tagged<O: DynamicOps>(&self, ops: &O, tag: &str, payload: &O::Value) -> DataResult<O::Value> {
        match self {
            Self::TaggedChoice { tag_field, variants } => {
                if !variants.contains_key(tag) {
                    let tag = tag.to_owned();
                    return DataResult::error(move || format!("Unknown tag \"{tag}\""));
                }

                if *payload != ops.empty() && !ops.is_map(payload) {
                    let rendered = format!("{payload:?}");
                    return DataResult::error(move || format!("Tagged choice payload must be a map or empty, got: {rendered}"));
                }

                let base = ops.set_field(&ops.empty(), tag_field, ops.create_string(tag));
                ops.merge_maps(&base, payload)
            },

            other => {
                let described = other.describe();
                DataResult::error(move || format!("Not a tagged choice: {described}"))
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
