//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the per-version type tables: [`Schema`], its builder, and the
//! [`SchemaRegistry`] mapping versions to schemas.
//!
//! A schema may have a parent; lookups that miss fall through the parent chain, so a
//! version that only changes one type can be declared as a delta. The registry is
//! mutable during bootstrap and frozen before first use; registering anything after
//! the freeze is a contract error.

use getset::Getters;
use serde_derive::{Deserialize, Serialize};

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::Type;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct is a totally-ordered schema version identifier.
///
/// Versions only compare; no arithmetic is defined over them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Version(u32);

/// This struct is the process-stable string identity of a semantic type
/// (`"player"`, `"world.chunk"`). Equality is string equality.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct TypeReference(String);

/// This struct is the type table of one schema version.
#[derive(Clone, Debug, Getters)]
pub struct Schema {

    /// The version this schema describes.
    version: Version,

    /// The parent schema unresolved lookups fall through to.
    #[getset(get = "pub")]
    parent: Option<Arc<Schema>>,

    /// The types declared at this version.
    #[getset(get = "pub")]
    types: HashMap<TypeReference, Arc<Type>>,
}

/// This struct builds a [`Schema`] declaratively during bootstrap.
pub struct SchemaBuilder {
    version: Version,
    parent: Option<Arc<Schema>>,
    types: HashMap<TypeReference, Arc<Type>>,
}

/// This struct maps versions to schemas, in ascending version order.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<Version, Arc<Schema>>,
    frozen: bool,
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl Version {

    /// This function builds a new version from its integer identifier.
    pub const fn new(version: u32) -> Self {
        Self(version)
    }

    /// This function returns the integer identifier of the version.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TypeReference {

    /// This function builds a new type reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// This function returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Schema {

    /// This function starts building a schema for the provided version.
    pub fn builder(version: Version) -> SchemaBuilder {
        SchemaBuilder {
            version,
            parent: None,
            types: HashMap::new(),
        }
    }

    /// This function returns the version this schema describes.
    pub fn version(&self) -> Version {
        self.version
    }

    /// This function looks a type up, falling through the parent chain on a miss.
    pub fn get(&self, reference: &TypeReference) -> Option<Arc<Type>> {
        match self.types.get(reference) {
            Some(found) => Some(found.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.get(reference)),
        }
    }

    /// This function looks a type up, erroring on a miss.
    pub fn require(&self, reference: &TypeReference) -> Result<Arc<Type>> {
        self.get(reference).ok_or_else(|| Error::UnknownTypeReference(reference.clone()))
    }
}

impl SchemaBuilder {

    /// This function declares a type at this version.
    pub fn add_type(mut self, reference: impl Into<String>, declared_type: Type) -> Self {
        self.types.insert(TypeReference::new(reference), Arc::new(declared_type));
        self
    }

    /// This function links the schema to a parent for lookup fallthrough.
    pub fn parent(mut self, parent: Arc<Schema>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// This function finishes the schema.
    pub fn build(self) -> Schema {
        Schema {
            version: self.version,
            parent: self.parent,
            types: self.types,
        }
    }
}

impl SchemaRegistry {

    /// This function builds a new, empty, unfrozen registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// This function registers a schema under its version, replacing any schema
    /// already registered for that version.
    pub fn register(&mut self, schema: Schema) -> Result<Arc<Schema>> {
        if self.frozen {
            return Err(Error::RegistryFrozen);
        }

        let schema = Arc::new(schema);
        self.schemas.insert(schema.version(), schema.clone());
        Ok(schema)
    }

    /// This function seals the registry. Any registration afterwards is an error.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// This function returns true if the registry has been sealed.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// This function returns the schema for the provided version, if registered.
    pub fn get(&self, version: Version) -> Option<Arc<Schema>> {
        self.schemas.get(&version).cloned()
    }

    /// This function returns the schema for the provided version, erroring if missing.
    pub fn require(&self, version: Version) -> Result<Arc<Schema>> {
        self.get(version).ok_or(Error::UnknownVersion(version))
    }

    /// This function returns the newest registered version, if any.
    pub fn current_version(&self) -> Option<Version> {
        self.schemas.keys().next_back().copied()
    }

    /// This function iterates the registered schemas in ascending version order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Schema>> {
        self.schemas.values()
    }

    /// This function returns the amount of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// This function returns true if no schema has been registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Version {
    fn from(version: u32) -> Self {
        Self(version)
    }
}

impl From<&str> for TypeReference {
    fn from(reference: &str) -> Self {
        Self(reference.to_owned())
    }
}

impl From<String> for TypeReference {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}
