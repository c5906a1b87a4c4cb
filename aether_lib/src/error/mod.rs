//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains all kind of errors used inside this crate.
//!
//! Keep in mind these are *contract* errors. Expected data failures (a document that
//! doesn't match a codec, a missing field) flow through
//! [`DataResult`](crate::result::DataResult) instead, and never end up here unless a
//! caller explicitly converts them.

use thiserror::Error;

use crate::schema::{TypeReference, Version};

/// Custom `Result` type, to always return our custom error.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Custom error type for the lib.
#[derive(Error, Debug)]
pub enum Error {
    #[error("The registry is frozen. No further registrations are allowed.")]
    RegistryFrozen,

    #[error("There is no schema registered for version {0}.")]
    UnknownVersion(Version),

    #[error("There is no type registered under the reference \"{0}\".")]
    UnknownTypeReference(TypeReference),

    #[error("No schemas have been registered. A fixer needs at least one schema to know its current version.")]
    NoSchemasRegistered,

    #[error("Invalid version range: the source version ({0}) is greater than the target version ({1}).")]
    InvalidVersionRange(Version, Version),

    #[error("The target version ({0}) is newer than the current version ({1}).")]
    VersionAheadOfCurrent(Version, Version),

    #[error("The fix \"{0}\" declares a source version ({1}) greater than its target version ({2}).")]
    InvalidFixRange(String, Version, Version),

    #[error("Fixes for the type \"{0}\" are registered out of version order: \"{1}\" (from version {2}) was registered after \"{3}\" (from version {4}).")]
    FixOrderInversion(TypeReference, String, Version, String, Version),

    #[error("The rule \"{0}\" did not match an input of type \"{1}\".")]
    RuleDidNotMatch(String, String),

    #[error("Invalid dotted path \"{0}\": {1}.")]
    InvalidPath(String, String),

    #[error("Missing intermediate key \"{0}\" while resolving the path \"{1}\".")]
    PathParentMissing(String, String),

    #[error("Error trying to decode a value as \"{0}\": {1}")]
    DecodeFailed(TypeReference, String),

    #[error("Error trying to encode a value as \"{0}\": {1}")]
    EncodeFailed(TypeReference, String),

    #[error("The fix \"{name}\" failed while updating \"{type_ref}\" from version {from} to version {to}: {source}")]
    FixFailed {
        name: String,
        from: Version,
        to: Version,
        type_ref: TypeReference,
        #[source] source: Box<Error>,
    },

    /// Carrier for data failures a caller decided to surface as hard errors.
    #[error("{0}")]
    Data(String),
}
