//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains [`DataResult`], the carrier of every fallible data operation in the lib.
//!
//! A [`DataResult`] differs from a plain [`Result`](core::result::Result) in two ways:
//! - Error messages are lazy. They're closures only invoked when someone actually reads
//!   the message, so the success path never pays for string building.
//! - Both variants can be *partial*. A partial success means "a default was used or data
//!   was dropped, keep the value but warn". A partial error still carries a best-effort
//!   value the caller may decide to salvage.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

#[cfg(test)] mod result_test;

/// Lazily-evaluated error message.
type MessageThunk = Arc<dyn Fn() -> String + Send + Sync>;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This enum represents the result of a data operation: a value, or a lazy error message
/// with an optional salvageable value.
#[derive(Clone)]
pub enum DataResult<T> {

    /// The operation succeeded. If `partial` is true, a default was used or data was
    /// dropped along the way.
    Success {
        value: T,
        partial: bool,
    },

    /// The operation failed. `partial` may carry a best-effort value.
    Error {
        message: MessageThunk,
        partial: Option<T>,
    },
}

//---------------------------------------------------------------------------//
//                              Implementations
//---------------------------------------------------------------------------//

impl<T> DataResult<T> {

    /// This function builds a full success.
    pub fn success(value: T) -> Self {
        Self::Success { value, partial: false }
    }

    /// This function builds a success flagged as partial.
    pub fn partial_success(value: T) -> Self {
        Self::Success { value, partial: true }
    }

    /// This function builds an error from a lazy message.
    ///
    /// The thunk is only invoked when the message is read, so callers may capture
    /// whatever context they need without paying for the formatting upfront.
    pub fn error(message: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Error { message: Arc::new(message), partial: None }
    }

    /// This function builds an error that still carries a salvageable value.
    pub fn partial_error(message: impl Fn() -> String + Send + Sync + 'static, fallback: T) -> Self {
        Self::Error { message: Arc::new(message), partial: Some(fallback) }
    }

    /// This function returns true if the result is a success, partial or not.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// This function returns true if the result is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// This function returns true if the result is flagged as partial, on either variant.
    pub fn is_partial(&self) -> bool {
        match self {
            Self::Success { partial, .. } => *partial,
            Self::Error { partial, .. } => partial.is_some(),
        }
    }

    /// This function returns a reference to the success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Error { .. } => None,
        }
    }

    /// This function consumes the result, returning the success value and discarding
    /// errors and partial payloads.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Error { .. } => None,
        }
    }

    /// This function builds and returns the error message, if the result is an error.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message, .. } => Some(message()),
        }
    }

    /// This function maps the success value, preserving the variant and the partial flag.
    pub fn map<U, F: FnOnce(T) -> U>(self, op: F) -> DataResult<U> {
        match self {
            Self::Success { value, partial } => DataResult::Success { value: op(value), partial },
            Self::Error { message, partial } => DataResult::Error { message, partial: partial.map(op) },
        }
    }

    /// This function chains another fallible operation, short-circuiting on error.
    ///
    /// Partiality is sticky: chaining from a partial success keeps the final result
    /// partial. An error's partial payload is dropped, as it cannot be pushed through
    /// a fallible operation.
    pub fn flat_map<U, F: FnOnce(T) -> DataResult<U>>(self, op: F) -> DataResult<U> {
        match self {
            Self::Success { value, partial } => {
                let result = op(value);
                if partial { result.into_partial() } else { result }
            },
            Self::Error { message, .. } => DataResult::Error { message, partial: None },
        }
    }

    /// This function prefixes the error message with the provided context, preserving
    /// the partial payload. Successes pass through untouched.
    pub fn map_error(self, prefix: impl Into<String>) -> Self {
        match self {
            Self::Success { .. } => self,
            Self::Error { message, partial } => {
                let prefix = prefix.into();
                Self::Error {
                    message: Arc::new(move || format!("{}: {}", prefix, message())),
                    partial,
                }
            },
        }
    }

    /// This function returns the first success: `self` if it succeeded, otherwise the
    /// alternative. If both fail, the original error is the one reported.
    pub fn or_else(self, alternative: impl FnOnce() -> DataResult<T>) -> Self {
        if self.is_success() {
            self
        } else {
            let fallback = alternative();
            if fallback.is_success() { fallback } else { self }
        }
    }

    /// This function consumes the result, returning the success value, the error's
    /// partial payload, or the provided fallback, in that order.
    ///
    /// Salvaging a partial payload is logged, as data may have been dropped.
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Self::Success { value, .. } => value,
            Self::Error { message, partial } => match partial {
                Some(value) => {
                    log::warn!("Salvaged a partial value from an error: {}", message());
                    value
                },
                None => fallback,
            },
        }
    }

    /// This function converts the result into the crate's [`Result`], building the
    /// error message exactly once.
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Error { message, .. } => Err(Error::Data(message())),
        }
    }

    /// This function flags the result as partial, whatever its variant.
    pub(crate) fn into_partial(self) -> Self {
        match self {
            Self::Success { value, .. } => Self::Success { value, partial: true },
            error => error,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DataResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Success { value, partial } => f.debug_struct("Success")
                .field("value", value)
                .field("partial", partial)
                .finish(),
            Self::Error { message, partial } => f.debug_struct("Error")
                .field("message", &message())
                .field("partial", partial)
                .finish(),
        }
    }
}

/// Equality compares success values and partial flags. Errors compare by message, which
/// means comparing errors *does* build their messages. Only really meant for tests.
impl<T: PartialEq> PartialEq for DataResult<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Success { value: a, partial: pa }, Self::Success { value: b, partial: pb }) => a == b && pa == pb,
            (Self::Error { message: a, partial: pa }, Self::Error { message: b, partial: pb }) => a() == b() && pa == pb,
            _ => false,
        }
    }
}
