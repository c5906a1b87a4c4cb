//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Tests for [`DataResult`].
//!
//! [`DataResult`]: crate::result::DataResult

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::DataResult;

//---------------------------------------------------------------------------//
//                                  Tests
//---------------------------------------------------------------------------//

/// Test to make sure error messages are only built when somebody reads them.
#[test]
fn lazy_messages() {
    let calls = Arc::new(AtomicUsize::new(0));

    let calls_for_thunk = calls.clone();
    let result: DataResult<i32> = DataResult::error(move || {
        calls_for_thunk.fetch_add(1, Ordering::SeqCst);
        "boom".to_owned()
    });

    // None of these may build the message.
    let result = result.map(|value| value + 1).map_error("context");
    assert!(result.is_error());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // Reading it builds it exactly once.
    assert_eq!(result.error_message().unwrap(), "context: boom");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Test for `DataResult::map()`: identity law and variant preservation.
#[test]
fn map_laws() {
    let success = DataResult::success(7);
    assert_eq!(success.clone().map(|value| value), success);

    let partial = DataResult::partial_success(7);
    assert!(partial.clone().map(|value| value * 2).is_partial());

    let error: DataResult<i32> = DataResult::partial_error(|| "bad".to_owned(), 3);
    let mapped = error.map(|value| value * 2);
    assert!(mapped.is_error());

    // The partial payload must be mapped too.
    assert_eq!(mapped.value_or(0), 6);
}

/// Test for `DataResult::flat_map()`: `flat_map(success)` is the identity, and errors
/// short-circuit.
#[test]
fn flat_map_laws() {
    let success = DataResult::success(7);
    assert_eq!(success.clone().flat_map(DataResult::success), success);

    let error: DataResult<i32> = DataResult::error(|| "bad".to_owned());
    let chained = error.flat_map(|value| DataResult::success(value + 1));
    assert!(chained.is_error());
    assert_eq!(chained.error_message().unwrap(), "bad");

    // Partiality is sticky through the chain.
    let partial = DataResult::partial_success(7).flat_map(|value| DataResult::success(value + 1));
    assert_eq!(partial, DataResult::partial_success(8));
}

/// Test for `DataResult::map_error()`: the partial payload survives the prefixing.
#[test]
fn map_error_preserves_partial() {
    let error: DataResult<i32> = DataResult::partial_error(|| "bad".to_owned(), 3);
    let prefixed = error.map_error("while testing");

    assert_eq!(prefixed.error_message().unwrap(), "while testing: bad");
    assert_eq!(prefixed.value_or(0), 3);
}

/// Test for `DataResult::or_else()`: first success wins, and if everything fails the
/// original error is the one reported.
#[test]
fn or_else() {
    let success = DataResult::success(1);
    assert_eq!(success.clone().or_else(|| DataResult::success(2)), success);

    let error: DataResult<i32> = DataResult::error(|| "first".to_owned());
    assert_eq!(error.clone().or_else(|| DataResult::success(2)), DataResult::success(2));

    let both_bad = error.or_else(|| DataResult::error(|| "second".to_owned()));
    assert_eq!(both_bad.error_message().unwrap(), "first");
}

/// Test for `DataResult::value_or()` and `DataResult::into_result()`.
#[test]
fn extraction() {
    assert_eq!(DataResult::success(1).value_or(9), 1);

    let error: DataResult<i32> = DataResult::error(|| "bad".to_owned());
    assert_eq!(error.clone().value_or(9), 9);
    assert!(error.into_result().is_err());

    let partial: DataResult<i32> = DataResult::partial_error(|| "bad".to_owned(), 5);
    assert_eq!(partial.value_or(9), 5);

    assert_eq!(DataResult::success(1).into_result().unwrap(), 1);
}
