//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the field operations over dynamic map shapes: flat renames,
//! removals, additions and transformations, their dotted-path variants, the structural
//! group/flatten/move/copy operations, and the conditionals.
//!
//! Dotted paths (`"a.b.c"`) split on `.`; segments are literal map keys, no escaping.
//! An empty path or an empty segment is a contract error, raised when the rule is
//! *built*. Parsed paths are memoized in a bounded global cache, so hot rules never
//! re-parse.
//!
//! Inside a rule application there is no error channel: a path that cannot be resolved
//! makes the rule not match. The standalone helpers ([`get_at`], [`set_at`],
//! [`remove_at`], [`update_at`]) do report missing parents as errors; they're also the
//! single-pass `Dynamic -> Dynamic` layer for hot paths that don't want rule dispatch.

use lazy_static::lazy_static;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::dynamic::Dynamic;
use crate::error::{Error, Result};
use crate::ops::DynamicOps;

use super::{Rule, Rules};

/// Entry cap of the global path cache. The cache is cleared when it fills up; paths in
/// a real fix set are few and hot, so eviction is effectively never hit.
const PATH_CACHE_LIMIT: usize = 1024;

lazy_static! {
    static ref PATH_CACHE: Mutex<HashMap<String, Arc<FieldPath>>> = Mutex::new(HashMap::new());
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct is a parsed dotted path into nested maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl FieldPath {

    /// This function parses a dotted path, going through the global memoization cache.
    ///
    /// An empty path or an empty segment (`"a..b"`) is a contract error.
    pub fn parse(path: &str) -> Result<Arc<Self>> {
        if let Some(cached) = PATH_CACHE.lock().unwrap().get(path) {
            return Ok(cached.clone());
        }

        if path.is_empty() {
            return Err(Error::InvalidPath(path.to_owned(), "the path is empty".to_owned()));
        }

        let segments = path.split('.').map(str::to_owned).collect::<Vec<_>>();
        if segments.iter().any(String::is_empty) {
            return Err(Error::InvalidPath(path.to_owned(), "it contains an empty segment".to_owned()));
        }

        let parsed = Arc::new(Self { raw: path.to_owned(), segments });

        let mut cache = PATH_CACHE.lock().unwrap();
        if cache.len() >= PATH_CACHE_LIMIT {
            cache.clear();
        }
        cache.insert(path.to_owned(), parsed.clone());

        Ok(parsed)
    }

    /// This function returns the path as it was written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// This function returns the path segments. Never empty.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// This function returns the last segment of the path.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }
}

//---------------------------------------------------------------------------//
//                          Single-pass helpers
//---------------------------------------------------------------------------//

/// This function reads the value at a dotted path, erroring on any missing key along
/// the way.
pub fn get_at<O: DynamicOps>(value: &Dynamic<O>, path: &FieldPath) -> Result<Dynamic<O>> {
    let mut current = value.clone();
    for segment in path.segments() {
        current = match current.get(segment) {
            Some(next) => next,
            None => return Err(Error::PathParentMissing(segment.clone(), path.raw().to_owned())),
        };
    }
    Ok(current)
}

/// This function writes a value at a dotted path, rebuilding the spine of maps above it.
///
/// With `create_parents`, missing intermediate maps are created; without it, a missing
/// parent is an error.
pub fn set_at<O: DynamicOps>(
    value: &Dynamic<O>,
    path: &FieldPath,
    new_value: O::Value,
    create_parents: bool,
) -> Result<Dynamic<O>> {
    set_at_segments(value, path.segments(), path.raw(), new_value, create_parents)
}

pub(crate) fn set_at_segments<O: DynamicOps>(
    value: &Dynamic<O>,
    segments: &[String],
    raw: &str,
    new_value: O::Value,
    create_parents: bool,
) -> Result<Dynamic<O>> {
    match segments {
        [] => Ok(value.clone()),
        [leaf] => Ok(value.set(leaf, new_value)),
        [head, rest @ ..] => {
            let child = match value.get(head) {
                Some(child) => child,
                None if create_parents => Dynamic::new(value.ops().clone(), value.ops().empty_map()),
                None => return Err(Error::PathParentMissing(head.clone(), raw.to_owned())),
            };

            let rebuilt = set_at_segments(&child, rest, raw, new_value, create_parents)?;
            Ok(value.set(head, rebuilt.into_value()))
        },
    }
}

/// This function removes the value at a dotted path, erroring on missing parents. A
/// missing leaf is a no-op, like a flat remove.
pub fn remove_at<O: DynamicOps>(value: &Dynamic<O>, path: &FieldPath) -> Result<Dynamic<O>> {
    remove_at_segments(value, path.segments(), path.raw())
}

fn remove_at_segments<O: DynamicOps>(value: &Dynamic<O>, segments: &[String], raw: &str) -> Result<Dynamic<O>> {
    match segments {
        [] => Ok(value.clone()),
        [leaf] => Ok(value.remove(leaf)),
        [head, rest @ ..] => {
            let child = match value.get(head) {
                Some(child) => child,
                None => return Err(Error::PathParentMissing(head.clone(), raw.to_owned())),
            };

            let rebuilt = remove_at_segments(&child, rest, raw)?;
            Ok(value.set(head, rebuilt.into_value()))
        },
    }
}

/// This function transforms the value at a dotted path, erroring on any missing key.
pub fn update_at<O: DynamicOps>(
    value: &Dynamic<O>,
    path: &FieldPath,
    op: impl FnOnce(Dynamic<O>) -> Dynamic<O>,
) -> Result<Dynamic<O>> {
    let current = get_at(value, path)?;
    set_at(value, path, op(current).into_value(), false)
}

/// This function renames a flat field. Missing source leaves the value untouched.
pub fn rename_field_value<O: DynamicOps>(value: &Dynamic<O>, from: &str, to: &str) -> Dynamic<O> {
    match value.get(from) {
        Some(field) => value.remove(from).set(to, field.into_value()),
        None => value.clone(),
    }
}

/// This function applies an operation iff the named field exists.
pub fn if_field_exists_value<O: DynamicOps>(
    value: &Dynamic<O>,
    name: &str,
    op: impl FnOnce(Dynamic<O>) -> Dynamic<O>,
) -> Dynamic<O> {
    if value.has(name) { op(value.clone()) } else { value.clone() }
}

/// This function applies an operation iff the named field is missing.
pub fn if_field_missing_value<O: DynamicOps>(
    value: &Dynamic<O>,
    name: &str,
    op: impl FnOnce(Dynamic<O>) -> Dynamic<O>,
) -> Dynamic<O> {
    if value.has(name) { value.clone() } else { op(value.clone()) }
}

/// This function applies an operation iff the named field holds the expected value.
pub fn if_field_equals_value<O: DynamicOps>(
    value: &Dynamic<O>,
    name: &str,
    expected: &O::Value,
    op: impl FnOnce(Dynamic<O>) -> Dynamic<O>,
) -> Dynamic<O> {
    match value.get(name) {
        Some(field) if field.value() == expected => op(value.clone()),
        _ => value.clone(),
    }
}

//---------------------------------------------------------------------------//
//                            Rule constructors
//---------------------------------------------------------------------------//

impl Rules {

    /// This function builds a rule renaming a flat field. Matches iff the field exists.
    pub fn rename_field<O: DynamicOps>(_ops: O, from: &str, to: &str) -> Rule<O> {
        let from = from.to_owned();
        let to = to.to_owned();
        Rule::from_fn(format!("rename_field({from} -> {to})"), move |_, input| {
            if !input.value().has(&from) {
                return None;
            }
            Some(input.with_value(rename_field_value(input.value(), &from, &to)))
        })
    }

    /// This function builds a rule applying several flat renames, skipping the missing
    /// ones. Always matches.
    pub fn rename_fields<O: DynamicOps>(ops: O, renames: Vec<(String, String)>) -> Rule<O> {
        Self::seq_all(
            renames.into_iter()
                .map(|(from, to)| Self::rename_field(ops.clone(), &from, &to))
                .collect()
        )
    }

    /// This function builds a rule removing a flat field. Matches iff the field exists.
    pub fn remove_field<O: DynamicOps>(_ops: O, name: &str) -> Rule<O> {
        let name = name.to_owned();
        Rule::from_fn(format!("remove_field({name})"), move |_, input| {
            if !input.value().has(&name) {
                return None;
            }
            Some(input.with_value(input.value().remove(&name)))
        })
    }

    /// This function builds a rule removing several flat fields, skipping the missing
    /// ones. Always matches.
    pub fn remove_fields<O: DynamicOps>(ops: O, names: Vec<String>) -> Rule<O> {
        Self::seq_all(
            names.into_iter()
                .map(|name| Self::remove_field(ops.clone(), &name))
                .collect()
        )
    }

    /// This function builds a rule adding a field with a lazily-built default, iff the
    /// field is missing. Matches on any map.
    pub fn add_field<O: DynamicOps>(
        _ops: O,
        name: &str,
        default: impl Fn() -> O::Value + Send + Sync + 'static,
    ) -> Rule<O> {
        let name = name.to_owned();
        Rule::from_fn(format!("add_field({name})"), move |_, input| {
            if !input.value().is_map() {
                return None;
            }
            if input.value().has(&name) {
                return Some(input.clone());
            }
            Some(input.with_value(input.value().set(&name, default())))
        })
    }

    /// This function builds a rule transforming the value under a flat field. Matches
    /// iff the field exists.
    pub fn transform_field<O: DynamicOps>(
        _ops: O,
        name: &str,
        op: impl Fn(Dynamic<O>) -> Dynamic<O> + Send + Sync + 'static,
    ) -> Rule<O> {
        let name = name.to_owned();
        Rule::from_fn(format!("transform_field({name})"), move |_, input| {
            if !input.value().has(&name) {
                return None;
            }
            Some(input.with_value(input.value().update(&name, &op)))
        })
    }

    /// This function builds a rule transforming the value at a dotted path. Matches iff
    /// the whole path resolves.
    pub fn transform_field_at<O: DynamicOps>(
        _ops: O,
        path: &str,
        op: impl Fn(Dynamic<O>) -> Dynamic<O> + Send + Sync + 'static,
    ) -> Result<Rule<O>> {
        let path = FieldPath::parse(path)?;
        Ok(Rule::from_fn(format!("transform_field_at({})", path.raw()), move |_, input| {
            update_at(input.value(), &path, &op).ok().map(|value| input.with_value(value))
        }))
    }

    /// This function builds a rule renaming the field at a dotted path within its
    /// parent. Matches iff the path resolves.
    pub fn rename_field_at<O: DynamicOps>(_ops: O, path: &str, new_name: &str) -> Result<Rule<O>> {
        let path = FieldPath::parse(path)?;
        let new_name = new_name.to_owned();
        Ok(Rule::from_fn(format!("rename_field_at({} -> {})", path.raw(), new_name), move |_, input| {
            let field = get_at(input.value(), &path).ok()?;
            let removed = remove_at(input.value(), &path).ok()?;

            let mut target = path.segments()[..path.segments().len() - 1].to_vec();
            target.push(new_name.clone());

            set_at_segments(&removed, &target, path.raw(), field.into_value(), false)
                .ok()
                .map(|value| input.with_value(value))
        }))
    }

    /// This function builds a rule removing the field at a dotted path. Matches iff the
    /// parents resolve.
    pub fn remove_field_at<O: DynamicOps>(_ops: O, path: &str) -> Result<Rule<O>> {
        let path = FieldPath::parse(path)?;
        Ok(Rule::from_fn(format!("remove_field_at({})", path.raw()), move |_, input| {
            remove_at(input.value(), &path).ok().map(|value| input.with_value(value))
        }))
    }

    /// This function builds a rule adding a field at a dotted path, creating missing
    /// parent maps along the way. Existing values are kept. Matches on any map.
    pub fn add_field_at<O: DynamicOps>(
        _ops: O,
        path: &str,
        default: impl Fn() -> O::Value + Send + Sync + 'static,
    ) -> Result<Rule<O>> {
        let path = FieldPath::parse(path)?;
        Ok(Rule::from_fn(format!("add_field_at({})", path.raw()), move |_, input| {
            if !input.value().is_map() {
                return None;
            }
            if get_at(input.value(), &path).is_ok() {
                return Some(input.clone());
            }
            set_at(input.value(), &path, default(), true)
                .ok()
                .map(|value| input.with_value(value))
        }))
    }

    /// This function builds a rule collecting flat fields into a sub-map, in the listed
    /// order. Absent fields are skipped; an existing target is overwritten, as the last
    /// step. Matches on any map.
    pub fn group_fields<O: DynamicOps>(ops: O, target: &str, fields: Vec<String>) -> Rule<O> {
        let target = target.to_owned();
        Rule::from_fn(format!("group_fields({target} <- {})", fields.join(", ")), move |_, input| {
            if !input.value().is_map() {
                return None;
            }

            let mut grouped = Dynamic::new(ops.clone(), ops.empty_map());
            let mut remainder = input.value().clone();
            for field in &fields {
                if let Some(value) = remainder.get(field) {
                    grouped = grouped.set(field, value.into_value());
                    remainder = remainder.remove(field);
                }
            }

            Some(input.with_value(remainder.set(&target, grouped.into_value())))
        })
    }

    /// This function builds the inverse of [`group_fields`](Self::group_fields): the
    /// sub-map's entries are spliced into the parent, the sub-map wins on key
    /// collisions. Matches iff the field exists and is a map.
    pub fn flatten_field<O: DynamicOps>(_ops: O, name: &str) -> Rule<O> {
        let name = name.to_owned();
        Rule::from_fn(format!("flatten_field({name})"), move |_, input| {
            let grouped = input.value().get(&name)?;
            let entries = grouped.map_values()?;

            let mut flattened = input.value().remove(&name);
            for (key, value) in entries {
                flattened = flattened.set(&key, value.into_value());
            }

            Some(input.with_value(flattened))
        })
    }

    /// This function builds a rule moving the value at one dotted path to another,
    /// creating missing parents at the destination. A missing source is a no-op, not
    /// an error. Matches on any map.
    pub fn move_field<O: DynamicOps>(_ops: O, from_path: &str, to_path: &str) -> Result<Rule<O>> {
        let from_path = FieldPath::parse(from_path)?;
        let to_path = FieldPath::parse(to_path)?;
        Ok(Rule::from_fn(format!("move_field({} -> {})", from_path.raw(), to_path.raw()), move |_, input| {
            if !input.value().is_map() {
                return None;
            }

            let field = match get_at(input.value(), &from_path) {
                Ok(field) => field,
                Err(_) => return Some(input.clone()),
            };

            let removed = remove_at(input.value(), &from_path).ok()?;
            set_at(&removed, &to_path, field.into_value(), true)
                .ok()
                .map(|value| input.with_value(value))
        }))
    }

    /// This function builds a rule copying the value at one dotted path to another,
    /// creating missing parents at the destination. A missing source is a no-op.
    /// Matches on any map.
    pub fn copy_field<O: DynamicOps>(_ops: O, from_path: &str, to_path: &str) -> Result<Rule<O>> {
        let from_path = FieldPath::parse(from_path)?;
        let to_path = FieldPath::parse(to_path)?;
        Ok(Rule::from_fn(format!("copy_field({} -> {})", from_path.raw(), to_path.raw()), move |_, input| {
            if !input.value().is_map() {
                return None;
            }

            let field = match get_at(input.value(), &from_path) {
                Ok(field) => field,
                Err(_) => return Some(input.clone()),
            };

            set_at(input.value(), &to_path, field.into_value(), true)
                .ok()
                .map(|value| input.with_value(value))
        }))
    }

    /// This function builds a rule delegating to another one iff the named field
    /// exists; otherwise it succeeds unchanged.
    pub fn if_field_exists<O: DynamicOps>(_ops: O, name: &str, rule: Rule<O>) -> Rule<O> {
        let name = name.to_owned();
        let rule_name = format!("if_field_exists({name}, {})", rule.name());
        Rule::from_fn(rule_name, move |input_type, input| {
            if input.value().has(&name) {
                rule.rewrite(input_type, input)
            } else {
                Some(input.clone())
            }
        })
    }

    /// This function builds a rule delegating to another one iff the named field is
    /// missing; otherwise it succeeds unchanged.
    pub fn if_field_missing<O: DynamicOps>(_ops: O, name: &str, rule: Rule<O>) -> Rule<O> {
        let name = name.to_owned();
        let rule_name = format!("if_field_missing({name}, {})", rule.name());
        Rule::from_fn(rule_name, move |input_type, input| {
            if input.value().has(&name) {
                Some(input.clone())
            } else {
                rule.rewrite(input_type, input)
            }
        })
    }

    /// This function builds a rule delegating to another one iff the named field holds
    /// the expected value; otherwise it succeeds unchanged.
    pub fn if_field_equals<O: DynamicOps>(_ops: O, name: &str, expected: O::Value, rule: Rule<O>) -> Rule<O> {
        let name = name.to_owned();
        let rule_name = format!("if_field_equals({name}, {})", rule.name());
        Rule::from_fn(rule_name, move |input_type, input| {
            match input.value().get(&name) {
                Some(field) if field.value() == &expected => rule.rewrite(input_type, input),
                _ => Some(input.clone()),
            }
        })
    }
}
