//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains [`BatchTransform`], a builder collecting a sequence of map
//! operations applied in one pass over the root map.
//!
//! Rules compose fine on their own, but every rule application clones its way through
//! the rule dispatch. A batch skips that: the queued steps run back-to-back over the
//! same document, and the whole thing becomes a single rule.

use itertools::Itertools;

use std::sync::Arc;

use crate::dynamic::Dynamic;
use crate::error::Result;
use crate::ops::DynamicOps;

use super::paths::{get_at, remove_at, rename_field_value, set_at, FieldPath};
use super::{Rule, Rules};

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// One queued map operation.
struct BatchStep<O: DynamicOps> {
    name: String,
    op: Box<dyn Fn(Dynamic<O>) -> Dynamic<O> + Send + Sync>,
}

/// This struct collects map operations and applies them in one pass. Build it, queue
/// steps, then turn it into a rule with [`Rules::batch`] or apply it directly.
pub struct BatchTransform<O: DynamicOps> {
    ops: O,
    steps: Vec<BatchStep<O>>,
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl<O: DynamicOps> BatchTransform<O> {

    /// This function builds a new, empty batch.
    pub fn new(ops: O) -> Self {
        Self { ops, steps: Vec::new() }
    }

    /// This function queues a flat field rename. Missing source is skipped.
    pub fn rename(mut self, from: &str, to: &str) -> Self {
        let from = from.to_owned();
        let to = to.to_owned();
        self.steps.push(BatchStep {
            name: format!("rename({from} -> {to})"),
            op: Box::new(move |value| rename_field_value(&value, &from, &to)),
        });
        self
    }

    /// This function queues a flat field removal.
    pub fn remove(mut self, name: &str) -> Self {
        let name = name.to_owned();
        self.steps.push(BatchStep {
            name: format!("remove({name})"),
            op: Box::new(move |value| value.remove(&name)),
        });
        self
    }

    /// This function queues a field addition with a lazily-built default. An existing
    /// field is kept.
    pub fn add(mut self, name: &str, default: impl Fn() -> O::Value + Send + Sync + 'static) -> Self {
        let name = name.to_owned();
        self.steps.push(BatchStep {
            name: format!("add({name})"),
            op: Box::new(move |value| if value.has(&name) { value } else { value.set(&name, default()) }),
        });
        self
    }

    /// This function queues a transformation of the value under a flat field. Missing
    /// field is skipped.
    pub fn transform(mut self, name: &str, op: impl Fn(Dynamic<O>) -> Dynamic<O> + Send + Sync + 'static) -> Self {
        let name = name.to_owned();
        self.steps.push(BatchStep {
            name: format!("transform({name})"),
            op: Box::new(move |value| value.update(&name, &op)),
        });
        self
    }

    /// This function queues a dotted-path move, creating missing parents at the
    /// destination. Missing source is skipped. The paths are parsed here, once.
    pub fn move_to(mut self, from_path: &str, to_path: &str) -> Result<Self> {
        let from_path = FieldPath::parse(from_path)?;
        let to_path = FieldPath::parse(to_path)?;
        self.steps.push(BatchStep {
            name: format!("move({} -> {})", from_path.raw(), to_path.raw()),
            op: Box::new(move |value| {
                let field = match get_at(&value, &from_path) {
                    Ok(field) => field,
                    Err(_) => return value,
                };

                let removed = match remove_at(&value, &from_path) {
                    Ok(removed) => removed,
                    Err(_) => return value,
                };

                set_at(&removed, &to_path, field.into_value(), true).unwrap_or(value)
            }),
        });
        Ok(self)
    }

    /// This function queues a dotted-path copy, creating missing parents at the
    /// destination. Missing source is skipped.
    pub fn copy_to(mut self, from_path: &str, to_path: &str) -> Result<Self> {
        let from_path = FieldPath::parse(from_path)?;
        let to_path = FieldPath::parse(to_path)?;
        self.steps.push(BatchStep {
            name: format!("copy({} -> {})", from_path.raw(), to_path.raw()),
            op: Box::new(move |value| {
                let field = match get_at(&value, &from_path) {
                    Ok(field) => field,
                    Err(_) => return value,
                };

                set_at(&value, &to_path, field.into_value(), true).unwrap_or(value)
            }),
        });
        Ok(self)
    }

    /// This function runs all queued steps over a document, in order.
    pub fn apply(&self, value: &Dynamic<O>) -> Dynamic<O> {
        let mut current = value.clone();
        for step in &self.steps {
            current = (step.op)(current);
        }
        current
    }

    /// This function returns the ops the batch was built with.
    pub fn ops(&self) -> &O {
        &self.ops
    }
}

impl Rules {

    /// This function turns a batch into a rule. Matches on any map; applies every
    /// queued step in one pass.
    pub fn batch<O: DynamicOps>(batch: BatchTransform<O>) -> Rule<O> {
        let name = format!("batch({})", batch.steps.iter().map(|step| step.name.as_str()).join("; "));
        let batch = Arc::new(batch);
        Rule::from_fn(name, move |_, input| {
            if !input.value().is_map() {
                return None;
            }
            Some(input.with_value(batch.apply(input.value())))
        })
    }
}
