//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the traversal rules: applying a rule to the children of a
//! dynamic value, or to every node of the tree.
//!
//! Children are the values of a map or the elements of a list; they're presented to
//! the inner rule as passthrough-typed data. Child lists are materialized before
//! rewriting, so the inner rule may consume them freely. Each traversal visits every
//! node exactly once.

use crate::dynamic::Dynamic;
use crate::ops::DynamicOps;
use crate::types::Type;

use super::{Rule, Rules, Typed};

//---------------------------------------------------------------------------//
//                              Implementations
//---------------------------------------------------------------------------//

/// This function applies a rule to one child value, keeping the child on a non-match.
fn apply_at<O: DynamicOps>(rule: &Rule<O>, value: &Dynamic<O>) -> Dynamic<O> {
    let typed = Typed::passthrough(value.clone());
    match rule.rewrite(&Type::Passthrough, &typed) {
        Some(rewritten) => rewritten.into_value(),
        None => value.clone(),
    }
}

/// This function rebuilds the direct children of a map or list through the provided
/// operation. Values without children are returned unchanged.
fn rebuild_children<O: DynamicOps>(
    value: &Dynamic<O>,
    mut op: impl FnMut(Dynamic<O>) -> Dynamic<O>,
) -> Dynamic<O> {
    if let Some(entries) = value.map_values() {
        let ops = value.ops().clone();
        let rebuilt = ops.create_map(entries.into_iter()
            .map(|(key, child)| (ops.create_string(&key), op(child).into_value()))
            .collect::<Vec<_>>());
        Dynamic::new(ops, rebuilt)
    } else if let Some(items) = value.list_items() {
        let ops = value.ops().clone();
        let rebuilt = ops.create_list(items.into_iter()
            .map(|child| op(child).into_value())
            .collect::<Vec<_>>());
        Dynamic::new(ops, rebuilt)
    } else {
        value.clone()
    }
}

fn rewrite_bottom_up<O: DynamicOps>(rule: &Rule<O>, value: &Dynamic<O>) -> Dynamic<O> {
    let rebuilt = rebuild_children(value, |child| rewrite_bottom_up(rule, &child));
    apply_at(rule, &rebuilt)
}

fn rewrite_top_down<O: DynamicOps>(rule: &Rule<O>, value: &Dynamic<O>) -> Dynamic<O> {
    let rewritten = apply_at(rule, value);
    rebuild_children(&rewritten, |child| rewrite_top_down(rule, &child))
}

impl Rules {

    /// This function builds a rule applying another rule to every direct child,
    /// composing the results into the parent. Children the rule doesn't match stay
    /// unchanged. Always matches.
    pub fn all<O: DynamicOps>(_ops: O, rule: Rule<O>) -> Rule<O> {
        let name = format!("all({})", rule.name());
        Rule::from_fn(name, move |_, input| {
            Some(input.with_value(rebuild_children(input.value(), |child| apply_at(&rule, &child))))
        })
    }

    /// This function builds a rule applying another rule to the first direct child it
    /// matches. Matches iff some child matched.
    pub fn one<O: DynamicOps>(_ops: O, rule: Rule<O>) -> Rule<O> {
        let name = format!("one({})", rule.name());
        Rule::from_fn(name, move |_, input| {
            let mut matched = false;
            let rebuilt = rebuild_children(input.value(), |child| {
                if matched {
                    return child;
                }
                let typed = Typed::passthrough(child.clone());
                match rule.rewrite(&Type::Passthrough, &typed) {
                    Some(rewritten) => {
                        matched = true;
                        rewritten.into_value()
                    },
                    None => child,
                }
            });

            if matched { Some(input.with_value(rebuilt)) } else { None }
        })
    }

    /// This function builds a rule applying another rule at every level of the tree,
    /// the root included, children first. Always matches.
    pub fn everywhere<O: DynamicOps>(_ops: O, rule: Rule<O>) -> Rule<O> {
        let name = format!("everywhere({})", rule.name());
        Rule::from_fn(name, move |_, input| {
            Some(input.with_value(rewrite_bottom_up(&rule, input.value())))
        })
    }

    /// This function builds a child-first whole-tree traversal. Always matches.
    pub fn bottom_up<O: DynamicOps>(_ops: O, rule: Rule<O>) -> Rule<O> {
        let name = format!("bottom_up({})", rule.name());
        Rule::from_fn(name, move |_, input| {
            Some(input.with_value(rewrite_bottom_up(&rule, input.value())))
        })
    }

    /// This function builds a parent-first whole-tree traversal. Always matches.
    pub fn top_down<O: DynamicOps>(_ops: O, rule: Rule<O>) -> Rule<O> {
        let name = format!("top_down({})", rule.name());
        Rule::from_fn(name, move |_, input| {
            Some(input.with_value(rewrite_top_down(&rule, input.value())))
        })
    }
}
