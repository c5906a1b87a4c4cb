//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains [`Typed`] values and the rewrite-rule combinator language that
//! fixes are written in.
//!
//! A rule is a partial function over typed values: [`rewrite`](Rule::rewrite) returns
//! `None` when the rule doesn't match, and `Some(output)` when it matched and produced
//! a new value. Rules never mutate. Everything else here is composition: sequencing,
//! alternatives, type narrowing, traversal (in [`traversal`](self)) and the dotted-path
//! field operations (in [`paths`](self)).

use lazy_static::lazy_static;

use std::fmt;
use std::sync::Arc;

use crate::dynamic::Dynamic;
use crate::error::{Error, Result};
use crate::ops::DynamicOps;
use crate::schema::TypeReference;
use crate::types::Type;

mod batch;
mod paths;
mod traversal;

#[cfg(test)] mod paths_test;

pub use self::batch::BatchTransform;
pub use self::paths::{
    get_at, if_field_equals_value, if_field_exists_value, if_field_missing_value,
    remove_at, rename_field_value, set_at, update_at, FieldPath,
};

lazy_static! {

    /// Shared passthrough type, handed to rules when traversing untyped children.
    pub static ref PASSTHROUGH: Arc<Type> = Arc::new(Type::Passthrough);
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct is a typed datum: a type and a value expected to satisfy it.
///
/// The pairing is a trust boundary. Nothing re-validates the value on every rule
/// application; validation happens at the codec edges.
#[derive(Clone, Debug)]
pub struct Typed<O: DynamicOps> {
    element_type: Arc<Type>,
    value: Dynamic<O>,
}

/// This struct is a shared, cloneable handle over a rewrite rule.
pub struct Rule<O: DynamicOps>(Arc<dyn TypeRewriteRule<O>>);

/// Namespace for the high-level rule library. The traversal, path and batch
/// constructors live in their own modules, as extra `impl` blocks of this struct.
pub struct Rules;

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait is the primitive rewrite operation: test a typed value and, if this rule
/// applies, produce a new one.
pub trait TypeRewriteRule<O: DynamicOps>: Send + Sync {

    /// This method tests and applies the rule. `None` means *no match*; `Some` means
    /// *matched and produced this value*.
    fn rewrite(&self, input_type: &Type, input: &Typed<O>) -> Option<Typed<O>>;

    /// This method returns the diagnostic name of the rule.
    fn name(&self) -> String;
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl<O: DynamicOps> Typed<O> {

    /// This function pairs a type with a value.
    pub fn new(element_type: Arc<Type>, value: Dynamic<O>) -> Self {
        Self { element_type, value }
    }

    /// This function pairs a value with the passthrough type, for untyped rewriting.
    pub fn passthrough(value: Dynamic<O>) -> Self {
        Self { element_type: PASSTHROUGH.clone(), value }
    }

    /// This function returns the type of the datum.
    pub fn element_type(&self) -> &Arc<Type> {
        &self.element_type
    }

    /// This function returns the value of the datum.
    pub fn value(&self) -> &Dynamic<O> {
        &self.value
    }

    /// This function consumes the datum, returning its value.
    pub fn into_value(self) -> Dynamic<O> {
        self.value
    }

    /// This function replaces the value, keeping the type.
    pub fn with_value(&self, value: Dynamic<O>) -> Self {
        Self { element_type: self.element_type.clone(), value }
    }
}

impl<O: DynamicOps> PartialEq for Typed<O> {
    fn eq(&self, other: &Self) -> bool {
        self.element_type.reference() == other.element_type.reference() && self.value == other.value
    }
}

impl<O: DynamicOps> Clone for Rule<O> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<O: DynamicOps> Rule<O> {

    /// This function wraps a [`TypeRewriteRule`] implementor into a shared handle.
    pub fn new(rule: impl TypeRewriteRule<O> + 'static) -> Self {
        Self(Arc::new(rule))
    }

    /// This function builds a rule straight from a closure and a diagnostic name.
    pub fn from_fn(
        name: impl Into<String>,
        op: impl Fn(&Type, &Typed<O>) -> Option<Typed<O>> + Send + Sync + 'static,
    ) -> Self {
        Self::new(FnRule { name: name.into(), op: Box::new(op) })
    }

    /// This function builds the rule that always matches and returns its input unchanged.
    pub fn identity() -> Self {
        Self::from_fn("identity", |_, input| Some(input.clone()))
    }

    /// This function builds the rule that never matches.
    pub fn fail() -> Self {
        Self::from_fn("fail", |_, _| None)
    }

    /// This function builds a rule that matches values of the provided type and maps
    /// their value.
    pub fn for_type(
        name: impl Into<String>,
        target: &Type,
        op: impl Fn(Dynamic<O>) -> Dynamic<O> + Send + Sync + 'static,
    ) -> Self {
        let target = target.reference();
        Self::from_fn(name, move |input_type, input| {
            if input_type.reference() == target {
                Some(input.with_value(op(input.value().clone())))
            } else {
                None
            }
        })
    }

    /// This method is the primitive test-and-apply. See [`TypeRewriteRule::rewrite`].
    pub fn rewrite(&self, input_type: &Type, input: &Typed<O>) -> Option<Typed<O>> {
        self.0.rewrite(input_type, input)
    }

    /// This method applies the rule, falling back to the unchanged input when it
    /// doesn't match.
    pub fn apply(&self, input: &Typed<O>) -> Typed<O> {
        self.rewrite(&input.element_type().clone(), input).unwrap_or_else(|| input.clone())
    }

    /// This method applies the rule, erroring when it doesn't match.
    pub fn apply_or_throw(&self, input: &Typed<O>) -> Result<Typed<O>> {
        self.rewrite(&input.element_type().clone(), input)
            .ok_or_else(|| Error::RuleDidNotMatch(self.name(), input.element_type().describe()))
    }

    /// This method returns the diagnostic name of the rule.
    pub fn name(&self) -> String {
        self.0.name()
    }

    /// This method sequences another rule after this one; a non-match of either side
    /// short-circuits.
    pub fn and_then(self, next: Rule<O>) -> Rule<O> {
        let name = format!("({} ; {})", self.name(), next.name());
        Self::from_fn(name, move |input_type, input| {
            let intermediate = self.rewrite(input_type, input)?;
            next.rewrite(&intermediate.element_type().clone(), &intermediate)
        })
    }

    /// This method tries this rule, falling back to the other one on a non-match.
    pub fn or_else(self, fallback: Rule<O>) -> Rule<O> {
        let name = format!("({} | {})", self.name(), fallback.name());
        Self::from_fn(name, move |input_type, input| {
            self.rewrite(input_type, input).or_else(|| fallback.rewrite(input_type, input))
        })
    }

    /// This method makes the rule total: a non-match becomes the unchanged input.
    pub fn or_keep(self) -> Rule<O> {
        let name = format!("try({})", self.name());
        Self::from_fn(name, move |input_type, input| {
            Some(self.rewrite(input_type, input).unwrap_or_else(|| input.clone()))
        })
    }

    /// This method narrows the rule to inputs whose type reference equals the target.
    pub fn if_type(self, target: TypeReference) -> Rule<O> {
        let name = format!("{}@{}", self.name(), target);
        Self::from_fn(name, move |input_type, input| {
            if input_type.reference() == target {
                self.rewrite(input_type, input)
            } else {
                None
            }
        })
    }

    /// This method renames the rule for diagnostics.
    pub fn named(self, name: impl Into<String>) -> Rule<O> {
        let name = name.into();
        Self::from_fn(name, move |input_type, input| self.rewrite(input_type, input))
    }
}

impl<O: DynamicOps> fmt::Display for Rule<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Closure-backed rule. Every combinator in this module is one of these.
struct FnRule<O: DynamicOps> {
    name: String,
    op: Box<dyn Fn(&Type, &Typed<O>) -> Option<Typed<O>> + Send + Sync>,
}

impl<O: DynamicOps> TypeRewriteRule<O> for FnRule<O> {
    fn rewrite(&self, input_type: &Type, input: &Typed<O>) -> Option<Typed<O>> {
        (self.op)(input_type, input)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

impl Rules {

    /// This function sequences rules; all of them must match, in order, or the whole
    /// sequence is a non-match.
    pub fn seq<O: DynamicOps>(rules: Vec<Rule<O>>) -> Rule<O> {
        let name = format!("seq({})", rules.iter().map(Rule::name).collect::<Vec<_>>().join("; "));
        Rule::from_fn(name, move |input_type, input| {
            let mut current = input.clone();
            let mut current_type = input_type.clone();
            for rule in &rules {
                current = rule.rewrite(&current_type, &current)?;
                current_type = current.element_type().as_ref().clone();
            }
            Some(current)
        })
    }

    /// This function runs every rule in order, skipping the ones that don't match.
    /// Always matches.
    pub fn seq_all<O: DynamicOps>(rules: Vec<Rule<O>>) -> Rule<O> {
        let name = format!("seq_all({})", rules.iter().map(Rule::name).collect::<Vec<_>>().join("; "));
        Rule::from_fn(name, move |_, input| {
            let mut current = input.clone();
            for rule in &rules {
                if let Some(next) = rule.rewrite(&current.element_type().clone(), &current) {
                    current = next;
                }
            }
            Some(current)
        })
    }

    /// This function tries rules in order; the first match wins.
    pub fn choice<O: DynamicOps>(rules: Vec<Rule<O>>) -> Rule<O> {
        let name = format!("choice({})", rules.iter().map(Rule::name).collect::<Vec<_>>().join("; "));
        Rule::from_fn(name, move |input_type, input| {
            rules.iter().find_map(|rule| rule.rewrite(input_type, input))
        })
    }

    /// This function is a pass-through wrapper, kept for call-site readability.
    pub fn check_once<O: DynamicOps>(rule: Rule<O>) -> Rule<O> {
        let name = format!("check_once({})", rule.name());
        Rule::from_fn(name, move |input_type, input| rule.rewrite(input_type, input))
    }

    /// This function makes a rule total. Same as [`Rule::or_keep`].
    pub fn try_once<O: DynamicOps>(rule: Rule<O>) -> Rule<O> {
        rule.or_keep()
    }

    /// This function narrows a rule to one type reference. Same as [`Rule::if_type`].
    pub fn if_type<O: DynamicOps>(target: TypeReference, rule: Rule<O>) -> Rule<O> {
        rule.if_type(target)
    }

    /// This function builds a named rule transforming values of one type. Same as
    /// [`Rule::for_type`].
    pub fn transform_type<O: DynamicOps>(
        name: impl Into<String>,
        target: &Type,
        op: impl Fn(Dynamic<O>) -> Dynamic<O> + Send + Sync + 'static,
    ) -> Rule<O> {
        Rule::for_type(name, target, op)
    }

    /// This function builds the do-nothing rule.
    pub fn noop<O: DynamicOps>() -> Rule<O> {
        Rule::identity()
    }

    /// This function logs each application of a rule through the `log` crate, at info
    /// level, and passes its result through unchanged.
    pub fn log<O: DynamicOps>(message: impl Into<String>, rule: Rule<O>) -> Rule<O> {
        Self::log_with(message, rule, Arc::new(|line: &str| log::info!("{line}")))
    }

    /// This function logs each application of a rule through a custom logger.
    ///
    /// The logger is invoked exactly once per application, with the message, the rule
    /// name, the type description and whether the rule matched.
    pub fn log_with<O: DynamicOps>(
        message: impl Into<String>,
        rule: Rule<O>,
        logger: Arc<dyn Fn(&str) + Send + Sync>,
    ) -> Rule<O> {
        let message = message.into();
        let name = format!("log({})", rule.name());
        Rule::from_fn(name, move |input_type, input| {
            let result = rule.rewrite(input_type, input);
            logger(&format!(
                "{}: rule \"{}\" on type \"{}\": matched = {}",
                message,
                rule.name(),
                input_type.describe(),
                result.is_some()
            ));
            result
        })
    }
}
