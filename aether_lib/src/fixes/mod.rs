//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the migration engine: the [`DataFix`] trait and its concrete
//! fixes, the per-type [`FixRegistry`], and the [`AetherDataFixer`] façade gluing
//! schemas, fixes and diagnostics together.
//!
//! The engine itself is stateless. A frozen fixer may serve unbounded concurrent
//! `update`/`encode`/`decode` calls; within one `update` call, fixes are applied in
//! strict registration order, deterministically. A fix error aborts the chain at the
//! first failure and surfaces as [`Error::FixFailed`]; there are no retries and no
//! partial-application recovery.

use rayon::prelude::*;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::diagnostics::{recording_rule, DiagnosticContext};
use crate::dynamic::Dynamic;
use crate::error::{Error, Result};
use crate::ops::DynamicOps;
use crate::rules::{Rule, Typed};
use crate::schema::{Schema, SchemaRegistry, TypeReference, Version};


//---------------------------------------------------------------------------//
//                            Trait Definitions
//---------------------------------------------------------------------------//

/// This trait is a named, version-bounded transformer of dynamic documents of one type.
///
/// The name is for diagnostics only; uniqueness is recommended but not required.
/// `from_version <= to_version` is validated at registration.
pub trait DataFix<O: DynamicOps>: Send + Sync {

    /// This method returns the diagnostic name of the fix.
    fn name(&self) -> &str;

    /// This method returns the version this fix upgrades from.
    fn from_version(&self) -> Version;

    /// This method returns the version this fix upgrades to.
    fn to_version(&self) -> Version;

    /// This method applies the fix to a document of the provided type.
    fn apply(
        &self,
        type_ref: &TypeReference,
        value: Dynamic<O>,
        context: Option<&mut DiagnosticContext>,
    ) -> Result<Dynamic<O>>;
}

/// This trait is the bootstrap hook an embedding application provides: schemas get
/// registered first, fixes second, then both registries freeze.
pub trait DataFixerBootstrap<O: DynamicOps> {

    /// This method registers every schema version.
    fn register_schemas(&self, registry: &mut SchemaRegistry) -> Result<()>;

    /// This method registers every fix.
    fn register_fixes(&self, registry: &mut FixRegistry<O>) -> Result<()>;
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct is a fix backed by a plain closure.
pub struct FunctionFix<O: DynamicOps> {
    name: String,
    from_version: Version,
    to_version: Version,
    op: Box<dyn Fn(&TypeReference, Dynamic<O>) -> Result<Dynamic<O>> + Send + Sync>,
}

/// This struct is a fix backed by a rewrite rule.
///
/// The rule is applied totally: a non-match leaves the document unchanged, which is
/// what lets one fix serve every variant of a tagged choice while only touching the
/// ones its rule matches.
pub struct RuleFix<O: DynamicOps> {
    name: String,
    from_version: Version,
    to_version: Version,
    rule: Rule<O>,
}

/// This struct keeps fixes grouped by type reference, in registration order.
pub struct FixRegistry<O: DynamicOps> {
    fixes: HashMap<TypeReference, Vec<Arc<dyn DataFix<O>>>>,
    frozen: bool,
}

/// This struct is the unit of migration: a type reference plus a dynamic document.
#[derive(Clone, Debug)]
pub struct TaggedDynamic<O: DynamicOps> {
    type_ref: TypeReference,
    value: Dynamic<O>,
}

/// This struct is the migration façade: schema registry, fix registry and the update
/// engine, frozen and safe to share across threads.
pub struct AetherDataFixer<O: DynamicOps> {
    schemas: Arc<SchemaRegistry>,
    fixes: Arc<FixRegistry<O>>,
    current_version: Version,
}

/// This struct accumulates registrations and freezes them into an [`AetherDataFixer`].
pub struct AetherDataFixerBuilder<O: DynamicOps> {
    schemas: SchemaRegistry,
    fixes: FixRegistry<O>,
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl<O: DynamicOps> FunctionFix<O> {

    /// This function builds a fix from a closure.
    pub fn new(
        name: impl Into<String>,
        from_version: Version,
        to_version: Version,
        op: impl Fn(&TypeReference, Dynamic<O>) -> Result<Dynamic<O>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            from_version,
            to_version,
            op: Box::new(op),
        }
    }
}

impl<O: DynamicOps> DataFix<O> for FunctionFix<O> {

    fn name(&self) -> &str {
        &self.name
    }

    fn from_version(&self) -> Version {
        self.from_version
    }

    fn to_version(&self) -> Version {
        self.to_version
    }

    fn apply(
        &self,
        type_ref: &TypeReference,
        value: Dynamic<O>,
        _context: Option<&mut DiagnosticContext>,
    ) -> Result<Dynamic<O>> {
        (self.op)(type_ref, value)
    }
}

impl<O: DynamicOps> RuleFix<O> {

    /// This function builds a fix from a rewrite rule.
    pub fn new(name: impl Into<String>, from_version: Version, to_version: Version, rule: Rule<O>) -> Self {
        Self {
            name: name.into(),
            from_version,
            to_version,
            rule,
        }
    }
}

impl<O: DynamicOps> DataFix<O> for RuleFix<O> {

    fn name(&self) -> &str {
        &self.name
    }

    fn from_version(&self) -> Version {
        self.from_version
    }

    fn to_version(&self) -> Version {
        self.to_version
    }

    fn apply(
        &self,
        _type_ref: &TypeReference,
        value: Dynamic<O>,
        context: Option<&mut DiagnosticContext>,
    ) -> Result<Dynamic<O>> {
        let typed = Typed::passthrough(value);

        // When rule details are captured, the rule is wrapped once and its
        // applications drain into the context.
        if let Some(context) = context {
            if context.capture_rule_details() {
                let sink = Arc::new(Mutex::new(Vec::new()));
                let recorded = recording_rule(self.rule.clone(), sink.clone());
                let output = recorded.apply(&typed);

                for application in sink.lock().unwrap().drain(..) {
                    context.record_rule_application(application);
                }

                return Ok(output.into_value());
            }
        }

        Ok(self.rule.apply(&typed).into_value())
    }
}

impl<O: DynamicOps> Default for FixRegistry<O> {
    fn default() -> Self {
        Self {
            fixes: HashMap::new(),
            frozen: false,
        }
    }
}

impl<O: DynamicOps> FixRegistry<O> {

    /// This function builds a new, empty, unfrozen registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// This function registers a fix for a type, appending it to the type's list.
    ///
    /// A fix declaring `from_version > to_version` is rejected here; ordering across
    /// fixes is validated at freeze time.
    pub fn register(&mut self, type_ref: TypeReference, fix: impl DataFix<O> + 'static) -> Result<()> {
        if self.frozen {
            return Err(Error::RegistryFrozen);
        }

        if fix.from_version() > fix.to_version() {
            return Err(Error::InvalidFixRange(fix.name().to_owned(), fix.from_version(), fix.to_version()));
        }

        self.fixes.entry(type_ref).or_default().push(Arc::new(fix));
        Ok(())
    }

    /// This function seals the registry, validating that registration order and
    /// version order agree: within one type, source versions must be non-decreasing.
    pub fn freeze(&mut self) -> Result<()> {
        for (type_ref, fixes) in &self.fixes {
            for pair in fixes.windows(2) {
                if pair[1].from_version() < pair[0].from_version() {
                    return Err(Error::FixOrderInversion(
                        type_ref.clone(),
                        pair[1].name().to_owned(),
                        pair[1].from_version(),
                        pair[0].name().to_owned(),
                        pair[0].from_version(),
                    ));
                }
            }
        }

        self.frozen = true;
        Ok(())
    }

    /// This function returns true if the registry has been sealed.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// This function returns the registered fixes for a type whose version range
    /// intersects the requested one, in registration order.
    pub fn fixes_for(&self, type_ref: &TypeReference, from: Version, to: Version) -> Vec<Arc<dyn DataFix<O>>> {
        match self.fixes.get(type_ref) {
            Some(fixes) => fixes.iter()
                .filter(|fix| fix.from_version() <= to && fix.to_version() >= from)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// This function returns the amount of types with registered fixes.
    pub fn type_count(&self) -> usize {
        self.fixes.len()
    }
}

impl<O: DynamicOps> TaggedDynamic<O> {

    /// This function tags a dynamic document with its type reference.
    pub fn new(type_ref: TypeReference, value: Dynamic<O>) -> Self {
        Self { type_ref, value }
    }

    /// This function returns the type reference.
    pub fn type_ref(&self) -> &TypeReference {
        &self.type_ref
    }

    /// This function returns the document.
    pub fn value(&self) -> &Dynamic<O> {
        &self.value
    }

    /// This function splits the tagged document into its parts.
    pub fn into_parts(self) -> (TypeReference, Dynamic<O>) {
        (self.type_ref, self.value)
    }
}

impl<O: DynamicOps> PartialEq for TaggedDynamic<O> {
    fn eq(&self, other: &Self) -> bool {
        self.type_ref == other.type_ref && self.value == other.value
    }
}

impl<O: DynamicOps> fmt::Display for TaggedDynamic<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.type_ref, self.value)
    }
}

impl<O: DynamicOps> Default for AetherDataFixerBuilder<O> {
    fn default() -> Self {
        Self {
            schemas: SchemaRegistry::new(),
            fixes: FixRegistry::new(),
        }
    }
}

impl<O: DynamicOps> AetherDataFixerBuilder<O> {

    /// This function builds a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// This function runs a bootstrap: schemas first, fixes second.
    pub fn bootstrap(mut self, bootstrap: &impl DataFixerBootstrap<O>) -> Result<Self> {
        bootstrap.register_schemas(&mut self.schemas)?;
        bootstrap.register_fixes(&mut self.fixes)?;
        Ok(self)
    }

    /// This function registers a single schema.
    pub fn add_schema(mut self, schema: Schema) -> Result<Self> {
        self.schemas.register(schema)?;
        Ok(self)
    }

    /// This function registers a single fix.
    pub fn add_fix(mut self, type_ref: TypeReference, fix: impl DataFix<O> + 'static) -> Result<Self> {
        self.fixes.register(type_ref, fix)?;
        Ok(self)
    }

    /// This function freezes both registries and builds the fixer.
    pub fn build(mut self) -> Result<AetherDataFixer<O>> {
        let current_version = self.schemas.current_version().ok_or(Error::NoSchemasRegistered)?;

        self.schemas.freeze();
        self.fixes.freeze()?;

        Ok(AetherDataFixer {
            schemas: Arc::new(self.schemas),
            fixes: Arc::new(self.fixes),
            current_version,
        })
    }
}

impl<O: DynamicOps> AetherDataFixer<O> {

    /// This function starts building a fixer.
    pub fn builder() -> AetherDataFixerBuilder<O> {
        AetherDataFixerBuilder::new()
    }

    /// This function returns the newest schema version the fixer knows.
    pub fn current_version(&self) -> Version {
        self.current_version
    }

    /// This function returns the frozen schema registry.
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// This function returns the frozen fix registry.
    pub fn fixes(&self) -> &FixRegistry<O> {
        &self.fixes
    }

    /// This function encodes a document as the provided type at the provided version,
    /// tagging it for migration.
    pub fn encode(&self, version: Version, type_ref: &TypeReference, value: &Dynamic<O>) -> Result<TaggedDynamic<O>> {
        let schema = self.schemas.require(version)?;
        let declared_type = schema.require(type_ref)?;

        match declared_type.write(value.ops(), value.value()) {
            crate::result::DataResult::Success { value: encoded, .. } => Ok(TaggedDynamic::new(
                type_ref.clone(),
                Dynamic::new(value.ops().clone(), encoded),
            )),
            error => Err(Error::EncodeFailed(type_ref.clone(), error.error_message().unwrap_or_default())),
        }
    }

    /// This function decodes a tagged document against its type at the provided
    /// version, returning the validated document.
    pub fn decode(&self, version: Version, tagged: &TaggedDynamic<O>) -> Result<Dynamic<O>> {
        let schema = self.schemas.require(version)?;
        let declared_type = schema.require(tagged.type_ref())?;

        match declared_type.read(tagged.value().ops(), tagged.value().value()) {
            crate::result::DataResult::Success { value: decoded, .. } => {
                Ok(Dynamic::new(tagged.value().ops().clone(), decoded))
            },
            error => Err(Error::DecodeFailed(
                tagged.type_ref().clone(),
                error.error_message().unwrap_or_default(),
            )),
        }
    }

    /// This function runs the fix chain upgrading a tagged document between two
    /// versions.
    ///
    /// The algorithm: validate `from <= to <= current`; return the input untouched
    /// when `from == to` (no allocation, no context recording); fetch the type's
    /// fixes; skip the ones reaching outside `[from, to]`; apply the rest in
    /// registration order. The first failing fix aborts the chain, wrapped in
    /// [`Error::FixFailed`]; already-wrapped failures propagate unchanged.
    pub fn update(
        &self,
        tagged: TaggedDynamic<O>,
        from: Version,
        to: Version,
        mut context: Option<&mut DiagnosticContext>,
    ) -> Result<TaggedDynamic<O>> {
        if from > to {
            return Err(Error::InvalidVersionRange(from, to));
        }

        if to > self.current_version {
            return Err(Error::VersionAheadOfCurrent(to, self.current_version));
        }

        if from == to {
            return Ok(tagged);
        }

        let (type_ref, value) = tagged.into_parts();
        let fixes = self.fixes.fixes_for(&type_ref, from, to);

        log::debug!(
            "Updating \"{type_ref}\" from version {from} to version {to}: {} candidate fixes",
            fixes.len()
        );

        if let Some(recorder) = context.as_deref_mut() {
            recorder.begin_migration(&type_ref, from, to);
            if recorder.capture_snapshots() {
                recorder.set_input_snapshot(format!("{:?}", value.value()));
            }
        }

        let mut current = value;
        for fix in &fixes {
            if fix.from_version() < from {
                continue;
            }
            if fix.to_version() > to {
                continue;
            }

            if let Some(recorder) = context.as_deref_mut() {
                let before = if recorder.capture_snapshots() {
                    Some(format!("{:?}", current.value()))
                } else {
                    None
                };
                recorder.begin_fix(fix.name(), fix.from_version(), fix.to_version(), before);
            }

            log::debug!("Applying fix \"{}\" ({} -> {})", fix.name(), fix.from_version(), fix.to_version());

            current = match fix.apply(&type_ref, current, context.as_deref_mut()) {
                Ok(next) => next,
                Err(error) => return Err(Self::wrap_fix_error(error, fix.as_ref(), &type_ref)),
            };

            if let Some(recorder) = context.as_deref_mut() {
                let after = if recorder.capture_snapshots() {
                    Some(format!("{:?}", current.value()))
                } else {
                    None
                };
                recorder.finish_fix(after);
            }
        }

        if let Some(recorder) = context.as_deref_mut() {
            if recorder.capture_snapshots() {
                recorder.set_output_snapshot(format!("{:?}", current.value()));
            }
        }

        log::debug!("Finished updating \"{type_ref}\" from version {from} to version {to}");

        Ok(TaggedDynamic::new(type_ref, current))
    }

    /// This function migrates a batch of independent documents in parallel. The
    /// per-document results are the same as sequential `update` calls; the first
    /// error wins.
    pub fn update_batch(
        &self,
        documents: Vec<TaggedDynamic<O>>,
        from: Version,
        to: Version,
    ) -> Result<Vec<TaggedDynamic<O>>> {
        documents.into_par_iter()
            .map(|document| self.update(document, from, to, None))
            .collect::<Result<Vec<_>>>()
    }

    /// This function wraps a fix error with the fix's context, unless it's wrapped
    /// already.
    fn wrap_fix_error(error: Error, fix: &dyn DataFix<O>, type_ref: &TypeReference) -> Error {
        match error {
            Error::FixFailed { .. } => error,
            other => Error::FixFailed {
                name: fix.name().to_owned(),
                from: fix.from_version(),
                to: fix.to_version(),
                type_ref: type_ref.clone(),
                source: Box::new(other),
            },
        }
    }
}
