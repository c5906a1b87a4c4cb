//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the diagnostic capture of migrations: [`DiagnosticContext`],
//! the immutable [`MigrationReport`] it produces, and the rule wrapper recording
//! per-application entries.
//!
//! A context is per-migration and single-writer: build one, hand it to an `update`
//! call, then [`finish`](DiagnosticContext::finish) it into a report. The report is
//! immutable, thread-safe and serializable; the context's builder is not thread-safe
//! and is not meant to be shared.

use getset::Getters;
use serde_derive::Serialize;

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};

use crate::ops::DynamicOps;
use crate::rules::{Rule, TypeRewriteRule, Typed};
use crate::schema::{TypeReference, Version};
use crate::types::Type;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct is one recorded rule application within a fix.
#[derive(Clone, Debug, Getters, Serialize)]
#[getset(get = "pub")]
pub struct RuleApplication {

    /// Diagnostic name of the rule.
    rule_name: String,

    /// Description of the type the rule was applied to.
    type_description: String,

    /// Wall-clock time the application started at.
    start_time: SystemTime,

    /// How long the application took.
    duration: Duration,

    /// Whether the rule matched.
    matched: bool,

    /// Error message, if the application raised one.
    error: Option<String>,
}

/// This struct is the record of one applied fix within a migration.
#[derive(Clone, Debug, Getters, Serialize)]
#[getset(get = "pub")]
pub struct FixExecution {

    /// Name of the fix.
    fix_name: String,

    /// Source version of the fix.
    from_version: Version,

    /// Target version of the fix.
    to_version: Version,

    /// Wall-clock time the fix started at.
    start_time: SystemTime,

    /// How long the fix took.
    duration: Duration,

    /// Snapshot of the document before the fix, if snapshots are captured.
    before_snapshot: Option<String>,

    /// Snapshot of the document after the fix, if snapshots are captured.
    after_snapshot: Option<String>,

    /// Recorded rule applications, if rule details are captured.
    rule_applications: Vec<RuleApplication>,
}

/// This struct is the immutable result of a diagnosed migration.
#[derive(Clone, Debug, Getters, Serialize)]
#[getset(get = "pub")]
pub struct MigrationReport {

    /// Reference of the migrated type.
    type_ref: TypeReference,

    /// Source version of the migration.
    from_version: Version,

    /// Target version of the migration.
    to_version: Version,

    /// Wall-clock time the migration started at.
    start_time: SystemTime,

    /// Wall-clock time the migration ended at.
    end_time: SystemTime,

    /// Total duration of the migration.
    total_duration: Duration,

    /// One record per applied fix, in application order.
    fix_executions: Vec<FixExecution>,

    /// Every type reference this migration touched.
    touched_types: BTreeSet<TypeReference>,

    /// Non-fatal anomalies recorded along the way.
    warnings: Vec<String>,

    /// Overall input snapshot, recorded as the caller provided it.
    input_snapshot: Option<String>,

    /// Overall output snapshot, recorded as the caller provided it.
    output_snapshot: Option<String>,
}

/// This struct configures and builds a [`DiagnosticContext`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagnosticContextBuilder {
    capture_rule_details: bool,
    capture_snapshots: bool,
}

/// In-flight record of the fix currently being applied.
#[derive(Debug)]
struct CurrentFix {
    fix_name: String,
    from_version: Version,
    to_version: Version,
    start_time: SystemTime,
    start_instant: Instant,
    before_snapshot: Option<String>,
    rule_applications: Vec<RuleApplication>,
}

/// This struct accumulates the diagnostics of one migration.
#[derive(Debug)]
pub struct DiagnosticContext {
    capture_rule_details: bool,
    capture_snapshots: bool,
    type_ref: Option<TypeReference>,
    from_version: Option<Version>,
    to_version: Option<Version>,
    start_time: Option<SystemTime>,
    start_instant: Option<Instant>,
    fix_executions: Vec<FixExecution>,
    current_fix: Option<CurrentFix>,
    touched_types: BTreeSet<TypeReference>,
    warnings: Vec<String>,
    input_snapshot: Option<String>,
    output_snapshot: Option<String>,
}

//---------------------------------------------------------------------------//
//                       Enum & Structs Implementations
//---------------------------------------------------------------------------//

impl RuleApplication {

    /// This function builds a new rule application record.
    pub fn new(
        rule_name: String,
        type_description: String,
        start_time: SystemTime,
        duration: Duration,
        matched: bool,
        error: Option<String>,
    ) -> Self {
        Self { rule_name, type_description, start_time, duration, matched, error }
    }
}

impl MigrationReport {

    /// This function returns the amount of applied fixes.
    pub fn fix_count(&self) -> usize {
        self.fix_executions.len()
    }
}

impl DiagnosticContextBuilder {

    /// This function enables per-rule-application capture.
    pub fn capture_rule_details(mut self, capture: bool) -> Self {
        self.capture_rule_details = capture;
        self
    }

    /// This function enables snapshot capture.
    pub fn capture_snapshots(mut self, capture: bool) -> Self {
        self.capture_snapshots = capture;
        self
    }

    /// This function finishes the configuration.
    pub fn build(self) -> DiagnosticContext {
        DiagnosticContext {
            capture_rule_details: self.capture_rule_details,
            capture_snapshots: self.capture_snapshots,
            type_ref: None,
            from_version: None,
            to_version: None,
            start_time: None,
            start_instant: None,
            fix_executions: Vec::new(),
            current_fix: None,
            touched_types: BTreeSet::new(),
            warnings: Vec::new(),
            input_snapshot: None,
            output_snapshot: None,
        }
    }
}

impl DiagnosticContext {

    /// This function starts configuring a new context.
    pub fn builder() -> DiagnosticContextBuilder {
        DiagnosticContextBuilder::default()
    }

    /// This function returns true if per-rule-application capture is enabled.
    pub fn capture_rule_details(&self) -> bool {
        self.capture_rule_details
    }

    /// This function returns true if snapshot capture is enabled.
    pub fn capture_snapshots(&self) -> bool {
        self.capture_snapshots
    }

    /// This function records the start of a migration. Called by the engine.
    pub fn begin_migration(&mut self, type_ref: &TypeReference, from: Version, to: Version) {
        self.type_ref = Some(type_ref.clone());
        self.from_version = Some(from);
        self.to_version = Some(to);
        self.start_time = Some(SystemTime::now());
        self.start_instant = Some(Instant::now());
        self.touched_types.insert(type_ref.clone());
    }

    /// This function records a non-fatal anomaly. Warnings never stop a migration.
    pub fn record_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// This function stores the overall input snapshot, as-is. Ignored unless
    /// snapshot capture is enabled.
    pub fn set_input_snapshot(&mut self, snapshot: String) {
        if self.capture_snapshots && self.input_snapshot.is_none() {
            self.input_snapshot = Some(snapshot);
        }
    }

    /// This function stores the overall output snapshot, as-is. Ignored unless
    /// snapshot capture is enabled.
    pub fn set_output_snapshot(&mut self, snapshot: String) {
        if self.capture_snapshots {
            self.output_snapshot = Some(snapshot);
        }
    }

    /// This function records the start of a fix. Called by the engine.
    pub fn begin_fix(&mut self, name: &str, from: Version, to: Version, before_snapshot: Option<String>) {
        self.current_fix = Some(CurrentFix {
            fix_name: name.to_owned(),
            from_version: from,
            to_version: to,
            start_time: SystemTime::now(),
            start_instant: Instant::now(),
            before_snapshot: if self.capture_snapshots { before_snapshot } else { None },
            rule_applications: Vec::new(),
        });
    }

    /// This function records one rule application within the current fix. Ignored when
    /// no fix is in flight.
    pub fn record_rule_application(&mut self, application: RuleApplication) {
        if let Some(current) = self.current_fix.as_mut() {
            current.rule_applications.push(application);
        }
    }

    /// This function closes the current fix record. Called by the engine.
    pub fn finish_fix(&mut self, after_snapshot: Option<String>) {
        if let Some(current) = self.current_fix.take() {
            self.fix_executions.push(FixExecution {
                fix_name: current.fix_name,
                from_version: current.from_version,
                to_version: current.to_version,
                start_time: current.start_time,
                duration: current.start_instant.elapsed(),
                before_snapshot: current.before_snapshot,
                after_snapshot: if self.capture_snapshots { after_snapshot } else { None },
                rule_applications: current.rule_applications,
            });
        }
    }

    /// This function seals the context into an immutable report.
    ///
    /// Returns `None` if no migration was recorded, which is what happens when the
    /// engine took the `from == to` fast path.
    pub fn finish(self) -> Option<MigrationReport> {
        let type_ref = self.type_ref?;

        Some(MigrationReport {
            type_ref,
            from_version: self.from_version?,
            to_version: self.to_version?,
            start_time: self.start_time?,
            end_time: SystemTime::now(),
            total_duration: self.start_instant?.elapsed(),
            fix_executions: self.fix_executions,
            touched_types: self.touched_types,
            warnings: self.warnings,
            input_snapshot: self.input_snapshot,
            output_snapshot: self.output_snapshot,
        })
    }
}

/// This function wraps a rule so every application pushes a [`RuleApplication`] into
/// the provided sink. The wrapped rule behaves exactly like the original.
pub fn recording_rule<O: DynamicOps>(rule: Rule<O>, sink: Arc<Mutex<Vec<RuleApplication>>>) -> Rule<O> {
    Rule::new(RecordingRule { inner: rule, sink })
}

/// Rule decorator recording each application. Installed once, at the engine boundary.
struct RecordingRule<O: DynamicOps> {
    inner: Rule<O>,
    sink: Arc<Mutex<Vec<RuleApplication>>>,
}

impl<O: DynamicOps> TypeRewriteRule<O> for RecordingRule<O> {
    fn rewrite(&self, input_type: &Type, input: &Typed<O>) -> Option<Typed<O>> {
        let start_time = SystemTime::now();
        let start_instant = Instant::now();

        let result = self.inner.rewrite(input_type, input);

        self.sink.lock().unwrap().push(RuleApplication::new(
            self.inner.name(),
            input_type.describe(),
            start_time,
            start_instant.elapsed(),
            result.is_some(),
            None,
        ));

        result
    }

    fn name(&self) -> String {
        self.inner.name()
    }
}
