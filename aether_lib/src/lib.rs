//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 Aether Framework Developers. All rights reserved.
//
// This file is part of the Aether DataFixers project,
// which can be found here: https://github.com/aether-framework/aether-datafixers.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/aether-framework/aether-datafixers/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is the Aether DataFixers lib, a schema-versioned migration framework for
//! serialized structured data.
//!
//! Applications persist user data (game saves, config files, user profiles) in some
//! serialization format; the data model evolves over time, and older persisted
//! documents must be read and upgraded to the current model without loss. This crate
//! provides the machinery: describe the data model at each historical version as a
//! typed schema, define per-version *fixes* transforming data from one version to the
//! next, and apply the right chain of fixes on load, through format-agnostic backend
//! adapters.
//!
//! # Module map
//!
//! | Module | Contents |
//! | ------ | -------- |
//! | [`result`] | [`DataResult`](result::DataResult), the lazy-message carrier of every fallible data operation. |
//! | [`ops`] | [`DynamicOps`](ops::DynamicOps), the backend adapter contract, plus the reference JSON backend. |
//! | [`dynamic`] | [`Dynamic`](dynamic::Dynamic), the navigable `(ops, value)` pair. |
//! | [`codec`] | The bidirectional codec algebra: primitives, combinators, map and record codecs. |
//! | [`types`] | The structural [`Type`](types::Type) DSL with mechanically derived codecs. |
//! | [`rules`] | [`Typed`](rules::Typed) values and the rewrite-rule combinator language. |
//! | [`schema`] | Per-version type tables and the frozen [`SchemaRegistry`](schema::SchemaRegistry). |
//! | [`fixes`] | [`DataFix`](fixes::DataFix), the fix registry, the update engine and the [`AetherDataFixer`](fixes::AetherDataFixer) façade. |
//! | [`diagnostics`] | Per-migration capture into immutable [`MigrationReport`](diagnostics::MigrationReport)s. |
//! | [`error`] | The crate-level contract [`Error`](error::Error). |
//!
//! # A minimal migration
//!
//! ```rust
//! use serde_json::json;
//!
//! use aether_lib::dynamic::Dynamic;
//! use aether_lib::fixes::{AetherDataFixer, RuleFix, TaggedDynamic};
//! use aether_lib::ops::json::JSON_OPS;
//! use aether_lib::rules::Rules;
//! use aether_lib::schema::{Schema, TypeReference, Version};
//! use aether_lib::types::Type;
//!
//! let fixer = AetherDataFixer::builder()
//!     .add_schema(Schema::builder(Version::new(100))
//!         .add_type("player", Type::named("player", Type::passthrough()))
//!         .build()).unwrap()
//!     .add_schema(Schema::builder(Version::new(110))
//!         .add_type("player", Type::named("player", Type::passthrough()))
//!         .build()).unwrap()
//!     .add_fix(
//!         TypeReference::new("player"),
//!         RuleFix::new("rename_player_name", Version::new(100), Version::new(110),
//!             Rules::rename_field(JSON_OPS, "playerName", "name")),
//!     ).unwrap()
//!     .build().unwrap();
//!
//! let save = TaggedDynamic::new(
//!     TypeReference::new("player"),
//!     Dynamic::new(JSON_OPS, json!({"playerName": "Ada", "xp": 5})),
//! );
//!
//! let upgraded = fixer.update(save, Version::new(100), Version::new(110), None).unwrap();
//! assert_eq!(upgraded.value().value(), &json!({"name": "Ada", "xp": 5}));
//! ```
//!
//! # Concurrency
//!
//! Everything is caller-driven and synchronous. A built fixer is immutable and may
//! serve unbounded concurrent `update`/`encode`/`decode` calls; within one call, fixes
//! apply in strict registration order. Diagnostic contexts are per-invocation.

pub mod codec;
pub mod diagnostics;
pub mod dynamic;
pub mod error;
pub mod fixes;
pub mod ops;
pub mod result;
pub mod rules;
pub mod schema;
pub mod types;

pub use crate::error::{Error, Result};
