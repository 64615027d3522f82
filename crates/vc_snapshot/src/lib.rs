//! Dynamic, failure-contained serialization of host components.
//!
//! Turns instances of a live host object model, whose shape is only known
//! at runtime, into JSON documents. The contract is "never crash, degrade to
//! omission": a member that cannot be read or understood is left out, and
//! the rest of the object is still produced.
//!
//! # Overview
//!
//! - [`TypeClassifier`](classify::TypeClassifier): flags types as hostile by
//!   walking their ancestry against a typed registry and a pattern list.
//! - [`MetadataCache`](cache::MetadataCache): memoizes the serializable member
//!   list of a `(type, policy)` pair for the process lifetime.
//! - [`extract`](extract::extract): the ordered strategy chain pulling a
//!   meaningful value out of an opaque hostile value.
//! - [`HandlerRegistry`](handlers::HandlerRegistry): hand-written serializers
//!   that take priority over generic reflection.
//! - [`normalize`](normalize::normalize): converts the [`SerializedNode`] tree
//!   into a `serde_json::Value`.
//! - [`SnapshotEngine`]: ties the above together.
//!
//! # Dispatch
//!
//! For every component the engine follows a priority order:
//!
//! 1. Custom handlers, in registration order.
//! 2. Built-in special cases: spatial transforms, cameras, UI documents.
//! 3. The hostile-type handler, when the classifier marks the type hostile.
//! 4. Generic reflection over the cached member list.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use vc_host::info::{HostTypeId, MemberInfo, PrimitiveKind, TypeDesc, TypeKind};
//! use vc_host::registry::TypeRegistry;
//! use vc_host::{DynamicObject, Identity};
//! use vc_snapshot::{AccessPolicy, SnapshotEngine};
//!
//! const INT: HostTypeId = HostTypeId::new(1);
//! const SCORE: HostTypeId = HostTypeId::new(2);
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     TypeDesc::builder(INT, "Int32")
//!         .namespace("System")
//!         .kind(TypeKind::Primitive(PrimitiveKind::Int))
//!         .build(),
//! );
//! registry.register(
//!     TypeDesc::builder(SCORE, "Score")
//!         .member(MemberInfo::field("points", INT).public())
//!         .build(),
//! );
//!
//! let engine = SnapshotEngine::new(Arc::new(registry));
//! let score = DynamicObject::new(SCORE)
//!     .with_identity(Identity::new("Score", 7))
//!     .with_value("points", 12);
//!
//! let json = engine.serialize_component(&score, AccessPolicy::PUBLIC_ONLY);
//! assert_eq!(
//!     json,
//!     serde_json::json!({
//!         "typeName": "Score",
//!         "instanceID": 7,
//!         "properties": { "points": 12 }
//!     })
//! );
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod context;
mod engine;
mod error;
mod generic;
mod node;

pub mod cache;
pub mod classify;
pub mod config;
pub mod extract;
pub mod handlers;
pub mod normalize;

#[cfg(test)]
mod testing;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use cache::AccessPolicy;
pub use classify::Classification;
pub use config::SnapshotConfig;
pub use context::SnapshotContext;
pub use engine::{Snapshot, SnapshotEngine};
pub use error::{DiagnosticSink, SnapshotError, contain};
pub use node::{NodeMap, Reference, SerializedNode};
