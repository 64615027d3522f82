use alloc::sync::Arc;
use core::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use serde_json::Value;
use vc_host::HostObject;
use vc_host::info::HostTypeId;
use vc_host::registry::TypeRegistry;

use crate::cache::{AccessPolicy, CacheEntry, MetadataCache};
use crate::classify::{Classification, TypeClassifier};
use crate::config::SnapshotConfig;
use crate::context::SnapshotContext;
use crate::error::{DiagnosticSink, SnapshotError, panic_message};
use crate::generic;
use crate::handlers::HandlerRegistry;
use crate::node::{NodeMap, SerializedNode};
use crate::normalize::normalize;

// -----------------------------------------------------------------------------
// Snapshot

/// The full result of one serialization call.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The JSON document handed to the caller.
    pub document: Value,
    /// The intermediate tree `document` was normalized from.
    pub node: SerializedNode,
    /// Everything that was omitted or degraded, in order of occurrence.
    pub diagnostics: Vec<SnapshotError>,
}

// -----------------------------------------------------------------------------
// SnapshotEngine

/// Serializes host components into JSON documents.
///
/// The engine owns the process-wide caches and the handler list, and is
/// shared across threads behind a reference. Every call borrows the object
/// for its duration and never fails: the worst case is a document with only
/// `typeName` and `instanceID`.
///
/// Documents have one of three shapes:
///
/// - generic: `{typeName, instanceID, properties?}`, `properties` only when
///   at least one member was serialized;
/// - special-cased: `{typeName, instanceID, properties}`;
/// - hostile: `{typeName, instanceID, isFusionComponent: true, properties}`.
///
/// See the [crate documentation](crate) for an example.
#[derive(Debug)]
pub struct SnapshotEngine {
    registry: Arc<TypeRegistry>,
    config: SnapshotConfig,
    classifier: TypeClassifier,
    cache: MetadataCache,
    handlers: HandlerRegistry,
}

impl SnapshotEngine {
    /// Creates an engine with the default configuration.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self::with_config(registry, SnapshotConfig::default())
    }

    pub fn with_config(registry: Arc<TypeRegistry>, config: SnapshotConfig) -> Self {
        Self {
            classifier: TypeClassifier::new(config.classifier.clone()),
            cache: MetadataCache::new(config.member_filter()),
            handlers: HandlerRegistry::with_builtin(),
            registry,
            config,
        }
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    #[inline]
    pub fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    /// Gives access to the known classifications.
    #[inline]
    pub fn classifier_mut(&mut self) -> &mut TypeClassifier {
        &mut self.classifier
    }

    #[inline]
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    #[inline]
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Gives access to the handler list, e.g. to register custom handlers.
    #[inline]
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    pub(crate) fn context<'a>(
        &'a self,
        policy: AccessPolicy,
        sink: &'a DiagnosticSink,
    ) -> SnapshotContext<'a> {
        SnapshotContext {
            registry: &self.registry,
            classifier: &self.classifier,
            cache: &self.cache,
            config: &self.config,
            policy,
            sink,
        }
    }

    // -------------------------------------------------------------------------
    // Metadata

    #[inline]
    pub fn classify(&self, ty: HostTypeId) -> Classification {
        self.classifier.classify(&self.registry, ty)
    }

    /// Returns the serializable members of `ty` across its hierarchy.
    pub fn members_for(&self, ty: HostTypeId, policy: AccessPolicy) -> Arc<CacheEntry> {
        let sink = DiagnosticSink::new();
        self.context(policy, &sink).members_for(ty)
    }

    /// Returns the serializable members declared on `ty` itself.
    pub fn declared_members_for(&self, ty: HostTypeId, policy: AccessPolicy) -> Arc<CacheEntry> {
        let sink = DiagnosticSink::new();
        self.context(policy, &sink).declared_members_for(ty)
    }

    // -------------------------------------------------------------------------
    // Serialization

    /// Serializes one component into its JSON document.
    pub fn serialize_component(&self, obj: &dyn HostObject, policy: AccessPolicy) -> Value {
        self.snapshot_component(obj, policy).document
    }

    /// Like [`serialize_component`](Self::serialize_component), keeping the
    /// intermediate tree and the diagnostics.
    pub fn snapshot_component(&self, obj: &dyn HostObject, policy: AccessPolicy) -> Snapshot {
        let sink = DiagnosticSink::new();
        let cx = self.context(policy, &sink);
        let node = SerializedNode::Object(self.component_document(&cx, obj));
        finish(node, &sink)
    }

    /// Serializes a scene node and all its components.
    ///
    /// Produces `{name, instanceID, activeSelf?, components}`, where
    /// `components` holds one component document per attached component.
    pub fn serialize_node(&self, node: &dyn HostObject, policy: AccessPolicy) -> Value {
        self.snapshot_node(node, policy).document
    }

    /// Like [`serialize_node`](Self::serialize_node), keeping the
    /// intermediate tree and the diagnostics.
    pub fn snapshot_node(&self, node: &dyn HostObject, policy: AccessPolicy) -> Snapshot {
        let sink = DiagnosticSink::new();
        let cx = self.context(policy, &sink);

        let mut map = NodeMap::new();
        let identity = cx.identity(node).unwrap_or_else(|e| {
            cx.record_access(node, "name", e);
            None
        });
        map.insert("name", identity.as_ref().map(|id| id.name()));
        map.insert("instanceID", identity.as_ref().map(|id| id.instance_id()));
        match cx.enabled(node) {
            Ok(Some(active)) => {
                map.insert("activeSelf", active);
            }
            Ok(None) => {}
            Err(e) => cx.record_access(node, "activeSelf", e),
        }

        let components = match catch_unwind(AssertUnwindSafe(|| node.components())) {
            Ok(components) => components,
            Err(payload) => {
                sink.record(SnapshotError::Handler {
                    handler: "components".to_owned(),
                    type_name: cx.type_name(node.host_type()),
                    message: panic_message(&*payload),
                });
                Vec::new()
            }
        };
        let documents = components
            .iter()
            .map(|component| SerializedNode::Object(self.component_document(&cx, &**component)))
            .collect();
        map.insert("components", SerializedNode::Array(documents));

        finish(SerializedNode::Object(map), &sink)
    }

    fn component_document(&self, cx: &SnapshotContext<'_>, obj: &dyn HostObject) -> NodeMap {
        let ty = obj.host_type();
        let type_name = cx.type_name(ty);

        let mut doc = NodeMap::new();
        doc.insert("typeName", type_name.as_str());
        let identity = cx.identity(obj).unwrap_or_else(|e| {
            cx.record_access(obj, "instanceID", e);
            None
        });
        doc.insert("instanceID", identity.map(|id| id.instance_id()));

        let handler = match self.registry.get(ty) {
            Some(desc) => {
                match guarded(cx, "dispatch", &type_name, || self.handlers.find(cx, desc)) {
                    Some(handler) => handler,
                    None => return doc,
                }
            }
            None => None,
        };

        match handler {
            Some(handler) => {
                log::trace!("{type_name} is serialized by the `{}` handler", handler.name());
                let Some(properties) =
                    guarded(cx, handler.name(), &type_name, || handler.serialize(cx, obj))
                else {
                    return doc;
                };
                if handler.marks_hostile() {
                    doc.insert("isFusionComponent", true);
                }
                doc.insert("properties", properties);
            }
            None => {
                let entry = cx.members_for(ty);
                let Some(properties) = guarded(cx, "generic", &type_name, || {
                    generic::serialize_members(cx, obj, &entry, 0)
                }) else {
                    return doc;
                };
                if !properties.is_empty() {
                    doc.insert("properties", properties);
                }
            }
        }

        doc
    }
}

/// Runs `f`, recording a panic as a [`SnapshotError::Handler`].
fn guarded<T>(
    cx: &SnapshotContext<'_>,
    handler: &str,
    type_name: &str,
    f: impl FnOnce() -> T,
) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            cx.sink().record(SnapshotError::Handler {
                handler: handler.to_owned(),
                type_name: type_name.to_owned(),
                message: panic_message(&*payload),
            });
            None
        }
    }
}

fn finish(node: SerializedNode, sink: &DiagnosticSink) -> Snapshot {
    let document = normalize(&node, sink);
    Snapshot {
        document,
        node,
        diagnostics: sink.take(),
    }
}
