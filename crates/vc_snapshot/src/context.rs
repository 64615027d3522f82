use alloc::sync::Arc;

use vc_host::info::{HostTypeId, TypeDesc};
use vc_host::registry::TypeRegistry;
use vc_host::{AccessError, HostObject, HostValue, Identity};

use crate::cache::{AccessPolicy, CacheEntry, CacheKey, MemberScope, MetadataCache};
use crate::classify::{Classification, TypeClassifier};
use crate::config::SnapshotConfig;
use crate::error::{DiagnosticSink, SnapshotError, contain};
use crate::generic::{self, Omission};
use crate::node::{NodeMap, SerializedNode};

/// Everything a handler needs during one serialization call.
///
/// Created by the [`SnapshotEngine`](crate::SnapshotEngine) per call and
/// passed to every [`ComponentHandler`](crate::handlers::ComponentHandler).
pub struct SnapshotContext<'a> {
    pub(crate) registry: &'a TypeRegistry,
    pub(crate) classifier: &'a TypeClassifier,
    pub(crate) cache: &'a MetadataCache,
    pub(crate) config: &'a SnapshotConfig,
    pub(crate) policy: AccessPolicy,
    pub(crate) sink: &'a DiagnosticSink,
}

impl<'a> SnapshotContext<'a> {
    #[inline]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    #[inline]
    pub fn config(&self) -> &'a SnapshotConfig {
        self.config
    }

    #[inline]
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    #[inline]
    pub fn sink(&self) -> &'a DiagnosticSink {
        self.sink
    }

    #[inline]
    pub fn describe(&self, ty: HostTypeId) -> Option<&'a TypeDesc> {
        self.registry.get(ty)
    }

    /// Returns the bare name of `ty`, or its id when unregistered.
    pub fn type_name(&self, ty: HostTypeId) -> String {
        match self.registry.get(ty) {
            Some(desc) => desc.name().to_owned(),
            None => ty.to_string(),
        }
    }

    #[inline]
    pub fn classify(&self, ty: HostTypeId) -> Classification {
        self.classifier.classify(self.registry, ty)
    }

    /// Returns the cached member list of `ty` across its hierarchy.
    pub fn members_for(&self, ty: HostTypeId) -> Arc<CacheEntry> {
        self.cached(ty, MemberScope::Hierarchy)
    }

    /// Returns the cached member list declared on `ty` itself.
    pub fn declared_members_for(&self, ty: HostTypeId) -> Arc<CacheEntry> {
        self.cached(ty, MemberScope::DeclaredOnly)
    }

    fn cached(&self, ty: HostTypeId, scope: MemberScope) -> Arc<CacheEntry> {
        let key = CacheKey {
            ty,
            policy: self.policy,
            scope,
        };
        self.cache
            .get_or_build(self.registry, key, &|desc| self.classifier.is_root(desc))
    }

    /// Reads one member with failure containment.
    #[inline]
    pub fn read(&self, obj: &dyn HostObject, member: &str) -> Result<HostValue, AccessError> {
        contain(|| obj.read(member))
    }

    /// Returns the identity of `obj` with failure containment.
    #[inline]
    pub fn identity(&self, obj: &dyn HostObject) -> Result<Option<Identity>, AccessError> {
        contain(|| Ok(obj.identity()))
    }

    /// Returns the enabled state of `obj` with failure containment.
    #[inline]
    pub fn enabled(&self, obj: &dyn HostObject) -> Result<Option<bool>, AccessError> {
        contain(|| Ok(obj.enabled()))
    }

    /// Returns the owner identity of `obj` with failure containment.
    #[inline]
    pub fn owner(&self, obj: &dyn HostObject) -> Result<Option<Identity>, AccessError> {
        contain(|| Ok(obj.owner()))
    }

    /// Serializes an arbitrary value.
    ///
    /// Identity-bearing objects become references, hostile values go through
    /// the extractor, struct-like values are reflected up to the configured
    /// depth. Returns `None` when the value has to be omitted.
    pub fn serialize_value(
        &self,
        value: &HostValue,
        declared: Option<HostTypeId>,
    ) -> Option<SerializedNode> {
        generic::serialize_value(self, value, declared, 0).ok()
    }

    /// Reads `member` and inserts it into `map` under the same name.
    ///
    /// Failures are recorded and leave `map` untouched.
    pub fn copy_member(&self, obj: &dyn HostObject, member: &str, map: &mut NodeMap) -> bool {
        self.copy_member_as(obj, member, member, map)
    }

    /// Like [`copy_member`](Self::copy_member), under a different key.
    pub fn copy_member_as(
        &self,
        obj: &dyn HostObject,
        member: &str,
        key: &str,
        map: &mut NodeMap,
    ) -> bool {
        let value = match self.read(obj, member) {
            Ok(value) => value,
            Err(source) => {
                self.record_access(obj, member, source);
                return false;
            }
        };

        match generic::serialize_value(self, &value, None, 0) {
            Ok(node) => {
                map.insert(key, node);
                true
            }
            Err(omission) => {
                self.record_omission(obj, member, omission);
                false
            }
        }
    }

    pub(crate) fn record_access(&self, obj: &dyn HostObject, member: &str, source: AccessError) {
        self.sink.record(SnapshotError::Access {
            type_name: self.type_name(obj.host_type()),
            member: member.to_owned(),
            source,
        });
    }

    pub(crate) fn record_omission(&self, obj: &dyn HostObject, member: &str, omission: Omission) {
        let type_name = self.type_name(obj.host_type());
        let member = member.to_owned();
        self.sink.record(match omission {
            Omission::Access(source) => SnapshotError::Access {
                type_name,
                member,
                source,
            },
            Omission::Unextractable => SnapshotError::Extraction { type_name, member },
            Omission::DepthLimit => SnapshotError::DepthLimit {
                type_name,
                member,
                limit: self.config.max_depth,
            },
        });
    }
}
