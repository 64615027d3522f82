use serde::{Deserialize, Serialize};
use vc_host::hash::{HashMap, HashSet};
use vc_host::info::{HostTypeId, MemberInfo, MemberKind, TypeDesc};
use vc_host::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// AccessPolicy

/// Which non-public members a snapshot includes.
///
/// Public fields and readable public properties are always included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicy {
    /// Also include non-public fields explicitly marked serializable.
    pub include_non_public_serialized_fields: bool,
}

impl AccessPolicy {
    pub const PUBLIC_ONLY: Self = Self {
        include_non_public_serialized_fields: false,
    };

    pub const INCLUDE_SERIALIZED: Self = Self {
        include_non_public_serialized_fields: true,
    };
}

/// How far up the hierarchy members are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberScope {
    /// Every level from the concrete type up to the first root type.
    Hierarchy,
    /// Only the members declared on the concrete type.
    DeclaredOnly,
}

/// Key of a [`CacheEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub ty: HostTypeId,
    pub policy: AccessPolicy,
    pub scope: MemberScope,
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// A member selected for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    name: Box<str>,
    kind: MemberKind,
    declared_on: HostTypeId,
    value_type: HostTypeId,
    serialize_field: bool,
}

impl MemberDescriptor {
    fn new(member: &MemberInfo, declared_on: HostTypeId) -> Self {
        Self {
            name: member.name().into(),
            kind: member.kind(),
            declared_on,
            value_type: member.value_type(),
            serialize_field: member.is_serialize_field(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The hierarchy level the member was declared on.
    #[inline]
    pub const fn declared_on(&self) -> HostTypeId {
        self.declared_on
    }

    #[inline]
    pub const fn value_type(&self) -> HostTypeId {
        self.value_type
    }

    /// Whether the member carries the host's serializable marker.
    #[inline]
    pub const fn is_serialize_field(&self) -> bool {
        self.serialize_field
    }
}

// -----------------------------------------------------------------------------
// CacheEntry

/// The ordered, immutable member list of one [`CacheKey`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CacheEntry {
    members: Box<[MemberDescriptor]>,
}

impl CacheEntry {
    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    pub fn get(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name() == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MemberDescriptor> {
        self.members.iter()
    }
}

// -----------------------------------------------------------------------------
// MemberFilter

/// Members dropped regardless of visibility.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    excluded_names: HashSet<Box<str>>,
    excluded_types: HashSet<Box<str>>,
}

impl MemberFilter {
    pub fn new<N, T>(names: N, type_paths: T) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        Self {
            excluded_names: names.into_iter().map(|n| n.as_ref().into()).collect(),
            excluded_types: type_paths.into_iter().map(|t| t.as_ref().into()).collect(),
        }
    }

    /// Applies the visibility rules and the deny lists to one member.
    pub fn admits(&self, registry: &TypeRegistry, member: &MemberInfo, policy: AccessPolicy) -> bool {
        if member.is_static() || member.is_compiler_generated() {
            return false;
        }
        if self.excluded_names.contains(member.name()) {
            return false;
        }
        if let Some(value_type) = registry.get(member.value_type())
            && self.excluded_types.contains(value_type.path())
        {
            return false;
        }

        match member.kind() {
            MemberKind::Property => {
                member.is_public() && member.is_readable() && !member.is_indexed()
            }
            MemberKind::Field => {
                member.is_public()
                    || (policy.include_non_public_serialized_fields && member.is_serialize_field())
            }
        }
    }
}

/// Computes the member list of `key`.
///
/// Walks the ancestry of `key.ty` leaf to root, stopping before the first
/// type `stop_at` accepts. Each level contributes only its locally declared
/// members; a name already recorded at a more derived level shadows the
/// base declaration.
pub fn build_entry(
    registry: &TypeRegistry,
    filter: &MemberFilter,
    key: CacheKey,
    stop_at: &dyn Fn(&TypeDesc) -> bool,
) -> CacheEntry {
    let mut seen: HashSet<&str> = HashSet::default();
    let mut members = Vec::new();

    for desc in registry.ancestry(key.ty) {
        if stop_at(desc) {
            break;
        }

        for member in desc.members() {
            if !filter.admits(registry, member, key.policy) {
                continue;
            }
            if !seen.insert(member.name()) {
                log::trace!(
                    "`{}.{}` is shadowed by a derived declaration",
                    desc.path(),
                    member.name()
                );
                continue;
            }
            members.push(MemberDescriptor::new(member, desc.id()));
        }

        if key.scope == MemberScope::DeclaredOnly {
            break;
        }
    }

    CacheEntry {
        members: members.into_boxed_slice(),
    }
}

/// Shared map type of [`MetadataCache`](super::MetadataCache).
pub(super) type EntryMap = HashMap<CacheKey, alloc::sync::Arc<CacheEntry>>;
