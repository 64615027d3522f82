//! Type registry of the host object model.

use alloc::boxed::Box;

use crate::hash::HashMap;
use crate::hash::hash_map::Entry;
use crate::info::{HostTypeId, TypeDesc};

/// Upper bound on the number of levels [`Ancestry`] yields.
///
/// Protects against a base chain that loops back on itself.
pub const MAX_ANCESTRY_DEPTH: usize = 64;

// -----------------------------------------------------------------------------
// TypeRegistry

/// The central store of [`TypeDesc`]s, indexed by id and by full path.
///
/// # Examples
///
/// ```
/// use vc_host::info::{HostTypeId, TypeDesc};
/// use vc_host::registry::TypeRegistry;
///
/// const OBJECT: HostTypeId = HostTypeId::new(1);
/// const COMPONENT: HostTypeId = HostTypeId::new(2);
///
/// let mut registry = TypeRegistry::new();
/// registry.register(TypeDesc::builder(OBJECT, "Object").namespace("UnityEngine").build());
/// registry.register(
///     TypeDesc::builder(COMPONENT, "Component")
///         .namespace("UnityEngine")
///         .base(OBJECT)
///         .build(),
/// );
///
/// let chain: Vec<_> = registry.ancestry(COMPONENT).map(|t| t.name()).collect();
/// assert_eq!(chain, ["Component", "Object"]);
/// assert!(registry.is_or_derives_from(COMPONENT, "UnityEngine.Object"));
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<HostTypeId, TypeDesc>,
    path_to_id: HashMap<Box<str>, HostTypeId>,
}

impl TypeRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type if its id is not registered yet.
    ///
    /// Returns `false` and keeps the existing entry otherwise.
    pub fn register(&mut self, desc: TypeDesc) -> bool {
        match self.types.entry(desc.id()) {
            Entry::Occupied(_) => {
                log::debug!("host type {} is already registered", desc.path());
                false
            }
            Entry::Vacant(slot) => {
                self.path_to_id.insert(desc.path().into(), desc.id());
                slot.insert(desc);
                true
            }
        }
    }

    /// Adds or **overwrites** a type.
    pub fn insert(&mut self, desc: TypeDesc) {
        if let Some(old) = self.types.get(&desc.id())
            && old.path() != desc.path()
        {
            self.path_to_id.remove(old.path());
        }
        self.path_to_id.insert(desc.path().into(), desc.id());
        self.types.insert(desc.id(), desc);
    }

    #[inline]
    pub fn get(&self, id: HostTypeId) -> Option<&TypeDesc> {
        self.types.get(&id)
    }

    /// Looks a type up by its `namespace.name` path.
    pub fn get_with_path(&self, path: &str) -> Option<&TypeDesc> {
        self.path_to_id.get(path).and_then(|id| self.types.get(id))
    }

    #[inline]
    pub fn contains(&self, id: HostTypeId) -> bool {
        self.types.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates all registered types in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeDesc> {
        self.types.values()
    }

    /// Walks `id` and then each base type, leaf to root.
    ///
    /// The walk ends at the first unregistered base, or after
    /// [`MAX_ANCESTRY_DEPTH`] levels.
    #[inline]
    pub fn ancestry(&self, id: HostTypeId) -> Ancestry<'_> {
        Ancestry {
            registry: self,
            next: Some(id),
            depth: 0,
        }
    }

    /// Returns `true` if `id` is the type at `path` or derives from it.
    pub fn is_or_derives_from(&self, id: HostTypeId, path: &str) -> bool {
        self.ancestry(id).any(|desc| desc.path() == path)
    }
}

// -----------------------------------------------------------------------------
// Ancestry

/// Iterator returned by [`TypeRegistry::ancestry`].
pub struct Ancestry<'a> {
    registry: &'a TypeRegistry,
    next: Option<HostTypeId>,
    depth: usize,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a TypeDesc;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if self.depth >= MAX_ANCESTRY_DEPTH {
            log::warn!("ancestry of host type {id} exceeds {MAX_ANCESTRY_DEPTH} levels");
            return None;
        }
        let desc = self.registry.get(id)?;
        self.depth += 1;
        self.next = desc.base();
        Some(desc)
    }
}
