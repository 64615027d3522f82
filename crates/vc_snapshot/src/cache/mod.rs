//! Memoized member metadata.
//!
//! Computing which members of a type are serializable means walking the
//! hierarchy and filtering every declaration. [`MetadataCache`] does that
//! once per [`CacheKey`] and keeps the result for the lifetime of the
//! process; entries are never invalidated.

// -----------------------------------------------------------------------------
// Modules

mod entry;

// -----------------------------------------------------------------------------
// Exports

pub use entry::{AccessPolicy, CacheEntry, CacheKey, MemberDescriptor, MemberFilter, MemberScope};
pub use entry::build_entry;

// -----------------------------------------------------------------------------
// MetadataCache

use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock};

use vc_host::info::TypeDesc;
use vc_host::registry::TypeRegistry;

use entry::EntryMap;

/// Process-wide cache of [`CacheEntry`]s.
///
/// Lookups take a read lock. A miss builds the entry outside any lock and
/// inserts it under the write lock; when two threads race on the same key
/// the first insert wins and both observe the same entry.
///
/// # Examples
///
/// ```
/// use vc_host::info::{HostTypeId, MemberInfo, TypeDesc};
/// use vc_host::registry::TypeRegistry;
/// use vc_snapshot::cache::{AccessPolicy, CacheKey, MemberFilter, MemberScope, MetadataCache};
///
/// const INT: HostTypeId = HostTypeId::new(1);
/// const SCORE: HostTypeId = HostTypeId::new(2);
///
/// let mut registry = TypeRegistry::new();
/// registry.register(TypeDesc::builder(INT, "Int32").build());
/// registry.register(
///     TypeDesc::builder(SCORE, "Score")
///         .member(MemberInfo::field("points", INT).public())
///         .member(MemberInfo::field("_bonus", INT).serialize_field())
///         .build(),
/// );
///
/// let cache = MetadataCache::new(MemberFilter::default());
/// let key = CacheKey {
///     ty: SCORE,
///     policy: AccessPolicy::INCLUDE_SERIALIZED,
///     scope: MemberScope::Hierarchy,
/// };
///
/// let first = cache.get_or_build(&registry, key, &|_| false);
/// let second = cache.get_or_build(&registry, key, &|_| false);
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// assert_eq!(first.len(), 2);
/// ```
#[derive(Debug)]
pub struct MetadataCache {
    filter: MemberFilter,
    entries: RwLock<EntryMap>,
}

impl MetadataCache {
    pub fn new(filter: MemberFilter) -> Self {
        Self {
            filter,
            entries: RwLock::new(EntryMap::default()),
        }
    }

    #[inline]
    pub fn filter(&self) -> &MemberFilter {
        &self.filter
    }

    /// Returns the entry of `key`, building it on first use.
    pub fn get_or_build(
        &self,
        registry: &TypeRegistry,
        key: CacheKey,
        stop_at: &dyn Fn(&TypeDesc) -> bool,
    ) -> Arc<CacheEntry> {
        if let Some(entry) = self.get(&key) {
            return entry;
        }

        let built = Arc::new(build_entry(registry, &self.filter, key, stop_at));
        log::trace!("cached {} members for {:?}", built.len(), key);

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(built)
            .clone()
    }

    /// Returns the entry of `key` if it was built already.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Returns the number of cached keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
