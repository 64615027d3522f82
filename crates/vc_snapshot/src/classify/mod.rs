//! Hostile-type classification.
//!
//! A type is *hostile* when reading its members outside a live simulation
//! is unsafe. Classification walks the ancestry chain leaf to root, stopping
//! at the host's root types, and hostility is sticky: one hostile level
//! makes the whole type hostile.
//!
//! Each level is first looked up in the typed registry of known
//! classifications, and only tested against the [`ClassifierRules`]
//! patterns when it is not listed there.

// -----------------------------------------------------------------------------
// Modules

mod rules;

// -----------------------------------------------------------------------------
// Exports

pub use rules::ClassifierRules;

// -----------------------------------------------------------------------------
// Classification

use std::sync::{PoisonError, RwLock};

use vc_host::hash::HashMap;
use vc_host::info::{HostTypeId, TypeDesc};
use vc_host::registry::TypeRegistry;

/// Array element types are classified recursively, up to this nesting.
const MAX_ELEMENT_NESTING: usize = 8;

/// Result of [`TypeClassifier::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Safe,
    Hostile,
}

impl Classification {
    #[inline]
    pub const fn is_hostile(self) -> bool {
        matches!(self, Classification::Hostile)
    }
}

// -----------------------------------------------------------------------------
// TypeClassifier

/// Classifies host types as [`Safe`](Classification::Safe) or
/// [`Hostile`](Classification::Hostile).
///
/// Results are memoized per type id. Registering a known classification
/// clears the memo.
///
/// A classifier is bound to the registry it is first used with: the memo
/// does not record which registry produced an entry, so every call must
/// pass the same one. [`SnapshotEngine`](crate::SnapshotEngine) owns one
/// classifier per registry.
///
/// # Examples
///
/// ```
/// use vc_host::info::{HostTypeId, TypeDesc};
/// use vc_host::registry::TypeRegistry;
/// use vc_snapshot::Classification;
/// use vc_snapshot::classify::{ClassifierRules, TypeClassifier};
///
/// const BEHAVIOUR: HostTypeId = HostTypeId::new(1);
/// const NET: HostTypeId = HostTypeId::new(2);
/// const PLAYER: HostTypeId = HostTypeId::new(3);
///
/// let mut registry = TypeRegistry::new();
/// registry.register(TypeDesc::builder(BEHAVIOUR, "MonoBehaviour").namespace("UnityEngine").build());
/// registry.register(TypeDesc::builder(NET, "NetworkBehaviour").namespace("Fusion").base(BEHAVIOUR).build());
/// registry.register(TypeDesc::builder(PLAYER, "Player").namespace("Game").base(NET).build());
///
/// let classifier = TypeClassifier::new(ClassifierRules::default());
/// assert_eq!(classifier.classify(&registry, PLAYER), Classification::Hostile);
/// assert_eq!(classifier.classify(&registry, BEHAVIOUR), Classification::Safe);
/// ```
#[derive(Debug)]
pub struct TypeClassifier {
    rules: ClassifierRules,
    known: HashMap<HostTypeId, Classification>,
    memo: RwLock<HashMap<HostTypeId, Classification>>,
}

impl TypeClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self {
            rules,
            known: HashMap::default(),
            memo: RwLock::new(HashMap::default()),
        }
    }

    /// Registers a known classification for one level of a hierarchy.
    ///
    /// A known [`Safe`](Classification::Safe) level skips pattern matching
    /// for that level only, its bases are still walked.
    pub fn with_known(mut self, id: HostTypeId, classification: Classification) -> Self {
        self.insert_known(id, classification);
        self
    }

    /// See [`with_known`](Self::with_known).
    pub fn insert_known(&mut self, id: HostTypeId, classification: Classification) {
        self.known.insert(id, classification);
        self.memo
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[inline]
    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Returns `true` if `desc` is one of the host's root types.
    #[inline]
    pub fn is_root(&self, desc: &TypeDesc) -> bool {
        self.rules.is_root(desc)
    }

    /// Classifies `ty`, treating unregistered types as safe.
    ///
    /// `registry` must be the registry of every previous call.
    pub fn classify(&self, registry: &TypeRegistry, ty: HostTypeId) -> Classification {
        if let Some(c) = self
            .memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ty)
        {
            return *c;
        }

        let classification = self.classify_uncached(registry, ty, 0);
        self.memo
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ty, classification);
        classification
    }

    fn classify_uncached(
        &self,
        registry: &TypeRegistry,
        ty: HostTypeId,
        nesting: usize,
    ) -> Classification {
        if !registry.contains(ty) {
            log::trace!("host type {ty} is not registered, classified as safe");
            return Classification::Safe;
        }

        for desc in registry.ancestry(ty) {
            if self.is_root(desc) {
                break;
            }

            if let Some(elem) = desc.element_type()
                && nesting < MAX_ELEMENT_NESTING
                && self.classify_uncached(registry, elem, nesting + 1).is_hostile()
            {
                return Classification::Hostile;
            }

            match self.known.get(&desc.id()) {
                Some(Classification::Hostile) => return Classification::Hostile,
                Some(Classification::Safe) => {}
                None if self.rules.matches(desc) => {
                    log::trace!("{} is hostile through {}", ty, desc.path());
                    return Classification::Hostile;
                }
                None => {}
            }
        }

        Classification::Safe
    }
}
