//! Hash containers with a fixed, seeded `foldhash` state.
//!
//! Lookups are keyed by host type ids and member names, so the hash
//! only needs to be stable for the process, not resistant to DoS.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x7A3F_51C2_9E04_B861);

/// Hash state producing results that depend only on the input.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_host::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("Fusion.NetworkId");
/// let b = FixedHashState.hash_one("Fusion.NetworkId");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

/// Re-exported for `Entry` based insertion.
pub use hashbrown::hash_map;
