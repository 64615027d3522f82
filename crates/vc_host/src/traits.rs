//! Capabilities registered per host type.
//!
//! Some behaviour of a host type cannot be discovered by looking at its
//! members, e.g. an implicit conversion operator. The host adapter attaches
//! such capabilities to the [`TypeDesc`](crate::info::TypeDesc) as type traits.
//!
//! - [`TypeTrait`]: Marker for a capability value.
//! - [`TypeTraits`]: A table of capabilities keyed by their Rust type.
//! - [`ScalarConversion`]: The type converts itself to a scalar.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::hash::HashMap;
use crate::object::{AccessError, HostObject};
use crate::value::Scalar;

// -----------------------------------------------------------------------------
// TypeTrait

/// A capability stored in a [`TypeTraits`] table.
pub trait TypeTrait: Any + Send + Sync {}

impl dyn TypeTrait {
    /// Returns the capability as `T` if it is of that type.
    #[inline]
    pub fn downcast_ref<T: TypeTrait>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }
}

// -----------------------------------------------------------------------------
// TypeTraits

/// A table of [`TypeTrait`]s, at most one per Rust type.
#[derive(Default)]
pub struct TypeTraits {
    table: HashMap<TypeId, Box<dyn TypeTrait>>,
}

impl TypeTraits {
    #[inline]
    pub fn new() -> Self {
        Self {
            table: HashMap::default(),
        }
    }

    /// Inserts a capability, returning `true` if one of the same type was replaced.
    pub fn insert<T: TypeTrait>(&mut self, data: T) -> bool {
        self.table.insert(TypeId::of::<T>(), Box::new(data)).is_some()
    }

    #[inline]
    pub fn get<T: TypeTrait>(&self) -> Option<&T> {
        self.table
            .get(&TypeId::of::<T>())
            .and_then(|data| data.downcast_ref::<T>())
    }

    #[inline]
    pub fn contains<T: TypeTrait>(&self) -> bool {
        self.table.contains_key(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for TypeTraits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTraits")
            .field("len", &self.table.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ScalarConversion

/// The type can convert an instance of itself into a single scalar,
/// like an implicit conversion operator to `bool` or `int`.
///
/// # Examples
///
/// ```
/// use vc_host::info::{HostTypeId, TypeDesc};
/// use vc_host::traits::ScalarConversion;
/// use vc_host::{AccessError, HostObject, Scalar};
///
/// fn network_bool(obj: &dyn HostObject) -> Result<Scalar, AccessError> {
///     obj.read("_value")?
///         .as_i64()
///         .map(|raw| Scalar::Bool(raw != 0))
///         .ok_or(AccessError::Unsupported("network_bool"))
/// }
///
/// let desc = TypeDesc::builder(HostTypeId::new(56), "NetworkBool")
///     .with_trait(ScalarConversion::new(network_bool))
///     .build();
///
/// assert!(desc.get_trait::<ScalarConversion>().is_some());
/// ```
#[derive(Clone, Copy)]
pub struct ScalarConversion {
    convert: fn(&dyn HostObject) -> Result<Scalar, AccessError>,
}

impl ScalarConversion {
    #[inline]
    pub const fn new(convert: fn(&dyn HostObject) -> Result<Scalar, AccessError>) -> Self {
        Self { convert }
    }

    #[inline]
    pub fn convert(&self, obj: &dyn HostObject) -> Result<Scalar, AccessError> {
        (self.convert)(obj)
    }
}

impl TypeTrait for ScalarConversion {}

#[cfg(test)]
mod tests {
    use super::{TypeTrait, TypeTraits};

    struct Marker(u8);
    impl TypeTrait for Marker {}

    struct Other;
    impl TypeTrait for Other {}

    #[test]
    fn insert_replaces_same_type() {
        let mut traits = TypeTraits::new();
        assert!(!traits.insert(Marker(1)));
        assert!(traits.insert(Marker(2)));
        assert_eq!(traits.len(), 1);
        assert_eq!(traits.get::<Marker>().map(|m| m.0), Some(2));
        assert!(!traits.contains::<Other>());
    }
}
