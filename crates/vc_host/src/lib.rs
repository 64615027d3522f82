//! The host object model seam.
//!
//! The snapshot engine never owns the objects it serializes. Everything it
//! knows about a live instance is read through the types in this crate:
//!
//! - [`TypeDesc`](info::TypeDesc): a runtime type, its base and its locally declared members.
//! - [`TypeRegistry`](registry::TypeRegistry): the store used to resolve type ids and walk ancestry.
//! - [`HostObject`]: a borrowed handle to a host-owned instance.
//! - [`HostValue`]: the value of a single member read.
//! - [`TypeTrait`](traits::TypeTrait): per-type capabilities registered by the host adapter.
//!
//! [`DynamicObject`] is an in-memory [`HostObject`], useful for adapters that
//! copy host state out, and for tests.
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod dynamic;
mod object;
mod value;

pub mod hash;
pub mod info;
pub mod registry;
pub mod traits;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use dynamic::DynamicObject;
pub use object::{AccessError, AssetPath, HostObject, Identity};
pub use value::{HostValue, Scalar, VectorKind};
