//! Runtime type descriptions of the host object model.
//!
//! ## Menu
//!
//! - [`HostTypeId`]: Opaque identity of a host type.
//! - [`TypeDesc`]: A type, its kind, its base and its locally declared members.
//! - [`TypeKind`]: The structural category of a type.
//! - [`EnumInfo`]: Named variants of an enumeration.
//! - [`MemberInfo`]: A field or property declared on one level of a hierarchy.
//! - [`MemberFlags`]: Visibility and accessor flags of a member.

// -----------------------------------------------------------------------------
// Modules

mod member_info;
mod type_desc;

// -----------------------------------------------------------------------------
// Exports

pub use member_info::{MemberFlags, MemberInfo, MemberKind};
pub use type_desc::{EnumInfo, HostTypeId, PrimitiveKind, TypeDesc, TypeDescBuilder, TypeKind};
