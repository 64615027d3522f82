use alloc::boxed::Box;

use bitflags::bitflags;

use crate::info::HostTypeId;

bitflags! {
    /// Visibility and accessor flags of a [`MemberInfo`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u16 {
        /// Declared with public visibility.
        const PUBLIC = 1 << 0;
        /// Non-public but explicitly marked serializable by the host.
        const SERIALIZE_FIELD = 1 << 1;
        /// Synthesized by the host compiler, e.g. an auto-property backing field.
        const COMPILER_GENERATED = 1 << 2;
        /// A property taking index arguments.
        const INDEXED = 1 << 3;
        /// The member can be read. Always set for fields.
        const READABLE = 1 << 4;
        /// Belongs to the type rather than the instance.
        const STATIC = 1 << 5;
    }
}

/// Whether a member is a stored field or an accessor property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A field or property declared on a single level of a type hierarchy.
///
/// Members are non-public and readable by default, use the builder
/// methods to adjust.
///
/// # Examples
///
/// ```
/// use vc_host::info::{HostTypeId, MemberInfo, MemberKind};
///
/// const INT: HostTypeId = HostTypeId::new(11);
///
/// let speed = MemberInfo::field("speed", INT).public();
/// assert_eq!(speed.kind(), MemberKind::Field);
/// assert!(speed.is_public());
///
/// let hidden = MemberInfo::field("_cache", INT).serialize_field();
/// assert!(!hidden.is_public());
/// assert!(hidden.is_serialize_field());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    name: Box<str>,
    kind: MemberKind,
    value_type: HostTypeId,
    flags: MemberFlags,
}

impl MemberInfo {
    /// Creates a readable, non-public field.
    #[inline]
    pub fn field(name: impl Into<Box<str>>, value_type: HostTypeId) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            value_type,
            flags: MemberFlags::READABLE,
        }
    }

    /// Creates a readable, non-public property.
    #[inline]
    pub fn property(name: impl Into<Box<str>>, value_type: HostTypeId) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
            value_type,
            flags: MemberFlags::READABLE,
        }
    }

    /// Adds the given flags.
    #[inline]
    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn public(self) -> Self {
        self.with_flags(MemberFlags::PUBLIC)
    }

    #[inline]
    pub fn serialize_field(self) -> Self {
        self.with_flags(MemberFlags::SERIALIZE_FIELD)
    }

    #[inline]
    pub fn compiler_generated(self) -> Self {
        self.with_flags(MemberFlags::COMPILER_GENERATED)
    }

    #[inline]
    pub fn indexed(self) -> Self {
        self.with_flags(MemberFlags::INDEXED)
    }

    #[inline]
    pub fn static_member(self) -> Self {
        self.with_flags(MemberFlags::STATIC)
    }

    /// Marks a property as having no getter. Fields stay readable.
    #[inline]
    pub fn write_only(mut self) -> Self {
        if self.kind == MemberKind::Property {
            self.flags.remove(MemberFlags::READABLE);
        }
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Returns the declared type of the member.
    ///
    /// The runtime value may be of a derived type.
    #[inline]
    pub const fn value_type(&self) -> HostTypeId {
        self.value_type
    }

    #[inline]
    pub const fn flags(&self) -> MemberFlags {
        self.flags
    }

    #[inline]
    pub const fn is_public(&self) -> bool {
        self.flags.contains(MemberFlags::PUBLIC)
    }

    #[inline]
    pub const fn is_serialize_field(&self) -> bool {
        self.flags.contains(MemberFlags::SERIALIZE_FIELD)
    }

    #[inline]
    pub const fn is_readable(&self) -> bool {
        self.flags.contains(MemberFlags::READABLE)
    }

    #[inline]
    pub const fn is_indexed(&self) -> bool {
        self.flags.contains(MemberFlags::INDEXED)
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    /// Returns `true` for compiler-synthesized members.
    ///
    /// Hosts do not always flag backing fields, so the `<Name>k__BackingField`
    /// naming pattern is recognised as well.
    pub fn is_compiler_generated(&self) -> bool {
        self.flags.contains(MemberFlags::COMPILER_GENERATED) || self.name.starts_with('<')
    }
}
