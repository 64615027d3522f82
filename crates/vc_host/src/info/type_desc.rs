use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use crate::info::MemberInfo;
use crate::traits::{TypeTrait, TypeTraits};

// -----------------------------------------------------------------------------
// HostTypeId

/// Opaque identity of a host type.
///
/// Ids are assigned by the host adapter and must be unique within one
/// [`TypeRegistry`](crate::registry::TypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct HostTypeId(u64);

impl HostTypeId {
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HostTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// -----------------------------------------------------------------------------
// TypeKind

/// Primitive host types that map directly onto a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int,
    UInt,
    Float,
    String,
}

/// Named variants of an enumeration type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumInfo {
    variants: Box<[(Box<str>, i64)]>,
}

impl EnumInfo {
    pub fn new<N: Into<Box<str>>>(variants: impl IntoIterator<Item = (N, i64)>) -> Self {
        Self {
            variants: variants
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Returns the name of the first variant with the given underlying value.
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.variants
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| &**name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, i64)> {
        self.variants.iter().map(|(name, v)| (&**name, *v))
    }
}

/// The structural category of a host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A reference type.
    Class,
    /// A value type.
    Struct,
    Interface,
    Enum(EnumInfo),
    Primitive(PrimitiveKind),
    /// Fixed-size array of the element type.
    Array(HostTypeId),
    /// Growable list of the element type.
    List(HostTypeId),
}

// -----------------------------------------------------------------------------
// TypeDesc

/// A runtime type of the host object model.
///
/// Only members declared *on this level* are stored, inherited members
/// are reached by walking [`base`](Self::base) through the registry.
///
/// # Examples
///
/// ```
/// use vc_host::info::{HostTypeId, MemberInfo, TypeDesc, TypeKind};
///
/// const INT: HostTypeId = HostTypeId::new(11);
/// const PLAYER: HostTypeId = HostTypeId::new(100);
/// const BEHAVIOUR: HostTypeId = HostTypeId::new(5);
///
/// let desc = TypeDesc::builder(PLAYER, "PlayerController")
///     .namespace("Game")
///     .base(BEHAVIOUR)
///     .member(MemberInfo::field("speed", INT).public())
///     .build();
///
/// assert_eq!(desc.path(), "Game.PlayerController");
/// assert_eq!(desc.kind(), &TypeKind::Class);
/// assert!(desc.member("speed").is_some());
/// ```
pub struct TypeDesc {
    id: HostTypeId,
    name: Box<str>,
    namespace: Option<Box<str>>,
    path: Box<str>,
    kind: TypeKind,
    base: Option<HostTypeId>,
    members: Box<[MemberInfo]>,
    traits: TypeTraits,
}

impl TypeDesc {
    /// Starts describing a class type named `name`.
    #[inline]
    pub fn builder(id: HostTypeId, name: impl Into<Box<str>>) -> TypeDescBuilder {
        TypeDescBuilder {
            id,
            name: name.into(),
            namespace: None,
            kind: TypeKind::Class,
            base: None,
            members: Vec::new(),
            traits: TypeTraits::new(),
        }
    }

    #[inline]
    pub const fn id(&self) -> HostTypeId {
        self.id
    }

    /// Returns the bare type name, without namespace.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns `namespace.name`, or the bare name for the global namespace.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline]
    pub const fn base(&self) -> Option<HostTypeId> {
        self.base
    }

    /// Returns the members declared on this level, in declaration order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Finds a locally declared member by exact name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Returns the element type of array and list types.
    pub const fn element_type(&self) -> Option<HostTypeId> {
        match self.kind {
            TypeKind::Array(elem) | TypeKind::List(elem) => Some(elem),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    #[inline]
    pub const fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    #[inline]
    pub fn traits(&self) -> &TypeTraits {
        &self.traits
    }

    /// Returns the registered [`TypeTrait`] of type `T`, if present.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.traits.get::<T>()
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDesc")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("base", &self.base)
            .field("members", &self.members)
            .field("traits", &self.traits)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeDescBuilder

/// Builder returned by [`TypeDesc::builder`].
pub struct TypeDescBuilder {
    id: HostTypeId,
    name: Box<str>,
    namespace: Option<Box<str>>,
    kind: TypeKind,
    base: Option<HostTypeId>,
    members: Vec<MemberInfo>,
    traits: TypeTraits,
}

impl TypeDescBuilder {
    pub fn namespace(mut self, namespace: impl Into<Box<str>>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn base(mut self, base: HostTypeId) -> Self {
        self.base = Some(base);
        self
    }

    pub fn member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = MemberInfo>) -> Self {
        self.members.extend(members);
        self
    }

    /// Registers a capability, overwriting a previous one of the same type.
    pub fn with_trait<T: TypeTrait>(mut self, data: T) -> Self {
        self.traits.insert(data);
        self
    }

    pub fn build(self) -> TypeDesc {
        let path = match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name).into_boxed_str(),
            None => self.name.clone(),
        };

        TypeDesc {
            id: self.id,
            name: self.name,
            namespace: self.namespace,
            path,
            kind: self.kind,
            base: self.base,
            members: self.members.into_boxed_slice(),
            traits: self.traits,
        }
    }
}
