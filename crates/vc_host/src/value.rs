use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::HostObject;
use crate::info::HostTypeId;

// -----------------------------------------------------------------------------
// VectorKind

/// Fixed-layout numeric structs the host exposes as plain components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    Vector2,
    Vector3,
    Vector4,
    Quaternion,
    Color,
    Rect,
}

impl VectorKind {
    /// Returns the component names, in storage order.
    pub const fn components(self) -> &'static [&'static str] {
        match self {
            VectorKind::Vector2 => &["x", "y"],
            VectorKind::Vector3 => &["x", "y", "z"],
            VectorKind::Vector4 | VectorKind::Quaternion => &["x", "y", "z", "w"],
            VectorKind::Color => &["r", "g", "b", "a"],
            VectorKind::Rect => &["x", "y", "width", "height"],
        }
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// A primitive value produced by a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl From<Scalar> for HostValue {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Bool(v) => HostValue::Bool(v),
            Scalar::Int(v) => HostValue::Int(v),
            Scalar::UInt(v) => HostValue::UInt(v),
            Scalar::Float(v) => HostValue::Float(v),
            Scalar::Str(v) => HostValue::Str(v),
        }
    }
}

// -----------------------------------------------------------------------------
// HostValue

/// The result of reading one member of a host instance.
///
/// Objects are shared with the host, the engine only borrows them for
/// the duration of a serialization call.
#[derive(Clone)]
pub enum HostValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Enum {
        ty: HostTypeId,
        value: i64,
    },
    Vector(VectorKind, [f64; 4]),
    Object(Arc<dyn HostObject>),
    Array {
        elem: HostTypeId,
        items: Vec<HostValue>,
    },
}

impl HostValue {
    /// Wraps an instance.
    #[inline]
    pub fn object(obj: impl HostObject + 'static) -> Self {
        HostValue::Object(Arc::new(obj))
    }

    /// Builds a vector value from its leading components.
    ///
    /// Missing components are zero, extra ones are ignored.
    pub fn vector(kind: VectorKind, components: &[f64]) -> Self {
        let mut data = [0.0; 4];
        for (slot, v) in data.iter_mut().zip(components) {
            *slot = *v;
        }
        HostValue::Vector(kind, data)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// Returns `true` for values that are already scalars.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            HostValue::Bool(_)
                | HostValue::Int(_)
                | HostValue::UInt(_)
                | HostValue::Float(_)
                | HostValue::Str(_)
        )
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns integral values, including enum values, as `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HostValue::Int(v) => Some(*v),
            HostValue::UInt(v) => i64::try_from(*v).ok(),
            HostValue::Enum { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&dyn HostObject> {
        match self {
            HostValue::Object(obj) => Some(&**obj),
            _ => None,
        }
    }

    /// Returns the scalar form of primitive values.
    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            HostValue::Bool(v) => Some(Scalar::Bool(*v)),
            HostValue::Int(v) => Some(Scalar::Int(*v)),
            HostValue::UInt(v) => Some(Scalar::UInt(*v)),
            HostValue::Float(v) => Some(Scalar::Float(*v)),
            HostValue::Str(v) => Some(Scalar::Str(v.clone())),
            _ => None,
        }
    }

    /// Returns the runtime type carried by the value itself, if any.
    pub fn runtime_type(&self) -> Option<HostTypeId> {
        match self {
            HostValue::Enum { ty, .. } => Some(*ty),
            HostValue::Object(obj) => Some(obj.host_type()),
            _ => None,
        }
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => f.write_str("Null"),
            HostValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            HostValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            HostValue::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            HostValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            HostValue::Str(v) => f.debug_tuple("Str").field(v).finish(),
            HostValue::Enum { ty, value } => f
                .debug_struct("Enum")
                .field("ty", ty)
                .field("value", value)
                .finish(),
            HostValue::Vector(kind, data) => {
                let len = kind.components().len();
                f.debug_tuple("Vector")
                    .field(kind)
                    .field(&&data[..len])
                    .finish()
            }
            HostValue::Object(obj) => f
                .debug_struct("Object")
                .field("ty", &obj.host_type())
                .field("identity", &obj.identity())
                .finish(),
            HostValue::Array { elem, items } => f
                .debug_struct("Array")
                .field("elem", elem)
                .field("items", items)
                .finish(),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$ty> for HostValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    HostValue::$variant(<$cast>::from(value))
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool as bool,
    i32 => Int as i64,
    i64 => Int as i64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Str as String,
}

impl From<&str> for HostValue {
    #[inline]
    fn from(value: &str) -> Self {
        HostValue::Str(String::from(value))
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(HostValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::{HostValue, Scalar, VectorKind};

    #[test]
    fn vector_pads_missing_components() {
        let HostValue::Vector(kind, data) = HostValue::vector(VectorKind::Vector3, &[1.0, 2.0])
        else {
            panic!("expected a vector");
        };
        assert_eq!(kind.components(), &["x", "y", "z"]);
        assert_eq!(data, [1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn integral_views() {
        assert_eq!(HostValue::from(7_u32).as_i64(), Some(7));
        assert_eq!(HostValue::UInt(u64::MAX).as_i64(), None);
        assert_eq!(HostValue::from(Some(3_i32)).to_scalar(), Some(Scalar::Int(3)));
        assert!(HostValue::from(None::<bool>).is_null());
        assert!(HostValue::from("x").is_scalar());
    }
}
