use vc_host::info::{HostTypeId, MemberInfo, TypeKind};
use vc_host::traits::ScalarConversion;
use vc_host::{AccessError, HostObject, HostValue};

use crate::context::SnapshotContext;
use crate::error::contain;
use crate::node::{NodeMap, Reference, SerializedNode};

/// Members accepted as the raw guid of a guid-like type.
const GUID_MEMBERS: &[&str] = &["RawGuidValue", "Guid"];

/// Extra members emitted next to `raw`, per bare type name.
const RAW_EXTRAS: &[(&str, &[(&str, &str)])] = &[
    (
        "PlayerRef",
        &[("playerId", "PlayerId"), ("isRealPlayer", "IsRealPlayer")],
    ),
    ("NetworkId", &[("isValid", "IsValid")]),
];

type Outcome = Result<Option<SerializedNode>, AccessError>;

// -----------------------------------------------------------------------------
// Strategy

/// One recognised shape of hostile value.
///
/// [`Strategy::ORDER`] is the order [`extract`](super::extract) tries them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// An identity-bearing instance, emitted as a reference stub.
    Reference,
    /// A type with a raw guid member, emitted as its display string.
    Guid,
    /// A composite type identifier exposing `Kind` and `IsValid`.
    Composite,
    /// An array or list of hostile values, extracted element-wise.
    HostileArray,
    /// A scalar, or a type with a registered [`ScalarConversion`].
    Conversion,
    /// A type with a primitive `Value` accessor.
    Value,
    /// A type with a `Raw` accessor, plus type-specific extras.
    Raw,
    /// An enumeration, emitted as its underlying integer.
    Enum,
}

impl Strategy {
    pub const ORDER: [Strategy; 8] = [
        Strategy::Reference,
        Strategy::Guid,
        Strategy::Composite,
        Strategy::HostileArray,
        Strategy::Conversion,
        Strategy::Value,
        Strategy::Raw,
        Strategy::Enum,
    ];

    /// Applies this strategy alone.
    ///
    /// `Ok(None)` means the strategy does not recognise the value.
    pub fn apply(self, cx: &SnapshotContext<'_>, value: &HostValue) -> Outcome {
        match self {
            Strategy::Reference => reference(value),
            Strategy::Guid => guid(cx, value),
            Strategy::Composite => composite(cx, value),
            Strategy::HostileArray => hostile_array(cx, value),
            Strategy::Conversion => conversion(cx, value),
            Strategy::Value => primitive_value(cx, value),
            Strategy::Raw => raw(cx, value),
            Strategy::Enum => Ok(match value {
                HostValue::Enum { value, .. } => Some(SerializedNode::Int(*value)),
                _ => None,
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Finds `name` on `ty` or any of its bases.
fn find_member<'a>(cx: &SnapshotContext<'a>, ty: HostTypeId, name: &str) -> Option<&'a MemberInfo> {
    cx.registry().ancestry(ty).find_map(|desc| desc.member(name))
}

fn has_member(cx: &SnapshotContext<'_>, obj: &dyn HostObject, name: &str) -> bool {
    find_member(cx, obj.host_type(), name).is_some()
}

/// Converts a member value that is expected to be scalar-like.
fn scalar_node(value: HostValue) -> Option<SerializedNode> {
    match value {
        HostValue::Enum { value, .. } => Some(SerializedNode::Int(value)),
        other => other.to_scalar().map(SerializedNode::from),
    }
}

// -----------------------------------------------------------------------------
// Strategies

fn reference(value: &HostValue) -> Outcome {
    Ok(value
        .as_object()
        .and_then(HostObject::identity)
        .map(|identity| SerializedNode::Reference(Reference::from(&identity))))
}

fn guid(cx: &SnapshotContext<'_>, value: &HostValue) -> Outcome {
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };
    if !GUID_MEMBERS.iter().any(|m| has_member(cx, obj, m)) {
        return Ok(None);
    }
    Ok(Some(SerializedNode::String(obj.display_string()?)))
}

fn composite(cx: &SnapshotContext<'_>, value: &HostValue) -> Outcome {
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };
    if !has_member(cx, obj, "Kind") || !has_member(cx, obj, "IsValid") {
        return Ok(None);
    }

    let kind = match obj.read("Kind")? {
        HostValue::Enum { ty, value } => match cx.describe(ty).map(|d| d.kind()) {
            Some(TypeKind::Enum(info)) => match info.name_of(value) {
                Some(name) => SerializedNode::String(name.to_owned()),
                None => SerializedNode::String(value.to_string()),
            },
            _ => SerializedNode::String(value.to_string()),
        },
        HostValue::Str(name) => SerializedNode::String(name),
        _ => return Ok(None),
    };
    let Some(is_valid) = obj.read("IsValid")?.as_bool() else {
        return Ok(None);
    };

    // An invalid identifier of a not yet spawned object is still a result.
    let mut map = NodeMap::new();
    map.insert("kind", kind);
    map.insert("isValid", is_valid);

    match cx.read(obj, "IsPrefab").map(|v| v.as_bool()) {
        Ok(Some(is_prefab)) => {
            map.insert("isPrefab", is_prefab);
            if is_prefab {
                match contain(|| prefab_id(obj)) {
                    Ok(Some(id)) => {
                        map.insert("prefabId", id);
                    }
                    Ok(None) => {}
                    Err(e) => log::trace!("composite identifier has no prefab id: {e}"),
                }
            }
        }
        Ok(None) => {}
        Err(e) => log::trace!("composite identifier has no prefab flag: {e}"),
    }

    Ok(Some(SerializedNode::Object(map)))
}

fn prefab_id(obj: &dyn HostObject) -> Outcome {
    Ok(match obj.read("AsPrefabId")? {
        HostValue::Object(id) => Some(SerializedNode::String(id.display_string()?)),
        other => scalar_node(other),
    })
}

fn hostile_array(cx: &SnapshotContext<'_>, value: &HostValue) -> Outcome {
    let HostValue::Array { elem, items } = value else {
        return Ok(None);
    };
    if !cx.classify(*elem).is_hostile() {
        return Ok(None);
    }

    let mut nodes = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match super::extract(cx, item, Some(*elem)) {
            Some(node) => nodes.push(node),
            None => log::debug!("dropped unextractable element {index} of a hostile array"),
        }
    }
    Ok(Some(SerializedNode::Array(nodes)))
}

fn conversion(cx: &SnapshotContext<'_>, value: &HostValue) -> Outcome {
    if let Some(scalar) = value.to_scalar() {
        return Ok(Some(SerializedNode::from(scalar)));
    }
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };

    let conversion = cx
        .registry()
        .ancestry(obj.host_type())
        .find_map(|desc| desc.get_trait::<ScalarConversion>());
    match conversion {
        Some(conversion) => Ok(Some(SerializedNode::from(conversion.convert(obj)?))),
        None => Ok(None),
    }
}

fn primitive_value(cx: &SnapshotContext<'_>, value: &HostValue) -> Outcome {
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };
    let primitive = find_member(cx, obj.host_type(), "Value")
        .and_then(|m| cx.describe(m.value_type()))
        .is_some_and(|desc| desc.is_primitive());
    if !primitive {
        return Ok(None);
    }
    Ok(scalar_node(obj.read("Value")?))
}

fn raw(cx: &SnapshotContext<'_>, value: &HostValue) -> Outcome {
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };
    if !has_member(cx, obj, "Raw") {
        return Ok(None);
    }
    let Some(raw) = scalar_node(obj.read("Raw")?) else {
        return Ok(None);
    };

    let mut map = NodeMap::new();
    map.insert("raw", raw);

    let name = cx.describe(obj.host_type()).map(|desc| desc.name());
    let extras = RAW_EXTRAS
        .iter()
        .find(|(ty, _)| Some(*ty) == name)
        .map_or(&[][..], |(_, extras)| *extras);
    for (key, member) in extras {
        match cx.read(obj, member).map(scalar_node) {
            Ok(Some(node)) => {
                map.insert(*key, node);
            }
            Ok(None) => {}
            Err(e) => log::trace!("skipped `{member}` next to raw value: {e}"),
        }
    }

    Ok(Some(SerializedNode::Object(map)))
}
