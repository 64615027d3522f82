//! Generic reflection over cached member lists.

use vc_host::info::HostTypeId;
use vc_host::{AccessError, HostObject, HostValue};

use crate::cache::CacheEntry;
use crate::context::SnapshotContext;
use crate::extract;
use crate::node::{NodeMap, Reference, SerializedNode};

/// Why a value produced no node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Omission {
    /// A host accessor of a nested object failed.
    Access(AccessError),
    /// A hostile value no extraction strategy understood.
    Unextractable,
    /// A struct-like value nested deeper than `max_depth`.
    DepthLimit,
}

pub(crate) fn serialize_value(
    cx: &SnapshotContext<'_>,
    value: &HostValue,
    declared: Option<HostTypeId>,
    depth: usize,
) -> Result<SerializedNode, Omission> {
    let declared_hostile = declared.is_some_and(|ty| cx.classify(ty).is_hostile());

    match value {
        HostValue::Null => Ok(SerializedNode::Null),
        HostValue::Bool(v) => Ok(SerializedNode::Bool(*v)),
        HostValue::Int(v) => Ok(SerializedNode::Int(*v)),
        HostValue::UInt(v) => Ok(SerializedNode::UInt(*v)),
        HostValue::Float(v) => Ok(SerializedNode::Float(*v)),
        HostValue::Str(v) => Ok(SerializedNode::String(v.clone())),
        HostValue::Enum { value, .. } => Ok(SerializedNode::Int(*value)),
        HostValue::Vector(kind, data) => Ok(SerializedNode::vector(*kind, data)),
        HostValue::Object(obj) => {
            if declared_hostile || cx.classify(obj.host_type()).is_hostile() {
                return extract::extract(cx, value, declared).ok_or(Omission::Unextractable);
            }
            if let Some(identity) = cx.identity(&**obj).map_err(Omission::Access)? {
                return Ok(SerializedNode::Reference(Reference::from(&identity)));
            }
            if depth >= cx.config.max_depth {
                return Err(Omission::DepthLimit);
            }
            let entry = cx.members_for(obj.host_type());
            Ok(SerializedNode::Object(serialize_members(
                cx,
                &**obj,
                &entry,
                depth + 1,
            )))
        }
        HostValue::Array { elem, items } => {
            if declared_hostile || cx.classify(*elem).is_hostile() {
                return extract::extract(cx, value, declared).ok_or(Omission::Unextractable);
            }
            let items = items
                .iter()
                .map(|item| {
                    serialize_value(cx, item, Some(*elem), depth).unwrap_or_else(|omission| {
                        log::trace!("array element of {elem} replaced by null: {omission:?}");
                        SerializedNode::Null
                    })
                })
                .collect();
            Ok(SerializedNode::Array(items))
        }
    }
}

/// Reads and serializes every member of `entry`.
///
/// A member that fails to read, or whose value has to be omitted, is left
/// out of the map and recorded in the sink.
pub(crate) fn serialize_members(
    cx: &SnapshotContext<'_>,
    obj: &dyn HostObject,
    entry: &CacheEntry,
    depth: usize,
) -> NodeMap {
    let mut map = NodeMap::new();

    for member in entry.iter() {
        let value = match cx.read(obj, member.name()) {
            Ok(value) => value,
            Err(source) => {
                cx.record_access(obj, member.name(), source);
                continue;
            }
        };

        match serialize_value(cx, &value, Some(member.value_type()), depth) {
            Ok(node) => {
                map.insert(member.name(), node);
            }
            Err(omission) => cx.record_omission(obj, member.name(), omission),
        }
    }

    map
}
