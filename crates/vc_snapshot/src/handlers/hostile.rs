use vc_host::HostObject;
use vc_host::info::TypeDesc;

use super::ComponentHandler;
use crate::context::SnapshotContext;
use crate::generic;
use crate::node::{NodeMap, SerializedNode};

/// Serializes components of hostile types.
///
/// Emits the identity keys `name`, `instanceID`, `enabled` and
/// `gameObjectInstanceID` unconditionally, then the members declared on the
/// concrete type only. Inherited members belong to the networking runtime
/// and are never read.
///
/// Per member:
///
/// - a read failure becomes the inline string `"Error: <reason>"`;
/// - null stays an explicit `null`;
/// - a hostile value goes through [`extract`](crate::extract::extract), and is
///   omitted when unextractable;
/// - anything else is serialized generically.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostileHandler;

impl ComponentHandler for HostileHandler {
    fn name(&self) -> &str {
        "hostile"
    }

    fn matches(&self, cx: &SnapshotContext<'_>, desc: &TypeDesc) -> bool {
        cx.classify(desc.id()).is_hostile()
    }

    fn serialize(&self, cx: &SnapshotContext<'_>, obj: &dyn HostObject) -> NodeMap {
        let mut map = NodeMap::new();

        // Identity keys are always present, a failing accessor leaves them null.
        let identity = cx.identity(obj).unwrap_or_else(|e| {
            cx.record_access(obj, "name", e);
            None
        });
        map.insert("name", identity.as_ref().map(|id| id.name()));
        map.insert("instanceID", identity.as_ref().map(|id| id.instance_id()));

        let enabled = cx.enabled(obj).unwrap_or_else(|e| {
            cx.record_access(obj, "enabled", e);
            None
        });
        map.insert("enabled", enabled);

        let owner = cx.owner(obj).unwrap_or_else(|e| {
            cx.record_access(obj, "gameObjectInstanceID", e);
            None
        });
        map.insert("gameObjectInstanceID", owner.map(|owner| owner.instance_id()));

        let entry = cx.declared_members_for(obj.host_type());
        for member in entry.iter() {
            let value = match cx.read(obj, member.name()) {
                Ok(value) => value,
                Err(e) => {
                    map.insert(member.name(), SerializedNode::String(format!("Error: {e}")));
                    cx.record_access(obj, member.name(), e);
                    continue;
                }
            };

            match generic::serialize_value(cx, &value, Some(member.value_type()), 0) {
                Ok(node) => {
                    map.insert(member.name(), node);
                }
                Err(omission) => cx.record_omission(obj, member.name(), omission),
            }
        }

        map
    }

    fn marks_hostile(&self) -> bool {
        true
    }
}
