use vc_host::info::TypeDesc;
use vc_host::{HostObject, HostValue};

use super::{ComponentHandler, TypeMatch};
use crate::context::SnapshotContext;
use crate::node::{NodeMap, Reference, SerializedNode};

const VECTORS: &[&str] = &[
    "position",
    "localPosition",
    "rotation",
    "localRotation",
    "eulerAngles",
    "localEulerAngles",
    "localScale",
    "lossyScale",
];

const REFERENCES: &[&str] = &["parent", "root"];

/// Serializes spatial transforms without reflecting over them.
///
/// Vectors are decomposed into named numbers. `parent` and `root` are
/// emitted as reference stubs, never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformHandler;

impl ComponentHandler for TransformHandler {
    fn name(&self) -> &str {
        "transform"
    }

    fn matches(&self, cx: &SnapshotContext<'_>, desc: &TypeDesc) -> bool {
        TypeMatch::DerivesFrom("UnityEngine.Transform").test(cx.registry(), desc)
    }

    fn serialize(&self, cx: &SnapshotContext<'_>, obj: &dyn HostObject) -> NodeMap {
        let mut map = NodeMap::new();

        match cx.identity(obj) {
            Ok(Some(identity)) => {
                map.insert("name", identity.name());
            }
            Ok(None) => {}
            Err(e) => cx.record_access(obj, "name", e),
        }

        for member in VECTORS {
            match cx.read(obj, member) {
                Ok(HostValue::Vector(kind, data)) => {
                    map.insert(*member, SerializedNode::vector(kind, &data));
                }
                Ok(other) => log::trace!("transform `{member}` is not a vector: {other:?}"),
                Err(e) => cx.record_access(obj, member, e),
            }
        }

        for member in REFERENCES {
            let identity = cx.read(obj, member).and_then(|value| match value {
                HostValue::Object(target) => cx.identity(&*target),
                _ => Ok(None),
            });
            match identity {
                Ok(identity) => {
                    let node = identity.map(|identity| Reference::from(&identity));
                    map.insert(*member, SerializedNode::from(node));
                }
                Err(e) => cx.record_access(obj, member, e),
            }
        }

        match cx.read(obj, "childCount").map(|v| v.as_i64()) {
            Ok(Some(count)) => {
                map.insert("childCount", count);
            }
            Ok(None) => {}
            Err(e) => cx.record_access(obj, "childCount", e),
        }

        map
    }
}
