use vc_host::HostObject;
use vc_host::info::TypeDesc;

use super::{ComponentHandler, TypeMatch};
use crate::context::SnapshotContext;
use crate::node::NodeMap;

/// Properties that are stable outside a rendered frame.
///
/// Matrices and viewport rectangles are left out on purpose.
const ALLOWED: &[&str] = &[
    "nearClipPlane",
    "farClipPlane",
    "fieldOfView",
    "orthographic",
    "orthographicSize",
    "depth",
    "cullingMask",
    "renderingPath",
    "clearFlags",
    "backgroundColor",
    "allowHDR",
    "allowMSAA",
    "useOcclusionCulling",
    "targetDisplay",
    "enabled",
    "gameObject",
];

/// Serializes cameras from a fixed allow-list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraHandler;

impl ComponentHandler for CameraHandler {
    fn name(&self) -> &str {
        "camera"
    }

    fn matches(&self, cx: &SnapshotContext<'_>, desc: &TypeDesc) -> bool {
        TypeMatch::DerivesFrom("UnityEngine.Camera").test(cx.registry(), desc)
    }

    fn serialize(&self, cx: &SnapshotContext<'_>, obj: &dyn HostObject) -> NodeMap {
        let mut map = NodeMap::new();
        for member in ALLOWED {
            cx.copy_member(obj, member, &mut map);
        }
        map
    }
}
