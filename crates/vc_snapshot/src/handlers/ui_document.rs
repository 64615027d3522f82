use vc_host::HostObject;
use vc_host::info::TypeDesc;

use super::{ComponentHandler, TypeMatch};
use crate::context::SnapshotContext;
use crate::node::NodeMap;

const ALLOWED: &[&str] = &[
    "panelSettings",
    "visualTreeAsset",
    "sortingOrder",
    "enabled",
    "parentUI",
];

/// Value of the `note` key of every UI document.
pub const VISUAL_TREE_NOTE: &str =
    "rootVisualElement is omitted: the visual tree links parents and children in both directions";

/// Serializes UI documents without touching their visual tree.
///
/// `rootVisualElement` is never read.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiDocumentHandler;

impl ComponentHandler for UiDocumentHandler {
    fn name(&self) -> &str {
        "ui-document"
    }

    fn matches(&self, cx: &SnapshotContext<'_>, desc: &TypeDesc) -> bool {
        TypeMatch::DerivesFrom("UnityEngine.UIElements.UIDocument").test(cx.registry(), desc)
    }

    fn serialize(&self, cx: &SnapshotContext<'_>, obj: &dyn HostObject) -> NodeMap {
        let mut map = NodeMap::new();
        for member in ALLOWED {
            cx.copy_member(obj, member, &mut map);
        }
        map.insert("note", VISUAL_TREE_NOTE);
        map
    }
}
