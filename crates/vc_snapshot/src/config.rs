//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::cache::MemberFilter;
use crate::classify::ClassifierRules;

/// Configuration of a [`SnapshotEngine`](crate::SnapshotEngine).
///
/// Every field has a default, so partial documents are accepted.
///
/// # Examples
///
/// ```
/// use vc_snapshot::SnapshotConfig;
///
/// let config: SnapshotConfig = serde_json::from_str(r#"{ "max_depth": 2 }"#).unwrap();
/// assert_eq!(config.max_depth, 2);
/// assert!(config.excluded_members.iter().any(|m| m == "transform"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub classifier: ClassifierRules,
    /// Member names never serialized by generic reflection.
    pub excluded_members: Vec<String>,
    /// Full paths of types whose members are never serialized.
    pub excluded_member_types: Vec<String>,
    /// How many struct-like values may nest below a component.
    pub max_depth: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierRules::default(),
            excluded_members: [
                // Has its own handler.
                "transform",
                "worldToLocalMatrix",
                "localToWorldMatrix",
                // Deprecated single-component shortcuts.
                "rigidbody",
                "rigidbody2D",
                "camera",
                "light",
                "animation",
                "constantForce",
                "renderer",
                "audio",
                "networkView",
                "collider",
                "collider2D",
                "hingeJoint",
                "particleSystem",
            ]
            .map(String::from)
            .to_vec(),
            excluded_member_types: ["UnityEngine.Matrix4x4"].map(String::from).to_vec(),
            max_depth: 4,
        }
    }
}

impl SnapshotConfig {
    pub(crate) fn member_filter(&self) -> MemberFilter {
        MemberFilter::new(&self.excluded_members, &self.excluded_member_types)
    }
}
