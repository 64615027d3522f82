use serde::{Deserialize, Serialize};
use vc_host::info::TypeDesc;

/// Pattern vocabulary of the [`TypeClassifier`](super::TypeClassifier).
///
/// All comparisons are ASCII case-insensitive.
///
/// # Examples
///
/// ```
/// use vc_snapshot::classify::ClassifierRules;
///
/// let rules: ClassifierRules = serde_json::from_str(
///     r#"{ "hostile_namespaces": ["Netcode"] }"#,
/// ).unwrap();
///
/// assert_eq!(rules.hostile_namespaces, ["Netcode"]);
/// // Unspecified lists keep their defaults.
/// assert!(rules.root_type_paths.iter().any(|p| p == "UnityEngine.MonoBehaviour"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// A namespace is hostile if it starts with one of these, or contains
    /// one of them as a dotted segment prefix (`.Fusion`).
    pub hostile_namespaces: Vec<String>,
    /// Bare type names that are hostile regardless of namespace.
    pub hostile_type_names: Vec<String>,
    /// Full paths of the host's root types. Ancestry walks stop here.
    pub root_type_paths: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            hostile_namespaces: ["Fusion"].map(String::from).to_vec(),
            hostile_type_names: [
                "SimulationBehaviour",
                "NetworkBehaviour",
                "NetworkObject",
                "NetworkRunner",
                "NetworkTransform",
                "NetworkId",
                "NetworkBool",
                "NetworkString",
                "NetworkArray",
                "NetworkDictionary",
                "NetworkLinkedList",
                "NetworkButtons",
                "NetworkPrefabId",
                "NetworkObjectTypeId",
                "NetworkObjectGuid",
                "PlayerRef",
                "Tick",
                "TickTimer",
            ]
            .map(String::from)
            .to_vec(),
            root_type_paths: [
                "UnityEngine.MonoBehaviour",
                "UnityEngine.Behaviour",
                "UnityEngine.Component",
                "UnityEngine.ScriptableObject",
                "UnityEngine.Object",
                "System.ValueType",
                "System.Enum",
                "System.Object",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl ClassifierRules {
    /// Returns `true` if `desc` is one of the root types.
    pub fn is_root(&self, desc: &TypeDesc) -> bool {
        self.root_type_paths
            .iter()
            .any(|root| root.eq_ignore_ascii_case(desc.path()))
    }

    /// Tests a single level of an ancestry chain, ignoring its bases.
    pub fn matches(&self, desc: &TypeDesc) -> bool {
        let name_hit = self
            .hostile_type_names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(desc.name()));

        name_hit
            || desc.namespace().is_some_and(|ns| {
                self.hostile_namespaces
                    .iter()
                    .any(|pattern| namespace_matches(ns, pattern))
            })
    }
}

fn namespace_matches(namespace: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let namespace = namespace.to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();
    namespace.starts_with(&pattern) || namespace.contains(&format!(".{pattern}"))
}
