use vc_host::{AssetPath, Identity, Scalar, VectorKind};

// -----------------------------------------------------------------------------
// Reference

/// A reference stub standing in for another identity-bearing instance.
///
/// Encoded as `{name, instanceID}`, plus `assetPath` for assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub instance_id: i64,
    pub asset_path: AssetPath,
}

impl From<&Identity> for Reference {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.name().to_owned(),
            instance_id: identity.instance_id(),
            asset_path: identity.asset_path().clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// SerializedNode

/// The intermediate output tree of the engine.
///
/// Other instances only ever appear as [`Reference`]s, so the tree has no
/// back-references and cannot contain a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedNode {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Reference(Reference),
    Object(NodeMap),
    Array(Vec<SerializedNode>),
}

impl SerializedNode {
    /// Decomposes a vector value into its named components.
    pub fn vector(kind: VectorKind, data: &[f64; 4]) -> Self {
        SerializedNode::Object(
            kind.components()
                .iter()
                .zip(data)
                .map(|(name, v)| ((*name).to_owned(), SerializedNode::Float(*v)))
                .collect(),
        )
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, SerializedNode::Null)
    }

    pub fn as_object(&self) -> Option<&NodeMap> {
        match self {
            SerializedNode::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<Scalar> for SerializedNode {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Bool(v) => SerializedNode::Bool(v),
            Scalar::Int(v) => SerializedNode::Int(v),
            Scalar::UInt(v) => SerializedNode::UInt(v),
            Scalar::Float(v) => SerializedNode::Float(v),
            Scalar::Str(v) => SerializedNode::String(v),
        }
    }
}

impl From<Reference> for SerializedNode {
    #[inline]
    fn from(value: Reference) -> Self {
        SerializedNode::Reference(value)
    }
}

impl From<NodeMap> for SerializedNode {
    #[inline]
    fn from(value: NodeMap) -> Self {
        SerializedNode::Object(value)
    }
}

impl From<bool> for SerializedNode {
    #[inline]
    fn from(value: bool) -> Self {
        SerializedNode::Bool(value)
    }
}

impl From<i64> for SerializedNode {
    #[inline]
    fn from(value: i64) -> Self {
        SerializedNode::Int(value)
    }
}

impl From<&str> for SerializedNode {
    #[inline]
    fn from(value: &str) -> Self {
        SerializedNode::String(value.to_owned())
    }
}

impl<T: Into<SerializedNode>> From<Option<T>> for SerializedNode {
    fn from(value: Option<T>) -> Self {
        value.map_or(SerializedNode::Null, Into::into)
    }
}

// -----------------------------------------------------------------------------
// NodeMap

/// An insertion-ordered map of member name to [`SerializedNode`].
///
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeMap {
    entries: Vec<(String, SerializedNode)>,
}

impl NodeMap {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        node: impl Into<SerializedNode>,
    ) -> Option<SerializedNode> {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&SerializedNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &SerializedNode)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, SerializedNode)> for NodeMap {
    fn from_iter<I: IntoIterator<Item = (String, SerializedNode)>>(iter: I) -> Self {
        let mut map = NodeMap::new();
        for (key, node) in iter {
            map.insert(key, node);
        }
        map
    }
}
