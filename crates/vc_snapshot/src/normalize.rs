//! Conversion of [`SerializedNode`] trees into JSON values.
//!
//! Maps keep their insertion order (`serde_json` is built with
//! `preserve_order`) and arrays keep their length. A value JSON cannot
//! represent, a non-finite float, is dropped: its key is omitted from a map,
//! or it becomes `null` inside an array. Either case is recorded as a
//! [`SnapshotError::Conversion`].

use serde_json::{Map, Number, Value};
use vc_host::AssetPath;

use crate::error::{DiagnosticSink, SnapshotError};
use crate::node::{NodeMap, Reference, SerializedNode};

/// Converts `node` into a [`Value`].
///
/// Returns [`Value::Null`] when the root itself is unrepresentable.
///
/// # Examples
///
/// ```
/// use vc_snapshot::normalize::normalize;
/// use vc_snapshot::{DiagnosticSink, NodeMap, SerializedNode};
///
/// let mut map = NodeMap::new();
/// map.insert("speed", SerializedNode::Float(2.5));
/// map.insert("drift", SerializedNode::Float(f64::NAN));
///
/// let sink = DiagnosticSink::new();
/// let json = normalize(&SerializedNode::Object(map), &sink);
///
/// assert_eq!(json, serde_json::json!({ "speed": 2.5 }));
/// assert_eq!(sink.len(), 1);
/// ```
pub fn normalize(node: &SerializedNode, sink: &DiagnosticSink) -> Value {
    let mut path = Vec::new();
    convert(node, &mut path, sink).unwrap_or(Value::Null)
}

/// Converts a [`Reference`] into its `{name, instanceID, assetPath?}` stub.
pub fn reference_value(reference: &Reference) -> Value {
    let mut map = Map::new();
    map.insert("name".to_owned(), Value::String(reference.name.clone()));
    map.insert("instanceID".to_owned(), Value::from(reference.instance_id));
    match &reference.asset_path {
        AssetPath::NotAnAsset => {}
        AssetPath::Unknown => {
            map.insert("assetPath".to_owned(), Value::Null);
        }
        AssetPath::Known(path) => {
            map.insert("assetPath".to_owned(), Value::String(path.clone()));
        }
    }
    Value::Object(map)
}

fn convert(node: &SerializedNode, path: &mut Vec<String>, sink: &DiagnosticSink) -> Option<Value> {
    match node {
        SerializedNode::Null => Some(Value::Null),
        SerializedNode::Bool(v) => Some(Value::Bool(*v)),
        SerializedNode::Int(v) => Some(Value::from(*v)),
        SerializedNode::UInt(v) => Some(Value::from(*v)),
        SerializedNode::Float(v) => match Number::from_f64(*v) {
            Some(n) => Some(Value::Number(n)),
            None => {
                sink.record(SnapshotError::Conversion {
                    path: display_path(path),
                    reason: format!("{v} is not a finite number"),
                });
                None
            }
        },
        SerializedNode::String(v) => Some(Value::String(v.clone())),
        SerializedNode::Reference(reference) => Some(reference_value(reference)),
        SerializedNode::Object(map) => Some(Value::Object(convert_map(map, path, sink))),
        SerializedNode::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(format!("[{index}]"));
                values.push(convert(item, path, sink).unwrap_or(Value::Null));
                path.pop();
            }
            Some(Value::Array(values))
        }
    }
}

fn convert_map(map: &NodeMap, path: &mut Vec<String>, sink: &DiagnosticSink) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, node) in map.iter() {
        path.push(key.to_owned());
        if let Some(value) = convert(node, path, sink) {
            out.insert(key.to_owned(), value);
        }
        path.pop();
    }
    out
}

fn display_path(path: &[String]) -> String {
    let mut out = String::from("$");
    for segment in path {
        if !segment.starts_with('[') {
            out.push('.');
        }
        out.push_str(segment);
    }
    out
}
