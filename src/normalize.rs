use crate::access::set_property;
use crate::flatten::{denormalize_properties, FlatMap};
use crate::node::Node;
use crate::{NormalizeOptions, Result};

/// Rebuilds a document from a flat map, compacting arrays when asked.
///
/// Entries are applied in the map's order. Entries that disagree about the
/// kind of a node (`a[0]` next to `a.b`) fail with a type mismatch at the
/// first conflicting write. An empty map yields `null`.
pub fn normalize_properties(map: &FlatMap, compact_arrays: bool) -> Result<Node> {
    let options = NormalizeOptions::new().with_compact_arrays(compact_arrays);
    normalize_properties_with_options(map, &options)
}

pub fn normalize_properties_with_options(map: &FlatMap, options: &NormalizeOptions) -> Result<Node> {
    tracing::debug!(
        entries = map.len(),
        compact_arrays = options.compact_arrays,
        "normalizing flat map"
    );
    let mut root = None;
    for (name, value) in map {
        root = Some(set_property(root, name, Node::from(value))?);
    }
    let root = root.unwrap_or(Node::Null);
    if options.compact_arrays {
        Ok(normalize_array_properties(root))
    } else {
        Ok(root)
    }
}

/// Drops every hole from every array in `data`, keeping element order.
/// Object fields are left alone.
pub fn normalize_array_properties(data: Node) -> Node {
    match data {
        Node::Array(arr) => {
            let before = arr.len();
            let items: Vec<Node> = arr
                .into_iter()
                .filter(|item| !item.is_absent())
                .map(normalize_array_properties)
                .collect();
            if items.len() < before {
                tracing::trace!(removed = before - items.len(), "compacted array holes");
            }
            Node::Array(items)
        }
        Node::Object(obj) => Node::Object(
            obj.into_iter()
                .map(|(key, value)| (key, normalize_array_properties(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Deep-copies `data` by flattening and rebuilding it.
///
/// Empty containers and trailing holes do not survive the copy; interior
/// holes survive only when `compact_arrays` is off.
pub fn copy_properties(data: &Node, compact_arrays: bool) -> Result<Node> {
    normalize_properties(&denormalize_properties(data), compact_arrays)
}
