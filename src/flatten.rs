use indexmap::IndexMap;
use serde_json::Value;

use crate::node::Node;
use crate::path::{format_path, Path};

/// Path expression to leaf value, in document order.
pub type FlatMap = IndexMap<String, Value>;

/// Flattens a document into one entry per leaf.
///
/// Scalars and `null` become entries keyed by their path; holes are skipped
/// and empty containers contribute nothing. A scalar root is stored under
/// the empty path.
///
/// ```
/// use propath::{denormalize_properties, Node};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"name": {"first": "John"}, "friends": ["Alice", "Bob"]}));
/// let flat = denormalize_properties(&doc);
/// assert_eq!(flat["name.first"], json!("John"));
/// assert_eq!(flat["friends[1]"], json!("Bob"));
/// ```
pub fn denormalize_properties(data: &Node) -> FlatMap {
    let mut out = FlatMap::new();
    let mut prefix = Path::new();
    walk(data, &mut prefix, &mut out);
    out
}

fn walk(node: &Node, prefix: &mut Path, out: &mut FlatMap) {
    match node {
        Node::Absent => {}
        Node::Object(obj) => {
            for (key, value) in obj {
                prefix.push_key(key.as_str());
                walk(value, prefix, out);
                prefix.pop();
            }
        }
        Node::Array(arr) => {
            for (index, item) in arr.iter().enumerate() {
                prefix.push_index(index);
                walk(item, prefix, out);
                prefix.pop();
            }
        }
        leaf => {
            out.insert(format_path(prefix), Value::from(leaf));
        }
    }
}
