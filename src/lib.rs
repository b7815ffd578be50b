//! Property paths over JSON-like documents.
//!
//! A path expression such as `dates[0].type` names a location inside a
//! nested tree of objects and arrays. This crate parses and prints such
//! expressions, reads and writes through them, and converts between nested
//! documents and flat `path -> leaf` maps.
//!
//! ```
//! use propath::{denormalize_properties, normalize_properties, Node};
//! use serde_json::json;
//!
//! let doc = Node::from(json!({"name": {"first": "John"}, "friends": ["Alice", "Bob"]}));
//! let flat = denormalize_properties(&doc);
//! assert_eq!(flat.len(), 3);
//! assert_eq!(normalize_properties(&flat, true).unwrap(), doc);
//! ```

pub mod access;
pub mod error;
pub mod flatten;
pub mod node;
pub mod normalize;
pub mod options;
pub mod path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use crate::access::{get_property, get_property_or, set_property, MAX_ARRAY_INDEX};
pub use crate::error::{Error, ErrorKind, Location};
pub use crate::flatten::{denormalize_properties, FlatMap};
pub use crate::node::{Node, Object};
pub use crate::normalize::{
    copy_properties, normalize_array_properties, normalize_properties,
    normalize_properties_with_options,
};
pub use crate::options::{NormalizeOptions, ParseOptions};
pub use crate::path::{
    create_property_name, create_property_name_from_values, format_path, format_path_strict,
    tokenize, AsPath, Path, Token,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Parses a path expression strictly: it must be non-empty and start with a
/// key.
pub fn parse_property_name(expr: &str) -> Result<Path> {
    parse_property_name_with_options(expr, &ParseOptions::default())
}

pub fn parse_property_name_with_options(expr: &str, options: &ParseOptions) -> Result<Path> {
    path::tokenize_with_options(expr, options)
}

pub fn to_node<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
    serde_json::to_value(value)
        .map(Node::from)
        .map_err(|err| Error::serialize(format!("serialize failed: {err}")))
}

pub fn from_node<T: DeserializeOwned>(node: Node) -> Result<T> {
    serde_json::from_value(Value::from(node))
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}

/// Flattens any serializable value.
pub fn to_flat_map<T: Serialize + ?Sized>(value: &T) -> Result<FlatMap> {
    let node = to_node(value)?;
    Ok(denormalize_properties(&node))
}

/// Rebuilds a typed value from a flat map, compacting arrays.
pub fn from_flat_map<T: DeserializeOwned>(map: &FlatMap) -> Result<T> {
    from_flat_map_with_options(map, &NormalizeOptions::default())
}

pub fn from_flat_map_with_options<T: DeserializeOwned>(
    map: &FlatMap,
    options: &NormalizeOptions,
) -> Result<T> {
    let node = normalize_properties_with_options(map, options)?;
    from_node(node)
}
