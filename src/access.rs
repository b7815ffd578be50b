//! Reading and writing nested values by path.
//!
//! Reads are tolerant: any step that leads nowhere yields `None`. Writes are
//! strict: they create missing containers but never coerce an existing
//! object into an array or the other way round.

use crate::node::{Node, Object};
use crate::path::{format_path, AsPath, Path, Token};
use crate::{Error, Result};

/// Largest array index a write may target. Reads are not limited.
pub const MAX_ARRAY_INDEX: usize = 1 << 20;

/// Resolves `path` against `data`.
///
/// Missing keys, out-of-range indices, holes and attempts to step into a
/// scalar or `null` all yield `Ok(None)`. Only a malformed path is an error.
///
/// ```
/// use propath::{get_property, Node};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"a": {"b": {"c": 1}}}));
/// assert_eq!(get_property(&doc, "a.b.c").unwrap(), Some(&Node::from(1)));
/// assert_eq!(get_property(&doc, "a.x.c").unwrap(), None);
/// ```
pub fn get_property<'a, P: AsPath + ?Sized>(data: &'a Node, path: &P) -> Result<Option<&'a Node>> {
    let path = path.as_path()?;
    Ok(data.pointer(&path))
}

/// Like [`get_property`] but substitutes `fallback` when nothing is found.
pub fn get_property_or<'a, P: AsPath + ?Sized>(
    data: &'a Node,
    path: &P,
    fallback: &'a Node,
) -> Result<&'a Node> {
    Ok(get_property(data, path)?.unwrap_or(fallback))
}

/// Writes `value` at `path` and returns the resulting root.
///
/// When `data` is `None` (or `null`) a new root container is created, an
/// array if the path starts with an index and an object otherwise. The empty
/// path replaces the whole document with `value`.
///
/// ```
/// use propath::{set_property, Node};
/// use serde_json::{json, Value};
///
/// let doc = set_property(None, "a[0].b", Node::from("v")).unwrap();
/// assert_eq!(Value::from(doc), json!({"a": [{"b": "v"}]}));
/// ```
pub fn set_property<P: AsPath + ?Sized>(data: Option<Node>, path: &P, value: Node) -> Result<Node> {
    let path = path.as_path()?;
    let mut root = data.unwrap_or(Node::Absent);
    root.set_path(&path, value)?;
    Ok(root)
}

impl Node {
    /// In-place form of [`set_property`].
    ///
    /// Intermediate slots that do not exist yet are filled with a container
    /// chosen by the token that follows: an index makes an array, a key an
    /// object. Writing past the end of an array leaves `Absent` holes.
    pub fn set_path(&mut self, path: &Path, value: Node) -> Result<()> {
        let Some((last, parents)) = path.split_last() else {
            *self = value;
            return Ok(());
        };
        if self.is_nullish() {
            *self = container_for(&path[0]);
        }

        let mut current = self;
        for (cursor, token) in parents.iter().enumerate() {
            let next = &path[cursor + 1];
            let child = slot_mut(current, token, path, cursor)?;
            if child.is_absent() {
                *child = container_for(next);
            } else if !fits(child, next) {
                return Err(mismatch(path, cursor + 1, child, next));
            }
            current = child;
        }
        *slot_mut(current, last, path, parents.len())? = value;
        Ok(())
    }
}

fn container_for(token: &Token) -> Node {
    match token {
        Token::Index(_) => Node::Array(Vec::new()),
        Token::Key(_) => Node::Object(Object::new()),
    }
}

fn fits(node: &Node, token: &Token) -> bool {
    matches!(
        (node, token),
        (Node::Array(_), Token::Index(_)) | (Node::Object(_), Token::Key(_))
    )
}

/// The slot `token` names inside `node`, created as `Absent` if missing.
fn slot_mut<'a>(
    node: &'a mut Node,
    token: &Token,
    path: &Path,
    depth: usize,
) -> Result<&'a mut Node> {
    match (node, token) {
        (Node::Object(obj), Token::Key(key)) => {
            Ok(obj.entry(key.to_string()).or_insert(Node::Absent))
        }
        (Node::Array(arr), Token::Index(index)) => {
            let index = *index;
            if index >= arr.len() {
                let len = index
                    .checked_add(1)
                    .filter(|len| *len <= MAX_ARRAY_INDEX + 1)
                    .ok_or_else(|| out_of_range(path, depth, index))?;
                arr.resize(len, Node::Absent);
            }
            Ok(&mut arr[index])
        }
        (other, token) => Err(mismatch(path, depth, other, token)),
    }
}

fn out_of_range(path: &Path, depth: usize, index: usize) -> Error {
    Error::index_range(format!(
        "index {index} at '{}' exceeds the maximum of {MAX_ARRAY_INDEX}",
        format_path(&path[..=depth])
    ))
    .with_path(format_path(path))
}

fn mismatch(path: &Path, depth: usize, found: &Node, token: &Token) -> Error {
    let expected = if token.is_index() { "array" } else { "object" };
    let prefix = format_path(&path[..depth]);
    let at = if prefix.is_empty() {
        "root".to_string()
    } else {
        format!("'{prefix}'")
    };
    Error::type_mismatch(format!(
        "expected {expected} at {at} to apply '{token}', found {}",
        found.type_name()
    ))
    .with_path(format_path(path))
}
