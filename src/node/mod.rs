mod serde;

use std::{fmt, ops::Index};

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::path::{Path, Token};

pub type Object = IndexMap<String, Node>;

static ABSENT: Node = Node::Absent;

/// A document tree.
///
/// `Absent` marks a slot that was never written, typically an array hole left
/// by a sparse write such as `a[8]` into an empty array. It is not a value:
/// flattening skips it and compaction removes it from arrays.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Node {
    Absent,
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Node>),
    Object(Object),
}

impl Node {
    pub const fn is_absent(&self) -> bool {
        matches!(self, Node::Absent)
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// `Absent` and `Null` are both "nothing here" to a writer.
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Node::Absent | Node::Null)
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub const fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub const fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }

    pub const fn is_scalar(&self) -> bool {
        matches!(self, Node::Bool(_) | Node::Number(_) | Node::String(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Node::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Node::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The child at `token`, or `None` when this is not a container of the
    /// matching kind or the slot is missing or a hole.
    pub fn child(&self, token: &Token) -> Option<&Node> {
        let child = match (self, token) {
            (Node::Object(obj), Token::Key(key)) => obj.get(key.as_str()),
            (Node::Array(arr), Token::Index(index)) => arr.get(*index),
            _ => None,
        }?;
        (!child.is_absent()).then_some(child)
    }

    pub fn child_mut(&mut self, token: &Token) -> Option<&mut Node> {
        let child = match (self, token) {
            (Node::Object(obj), Token::Key(key)) => obj.get_mut(key.as_str()),
            (Node::Array(arr), Token::Index(index)) => arr.get_mut(*index),
            _ => None,
        }?;
        (!child.is_absent()).then_some(child)
    }

    /// Walks `path` and returns the node it names, if every step exists.
    pub fn pointer(&self, path: &Path) -> Option<&Node> {
        let mut current = self;
        for token in path {
            current = current.child(token)?;
        }
        (!current.is_absent()).then_some(current)
    }

    pub fn pointer_mut(&mut self, path: &Path) -> Option<&mut Node> {
        let mut current = self;
        for token in path {
            current = current.child_mut(token)?;
        }
        (!current.is_absent()).then_some(current)
    }

    pub fn take(&mut self) -> Node {
        std::mem::replace(self, Node::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Absent => "absent",
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Missing keys, out-of-range indices and mismatched containers all index to
/// `Node::Absent` rather than panicking.
impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Node::Array(arr) => arr.get(index).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Self::Output {
        match self {
            Node::Object(obj) => obj.get(key).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(arr) => Node::Array(arr.into_iter().map(Node::from).collect()),
            Value::Object(obj) => Node::Object(
                obj.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}

/// Holes become `null` inside arrays and disappear from objects, the way a
/// sparse array serializes to JSON.
impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Absent | Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Number(n) => Value::Number(n),
            Node::String(s) => Value::String(s),
            Node::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            Node::Object(obj) => Value::Object(
                obj.into_iter()
                    .filter(|(_, value)| !value.is_absent())
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        node.clone().into()
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Number(Number::from(n))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(Number::from(n))
    }
}

impl From<u64> for Node {
    fn from(n: u64) -> Self {
        Node::Number(Number::from(n))
    }
}

impl From<usize> for Node {
    fn from(n: usize) -> Self {
        Node::Number(Number::from(n))
    }
}

/// Non-finite floats have no JSON form and become `null`.
impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Node::Number).unwrap_or(Node::Null)
    }
}

impl From<Vec<Node>> for Node {
    fn from(arr: Vec<Node>) -> Self {
        Node::Array(arr)
    }
}

impl From<Object> for Node {
    fn from(obj: Object) -> Self {
        Node::Object(obj)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Node::Null)
    }
}
