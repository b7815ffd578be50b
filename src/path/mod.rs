//! Path expressions such as `a.b[2].c` and their token form.

pub mod format;
pub mod scan;

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use memchr::memchr3;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::{Error, ParseOptions, Result};

pub use format::{
    create_property_name, create_property_name_from_values, format_path, format_path_strict,
};
pub use scan::{tokenize, tokenize_with_options};

pub(crate) type TokenBuf = SmallVec<[Token; 8]>;

/// One segment of a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Key(SmolStr),
    Index(usize),
}

impl Token {
    pub fn key(name: impl Into<SmolStr>) -> Self {
        Token::Key(name.into())
    }

    pub const fn index(index: usize) -> Self {
        Token::Index(index)
    }

    pub const fn is_key(&self) -> bool {
        matches!(self, Token::Key(_))
    }

    pub const fn is_index(&self) -> bool {
        matches!(self, Token::Index(_))
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Token::Key(name) => Some(name),
            Token::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Token::Index(index) => Some(*index),
            Token::Key(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Key(name) => f.write_str(name),
            Token::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Token::Key(SmolStr::new(name))
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Token::Key(SmolStr::from(name))
    }
}

impl From<SmolStr> for Token {
    fn from(name: SmolStr) -> Self {
        Token::Key(name)
    }
}

impl From<usize> for Token {
    fn from(index: usize) -> Self {
        Token::Index(index)
    }
}

impl TryFrom<i64> for Token {
    type Error = Error;

    fn try_from(index: i64) -> Result<Self> {
        usize::try_from(index)
            .map(Token::Index)
            .map_err(|_| Error::argument_type(format!("invalid array index: {index}")))
    }
}

impl TryFrom<&Value> for Token {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Token::from(name.as_str())),
            Value::Number(number) => {
                if let Some(index) = number.as_u64() {
                    usize::try_from(index)
                        .map(Token::Index)
                        .map_err(|_| Error::argument_type(format!("invalid array index: {index}")))
                } else if let Some(index) = number.as_i64() {
                    Token::try_from(index)
                } else {
                    Err(Error::argument_type(format!(
                        "invalid argument type: non-integer number {number}"
                    )))
                }
            }
            other => Err(Error::argument_type(format!(
                "invalid argument type: {}",
                json_type_name(other)
            ))),
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Token::Key(name) => serializer.serialize_str(name),
            Token::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An ordered token sequence. The empty path names the root value.
///
/// A parsed `Path` can be reused for any number of reads and writes; the
/// accessors walk it with a cursor and never consume it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    tokens: TokenBuf,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses with [`ParseOptions::default`], i.e. strictly.
    pub fn parse(expr: &str) -> Result<Self> {
        tokenize_with_options(expr, &ParseOptions::default())
    }

    pub fn parse_with_options(expr: &str, options: &ParseOptions) -> Result<Self> {
        tokenize_with_options(expr, options)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn push_key(&mut self, name: impl Into<SmolStr>) {
        self.tokens.push(Token::Key(name.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.tokens.push(Token::Index(index));
    }

    pub fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    /// The path one level up, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.tokens.split_last()?;
        Some(Path::from(init))
    }

    /// Checks a hand-built token sequence against the path grammar.
    pub fn validate(&self, options: &ParseOptions) -> Result<()> {
        for token in &self.tokens {
            if let Token::Key(name) = token {
                if name.is_empty() {
                    return Err(Error::syntax("path contains an empty key"));
                }
                if memchr3(b'.', b'[', b']', name.as_bytes()).is_some() {
                    return Err(Error::syntax(format!(
                        "key '{name}' contains a path delimiter"
                    )));
                }
            }
        }
        if options.strict {
            scan::check_strict(self)?;
        }
        Ok(())
    }
}

impl Deref for Path {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_path(&self.tokens))
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(expr: &str) -> Result<Self> {
        Path::parse(expr)
    }
}

impl From<TokenBuf> for Path {
    fn from(tokens: TokenBuf) -> Self {
        Self { tokens }
    }
}

impl From<&[Token]> for Path {
    fn from(tokens: &[Token]) -> Self {
        Self {
            tokens: SmallVec::from(tokens),
        }
    }
}

impl From<Vec<Token>> for Path {
    fn from(tokens: Vec<Token>) -> Self {
        Self {
            tokens: SmallVec::from_vec(tokens),
        }
    }
}

impl FromIterator<Token> for Path {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.tokens.len()))?;
        for token in &self.tokens {
            seq.serialize_element(token)?;
        }
        seq.end()
    }
}

/// Anything that can name a location in a document.
///
/// Strings are tokenized leniently; an already-tokenized [`Path`] passes
/// through untouched.
pub trait AsPath {
    fn as_path(&self) -> Result<Cow<'_, Path>>;
}

impl AsPath for str {
    fn as_path(&self) -> Result<Cow<'_, Path>> {
        tokenize(self).map(Cow::Owned)
    }
}

impl AsPath for String {
    fn as_path(&self) -> Result<Cow<'_, Path>> {
        self.as_str().as_path()
    }
}

impl AsPath for Path {
    fn as_path(&self) -> Result<Cow<'_, Path>> {
        Ok(Cow::Borrowed(self))
    }
}

impl AsPath for [Token] {
    fn as_path(&self) -> Result<Cow<'_, Path>> {
        Ok(Cow::Owned(Path::from(self)))
    }
}

impl AsPath for Vec<Token> {
    fn as_path(&self) -> Result<Cow<'_, Path>> {
        self.as_slice().as_path()
    }
}

impl<T: AsPath + ?Sized> AsPath for &T {
    fn as_path(&self) -> Result<Cow<'_, Path>> {
        (**self).as_path()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    fn test_token_accessors() {
        let key = Token::key("name");
        assert!(key.is_key());
        assert_eq!(key.as_key(), Some("name"));
        assert_eq!(key.as_index(), None);

        let index = Token::index(3);
        assert!(index.is_index());
        assert_eq!(index.as_index(), Some(3));
        assert_eq!(index.to_string(), "[3]");
    }

    #[rstest::rstest]
    fn test_token_from_json_value() {
        assert_eq!(Token::try_from(&json!("a")).unwrap(), Token::key("a"));
        assert_eq!(Token::try_from(&json!(7)).unwrap(), Token::Index(7));

        for bad in [json!(-1), json!(1.5), json!(true), json!(null), json!([0])] {
            let err = Token::try_from(&bad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::ArgumentType, "{bad}");
        }
    }

    #[rstest::rstest]
    fn test_path_push_pop_and_parent() {
        let mut path = Path::new();
        assert!(path.is_root());
        path.push_key("a");
        path.push_index(2);
        path.push_key("c");
        assert_eq!(path.to_string(), "a[2].c");
        assert_eq!(path.parent().unwrap().to_string(), "a[2]");
        assert_eq!(path.pop(), Some(Token::key("c")));
        assert_eq!(path.len(), 2);
        assert!(Path::new().parent().is_none());
    }

    #[rstest::rstest]
    fn test_validate_hand_built_tokens() {
        let lenient = ParseOptions::lenient();
        let strict = ParseOptions::default();

        let leading_index = Path::from(vec![Token::Index(0), Token::key("a")]);
        assert!(leading_index.validate(&lenient).is_ok());
        assert!(leading_index.validate(&strict).is_err());

        assert!(Path::new().validate(&lenient).is_ok());
        assert!(Path::new().validate(&strict).is_err());

        let dotted = Path::from(vec![Token::key("a.b")]);
        assert!(dotted.validate(&lenient).unwrap_err().is_syntax());

        let empty_key = Path::from(vec![Token::key("")]);
        assert!(empty_key.validate(&lenient).is_err());
    }

    #[rstest::rstest]
    fn test_as_path_borrows_parsed_paths() {
        let parsed: Path = "a.b".parse().unwrap();
        assert!(matches!(parsed.as_path().unwrap(), Cow::Borrowed(_)));
        assert_eq!(*"a.b".as_path().unwrap(), parsed);
    }

    #[rstest::rstest]
    fn test_path_serializes_as_token_array() {
        let path: Path = "a[1].b".parse().unwrap();
        assert_eq!(serde_json::to_value(&path).unwrap(), json!(["a", 1, "b"]));
    }
}
