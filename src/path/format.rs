use serde_json::Value;

use super::{Token, TokenBuf};
use crate::{Error, Result};

/// Writes tokens in canonical form: `.` before every key that is not first,
/// `[n]` for every index.
///
/// A leading index is written as-is (`[0].a`), which is how the elements of
/// a root array are named when flattening.
pub fn format_path(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.len() * 8);
    write_path(&mut out, tokens);
    out
}

/// Like [`format_path`] but refuses a leading index.
pub fn format_path_strict(tokens: &[Token]) -> Result<String> {
    if let Some(Token::Index(index)) = tokens.first() {
        return Err(Error::argument_type(format!(
            "first path segment must be a key, found index {index}"
        )));
    }
    Ok(format_path(tokens))
}

/// Builds a path expression from a leading key and any number of further
/// segments.
///
/// ```
/// use propath::{create_property_name, Token};
///
/// let name = create_property_name("friends", &[Token::Index(1), Token::key("name")]);
/// assert_eq!(name, "friends[1].name");
/// ```
pub fn create_property_name(first: &str, rest: &[Token]) -> String {
    let mut out = String::with_capacity(first.len() + rest.len() * 8);
    out.push_str(first);
    let mut buf = itoa::Buffer::new();
    for token in rest {
        write_token(&mut out, token, true, &mut buf);
    }
    out
}

/// Builds a path expression from loosely typed JSON segments.
///
/// Each segment must be a string or a non-negative integer and the first
/// must be a string; anything else is an `ArgumentType` error.
pub fn create_property_name_from_values(segments: &[Value]) -> Result<String> {
    let tokens = segments
        .iter()
        .map(Token::try_from)
        .collect::<Result<TokenBuf>>()?;
    format_path_strict(&tokens)
}

pub(crate) fn write_path(out: &mut String, tokens: &[Token]) {
    let mut buf = itoa::Buffer::new();
    for (idx, token) in tokens.iter().enumerate() {
        write_token(out, token, idx > 0, &mut buf);
    }
}

fn write_token(out: &mut String, token: &Token, has_prev: bool, buf: &mut itoa::Buffer) {
    match token {
        Token::Key(name) => {
            if has_prev {
                out.push('.');
            }
            out.push_str(name);
        }
        Token::Index(index) => {
            out.push('[');
            out.push_str(buf.format(*index));
            out.push(']');
        }
    }
}
