use memchr::memchr3;
use smol_str::SmolStr;

use super::{Path, Token, TokenBuf};
use crate::{Error, ParseOptions, Result};

/// The most recently seen delimiter. A plain character resets it to `None`,
/// except inside brackets where only digits are legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delim {
    None,
    Dot,
    Open,
    Close,
}

/// Tokenizes leniently: `""` is the root and `[0]` may lead.
pub fn tokenize(expr: &str) -> Result<Path> {
    tokenize_with_options(expr, &ParseOptions::lenient())
}

pub fn tokenize_with_options(expr: &str, options: &ParseOptions) -> Result<Path> {
    let path = Path::from(scan_tokens(expr)?);
    if options.strict {
        check_strict(&path).map_err(|err| err.with_path(expr))?;
    }
    Ok(path)
}

pub(crate) fn check_strict(path: &Path) -> Result<()> {
    match path.first() {
        None => Err(Error::syntax("empty path")),
        Some(Token::Index(_)) => Err(Error::syntax("path cannot start with an array index")),
        Some(Token::Key(_)) => Ok(()),
    }
}

fn scan_tokens(expr: &str) -> Result<TokenBuf> {
    let mut tokens = TokenBuf::new();
    if expr.is_empty() {
        return Ok(tokens);
    }
    let bytes = expr.as_bytes();
    if memchr3(b'.', b'[', b']', bytes).is_none() {
        tokens.push(Token::Key(SmolStr::new(expr)));
        return Ok(tokens);
    }

    // Delimiters are ASCII, so byte offsets always fall on char boundaries.
    let mut prev = Delim::None;
    let mut start = 0;
    for (idx, &byte) in bytes.iter().enumerate() {
        match byte {
            b'.' => {
                match prev {
                    Delim::Close => {}
                    Delim::Open => return Err(syntax(expr, idx, "unexpected '.' inside index")),
                    Delim::None | Delim::Dot => {
                        if start == idx {
                            return Err(syntax(expr, idx, "unexpected '.' character"));
                        }
                        tokens.push(Token::Key(SmolStr::new(&expr[start..idx])));
                    }
                }
                prev = Delim::Dot;
                start = idx + 1;
            }
            b'[' => {
                // `a[0][1]` chains indices; `a.[0]` and `a[[0]` do not parse.
                if !matches!(prev, Delim::None | Delim::Close) {
                    return Err(syntax(expr, idx, "unexpected '[' character"));
                }
                if start < idx {
                    tokens.push(Token::Key(SmolStr::new(&expr[start..idx])));
                }
                prev = Delim::Open;
                start = idx + 1;
            }
            b']' => {
                if prev != Delim::Open {
                    return Err(syntax(expr, idx, "unexpected ']' character"));
                }
                tokens.push(Token::Index(parse_index(expr, start, idx)?));
                prev = Delim::Close;
                start = idx + 1;
            }
            _ => match prev {
                Delim::Close => return Err(syntax(expr, idx, "expected '.' after ']'")),
                Delim::Open => {
                    if !byte.is_ascii_digit() {
                        return Err(syntax(expr, idx, "invalid array index"));
                    }
                }
                Delim::None | Delim::Dot => prev = Delim::None,
            },
        }
    }

    match prev {
        Delim::Open => Err(syntax(expr, bytes.len(), "unterminated array index")),
        Delim::Dot => Err(syntax(expr, bytes.len(), "path cannot end with '.'")),
        Delim::Close => Ok(tokens),
        Delim::None => {
            tokens.push(Token::Key(SmolStr::new(&expr[start..])));
            Ok(tokens)
        }
    }
}

fn parse_index(expr: &str, start: usize, end: usize) -> Result<usize> {
    let digits = &expr[start..end];
    if digits.is_empty() {
        return Err(syntax(expr, end, "empty array index"));
    }
    digits
        .parse::<usize>()
        .map_err(|_| syntax(expr, start, "array index out of range"))
}

fn syntax(expr: &str, offset: usize, reason: &str) -> Error {
    Error::syntax(format!("invalid path '{expr}': {reason} at offset {offset}"))
        .with_path(expr)
        .with_location(offset)
}
