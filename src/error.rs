use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed path expression.
    Syntax,
    /// A write found an object where an array was needed, or the reverse.
    TypeMismatch,
    /// A path segment of the wrong type was handed to a name constructor.
    ArgumentType,
    /// A write named an array index beyond the supported maximum.
    IndexRange,
    Serialize,
    Deserialize,
}

/// Byte offset into the path expression that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub path: Option<String>,
    pub location: Option<Location>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
            location: None,
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, message)
    }

    pub fn argument_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArgumentType, message)
    }

    pub fn index_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IndexRange, message)
    }

    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialize, message)
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Deserialize, message)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_location(mut self, offset: usize) -> Self {
        self.location = Some(Location { offset });
        self
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ErrorKind::Syntax
    }

    pub fn is_type_mismatch(&self) -> bool {
        self.kind == ErrorKind::TypeMismatch
    }

    pub fn is_index_range(&self) -> bool {
        self.kind == ErrorKind::IndexRange
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_constructors_set_kind() {
        assert_eq!(Error::syntax("x").kind, ErrorKind::Syntax);
        assert_eq!(Error::type_mismatch("x").kind, ErrorKind::TypeMismatch);
        assert_eq!(Error::argument_type("x").kind, ErrorKind::ArgumentType);
        assert_eq!(Error::index_range("x").kind, ErrorKind::IndexRange);
        assert_eq!(Error::serialize("x").kind, ErrorKind::Serialize);
        assert_eq!(Error::deserialize("x").kind, ErrorKind::Deserialize);
    }

    #[rstest::rstest]
    fn test_display_is_message_only() {
        let err = Error::syntax("unexpected '.'")
            .with_path("a..b")
            .with_location(2);
        assert_eq!(err.to_string(), "unexpected '.'");
        assert_eq!(err.path.as_deref(), Some("a..b"));
        assert_eq!(err.location, Some(Location { offset: 2 }));
    }
}
