/// Controls how path expressions are tokenized.
///
/// Strict parsing rejects the empty path and paths that start with an
/// index (`[0].a`). Lenient parsing accepts both: the empty path names the
/// root value and a leading index addresses a root array. Reads and writes
/// parse leniently; [`crate::parse_property_name`] parses strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub strict: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Remove holes left in arrays by sparse indices.
    pub compact_arrays: bool,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compact_arrays(mut self, compact_arrays: bool) -> Self {
        self.compact_arrays = compact_arrays;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            compact_arrays: true,
        }
    }
}
