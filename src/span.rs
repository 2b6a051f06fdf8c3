//! Source location carried through from whatever front end builds the AST.

use std::fmt;

/// A single point or short range in the original source text.
///
/// The core never computes spans itself — lexing and parsing are external
/// collaborators — it only stores and forwards whatever span the caller
/// attached when constructing an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SourceSpan {
    pub line: u32,
    pub column: u32,
}

impl SourceSpan {
    pub const fn new(line: u32, column: u32) -> Self {
        SourceSpan { line, column }
    }

    /// A placeholder span for synthetic nodes that do not originate from source text.
    pub const fn synthetic() -> Self {
        SourceSpan { line: 0, column: 0 }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
