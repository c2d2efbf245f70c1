use std::fmt;

/// A source location surrogate carried by semantic nodes and, transitively,
/// by the relational nodes and diagnostics built from them.
///
/// The real front-end hands us these triples already resolved; we never
/// re-derive them from a file.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct SourceLoc {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// A location used for synthesized nodes that have no C++ counterpart
    /// (e.g. a container table derived from a composite member chain).
    pub fn synthetic() -> Self {
        Self::default()
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
