use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a code reference was recorded in the source tree.
///
/// Line and column are **1-based**, matching what editors display. The file is
/// kept as the full path the indexer reported (not a file node id) so it can be
/// handed straight to an external editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourceReference {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceReference {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(42).to_string(), "42");
    }

    #[test]
    fn test_source_reference_display() {
        let reference = SourceReference::new("src/main.rs", 12, 5);
        assert_eq!(reference.to_string(), "src/main.rs:12:5");
    }

    #[test]
    fn test_source_reference_serde() {
        let reference = SourceReference::new("lib/parser.py", 3, 1);
        let json = serde_json::to_string(&reference).unwrap();
        let back: SourceReference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reference);
    }
}
