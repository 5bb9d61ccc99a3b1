//! Syntax Tree Navigator
//!
//! Wraps the tree-sitter query engine so the extraction layer never touches
//! cursor objects directly. Handles capture grouping, node text and range
//! accessors, ancestor walks, and the `locate` fast path.

mod navigator;

pub use navigator::{MatchRecord, SyntaxNavigator};

/// Verbatim slice of whole source lines, 1-based inclusive.
pub fn slice_lines(source: &str, start_line: u32, end_line: u32) -> String {
    navigator::slice_lines_bytes(source.as_bytes(), start_line, end_line)
}
