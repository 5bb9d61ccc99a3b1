//! Query execution and node accessors over a parsed tree.

use tree_sitter::{Language, Node, Query, QueryCursor};

use crate::shared::models::{CodeliftError, Range, Result};

/// One query match: capture name -> node.
///
/// Records are small (a handful of captures), so a vec beats a map here.
#[derive(Debug, Clone)]
pub struct MatchRecord<'t> {
    captures: Vec<(String, Node<'t>)>,
}

impl<'t> MatchRecord<'t> {
    pub fn get(&self, name: &str) -> Option<Node<'t>> {
        self.captures
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| *node)
    }

    pub fn captures(&self) -> impl Iterator<Item = (&str, Node<'t>)> + '_ {
        self.captures.iter().map(|(n, node)| (n.as_str(), *node))
    }
}

/// Navigator over one parsed source buffer.
pub struct SyntaxNavigator<'s> {
    language: Language,
    source: &'s [u8],
}

impl<'s> SyntaxNavigator<'s> {
    pub fn new(language: Language, source: &'s [u8]) -> Self {
        Self { language, source }
    }

    pub fn source(&self) -> &'s [u8] {
        self.source
    }

    /// Compile and run a query, grouping captures into match records.
    ///
    /// Grouping regimes:
    /// - flat (one active capture name): one record per node;
    /// - hierarchical (several names): when any capture collected more than
    ///   one node, every capture list is sorted by start position and
    ///   records pair nodes by index up to the longest list; otherwise a
    ///   single record holds the first node of each capture.
    pub fn execute_query<'t>(
        &self,
        root: Node<'t>,
        query_text: &str,
    ) -> Result<Vec<MatchRecord<'t>>> {
        let query = Query::new(&self.language, query_text)
            .map_err(|e| CodeliftError::bad_query(format!("{e}")))?;
        let capture_names: Vec<String> =
            query.capture_names().iter().map(|n| n.to_string()).collect();

        let mut by_capture: Vec<Vec<Node<'t>>> = vec![Vec::new(); capture_names.len()];
        let mut cursor = QueryCursor::new();
        for m in cursor.matches(&query, root, self.source) {
            for capture in m.captures {
                by_capture[capture.index as usize].push(capture.node);
            }
        }

        let active: Vec<usize> = (0..capture_names.len())
            .filter(|&i| !by_capture[i].is_empty())
            .collect();

        if active.is_empty() {
            return Ok(Vec::new());
        }

        if active.len() == 1 {
            let idx = active[0];
            let name = &capture_names[idx];
            return Ok(by_capture[idx]
                .iter()
                .map(|node| MatchRecord {
                    captures: vec![(name.clone(), *node)],
                })
                .collect());
        }

        let multi = active.iter().any(|&i| by_capture[i].len() > 1);
        if !multi {
            let captures = active
                .iter()
                .map(|&i| (capture_names[i].clone(), by_capture[i][0]))
                .collect();
            return Ok(vec![MatchRecord { captures }]);
        }

        for &i in &active {
            by_capture[i].sort_by_key(|n| n.start_byte());
        }
        let max_len = active.iter().map(|&i| by_capture[i].len()).max().unwrap_or(0);
        let mut records = Vec::with_capacity(max_len);
        for row in 0..max_len {
            let captures: Vec<(String, Node<'t>)> = active
                .iter()
                .filter(|&&i| row < by_capture[i].len())
                .map(|&i| (capture_names[i].clone(), by_capture[i][row]))
                .collect();
            records.push(MatchRecord { captures });
        }
        Ok(records)
    }

    /// Exact byte slice of a node; empty on invalid UTF-8.
    pub fn node_text(&self, node: Node) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    /// 1-based inclusive line range with byte columns.
    pub fn node_range(node: Node) -> Range {
        Range::new(
            node.start_position().row as u32 + 1,
            node.end_position().row as u32 + 1,
        )
        .with_columns(
            node.start_position().column as u32,
            node.end_position().column as u32,
        )
    }

    pub fn child_by_field<'t>(node: Node<'t>, field_name: &str) -> Option<Node<'t>> {
        node.child_by_field_name(field_name)
    }

    /// First ancestor whose kind is in `kinds`.
    pub fn ancestor_of_kinds<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
        let mut current = node.parent();
        while let Some(ancestor) = current {
            if kinds.contains(&ancestor.kind()) {
                return Some(ancestor);
            }
            current = ancestor.parent();
        }
        None
    }

    /// Fast-path location: run a kind-specific template with inlined
    /// equality predicates; the earliest `@target` capture wins.
    ///
    /// Returns the `(0, 0)` sentinel on any miss, including query errors.
    pub fn locate(&self, root: Node, query_text: &str) -> Range {
        let records = match self.execute_query(root, query_text) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "locate query failed");
                return Range::zero();
            }
        };
        records
            .iter()
            .filter_map(|r| r.get("target"))
            .map(Self::node_range)
            .min_by_key(|r| (r.start_line, r.end_line))
            .unwrap_or_else(Range::zero)
    }

    /// Verbatim slice of whole source lines, 1-based inclusive, without the
    /// trailing newline.
    pub fn slice_lines(&self, start_line: u32, end_line: u32) -> String {
        slice_lines_bytes(self.source, start_line, end_line)
    }
}

/// Line slice helper shared with the post-processors.
pub(crate) fn slice_lines_bytes(source: &[u8], start_line: u32, end_line: u32) -> String {
    if start_line == 0 || end_line < start_line {
        return String::new();
    }
    let text = String::from_utf8_lossy(source);
    let mut lines = Vec::new();
    for (idx, line) in text.split('\n').enumerate() {
        let line_no = idx as u32 + 1;
        if line_no > end_line {
            break;
        }
        if line_no >= start_line {
            lines.push(line);
        }
    }
    lines.join("\n")
}
