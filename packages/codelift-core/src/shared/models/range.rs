//! Source location types
//!
//! Line-oriented ranges over source files. Lines are 1-based and inclusive;
//! columns are optional 0-based byte offsets into the line.

use serde::{Deserialize, Serialize};

/// Range in source code.
///
/// The `(0, 0)` range is the miss sentinel returned by `locate`-style fast
/// paths; every extracted element carries a range with `start_line >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: Option<u32>,
    pub end_column: Option<u32>,
}

impl Range {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
            start_column: None,
            end_column: None,
        }
    }

    pub fn with_columns(mut self, start_column: u32, end_column: u32) -> Self {
        self.start_column = Some(start_column);
        self.end_column = Some(end_column);
        self
    }

    /// Miss sentinel (0:0-0:0).
    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.start_line == 0 && self.end_line == 0
    }

    /// A range is well-formed when `1 <= start_line <= end_line`.
    pub fn is_valid(&self) -> bool {
        self.start_line >= 1 && self.start_line <= self.end_line
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    pub fn contains(&self, other: &Range) -> bool {
        self.start_line <= other.start_line && other.end_line <= self.end_line
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.start_line <= other.end_line && other.start_line <= self.end_line
    }

    pub fn line_count(&self) -> u32 {
        if self.end_line >= self.start_line {
            self.end_line - self.start_line + 1
        } else {
            0
        }
    }

    /// Smallest range covering both.
    pub fn span_with(&self, other: &Range) -> Range {
        let mut merged = Range::new(
            self.start_line.min(other.start_line),
            self.end_line.max(other.end_line),
        );
        merged.start_column = if self.start_line <= other.start_line {
            self.start_column
        } else {
            other.start_column
        };
        merged.end_column = if self.end_line >= other.end_line {
            self.end_column
        } else {
            other.end_column
        };
        merged
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::zero()
    }
}

/// Wire form: `{start: {line, column}, end: {line, column}}`.
#[derive(Serialize, Deserialize)]
struct Endpoint {
    line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct RangeRepr {
    start: Endpoint,
    end: Endpoint,
}

impl Serialize for Range {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RangeRepr {
            start: Endpoint {
                line: self.start_line,
                column: self.start_column,
            },
            end: Endpoint {
                line: self.end_line,
                column: self.end_column,
            },
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RangeRepr::deserialize(deserializer)?;
        Ok(Range {
            start_line: repr.start.line,
            end_line: repr.end.line,
            start_column: repr.start.column,
            end_column: repr.end.column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_line() {
        let range = Range::new(10, 20);
        assert!(range.contains_line(10));
        assert!(range.contains_line(15));
        assert!(range.contains_line(20));
        assert!(!range.contains_line(9));
        assert!(!range.contains_line(21));
    }

    #[test]
    fn test_containment_and_overlap() {
        let outer = Range::new(1, 10);
        let inner = Range::new(3, 7);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.overlaps(&inner));
        assert!(!Range::new(1, 2).overlaps(&Range::new(3, 4)));
    }

    #[test]
    fn test_span_with() {
        let merged = Range::new(5, 6).span_with(&Range::new(1, 3));
        assert_eq!(merged, Range::new(1, 6));
    }

    #[test]
    fn test_zero_is_invalid() {
        assert!(Range::zero().is_zero());
        assert!(!Range::zero().is_valid());
        assert!(Range::new(1, 1).is_valid());
        assert!(!Range::new(4, 2).is_valid());
    }

    #[test]
    fn test_serialized_shape() {
        let range = Range::new(2, 5).with_columns(0, 10);
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(json["start"]["line"], 2);
        assert_eq!(json["end"]["column"], 10);
        let back: Range = serde_json::from_value(json).unwrap();
        assert_eq!(back, range);
    }
}
