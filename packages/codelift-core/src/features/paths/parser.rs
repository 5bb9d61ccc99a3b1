//! Path expression grammar.
//!
//! ```text
//! path     := segment ('.' segment)*
//! segment  := name? qualifier? qualifier?
//! qualifier:= '[' WORD ']'
//! ```
//!
//! `WORD` is an element kind, the relaxed `property` group, or a part name.
//! The reserved leading segment `FILE` denotes the file root and is injected
//! when absent.

use crate::shared::models::ElementKind;

pub const ROOT_SEGMENT: &str = "FILE";

/// Part names: projections of an element's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPart {
    All,
    Def,
    Body,
    Decorators,
    Comments,
    Doc,
    Signature,
}

impl PathPart {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(PathPart::All),
            "def" => Some(PathPart::Def),
            "body" => Some(PathPart::Body),
            "decorators" => Some(PathPart::Decorators),
            "comments" => Some(PathPart::Comments),
            "doc" => Some(PathPart::Doc),
            "signature" => Some(PathPart::Signature),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathPart::All => "all",
            PathPart::Def => "def",
            PathPart::Body => "body",
            PathPart::Decorators => "decorators",
            PathPart::Comments => "comments",
            PathPart::Doc => "doc",
            PathPart::Signature => "signature",
        }
    }
}

/// Kind qualifier inside a segment. `property` is a relaxed group, not an
/// element kind of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindQualifier {
    Kind(ElementKind),
    Property,
}

impl KindQualifier {
    pub fn parse(s: &str) -> Option<Self> {
        if s == "property" {
            return Some(KindQualifier::Property);
        }
        ElementKind::parse(s).map(KindQualifier::Kind)
    }

    /// Relaxed kind matching: `property` accepts every property-shaped
    /// kind, `method` accepts accessors too, specific accessor kinds match
    /// only themselves.
    pub fn accepts(&self, kind: ElementKind) -> bool {
        match self {
            KindQualifier::Property => matches!(
                kind,
                ElementKind::PropertyGetter
                    | ElementKind::PropertySetter
                    | ElementKind::PropertyField
                    | ElementKind::StaticField
            ),
            KindQualifier::Kind(ElementKind::Method) => matches!(
                kind,
                ElementKind::Method | ElementKind::PropertyGetter | ElementKind::PropertySetter
            ),
            KindQualifier::Kind(expected) => kind == *expected,
        }
    }

    /// Whether an element of `kind` is an exact (not relaxed) match.
    pub fn is_exact(&self, kind: ElementKind) -> bool {
        matches!(self, KindQualifier::Kind(expected) if *expected == kind)
    }
}

/// One segment of a parsed path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSegment {
    pub name: Option<String>,
    pub kind: Option<KindQualifier>,
    pub part: Option<PathPart>,
}

impl PathSegment {
    pub fn file() -> Self {
        Self {
            name: None,
            kind: Some(KindQualifier::Kind(ElementKind::File)),
            part: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == Some(KindQualifier::Kind(ElementKind::File))
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_some() || self.kind.is_some() || self.part.is_some()
    }
}

/// Prefix with `FILE.` unless already rooted or starting with a bare
/// qualifier segment.
pub fn ensure_file_prefix(path: &str) -> String {
    let root_prefix = format!("{ROOT_SEGMENT}.");
    if path.starts_with(&root_prefix) || path == ROOT_SEGMENT || path.starts_with('[') {
        path.to_string()
    } else {
        format!("{root_prefix}{path}")
    }
}

/// Parse a path into segments, inferring kinds for unqualified segments.
/// Malformed segments are warned about and skipped, never fatal.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    if path.is_empty() {
        return Vec::new();
    }
    let mut segments = Vec::new();
    let mut is_first = true;
    for part in path.split('.') {
        if part.is_empty() {
            tracing::warn!(path, "skipping empty segment");
            is_first = false;
            continue;
        }
        if is_first && part == ROOT_SEGMENT {
            segments.push(PathSegment::file());
            is_first = false;
            continue;
        }
        is_first = false;

        let Some((name, qualifiers)) = scan_segment(part) else {
            tracing::warn!(segment = part, "invalid segment format, skipping");
            continue;
        };
        let mut segment = PathSegment {
            name,
            ..Default::default()
        };
        for qualifier in qualifiers {
            assign_qualifier(&mut segment, &qualifier, part);
        }
        if segment.is_valid() {
            segments.push(segment);
        } else {
            tracing::warn!(segment = part, "segment yields nothing, skipping");
        }
    }
    infer_kinds(&mut segments);
    segments
}

/// Split a segment into its name and bracketed qualifier words.
fn scan_segment(part: &str) -> Option<(Option<String>, Vec<String>)> {
    let bracket = part.find('[').unwrap_or(part.len());
    let name = &part[..bracket];
    if name.contains(']') {
        return None;
    }
    let mut qualifiers = Vec::new();
    let mut rest = &part[bracket..];
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return None;
        }
        let close = rest.find(']')?;
        let inner = &rest[1..close];
        if inner.is_empty() || inner.contains('[') {
            return None;
        }
        qualifiers.push(inner.to_string());
        rest = &rest[close + 1..];
    }
    if qualifiers.len() > 2 {
        return None;
    }
    let name = if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    };
    Some((name, qualifiers))
}

fn assign_qualifier(segment: &mut PathSegment, qualifier: &str, context: &str) {
    let lowered = qualifier.to_lowercase();
    let as_kind = KindQualifier::parse(&lowered);
    let as_part = PathPart::parse(&lowered);
    match (as_kind, as_part) {
        (Some(kind), _) if segment.kind.is_none() => segment.kind = Some(kind),
        (_, Some(part)) if segment.part.is_none() => segment.part = Some(part),
        (Some(_), _) => {
            tracing::warn!(qualifier, segment = context, "duplicate kind qualifier, ignoring")
        }
        (_, Some(_)) => {
            tracing::warn!(qualifier, segment = context, "duplicate part qualifier, ignoring")
        }
        (None, None) => {
            tracing::warn!(qualifier, segment = context, "unknown qualifier, ignoring")
        }
    }
}

/// Kind inference for unqualified segments.
///
/// A single meaningful segment stays unqualified so it can match any kind.
/// In longer paths the leading segment defaults to class when its name is
/// uppercase (function otherwise), and segments under a class-like parent
/// default to method.
fn infer_kinds(segments: &mut [PathSegment]) {
    let start = usize::from(segments.first().map(|s| s.is_file()).unwrap_or(false));
    let meaningful = segments.len().saturating_sub(start);
    if meaningful == 0 {
        return;
    }
    for i in start..segments.len() {
        if segments[i].kind.is_some() {
            continue;
        }
        let rel = i - start;
        if rel == 0 {
            if meaningful == 1 {
                continue;
            }
            let uppercase_lead = segments[i]
                .name
                .as_ref()
                .and_then(|n| n.chars().next())
                .map(char::is_uppercase)
                .unwrap_or(false);
            segments[i].kind = Some(KindQualifier::Kind(if uppercase_lead {
                ElementKind::Class
            } else {
                ElementKind::Function
            }));
        } else {
            let parent_class_like = matches!(
                segments[i - 1].kind,
                Some(KindQualifier::Kind(ElementKind::Class))
                    | Some(KindQualifier::Kind(ElementKind::Interface))
            );
            if parent_class_like {
                segments[i].kind = Some(KindQualifier::Kind(ElementKind::Method));
            }
        }
    }
}

/// Canonical string form; the inverse of `parse_path` for valid segments.
pub fn path_to_string(segments: &[PathSegment]) -> String {
    let mut parts = Vec::new();
    let mut rest = segments;
    if segments.first().map(|s| s.is_file()).unwrap_or(false) {
        parts.push(ROOT_SEGMENT.to_string());
        rest = &segments[1..];
    }
    for segment in rest {
        let mut text = segment.name.clone().unwrap_or_default();
        match segment.kind {
            Some(KindQualifier::Kind(kind)) => text.push_str(&format!("[{}]", kind.as_str())),
            Some(KindQualifier::Property) => text.push_str("[property]"),
            None => {}
        }
        if let Some(part) = segment.part {
            text.push_str(&format!("[{}]", part.as_str()));
        }
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_path() {
        let segments = parse_path("FILE.C.v");
        assert_eq!(segments.len(), 3);
        assert!(segments[0].is_file());
        assert_eq!(segments[1].name.as_deref(), Some("C"));
        assert_eq!(
            segments[1].kind,
            Some(KindQualifier::Kind(ElementKind::Class))
        );
        assert_eq!(
            segments[2].kind,
            Some(KindQualifier::Kind(ElementKind::Method))
        );
    }

    #[test]
    fn test_single_segment_stays_unqualified() {
        let segments = parse_path("FILE.IUser");
        assert_eq!(segments.len(), 2);
        assert!(segments[1].kind.is_none());
    }

    #[test]
    fn test_explicit_qualifiers() {
        let segments = parse_path("FILE.C[class].v[property_getter][body]");
        assert_eq!(
            segments[2].kind,
            Some(KindQualifier::Kind(ElementKind::PropertyGetter))
        );
        assert_eq!(segments[2].part, Some(PathPart::Body));
    }

    #[test]
    fn test_unknown_qualifier_is_ignored() {
        let segments = parse_path("FILE.C.v[weird]");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].name.as_deref(), Some("v"));
        // falls back to the inferred method kind
        assert_eq!(
            segments[2].kind,
            Some(KindQualifier::Kind(ElementKind::Method))
        );
        assert!(segments[2].part.is_none());
    }

    #[test]
    fn test_lowercase_lead_defaults_to_function() {
        let segments = parse_path("FILE.helper.inner");
        assert_eq!(
            segments[1].kind,
            Some(KindQualifier::Kind(ElementKind::Function))
        );
        // parent is not class-like, so no inference for the child
        assert!(segments[2].kind.is_none());
    }

    #[test]
    fn test_nameless_qualifier_segment() {
        let segments = parse_path("[import_group]");
        assert_eq!(segments.len(), 1);
        assert!(segments[0].name.is_none());
        assert_eq!(
            segments[0].kind,
            Some(KindQualifier::Kind(ElementKind::ImportGroup))
        );
    }

    #[test]
    fn test_round_trip_to_string() {
        let path = "FILE.C[class].v[property_setter]";
        assert_eq!(path_to_string(&parse_path(path)), path);
    }

    #[test]
    fn test_property_group_matching() {
        assert!(KindQualifier::Property.accepts(ElementKind::StaticField));
        assert!(KindQualifier::Property.accepts(ElementKind::PropertyGetter));
        assert!(!KindQualifier::Property.accepts(ElementKind::Method));
        assert!(KindQualifier::Kind(ElementKind::Method).accepts(ElementKind::PropertySetter));
        assert!(!KindQualifier::Kind(ElementKind::PropertyGetter)
            .accepts(ElementKind::PropertySetter));
    }

    #[test]
    fn test_ensure_file_prefix() {
        assert_eq!(ensure_file_prefix("C.m"), "FILE.C.m");
        assert_eq!(ensure_file_prefix("FILE.C.m"), "FILE.C.m");
        assert_eq!(ensure_file_prefix("[import_group]"), "[import_group]");
    }
}
