//! Path resolution over an element tree.
//!
//! Descends segment by segment from the file root, filtering by exact name
//! and (possibly relaxed) kind, breaking ties by a fixed precedence, and
//! finally applying the part projection of the last segment.

use super::parser::{
    ensure_file_prefix, parse_path, path_to_string, KindQualifier, PathPart, PathSegment,
};
use super::parts::extract_part;
use crate::features::registry::{LanguageFlavor, LanguageId};
use crate::shared::models::{Element, ElementKind, ElementTree};

pub struct PathResolver {
    flavor: LanguageFlavor,
}

impl PathResolver {
    pub fn new(flavor: LanguageFlavor) -> Self {
        Self { flavor }
    }

    pub fn for_language(language: LanguageId) -> Self {
        Self::new(language.flavor())
    }

    /// Resolve a path to the element it addresses; `None` on any failure.
    pub fn resolve<'t>(&self, tree: &'t ElementTree, path: &str) -> Option<&'t Element> {
        self.resolve_with_part(tree, path).map(|(element, _)| element)
    }

    /// Resolve and also report the requested part (default `all`).
    pub fn resolve_with_part<'t>(
        &self,
        tree: &'t ElementTree,
        path: &str,
    ) -> Option<(&'t Element, PathPart)> {
        if path.is_empty() || tree.is_empty() {
            return None;
        }
        let processed = ensure_file_prefix(path);
        let segments = parse_path(&processed);
        let mut rest: &[PathSegment] = &segments;
        if rest.first().map(PathSegment::is_file).unwrap_or(false) {
            rest = &rest[1..];
        }
        if rest.is_empty() {
            return None;
        }

        let mut candidates: &[Element] = &tree.elements;
        let mut resolved: Option<&Element> = None;
        for segment in rest {
            let best = pick_best(candidates, segment, path)?;
            candidates = &best.children;
            resolved = Some(best);
        }
        let part = rest
            .last()
            .and_then(|segment| segment.part)
            .unwrap_or(PathPart::All);
        resolved.map(|element| (element, part))
    }

    /// Resolve and project the requested part of the element's text.
    pub fn select(&self, tree: &ElementTree, path: &str) -> Option<String> {
        let (element, part) = self.resolve_with_part(tree, path)?;
        Some(extract_part(element, part, self.flavor))
    }

    /// Inverse emitter: the canonical `FILE.`-rooted path addressing an
    /// element of the tree. Kind qualifiers are always explicit so the
    /// emitted path resolves back exactly.
    pub fn path_of(tree: &ElementTree, target: &Element) -> Option<String> {
        fn descend<'t>(
            elements: &'t [Element],
            target: &Element,
            trail: &mut Vec<PathSegment>,
        ) -> bool {
            for element in elements {
                trail.push(PathSegment {
                    name: Some(element.name.clone()),
                    kind: Some(KindQualifier::Kind(element.kind)),
                    part: None,
                });
                if std::ptr::eq(element, target) {
                    return true;
                }
                if descend(&element.children, target, trail) {
                    return true;
                }
                trail.pop();
            }
            false
        }

        let mut trail = vec![PathSegment::file()];
        if descend(&tree.elements, target, &mut trail) {
            Some(path_to_string(&trail))
        } else {
            None
        }
    }
}

/// Tie-break precedence among relaxed matches.
fn kind_rank(kind: ElementKind) -> u8 {
    match kind {
        ElementKind::PropertySetter => 0,
        ElementKind::PropertyGetter => 1,
        ElementKind::Method => 2,
        ElementKind::StaticField => 3,
        ElementKind::PropertyField => 4,
        ElementKind::Class => 5,
        ElementKind::Interface => 6,
        ElementKind::Function => 7,
        _ => 8,
    }
}

fn pick_best<'t>(
    candidates: &'t [Element],
    segment: &PathSegment,
    path: &str,
) -> Option<&'t Element> {
    let mut matches: Vec<&Element> = candidates
        .iter()
        .filter(|element| {
            if let Some(name) = &segment.name {
                if &element.name != name {
                    return false;
                }
            }
            match &segment.kind {
                Some(qualifier) => qualifier.accepts(element.kind),
                None => true,
            }
        })
        .collect();
    if matches.is_empty() {
        return None;
    }
    matches.sort_by_key(|element| {
        let exact = match &segment.kind {
            Some(qualifier) if qualifier.is_exact(element.kind) => 0u8,
            _ => 1,
        };
        let line = element.range.map(|r| r.start_line).unwrap_or(u32::MAX);
        (exact, kind_rank(element.kind), line)
    });
    if matches.len() > 1 {
        tracing::warn!(path, count = matches.len(), "multiple candidates match, picking the first by precedence");
    }
    matches.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Range;

    fn sample_tree() -> ElementTree {
        let mut class = Element::new(ElementKind::Class, "C", "class C: ...")
            .with_range(Range::new(1, 10));
        class.children = vec![
            Element::new(ElementKind::StaticField, "x", "x = 1")
                .with_range(Range::new(2, 2))
                .with_parent_name("C"),
            Element::new(ElementKind::PropertyGetter, "v", "def v(self): ...")
                .with_range(Range::new(3, 4))
                .with_parent_name("C"),
            Element::new(ElementKind::PropertySetter, "v", "def v(self, n): ...")
                .with_range(Range::new(5, 6))
                .with_parent_name("C"),
            Element::new(ElementKind::Method, "m", "def m(self): ...")
                .with_range(Range::new(7, 8))
                .with_parent_name("C"),
        ];
        ElementTree::new(vec![class])
    }

    #[test]
    fn test_unqualified_accessor_prefers_setter() {
        let tree = sample_tree();
        let resolver = PathResolver::new(LanguageFlavor::Indentation);
        let element = resolver.resolve(&tree, "C.v").unwrap();
        assert_eq!(element.kind, ElementKind::PropertySetter);
    }

    #[test]
    fn test_exact_kind_qualifier_wins() {
        let tree = sample_tree();
        let resolver = PathResolver::new(LanguageFlavor::Indentation);
        let element = resolver.resolve(&tree, "C.v[property_getter]").unwrap();
        assert_eq!(element.kind, ElementKind::PropertyGetter);
    }

    #[test]
    fn test_property_group_reaches_static_field() {
        let tree = sample_tree();
        let resolver = PathResolver::new(LanguageFlavor::Indentation);
        let element = resolver.resolve(&tree, "C.x[property]").unwrap();
        assert_eq!(element.kind, ElementKind::StaticField);
    }

    #[test]
    fn test_missing_name_returns_none() {
        let tree = sample_tree();
        let resolver = PathResolver::new(LanguageFlavor::Indentation);
        assert!(resolver.resolve(&tree, "C.missing").is_none());
        assert!(resolver.resolve(&tree, "D.m").is_none());
        assert!(resolver.resolve(&tree, "").is_none());
    }

    #[test]
    fn test_unknown_qualifier_falls_back() {
        let tree = sample_tree();
        let resolver = PathResolver::new(LanguageFlavor::Indentation);
        let plain = resolver.resolve(&tree, "C.v").unwrap();
        let odd = resolver.resolve(&tree, "C.v[weird]").unwrap();
        assert!(std::ptr::eq(plain, odd));
    }

    #[test]
    fn test_path_inverse_round_trip() {
        let tree = sample_tree();
        let resolver = PathResolver::new(LanguageFlavor::Indentation);
        for element in tree.walk() {
            let path = PathResolver::path_of(&tree, element).unwrap();
            let resolved = resolver.resolve(&tree, &path).unwrap();
            assert!(std::ptr::eq(element, resolved), "path {path} did not round-trip");
        }
    }

    #[test]
    fn test_file_prefix_optional() {
        let tree = sample_tree();
        let resolver = PathResolver::new(LanguageFlavor::Indentation);
        let with_prefix = resolver.resolve(&tree, "FILE.C.m").unwrap();
        let without = resolver.resolve(&tree, "C.m").unwrap();
        assert!(std::ptr::eq(with_prefix, without));
    }
}
