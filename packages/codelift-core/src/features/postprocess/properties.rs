//! Property assembly under a class.
//!
//! Tracks one slot per member name while members arrive in source order.
//! A getter and setter sharing a name form an accessor pair and both stay in
//! the tree as separate children; duplicates and accessor/method collisions
//! are warned about and dropped, first occupant wins.

use rustc_hash::FxHashMap;

use crate::shared::models::{Element, ElementKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    HasGetter,
    HasSetter,
    HasPair,
    HasMethod,
}

/// Accumulates the accepted member children of one class.
pub(crate) struct MemberAssembly {
    accepted: Vec<Element>,
    states: FxHashMap<String, SlotState>,
}

impl MemberAssembly {
    pub fn new() -> Self {
        Self {
            accepted: Vec::new(),
            states: FxHashMap::default(),
        }
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Offer the next member in source order; drops are logged, never fatal.
    pub fn offer(&mut self, element: Element) {
        let name = element.name.clone();
        let incoming = element.kind;
        let next = match (self.states.get(&name), incoming) {
            (None, ElementKind::PropertyGetter) => Some(SlotState::HasGetter),
            (None, ElementKind::PropertySetter) => Some(SlotState::HasSetter),
            (None, _) => Some(SlotState::HasMethod),

            (Some(SlotState::HasGetter), ElementKind::PropertySetter) => Some(SlotState::HasPair),
            (Some(SlotState::HasSetter), ElementKind::PropertyGetter) => Some(SlotState::HasPair),

            (Some(SlotState::HasGetter), ElementKind::PropertyGetter)
            | (Some(SlotState::HasSetter), ElementKind::PropertySetter) => {
                tracing::warn!(name = %name, "duplicate property accessor, keeping the first");
                None
            }
            (Some(SlotState::HasPair), _) => {
                tracing::warn!(name = %name, kind = %incoming, "duplicate member on a complete accessor pair, dropping");
                None
            }
            (Some(SlotState::HasMethod), ElementKind::PropertyGetter)
            | (Some(SlotState::HasMethod), ElementKind::PropertySetter) => {
                tracing::warn!(name = %name, "accessor name collides with an existing method, keeping the method");
                None
            }
            (Some(SlotState::HasGetter), _) | (Some(SlotState::HasSetter), _) => {
                tracing::warn!(name = %name, "method name collides with an existing accessor, keeping the accessor");
                None
            }
            (Some(SlotState::HasMethod), _) => {
                tracing::warn!(name = %name, "duplicate method, keeping the first");
                None
            }
        };
        if let Some(state) = next {
            self.states.insert(name, state);
            self.accepted.push(element);
        }
    }

    pub fn into_children(self) -> Vec<Element> {
        self.accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Range;

    fn member(kind: ElementKind, name: &str, line: u32) -> Element {
        Element::new(kind, name, format!("{name} body")).with_range(Range::new(line, line))
    }

    #[test]
    fn test_pair_keeps_both_accessors() {
        let mut assembly = MemberAssembly::new();
        assembly.offer(member(ElementKind::PropertyGetter, "v", 2));
        assembly.offer(member(ElementKind::PropertySetter, "v", 4));
        let children = assembly.into_children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind, ElementKind::PropertyGetter);
        assert_eq!(children[1].kind, ElementKind::PropertySetter);
    }

    #[test]
    fn test_setter_first_still_pairs() {
        let mut assembly = MemberAssembly::new();
        assembly.offer(member(ElementKind::PropertySetter, "v", 2));
        assembly.offer(member(ElementKind::PropertyGetter, "v", 4));
        assert_eq!(assembly.into_children().len(), 2);
    }

    #[test]
    fn test_duplicate_getter_keeps_first() {
        let mut assembly = MemberAssembly::new();
        assembly.offer(member(ElementKind::PropertyGetter, "v", 2));
        assembly.offer(member(ElementKind::PropertyGetter, "v", 4));
        let children = assembly.into_children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].range.unwrap().start_line, 2);
    }

    #[test]
    fn test_method_wins_over_late_accessor() {
        let mut assembly = MemberAssembly::new();
        assembly.offer(member(ElementKind::Method, "v", 2));
        assembly.offer(member(ElementKind::PropertyGetter, "v", 4));
        let children = assembly.into_children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind, ElementKind::Method);
    }

    #[test]
    fn test_duplicate_on_pair_dropped() {
        let mut assembly = MemberAssembly::new();
        assembly.offer(member(ElementKind::PropertyGetter, "v", 2));
        assembly.offer(member(ElementKind::PropertySetter, "v", 4));
        assembly.offer(member(ElementKind::PropertyGetter, "v", 6));
        assert_eq!(assembly.into_children().len(), 2);
    }

    #[test]
    fn test_distinct_names_do_not_interact() {
        let mut assembly = MemberAssembly::new();
        assembly.offer(member(ElementKind::Method, "a", 2));
        assembly.offer(member(ElementKind::Method, "b", 4));
        assert_eq!(assembly.into_children().len(), 2);
    }
}
