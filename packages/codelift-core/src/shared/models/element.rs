//! The typed element tree shared by every pipeline stage.
//!
//! An [`Element`] describes one code construct (class, method, import group,
//! ...). Elements are built once by the post-processor and never mutated
//! afterward; rewrites produce a new tree. Cross-references between elements
//! (a decorator's `parent_name`, for example) are dotted path strings, never
//! pointers, so trees stay acyclic and serializable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::range::Range;

/// Closed set of element kinds.
///
/// Incoming kind strings outside this set parse to [`ElementKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Module,
    Class,
    Interface,
    Namespace,
    Enum,
    EnumMember,
    TypeAlias,
    Function,
    Method,
    PropertyGetter,
    PropertySetter,
    PropertyField,
    StaticField,
    ImportGroup,
    ImportItem,
    Decorator,
    Parameter,
    ReturnAnnotation,
    File,
    Unknown,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Module => "module",
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Namespace => "namespace",
            ElementKind::Enum => "enum",
            ElementKind::EnumMember => "enum_member",
            ElementKind::TypeAlias => "type_alias",
            ElementKind::Function => "function",
            ElementKind::Method => "method",
            ElementKind::PropertyGetter => "property_getter",
            ElementKind::PropertySetter => "property_setter",
            ElementKind::PropertyField => "property_field",
            ElementKind::StaticField => "static_field",
            ElementKind::ImportGroup => "import_group",
            ElementKind::ImportItem => "import_item",
            ElementKind::Decorator => "decorator",
            ElementKind::Parameter => "parameter",
            ElementKind::ReturnAnnotation => "return_annotation",
            ElementKind::File => "file",
            ElementKind::Unknown => "unknown",
        }
    }

    /// Strict parse; `None` for strings outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        let kind = match s {
            "module" => ElementKind::Module,
            "class" => ElementKind::Class,
            "interface" => ElementKind::Interface,
            "namespace" => ElementKind::Namespace,
            "enum" => ElementKind::Enum,
            "enum_member" => ElementKind::EnumMember,
            "type_alias" => ElementKind::TypeAlias,
            "function" => ElementKind::Function,
            "method" => ElementKind::Method,
            "property_getter" => ElementKind::PropertyGetter,
            "property_setter" => ElementKind::PropertySetter,
            "property_field" => ElementKind::PropertyField,
            "static_field" => ElementKind::StaticField,
            "import_group" => ElementKind::ImportGroup,
            "import_item" => ElementKind::ImportItem,
            "decorator" => ElementKind::Decorator,
            "parameter" => ElementKind::Parameter,
            "return_annotation" => ElementKind::ReturnAnnotation,
            "file" => ElementKind::File,
            "unknown" => ElementKind::Unknown,
            _ => return None,
        };
        Some(kind)
    }

    /// Lenient parse used at data boundaries: unknown strings coerce to
    /// [`ElementKind::Unknown`].
    pub fn from_raw(s: &str) -> Self {
        Self::parse(s).unwrap_or(ElementKind::Unknown)
    }

    pub fn is_class_like(&self) -> bool {
        matches!(self, ElementKind::Class | ElementKind::Interface)
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            ElementKind::Function
                | ElementKind::Method
                | ElementKind::PropertyGetter
                | ElementKind::PropertySetter
        )
    }

    pub fn is_property_accessor(&self) -> bool {
        matches!(
            self,
            ElementKind::PropertyGetter | ElementKind::PropertySetter
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known attribute keys.
///
/// Attribute presence is always optional; these constants keep the key
/// strings in one place.
pub mod attr {
    pub const IS_EXPORTED: &str = "is_exported";
    pub const IS_STATIC: &str = "is_static";
    pub const IS_ASYNC: &str = "is_async";
    pub const IS_READONLY: &str = "is_readonly";
    pub const IS_OPTIONAL: &str = "is_optional";
    pub const OPTIONAL: &str = "optional";
    pub const DEFAULT: &str = "default";
    pub const ARGUMENTS: &str = "arguments";
    pub const EXTENDS: &str = "extends";
    pub const IMPLEMENTS: &str = "implements";
    pub const RAW_VALUE: &str = "raw_value";
    pub const VALUES: &str = "values";
    pub const MODULE: &str = "module";
    pub const ALIAS: &str = "alias";
    pub const DEFAULT_IMPORT: &str = "default_import";
    pub const NAMESPACE_IMPORT: &str = "namespace_import";
    pub const NAMED_IMPORTS: &str = "named_imports";
    pub const SIDE_EFFECT: &str = "side_effect";
    pub const INDIVIDUAL_IMPORTS: &str = "individual_imports";
    pub const ACCESSIBILITY: &str = "accessibility";
    pub const IS_CONST: &str = "is_const";
}

/// One code construct: the unit of extraction and manipulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(kind: ElementKind, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            content: content.into(),
            range: None,
            parent_name: None,
            value_type: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_parent_name(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Dotted path of this element given its parent path.
    pub fn dotted_path(&self) -> String {
        match &self.parent_name {
            Some(parent) if !parent.is_empty() => format!("{}.{}", parent, self.name),
            _ => self.name.clone(),
        }
    }

    pub fn attr_bool(&self, key: &str) -> bool {
        self.attributes
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn decorators(&self) -> impl Iterator<Item = &Element> {
        self.children
            .iter()
            .filter(|c| c.kind == ElementKind::Decorator)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Element> {
        self.children
            .iter()
            .filter(|c| c.kind == ElementKind::Parameter)
    }

    pub fn return_annotation(&self) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.kind == ElementKind::ReturnAnnotation)
    }

    pub fn child(&self, kind: ElementKind, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.kind == kind && c.name == name)
    }
}

/// Ordered forest of top-level elements with their transitive children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementTree {
    pub elements: Vec<Element>,
}

impl ElementTree {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn find(&self, kind: ElementKind, name: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.kind == kind && e.name == name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.kind.is_class_like())
    }

    pub fn import_group(&self) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.kind == ElementKind::ImportGroup)
    }

    /// Depth-first walk over every element in the tree.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.elements.iter().rev().collect(),
        }
    }
}

/// Depth-first element iterator; children visit in declaration order.
pub struct Walk<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ElementKind::PropertyGetter,
            ElementKind::ImportGroup,
            ElementKind::TypeAlias,
        ] {
            assert_eq!(ElementKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ElementKind::parse("widget"), None);
        assert_eq!(ElementKind::from_raw("widget"), ElementKind::Unknown);
    }

    #[test]
    fn test_dotted_path() {
        let method = Element::new(ElementKind::Method, "run", "def run(self): ...")
            .with_parent_name("Worker");
        assert_eq!(method.dotted_path(), "Worker.run");

        let func = Element::new(ElementKind::Function, "main", "def main(): ...");
        assert_eq!(func.dotted_path(), "main");
    }

    #[test]
    fn test_walk_order() {
        let tree = ElementTree::new(vec![
            Element::new(ElementKind::Class, "A", "").with_children_for_test(vec![
                Element::new(ElementKind::Method, "m1", ""),
                Element::new(ElementKind::Method, "m2", ""),
            ]),
            Element::new(ElementKind::Function, "f", ""),
        ]);
        let names: Vec<&str> = tree.walk().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "m1", "m2", "f"]);
    }

    #[test]
    fn test_element_serde_round_trip() {
        let element = Element::new(ElementKind::StaticField, "N", "static N = 2;")
            .with_range(Range::new(2, 2))
            .with_parent_name("K")
            .with_value_type("int")
            .with_attr(attr::IS_STATIC, true);
        let json = serde_json::to_string(&element).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back, element);
    }

    impl Element {
        fn with_children_for_test(mut self, children: Vec<Element>) -> Self {
            self.children = children;
            self
        }
    }
}
