//! Tagged raw records: the untyped-but-structured intermediate between the
//! tree queries and the post-processor.
//!
//! Every record carries at minimum `{name, content, range}`; kind-specific
//! fields ride along. Records are plain data — classification decisions that
//! need cross-record context (property pairing, import rollup, decorator
//! attachment) belong to the post-processor.

use serde::{Deserialize, Serialize};

use crate::shared::models::{ElementKind, Range};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawParameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub optional: bool,
}

/// Return-type annotation plus observed `return <expr>` texts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReturnInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl RawReturnInfo {
    pub fn is_empty(&self) -> bool {
        self.annotation.is_none() && self.values.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDecorator {
    /// Decorator name without the `@` and without call arguments.
    pub name: String,
    pub content: String,
    pub range: Range,
    /// Dotted path of the decorated element (`Class.method`, bare `func`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    /// Call arguments text when the decorator is a call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawImport {
    /// Display name: the imported module or first bound name.
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_import: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_import: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named: Vec<ImportSpecifier>,
    pub side_effect: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFunction {
    pub name: String,
    pub content: String,
    pub range: Range,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RawParameter>,
    #[serde(default)]
    pub return_info: RawReturnInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<RawDecorator>,
    pub is_async: bool,
    pub is_exported: bool,
}

/// A callable inside a class body. `kind` is the extraction-time
/// classification (`Method`, `PropertyGetter`, `PropertySetter`); the
/// post-processor revalidates and may retype it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMember {
    pub kind: ElementKind,
    pub name: String,
    pub parent_name: String,
    pub content: String,
    pub range: Range,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RawParameter>,
    #[serde(default)]
    pub return_info: RawReturnInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<RawDecorator>,
    pub is_static: bool,
    pub is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawClass {
    pub name: String,
    pub content: String,
    pub range: Range,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<RawDecorator>,
}

/// Class-body assignment to a single identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStaticField {
    pub name: String,
    pub parent_name: String,
    pub content: String,
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
    pub is_readonly: bool,
}

/// Instance attribute: `self.x = ...` in the initializer, or an instance
/// field declaration in a curly-brace class body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPropertyField {
    pub name: String,
    pub parent_name: String,
    pub content: String,
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
    pub is_readonly: bool,
    pub is_optional: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInterface {
    pub name: String,
    pub content: String,
    pub range: Range,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    pub is_exported: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEnumMember {
    pub name: String,
    pub content: String,
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEnum {
    pub name: String,
    pub content: String,
    pub range: Range,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<RawEnumMember>,
    pub is_const: bool,
    pub is_exported: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTypeAlias {
    pub name: String,
    pub content: String,
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    pub is_exported: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNamespace {
    pub name: String,
    pub content: String,
    pub range: Range,
    /// Dotted path of enclosing namespaces, if nested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    pub is_exported: bool,
}

/// Everything one extraction pass produced, keyed by element kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBundle {
    pub imports: Vec<RawImport>,
    pub functions: Vec<RawFunction>,
    pub classes: Vec<RawClass>,
    pub members: Vec<RawMember>,
    pub property_fields: Vec<RawPropertyField>,
    pub static_fields: Vec<RawStaticField>,
    pub decorators: Vec<RawDecorator>,
    pub interfaces: Vec<RawInterface>,
    pub enums: Vec<RawEnum>,
    pub type_aliases: Vec<RawTypeAlias>,
    pub namespaces: Vec<RawNamespace>,
}

impl RawBundle {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
            && self.functions.is_empty()
            && self.classes.is_empty()
            && self.members.is_empty()
            && self.property_fields.is_empty()
            && self.static_fields.is_empty()
            && self.decorators.is_empty()
            && self.interfaces.is_empty()
            && self.enums.is_empty()
            && self.type_aliases.is_empty()
            && self.namespaces.is_empty()
    }
}

/// Literal value-type inference shared by both languages.
///
/// Fixed rule table over the literal's syntactic shape; `None` when the
/// value is not a recognizable literal.
pub fn infer_literal_type(node_kind: &str, text: &str) -> Option<&'static str> {
    match node_kind {
        "integer" => Some("int"),
        "float" => Some("float"),
        "true" | "false" => Some("bool"),
        "none" | "null" => Some("null"),
        "string" | "template_string" | "concatenated_string" => Some("string"),
        "list" | "array" => Some("list"),
        "tuple" => Some("tuple"),
        "dictionary" => Some("map"),
        "set" => Some("set"),
        "object" => Some("map"),
        "number" => {
            let trimmed = text.trim();
            if trimmed.contains('.') || trimmed.contains('e') || trimmed.contains('E') {
                Some("float")
            } else {
                Some("int")
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_inference_table() {
        assert_eq!(infer_literal_type("integer", "1"), Some("int"));
        assert_eq!(infer_literal_type("float", "1.5"), Some("float"));
        assert_eq!(infer_literal_type("true", "true"), Some("bool"));
        assert_eq!(infer_literal_type("none", "None"), Some("null"));
        assert_eq!(infer_literal_type("string", "'x'"), Some("string"));
        assert_eq!(infer_literal_type("list", "[1]"), Some("list"));
        assert_eq!(infer_literal_type("tuple", "(1, 2)"), Some("tuple"));
        assert_eq!(infer_literal_type("dictionary", "{'a': 1}"), Some("map"));
        assert_eq!(infer_literal_type("set", "{1, 2}"), Some("set"));
        assert_eq!(infer_literal_type("number", "2"), Some("int"));
        assert_eq!(infer_literal_type("number", "2.5"), Some("float"));
        assert_eq!(infer_literal_type("call", "f()"), None);
    }

    #[test]
    fn test_return_info_emptiness() {
        assert!(RawReturnInfo::default().is_empty());
        let with_values = RawReturnInfo {
            annotation: None,
            values: vec!["0".to_string()],
        };
        assert!(!with_values.is_empty());
    }
}
