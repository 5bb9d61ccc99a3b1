//! Raw Element Extractor
//!
//! Per-language extractors turn tree-query results into tagged raw records,
//! one method per element kind. Classification that needs cross-record
//! context (property pairing, import rollup) happens later, in the
//! post-processor.

pub mod python;
pub mod raw;
pub mod typescript;

pub use python::PythonExtractor;
pub use raw::{
    infer_literal_type, ImportSpecifier, RawBundle, RawClass, RawDecorator, RawEnum,
    RawEnumMember, RawFunction, RawImport, RawInterface, RawMember, RawNamespace, RawParameter,
    RawPropertyField, RawReturnInfo, RawStaticField, RawTypeAlias,
};
pub use typescript::TypeScriptExtractor;

use tree_sitter::Node;

use crate::features::navigation::SyntaxNavigator;
use crate::shared::models::ElementKind;

/// Contract every language extractor implements.
///
/// Languages without a construct keep the default empty implementations;
/// `extract_all` composes the kind methods in a fixed order so the
/// post-processor sees imports, members, and decorators together.
pub trait RawExtractor: Send + Sync {
    fn grammar(&self) -> tree_sitter::Language;

    /// Node kinds that delimit a class scope in this language.
    fn class_like_node_kinds(&self) -> &'static [&'static str];

    fn extract_imports(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawImport>;
    fn extract_functions(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawFunction>;
    fn extract_classes(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawClass>;
    fn extract_members(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawMember>;
    fn extract_decorators(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawDecorator>;

    fn extract_property_fields(&self, _root: Node, _nav: &SyntaxNavigator) -> Vec<RawPropertyField> {
        Vec::new()
    }

    fn extract_static_fields(&self, _root: Node, _nav: &SyntaxNavigator) -> Vec<RawStaticField> {
        Vec::new()
    }

    fn extract_interfaces(&self, _root: Node, _nav: &SyntaxNavigator) -> Vec<RawInterface> {
        Vec::new()
    }

    fn extract_enums(&self, _root: Node, _nav: &SyntaxNavigator) -> Vec<RawEnum> {
        Vec::new()
    }

    fn extract_type_aliases(&self, _root: Node, _nav: &SyntaxNavigator) -> Vec<RawTypeAlias> {
        Vec::new()
    }

    fn extract_namespaces(&self, _root: Node, _nav: &SyntaxNavigator) -> Vec<RawNamespace> {
        Vec::new()
    }

    /// Query template for the `locate` fast path; `None` when the kind has
    /// no single-query template in this language.
    fn locate_query(
        &self,
        kind: ElementKind,
        name: Option<&str>,
        parent: Option<&str>,
    ) -> Option<String>;

    /// Run every kind method in the fixed composition order.
    fn extract_all(&self, root: Node, nav: &SyntaxNavigator) -> RawBundle {
        RawBundle {
            imports: self.extract_imports(root, nav),
            functions: self.extract_functions(root, nav),
            classes: self.extract_classes(root, nav),
            members: self.extract_members(root, nav),
            property_fields: self.extract_property_fields(root, nav),
            static_fields: self.extract_static_fields(root, nav),
            decorators: self.extract_decorators(root, nav),
            interfaces: self.extract_interfaces(root, nav),
            enums: self.extract_enums(root, nav),
            type_aliases: self.extract_type_aliases(root, nav),
            namespaces: self.extract_namespaces(root, nav),
        }
    }
}

/// Equality predicate fragment for locate templates; empty when the value
/// is absent.
pub(crate) fn eq_predicate(capture: &str, value: Option<&str>) -> String {
    match value {
        Some(v) => format!(" (#eq? @{} \"{}\")", capture, v.replace('"', "\\\"")),
        None => String::new(),
    }
}
