//! TypeScript raw extractor.
//!
//! Works over the tree-sitter-typescript grammar. Decorators arrive as
//! leading children of the member they decorate, so member ranges already
//! include them; `export` wrappers widen the declaration's range.

use tree_sitter::Node;

use super::raw::{
    infer_literal_type, ImportSpecifier, RawClass, RawDecorator, RawEnum, RawEnumMember,
    RawFunction, RawImport, RawInterface, RawMember, RawNamespace, RawParameter,
    RawPropertyField, RawReturnInfo, RawStaticField, RawTypeAlias,
};
use super::{eq_predicate, RawExtractor};
use crate::features::navigation::SyntaxNavigator;
use crate::shared::models::ElementKind;

const CLASS_LIKE: &[&str] = &[
    "class_declaration",
    "abstract_class_declaration",
    "interface_declaration",
];

/// Scopes that disqualify a declaration from being a top-level element.
/// Declarations nested in these travel inside their container's content.
const SCOPE_KINDS: &[&str] = &[
    "class_declaration",
    "abstract_class_declaration",
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "arrow_function",
    "method_definition",
    "internal_module",
];

const IMPORT_QUERY: &str = "[(import_statement) (export_statement)] @import";
const FUNCTION_QUERY: &str =
    "[(function_declaration) (generator_function_declaration)] @func";
const CLASS_QUERY: &str = "[(class_declaration) (abstract_class_declaration)] @class";
const MEMBER_QUERY: &str = "(method_definition) @member";
const FIELD_QUERY: &str = "(public_field_definition) @field";
const DECORATOR_QUERY: &str = "(decorator) @decorator";
const INTERFACE_QUERY: &str = "(interface_declaration) @interface";
const ENUM_QUERY: &str = "(enum_declaration) @enum";
const TYPE_ALIAS_QUERY: &str = "(type_alias_declaration) @alias";
const NAMESPACE_QUERY: &str = "(internal_module) @ns";

pub struct TypeScriptExtractor;

impl TypeScriptExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Widen a declaration to its `export_statement` wrapper, if any.
    fn effective_node<'t>(node: Node<'t>) -> Node<'t> {
        match node.parent() {
            Some(parent) if parent.kind() == "export_statement" => parent,
            _ => node,
        }
    }

    fn is_exported(node: Node) -> bool {
        node.parent()
            .map(|p| p.kind() == "export_statement")
            .unwrap_or(false)
    }

    fn has_child_of_kind(node: Node, kind: &str) -> bool {
        let mut cursor = node.walk();
        let result = node.children(&mut cursor).any(|c| c.kind() == kind);
        result
    }

    fn enclosing_class_name(node: Node, nav: &SyntaxNavigator) -> Option<String> {
        let class = SyntaxNavigator::ancestor_of_kinds(
            node,
            &["class_declaration", "abstract_class_declaration"],
        )?;
        let name = SyntaxNavigator::child_by_field(class, "name")?;
        Some(nav.node_text(name).to_string())
    }

    /// `: T` annotation with the colon stripped.
    fn annotation_text(node: Node, nav: &SyntaxNavigator) -> String {
        nav.node_text(node).trim_start_matches(':').trim().to_string()
    }

    fn string_fragment(node: Node, nav: &SyntaxNavigator) -> String {
        nav.node_text(node)
            .trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .to_string()
    }

    fn decorator_record(
        decorator: Node,
        nav: &SyntaxNavigator,
        parent_name: Option<String>,
    ) -> RawDecorator {
        let expr = decorator.named_child(0);
        let (name, arguments) = match expr {
            Some(expr) if expr.kind() == "call_expression" => {
                let callee = SyntaxNavigator::child_by_field(expr, "function")
                    .map(|n| nav.node_text(n).to_string())
                    .unwrap_or_else(|| nav.node_text(expr).to_string());
                let args = SyntaxNavigator::child_by_field(expr, "arguments")
                    .map(|n| nav.node_text(n).to_string());
                (callee, args)
            }
            Some(expr) => (nav.node_text(expr).to_string(), None),
            None => (nav.node_text(decorator).trim_start_matches('@').to_string(), None),
        };
        let range = SyntaxNavigator::node_range(decorator);
        RawDecorator {
            name,
            content: nav.slice_lines(range.start_line, range.end_line),
            range,
            parent_name,
            arguments,
        }
    }

    fn decorators_of(node: Node, nav: &SyntaxNavigator, parent_name: &str) -> Vec<RawDecorator> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|c| c.kind() == "decorator")
            .map(|c| Self::decorator_record(c, nav, Some(parent_name.to_string())))
            .collect()
    }

    fn parameters_of(func: Node, nav: &SyntaxNavigator) -> Vec<RawParameter> {
        let Some(params) = SyntaxNavigator::child_by_field(func, "parameters") else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut cursor = params.walk();
        for child in params.named_children(&mut cursor) {
            if !matches!(child.kind(), "required_parameter" | "optional_parameter") {
                continue;
            }
            let name = SyntaxNavigator::child_by_field(child, "pattern")
                .map(|n| nav.node_text(n).to_string())
                .unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let default = SyntaxNavigator::child_by_field(child, "value")
                .map(|n| nav.node_text(n).to_string());
            out.push(RawParameter {
                value_type: SyntaxNavigator::child_by_field(child, "type")
                    .map(|n| Self::annotation_text(n, nav)),
                optional: child.kind() == "optional_parameter" || default.is_some(),
                default,
                name,
            });
        }
        out
    }

    fn return_info_of(func: Node, nav: &SyntaxNavigator) -> RawReturnInfo {
        let annotation = SyntaxNavigator::child_by_field(func, "return_type")
            .map(|n| Self::annotation_text(n, nav));
        let mut values = Vec::new();
        if let Some(body) = SyntaxNavigator::child_by_field(func, "body") {
            Self::collect_returns(body, nav, &mut values);
        }
        RawReturnInfo { annotation, values }
    }

    fn collect_returns(node: Node, nav: &SyntaxNavigator, out: &mut Vec<String>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "function_declaration"
                | "generator_function_declaration"
                | "function_expression"
                | "arrow_function"
                | "method_definition"
                | "class_declaration" => continue,
                "return_statement" => {
                    if let Some(value) = child.named_child(0) {
                        out.push(nav.node_text(value).to_string());
                    }
                }
                _ => Self::collect_returns(child, nav, out),
            }
        }
    }

    /// Heritage clauses live under a `class_heritage` child; keywords and
    /// commas are skipped, everything else is a type name.
    fn heritage_of(class: Node, nav: &SyntaxNavigator) -> (Vec<String>, Vec<String>) {
        let mut extends = Vec::new();
        let mut implements = Vec::new();
        let mut cursor = class.walk();
        for child in class.children(&mut cursor) {
            if child.kind() != "class_heritage" {
                continue;
            }
            let mut heritage_cursor = child.walk();
            for clause in child.children(&mut heritage_cursor) {
                let bucket = match clause.kind() {
                    "extends_clause" => &mut extends,
                    "implements_clause" => &mut implements,
                    _ => continue,
                };
                let mut clause_cursor = clause.walk();
                for item in clause.named_children(&mut clause_cursor) {
                    bucket.push(nav.node_text(item).to_string());
                }
            }
        }
        (extends, implements)
    }
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RawExtractor for TypeScriptExtractor {
    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_typescript::language_typescript()
    }

    fn class_like_node_kinds(&self) -> &'static [&'static str] {
        CLASS_LIKE
    }

    fn extract_imports(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawImport> {
        let records = match nav.execute_query(root, IMPORT_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript import query failed");
                return Vec::new();
            }
        };
        let mut imports = Vec::new();
        for record in records {
            let Some(node) = record.get("import") else { continue };
            let source_node = SyntaxNavigator::child_by_field(node, "source");
            if node.kind() == "export_statement" && source_node.is_none() {
                continue; // plain re-export of local names, not an import
            }
            let range = SyntaxNavigator::node_range(node);
            let mut import = RawImport {
                content: nav.slice_lines(range.start_line, range.end_line),
                range: Some(range),
                module: source_node.map(|n| Self::string_fragment(n, nav)),
                ..Default::default()
            };
            let mut cursor = node.walk();
            let mut saw_clause = false;
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "import_clause" => {
                        saw_clause = true;
                        let mut clause_cursor = child.walk();
                        for clause in child.named_children(&mut clause_cursor) {
                            match clause.kind() {
                                "identifier" => {
                                    import.default_import =
                                        Some(nav.node_text(clause).to_string());
                                }
                                "namespace_import" => {
                                    import.namespace_import = clause
                                        .named_child(0)
                                        .map(|n| nav.node_text(n).to_string());
                                }
                                "named_imports" => {
                                    let mut spec_cursor = clause.walk();
                                    for spec in clause.named_children(&mut spec_cursor) {
                                        if spec.kind() != "import_specifier" {
                                            continue;
                                        }
                                        import.named.push(ImportSpecifier {
                                            name: SyntaxNavigator::child_by_field(spec, "name")
                                                .map(|n| nav.node_text(n).to_string())
                                                .unwrap_or_default(),
                                            alias: SyntaxNavigator::child_by_field(spec, "alias")
                                                .map(|n| nav.node_text(n).to_string()),
                                        });
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                    "export_clause" => {
                        saw_clause = true;
                        let mut spec_cursor = child.walk();
                        for spec in child.named_children(&mut spec_cursor) {
                            if spec.kind() != "export_specifier" {
                                continue;
                            }
                            import.named.push(ImportSpecifier {
                                name: SyntaxNavigator::child_by_field(spec, "name")
                                    .map(|n| nav.node_text(n).to_string())
                                    .unwrap_or_default(),
                                alias: SyntaxNavigator::child_by_field(spec, "alias")
                                    .map(|n| nav.node_text(n).to_string()),
                            });
                        }
                    }
                    _ => {}
                }
            }
            import.side_effect = node.kind() == "import_statement" && !saw_clause;
            import.name = import.module.clone().unwrap_or_default();
            imports.push(import);
        }
        imports
    }

    fn extract_functions(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawFunction> {
        let records = match nav.execute_query(root, FUNCTION_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript function query failed");
                return Vec::new();
            }
        };
        let mut functions = Vec::new();
        for record in records {
            let Some(func) = record.get("func") else { continue };
            if SyntaxNavigator::ancestor_of_kinds(func, SCOPE_KINDS).is_some() {
                continue;
            }
            let Some(name_node) = SyntaxNavigator::child_by_field(func, "name") else {
                continue;
            };
            let name = nav.node_text(name_node).to_string();
            let wrapper = Self::effective_node(func);
            let range = SyntaxNavigator::node_range(wrapper);
            functions.push(RawFunction {
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                parameters: Self::parameters_of(func, nav),
                return_info: Self::return_info_of(func, nav),
                decorators: Vec::new(),
                is_async: Self::has_child_of_kind(func, "async"),
                is_exported: Self::is_exported(func),
                name,
            });
        }
        functions
    }

    fn extract_classes(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawClass> {
        let records = match nav.execute_query(root, CLASS_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript class query failed");
                return Vec::new();
            }
        };
        let mut classes = Vec::new();
        for record in records {
            let Some(class) = record.get("class") else { continue };
            if SyntaxNavigator::ancestor_of_kinds(class, SCOPE_KINDS).is_some() {
                continue;
            }
            let Some(name_node) = SyntaxNavigator::child_by_field(class, "name") else {
                continue;
            };
            let name = nav.node_text(name_node).to_string();
            let (extends, implements) = Self::heritage_of(class, nav);
            let wrapper = Self::effective_node(class);
            let range = SyntaxNavigator::node_range(wrapper);
            classes.push(RawClass {
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                extends,
                implements,
                is_exported: Self::is_exported(class),
                decorators: Self::decorators_of(class, nav, &name),
                name,
            });
        }
        classes
    }

    fn extract_members(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawMember> {
        let records = match nav.execute_query(root, MEMBER_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript member query failed");
                return Vec::new();
            }
        };
        let mut members = Vec::new();
        for record in records {
            let Some(member) = record.get("member") else { continue };
            // Object-literal methods share the node kind; only class bodies count.
            if member.parent().map(|p| p.kind()) != Some("class_body") {
                continue;
            }
            let Some(parent_name) = Self::enclosing_class_name(member, nav) else {
                continue;
            };
            let Some(name_node) = SyntaxNavigator::child_by_field(member, "name") else {
                continue;
            };
            let name = nav.node_text(name_node).to_string();
            let kind = if Self::has_child_of_kind(member, "get") {
                ElementKind::PropertyGetter
            } else if Self::has_child_of_kind(member, "set") {
                ElementKind::PropertySetter
            } else {
                ElementKind::Method
            };
            let dotted = format!("{parent_name}.{name}");
            let range = SyntaxNavigator::node_range(member);
            let mut accessibility = None;
            let mut cursor = member.walk();
            for child in member.children(&mut cursor) {
                if child.kind() == "accessibility_modifier" {
                    accessibility = Some(nav.node_text(child).to_string());
                }
            }
            members.push(RawMember {
                kind,
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                parameters: Self::parameters_of(member, nav),
                return_info: Self::return_info_of(member, nav),
                decorators: Self::decorators_of(member, nav, &dotted),
                is_static: Self::has_child_of_kind(member, "static"),
                is_async: Self::has_child_of_kind(member, "async"),
                accessibility,
                name,
                parent_name,
            });
        }
        members
    }

    fn extract_property_fields(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawPropertyField> {
        let mut fields = Vec::new();
        for (node, name, parent_name) in self.class_fields(root, nav) {
            if Self::has_child_of_kind(node, "static") {
                continue;
            }
            let range = SyntaxNavigator::node_range(node);
            let value_node = SyntaxNavigator::child_by_field(node, "value");
            fields.push(RawPropertyField {
                name,
                parent_name,
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                value_type: SyntaxNavigator::child_by_field(node, "type")
                    .map(|n| Self::annotation_text(n, nav))
                    .or_else(|| {
                        value_node
                            .and_then(|v| infer_literal_type(v.kind(), nav.node_text(v)))
                            .map(str::to_string)
                    }),
                raw_value: value_node.map(|v| nav.node_text(v).to_string()),
                is_readonly: Self::has_child_of_kind(node, "readonly"),
                is_optional: Self::has_child_of_kind(node, "?"),
            });
        }
        fields
    }

    fn extract_static_fields(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawStaticField> {
        let mut fields = Vec::new();
        for (node, name, parent_name) in self.class_fields(root, nav) {
            if !Self::has_child_of_kind(node, "static") {
                continue;
            }
            if name.starts_with('_') {
                continue;
            }
            let range = SyntaxNavigator::node_range(node);
            let value_node = SyntaxNavigator::child_by_field(node, "value");
            fields.push(RawStaticField {
                name,
                parent_name,
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                value_type: SyntaxNavigator::child_by_field(node, "type")
                    .map(|n| Self::annotation_text(n, nav))
                    .or_else(|| {
                        value_node
                            .and_then(|v| infer_literal_type(v.kind(), nav.node_text(v)))
                            .map(str::to_string)
                    }),
                raw_value: value_node.map(|v| nav.node_text(v).to_string()),
                is_readonly: Self::has_child_of_kind(node, "readonly"),
            });
        }
        fields
    }

    fn extract_decorators(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawDecorator> {
        let records = match nav.execute_query(root, DECORATOR_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript decorator query failed");
                return Vec::new();
            }
        };
        let mut decorators = Vec::new();
        for record in records {
            let Some(decorator) = record.get("decorator") else { continue };
            let parent_name = decorator.parent().and_then(|owner| match owner.kind() {
                "class_declaration" | "abstract_class_declaration" => {
                    SyntaxNavigator::child_by_field(owner, "name")
                        .map(|n| nav.node_text(n).to_string())
                }
                "method_definition" | "public_field_definition" => {
                    let class = Self::enclosing_class_name(owner, nav)?;
                    let name = SyntaxNavigator::child_by_field(owner, "name")
                        .map(|n| nav.node_text(n).to_string())?;
                    Some(format!("{class}.{name}"))
                }
                _ => None,
            });
            decorators.push(Self::decorator_record(decorator, nav, parent_name));
        }
        decorators
    }

    fn extract_interfaces(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawInterface> {
        let records = match nav.execute_query(root, INTERFACE_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript interface query failed");
                return Vec::new();
            }
        };
        let mut interfaces = Vec::new();
        for record in records {
            let Some(node) = record.get("interface") else { continue };
            if SyntaxNavigator::ancestor_of_kinds(node, SCOPE_KINDS).is_some() {
                continue;
            }
            let Some(name_node) = SyntaxNavigator::child_by_field(node, "name") else {
                continue;
            };
            let mut extends = Vec::new();
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind().contains("extends") {
                    let mut clause_cursor = child.walk();
                    for item in child.named_children(&mut clause_cursor) {
                        extends.push(nav.node_text(item).to_string());
                    }
                }
            }
            let wrapper = Self::effective_node(node);
            let range = SyntaxNavigator::node_range(wrapper);
            interfaces.push(RawInterface {
                name: nav.node_text(name_node).to_string(),
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                extends,
                is_exported: Self::is_exported(node),
            });
        }
        interfaces
    }

    fn extract_enums(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawEnum> {
        let records = match nav.execute_query(root, ENUM_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript enum query failed");
                return Vec::new();
            }
        };
        let mut enums = Vec::new();
        for record in records {
            let Some(node) = record.get("enum") else { continue };
            if SyntaxNavigator::ancestor_of_kinds(node, SCOPE_KINDS).is_some() {
                continue;
            }
            let Some(name_node) = SyntaxNavigator::child_by_field(node, "name") else {
                continue;
            };
            let mut members = Vec::new();
            if let Some(body) = SyntaxNavigator::child_by_field(node, "body") {
                let mut cursor = body.walk();
                for entry in body.named_children(&mut cursor) {
                    let range = SyntaxNavigator::node_range(entry);
                    let content = nav.slice_lines(range.start_line, range.end_line);
                    let member = match entry.kind() {
                        "property_identifier" => RawEnumMember {
                            name: nav.node_text(entry).to_string(),
                            content,
                            range,
                            value: None,
                        },
                        "enum_assignment" => RawEnumMember {
                            name: SyntaxNavigator::child_by_field(entry, "name")
                                .map(|n| nav.node_text(n).to_string())
                                .unwrap_or_default(),
                            content,
                            range,
                            value: SyntaxNavigator::child_by_field(entry, "value")
                                .map(|n| nav.node_text(n).to_string()),
                        },
                        _ => continue,
                    };
                    members.push(member);
                }
            }
            let wrapper = Self::effective_node(node);
            let range = SyntaxNavigator::node_range(wrapper);
            enums.push(RawEnum {
                name: nav.node_text(name_node).to_string(),
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                members,
                is_const: Self::has_child_of_kind(node, "const"),
                is_exported: Self::is_exported(node),
            });
        }
        enums
    }

    fn extract_type_aliases(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawTypeAlias> {
        let records = match nav.execute_query(root, TYPE_ALIAS_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript type alias query failed");
                return Vec::new();
            }
        };
        let mut aliases = Vec::new();
        for record in records {
            let Some(node) = record.get("alias") else { continue };
            if SyntaxNavigator::ancestor_of_kinds(node, SCOPE_KINDS).is_some() {
                continue;
            }
            let Some(name_node) = SyntaxNavigator::child_by_field(node, "name") else {
                continue;
            };
            let wrapper = Self::effective_node(node);
            let range = SyntaxNavigator::node_range(wrapper);
            aliases.push(RawTypeAlias {
                name: nav.node_text(name_node).to_string(),
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                value_type: SyntaxNavigator::child_by_field(node, "value")
                    .map(|n| nav.node_text(n).to_string()),
                is_exported: Self::is_exported(node),
            });
        }
        aliases
    }

    fn extract_namespaces(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawNamespace> {
        let records = match nav.execute_query(root, NAMESPACE_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript namespace query failed");
                return Vec::new();
            }
        };
        let mut namespaces = Vec::new();
        for record in records {
            let Some(node) = record.get("ns") else { continue };
            let Some(name_node) = SyntaxNavigator::child_by_field(node, "name") else {
                continue;
            };
            // Dotted path of enclosing namespaces, innermost last.
            let mut chain = Vec::new();
            let mut current = node.parent();
            while let Some(ancestor) = current {
                if ancestor.kind() == "internal_module" {
                    if let Some(n) = SyntaxNavigator::child_by_field(ancestor, "name") {
                        chain.push(nav.node_text(n).to_string());
                    }
                }
                current = ancestor.parent();
            }
            chain.reverse();
            let wrapper = Self::effective_node(node);
            let range = SyntaxNavigator::node_range(wrapper);
            namespaces.push(RawNamespace {
                name: nav.node_text(name_node).to_string(),
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                parent_name: if chain.is_empty() {
                    None
                } else {
                    Some(chain.join("."))
                },
                is_exported: Self::is_exported(node),
            });
        }
        namespaces
    }

    fn locate_query(
        &self,
        kind: ElementKind,
        name: Option<&str>,
        parent: Option<&str>,
    ) -> Option<String> {
        let name_pred = eq_predicate("name", name);
        let parent_pred = eq_predicate("parent", parent);
        let query = match kind {
            ElementKind::Class => format!(
                r#"([
  (class_declaration name: (type_identifier) @name) @target
  (abstract_class_declaration name: (type_identifier) @name) @target
]{name_pred})"#
            ),
            ElementKind::Interface => format!(
                r#"((interface_declaration name: (type_identifier) @name) @target{name_pred})"#
            ),
            ElementKind::Function => format!(
                r#"([
  (function_declaration name: (identifier) @name) @target
  (generator_function_declaration name: (identifier) @name) @target
]{name_pred})"#
            ),
            ElementKind::Method | ElementKind::PropertyGetter | ElementKind::PropertySetter => {
                format!(
                    r#"((class_declaration
  name: (type_identifier) @parent
  body: (class_body
    (method_definition name: (property_identifier) @name) @target)){parent_pred}{name_pred})"#
                )
            }
            ElementKind::StaticField | ElementKind::PropertyField => format!(
                r#"((class_declaration
  name: (type_identifier) @parent
  body: (class_body
    (public_field_definition name: (property_identifier) @name) @target)){parent_pred}{name_pred})"#
            ),
            ElementKind::Enum => format!(
                r#"((enum_declaration name: (identifier) @name) @target{name_pred})"#
            ),
            ElementKind::TypeAlias => format!(
                r#"((type_alias_declaration name: (type_identifier) @name) @target{name_pred})"#
            ),
            ElementKind::Namespace => format!(
                r#"((internal_module name: (identifier) @name) @target{name_pred})"#
            ),
            ElementKind::ImportItem => "((import_statement) @target)".to_string(),
            _ => return None,
        };
        Some(query)
    }
}

impl TypeScriptExtractor {
    /// Shared walk for `public_field_definition` nodes with their class.
    fn class_fields<'t>(
        &self,
        root: Node<'t>,
        nav: &SyntaxNavigator,
    ) -> Vec<(Node<'t>, String, String)> {
        let records = match nav.execute_query(root, FIELD_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "typescript field query failed");
                return Vec::new();
            }
        };
        let mut fields = Vec::new();
        for record in records {
            let Some(node) = record.get("field") else { continue };
            let Some(parent_name) = Self::enclosing_class_name(node, nav) else {
                continue;
            };
            let Some(name_node) = SyntaxNavigator::child_by_field(node, "name") else {
                continue;
            };
            fields.push((node, nav.node_text(name_node).to_string(), parent_name));
        }
        fields
    }
}
