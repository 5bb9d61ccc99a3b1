//! Python raw extractor.
//!
//! Works over the tree-sitter-python grammar. Callables are split into
//! functions and members by walking scope ancestors; a `decorated_definition`
//! wrapper widens a definition's range to include its decorators.

use tree_sitter::Node;

use super::raw::{
    infer_literal_type, ImportSpecifier, RawClass, RawDecorator, RawFunction, RawImport,
    RawMember, RawParameter, RawPropertyField, RawReturnInfo, RawStaticField,
};
use super::{eq_predicate, RawExtractor};
use crate::features::navigation::SyntaxNavigator;
use crate::shared::models::ElementKind;

const CLASS_LIKE: &[&str] = &["class_definition"];
const SCOPE_KINDS: &[&str] = &["class_definition", "function_definition"];

const IMPORT_QUERY: &str = "[(import_statement) (import_from_statement)] @import";
const FUNCTION_QUERY: &str = "(function_definition) @func";
const CLASS_QUERY: &str = "(class_definition) @class";
const DECORATOR_QUERY: &str = "(decorator) @decorator";

const STATIC_FIELD_QUERY: &str = r#"
(class_definition
  body: (block
    (expression_statement
      (assignment left: (identifier) @name) @assign)))
"#;

const PROPERTY_FIELD_QUERY: &str = r#"
(function_definition
  name: (identifier) @fname
  body: (block
    (expression_statement
      (assignment
        left: (attribute
          object: (identifier) @obj
          attribute: (identifier) @name)) @assign))
  (#eq? @fname "__init__") (#eq? @obj "self"))
"#;

pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Widen a definition to its `decorated_definition` wrapper, if any.
    fn effective_node<'t>(node: Node<'t>) -> Node<'t> {
        match node.parent() {
            Some(parent) if parent.kind() == "decorated_definition" => parent,
            _ => node,
        }
    }

    fn enclosing_class_name(node: Node, nav: &SyntaxNavigator) -> Option<String> {
        let class = SyntaxNavigator::ancestor_of_kinds(node, CLASS_LIKE)?;
        let name = SyntaxNavigator::child_by_field(class, "name")?;
        Some(nav.node_text(name).to_string())
    }

    fn is_async(node: Node) -> bool {
        let mut cursor = node.walk();
        let result = node.children(&mut cursor).any(|c| c.kind() == "async");
        result
    }

    fn decorator_record(
        decorator: Node,
        nav: &SyntaxNavigator,
        parent_name: Option<String>,
    ) -> RawDecorator {
        let expr = decorator.named_child(0);
        let (name, arguments) = match expr {
            Some(expr) if expr.kind() == "call" => {
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
        if node.kind() != "decorated_definition" {
            return Vec::new();
        }
        let mut cursor = node.walk();
        let decorators = node
            .children(&mut cursor)
            .filter(|c| c.kind() == "decorator")
            .map(|c| Self::decorator_record(c, nav, Some(parent_name.to_string())))
            .collect();
        decorators
    }

    fn parameters_of(func: Node, nav: &SyntaxNavigator) -> Vec<RawParameter> {
        let Some(params) = SyntaxNavigator::child_by_field(func, "parameters") else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut cursor = params.walk();
        for child in params.named_children(&mut cursor) {
            let param = match child.kind() {
                "identifier" => RawParameter {
                    name: nav.node_text(child).to_string(),
                    ..Default::default()
                },
                "typed_parameter" => RawParameter {
                    name: child
                        .named_child(0)
                        .map(|n| nav.node_text(n).to_string())
                        .unwrap_or_default(),
                    value_type: SyntaxNavigator::child_by_field(child, "type")
                        .map(|n| nav.node_text(n).to_string()),
                    ..Default::default()
                },
                "default_parameter" => {
                    let default = SyntaxNavigator::child_by_field(child, "value")
                        .map(|n| nav.node_text(n).to_string());
                    RawParameter {
                        name: SyntaxNavigator::child_by_field(child, "name")
                            .map(|n| nav.node_text(n).to_string())
                            .unwrap_or_default(),
                        optional: default.is_some(),
                        default,
                        ..Default::default()
                    }
                }
                "typed_default_parameter" => {
                    let default = SyntaxNavigator::child_by_field(child, "value")
                        .map(|n| nav.node_text(n).to_string());
                    RawParameter {
                        name: SyntaxNavigator::child_by_field(child, "name")
                            .map(|n| nav.node_text(n).to_string())
                            .unwrap_or_default(),
                        value_type: SyntaxNavigator::child_by_field(child, "type")
                            .map(|n| nav.node_text(n).to_string()),
                        optional: default.is_some(),
                        default,
                        ..Default::default()
                    }
                }
                "list_splat_pattern" | "dictionary_splat_pattern" => RawParameter {
                    name: nav.node_text(child).to_string(),
                    ..Default::default()
                },
                _ => continue,
            };
            if !param.name.is_empty() {
                out.push(param);
            }
        }
        out
    }

    fn return_info_of(func: Node, nav: &SyntaxNavigator) -> RawReturnInfo {
        let annotation = SyntaxNavigator::child_by_field(func, "return_type")
            .map(|n| nav.node_text(n).to_string());
        let mut values = Vec::new();
        if let Some(body) = SyntaxNavigator::child_by_field(func, "body") {
            Self::collect_returns(body, nav, &mut values);
        }
        RawReturnInfo { annotation, values }
    }

    /// Collect `return <expr>` texts without descending into nested scopes.
    fn collect_returns(node: Node, nav: &SyntaxNavigator, out: &mut Vec<String>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "function_definition" | "class_definition" | "lambda" => continue,
                "return_statement" => {
                    if let Some(value) = child.named_child(0) {
                        out.push(nav.node_text(value).to_string());
                    }
                }
                _ => Self::collect_returns(child, nav, out),
            }
        }
    }

    /// Classify a member by its decorator list.
    fn member_kind(name: &str, decorators: &[RawDecorator]) -> ElementKind {
        let setter_name = format!("{name}.setter");
        if decorators.iter().any(|d| d.name == setter_name) {
            ElementKind::PropertySetter
        } else if decorators.iter().any(|d| d.name == "property") {
            ElementKind::PropertyGetter
        } else {
            ElementKind::Method
        }
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RawExtractor for PythonExtractor {
    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_python::language()
    }

    fn class_like_node_kinds(&self) -> &'static [&'static str] {
        CLASS_LIKE
    }

    fn extract_imports(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawImport> {
        let records = match nav.execute_query(root, IMPORT_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "python import query failed");
                return Vec::new();
            }
        };
        let mut imports = Vec::new();
        for record in records {
            let Some(node) = record.get("import") else { continue };
            let range = SyntaxNavigator::node_range(node);
            let content = nav.slice_lines(range.start_line, range.end_line);
            let mut import = RawImport {
                content,
                range: Some(range),
                ..Default::default()
            };
            if node.kind() == "import_statement" {
                // `import a.b` or `import a.b as c`
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    match child.kind() {
                        "dotted_name" => {
                            import.module = Some(nav.node_text(child).to_string());
                        }
                        "aliased_import" => {
                            import.module = SyntaxNavigator::child_by_field(child, "name")
                                .map(|n| nav.node_text(n).to_string());
                            import.alias = SyntaxNavigator::child_by_field(child, "alias")
                                .map(|n| nav.node_text(n).to_string());
                        }
                        _ => {}
                    }
                }
            } else {
                // `from x import y, z as w`
                import.module = SyntaxNavigator::child_by_field(node, "module_name")
                    .map(|n| nav.node_text(n).to_string());
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if Some(child) == SyntaxNavigator::child_by_field(node, "module_name") {
                        continue;
                    }
                    match child.kind() {
                        "dotted_name" | "identifier" => import.named.push(ImportSpecifier {
                            name: nav.node_text(child).to_string(),
                            alias: None,
                        }),
                        "aliased_import" => import.named.push(ImportSpecifier {
                            name: SyntaxNavigator::child_by_field(child, "name")
                                .map(|n| nav.node_text(n).to_string())
                                .unwrap_or_default(),
                            alias: SyntaxNavigator::child_by_field(child, "alias")
                                .map(|n| nav.node_text(n).to_string()),
                        }),
                        "wildcard_import" => import.named.push(ImportSpecifier {
                            name: "*".to_string(),
                            alias: None,
                        }),
                        _ => {}
                    }
                }
            }
            import.name = import.module.clone().unwrap_or_default();
            imports.push(import);
        }
        imports
    }

    fn extract_functions(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawFunction> {
        let records = match nav.execute_query(root, FUNCTION_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "python function query failed");
                return Vec::new();
            }
        };
        let mut functions = Vec::new();
        for record in records {
            let Some(func) = record.get("func") else { continue };
            if SyntaxNavigator::ancestor_of_kinds(func, SCOPE_KINDS).is_some() {
                continue; // method or nested function
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
                decorators: Self::decorators_of(wrapper, nav, &name),
                is_async: Self::is_async(func),
                is_exported: false,
                name,
            });
        }
        functions
    }

    fn extract_classes(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawClass> {
        let records = match nav.execute_query(root, CLASS_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "python class query failed");
                return Vec::new();
            }
        };
        let mut classes = Vec::new();
        for record in records {
            let Some(class) = record.get("class") else { continue };
            if SyntaxNavigator::ancestor_of_kinds(class, SCOPE_KINDS).is_some() {
                continue; // nested classes travel inside their container's content
            }
            let Some(name_node) = SyntaxNavigator::child_by_field(class, "name") else {
                continue;
            };
            let name = nav.node_text(name_node).to_string();
            let mut extends = Vec::new();
            if let Some(bases) = SyntaxNavigator::child_by_field(class, "superclasses") {
                let mut cursor = bases.walk();
                for base in bases.named_children(&mut cursor) {
                    if matches!(base.kind(), "identifier" | "attribute" | "subscript") {
                        extends.push(nav.node_text(base).to_string());
                    }
                }
            }
            let wrapper = Self::effective_node(class);
            let range = SyntaxNavigator::node_range(wrapper);
            classes.push(RawClass {
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                extends,
                implements: Vec::new(),
                is_exported: false,
                decorators: Self::decorators_of(wrapper, nav, &name),
                name,
            });
        }
        classes
    }

    fn extract_members(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawMember> {
        let records = match nav.execute_query(root, FUNCTION_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "python member query failed");
                return Vec::new();
            }
        };
        let mut members = Vec::new();
        for record in records {
            let Some(func) = record.get("func") else { continue };
            let Some(scope) = SyntaxNavigator::ancestor_of_kinds(func, SCOPE_KINDS) else {
                continue;
            };
            if scope.kind() != "class_definition" {
                continue; // nested function, not a member
            }
            let Some(parent_name) = Self::enclosing_class_name(func, nav) else {
                continue;
            };
            let Some(name_node) = SyntaxNavigator::child_by_field(func, "name") else {
                continue;
            };
            let name = nav.node_text(name_node).to_string();
            let wrapper = Self::effective_node(func);
            let dotted = format!("{parent_name}.{name}");
            let decorators = Self::decorators_of(wrapper, nav, &dotted);
            let range = SyntaxNavigator::node_range(wrapper);
            members.push(RawMember {
                kind: Self::member_kind(&name, &decorators),
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                parameters: Self::parameters_of(func, nav),
                return_info: Self::return_info_of(func, nav),
                decorators,
                is_static: false,
                is_async: Self::is_async(func),
                accessibility: None,
                name,
                parent_name,
            });
        }
        members
    }

    fn extract_property_fields(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawPropertyField> {
        let records = match nav.execute_query(root, PROPERTY_FIELD_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "python property field query failed");
                return Vec::new();
            }
        };
        let mut fields = Vec::new();
        for record in records {
            let (Some(assign), Some(name_node)) = (record.get("assign"), record.get("name"))
            else {
                continue;
            };
            let Some(parent_name) = Self::enclosing_class_name(assign, nav) else {
                continue;
            };
            let range = SyntaxNavigator::node_range(assign);
            fields.push(RawPropertyField {
                name: nav.node_text(name_node).to_string(),
                parent_name,
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                value_type: SyntaxNavigator::child_by_field(assign, "type")
                    .map(|n| nav.node_text(n).to_string()),
                raw_value: SyntaxNavigator::child_by_field(assign, "right")
                    .map(|n| nav.node_text(n).to_string()),
                is_readonly: false,
                is_optional: false,
            });
        }
        fields
    }

    fn extract_static_fields(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawStaticField> {
        let records = match nav.execute_query(root, STATIC_FIELD_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "python static field query failed");
                return Vec::new();
            }
        };
        let mut fields = Vec::new();
        for record in records {
            let (Some(assign), Some(name_node)) = (record.get("assign"), record.get("name"))
            else {
                continue;
            };
            let name = nav.node_text(name_node).to_string();
            if name.starts_with('_') {
                continue; // private by convention
            }
            let Some(parent_name) = Self::enclosing_class_name(assign, nav) else {
                continue;
            };
            let value_node = SyntaxNavigator::child_by_field(assign, "right");
            let annotated = SyntaxNavigator::child_by_field(assign, "type")
                .map(|n| nav.node_text(n).to_string());
            let inferred = value_node
                .and_then(|v| infer_literal_type(v.kind(), nav.node_text(v)))
                .map(str::to_string);
            let range = SyntaxNavigator::node_range(assign);
            fields.push(RawStaticField {
                name,
                parent_name,
                content: nav.slice_lines(range.start_line, range.end_line),
                range,
                value_type: annotated.or(inferred),
                raw_value: value_node.map(|v| nav.node_text(v).to_string()),
                is_readonly: false,
            });
        }
        fields
    }

    fn extract_decorators(&self, root: Node, nav: &SyntaxNavigator) -> Vec<RawDecorator> {
        let records = match nav.execute_query(root, DECORATOR_QUERY) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "python decorator query failed");
                return Vec::new();
            }
        };
        let mut decorators = Vec::new();
        for record in records {
            let Some(decorator) = record.get("decorator") else { continue };
            let parent_name = decorator
                .parent()
                .filter(|p| p.kind() == "decorated_definition")
                .and_then(|wrapper| SyntaxNavigator::child_by_field(wrapper, "definition"))
                .and_then(|def| {
                    let name = SyntaxNavigator::child_by_field(def, "name")
                        .map(|n| nav.node_text(n).to_string())?;
                    if def.kind() == "function_definition" {
                        Some(match Self::enclosing_class_name(def, nav) {
                            Some(class) => format!("{class}.{name}"),
                            None => name,
                        })
                    } else {
                        Some(name)
                    }
                });
            decorators.push(Self::decorator_record(decorator, nav, parent_name));
        }
        decorators
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
  (class_definition name: (identifier) @name) @target
  (decorated_definition (class_definition name: (identifier) @name)) @target
]{name_pred})"#
            ),
            ElementKind::Function => format!(
                r#"((module [
  (function_definition name: (identifier) @name) @target
  (decorated_definition (function_definition name: (identifier) @name)) @target
]){name_pred})"#
            ),
            ElementKind::Method | ElementKind::PropertyGetter | ElementKind::PropertySetter => {
                format!(
                    r#"((class_definition
  name: (identifier) @parent
  body: (block [
    (function_definition name: (identifier) @name) @target
    (decorated_definition (function_definition name: (identifier) @name)) @target
  ])){parent_pred}{name_pred})"#
                )
            }
            ElementKind::StaticField => format!(
                r#"((class_definition
  name: (identifier) @parent
  body: (block
    (expression_statement
      (assignment left: (identifier) @name) @target))){parent_pred}{name_pred})"#
            ),
            ElementKind::PropertyField => format!(
                r#"((class_definition
  name: (identifier) @parent
  body: (block
    (function_definition
      name: (identifier) @ctor
      body: (block
        (expression_statement
          (assignment
            left: (attribute
              object: (identifier) @obj
              attribute: (identifier) @name)) @target)))))
 (#eq? @ctor "__init__") (#eq? @obj "self"){parent_pred}{name_pred})"#
            ),
            ElementKind::ImportItem => {
                "[(import_statement) (import_from_statement)] @target".to_string()
            }
            _ => return None,
        };
        Some(query)
    }
}
