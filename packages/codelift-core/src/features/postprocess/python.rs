//! Python post-processor.
//!
//! Python methods carry an implicit receiver, so `self`/`cls` parameters are
//! filtered from the synthesized parameter children.

use super::common;
use super::{sort_top_level, PostProcessor};
use crate::features::extraction::raw::{
    RawBundle, RawClass, RawDecorator, RawFunction, RawImport, RawMember, RawPropertyField,
    RawStaticField,
};
use crate::shared::models::{Element, ElementTree};

const SKIP_RECEIVERS: bool = true;

pub struct PythonPostProcessor;

impl PythonPostProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonPostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessor for PythonPostProcessor {
    fn process_imports(&self, raw_imports: &[RawImport], source: Option<&str>) -> Vec<Element> {
        common::combine_imports(raw_imports, source)
    }

    fn process_functions(
        &self,
        raw_functions: &[RawFunction],
        all_decorators: &[RawDecorator],
    ) -> Vec<Element> {
        let lookup = common::build_decorator_lookup(all_decorators);
        raw_functions
            .iter()
            .filter_map(|raw| common::function_element(raw, &lookup, SKIP_RECEIVERS))
            .collect()
    }

    fn process_classes(
        &self,
        raw_classes: &[RawClass],
        members: &[RawMember],
        static_fields: &[RawStaticField],
        property_fields: &[RawPropertyField],
        all_decorators: &[RawDecorator],
    ) -> Vec<Element> {
        common::assemble_classes(
            raw_classes,
            members,
            static_fields,
            property_fields,
            all_decorators,
            SKIP_RECEIVERS,
        )
    }

    fn process_all(&self, bundle: &RawBundle, source: &str) -> ElementTree {
        let mut elements = Vec::new();
        elements.extend(self.process_imports(&bundle.imports, Some(source)));
        elements.extend(self.process_functions(&bundle.functions, &bundle.decorators));
        elements.extend(self.process_classes(
            &bundle.classes,
            &bundle.members,
            &bundle.static_fields,
            &bundle.property_fields,
            &bundle.decorators,
        ));
        sort_top_level(&mut elements);
        ElementTree::new(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{attr, ElementKind, Range};

    fn raw_member(kind: ElementKind, name: &str, line: u32) -> RawMember {
        RawMember {
            kind,
            name: name.to_string(),
            parent_name: "C".to_string(),
            content: format!("def {name}(self): ..."),
            range: Range::new(line, line),
            parameters: vec![crate::features::extraction::raw::RawParameter {
                name: "self".to_string(),
                ..Default::default()
            }],
            return_info: Default::default(),
            decorators: Vec::new(),
            is_static: false,
            is_async: false,
            accessibility: None,
        }
    }

    fn raw_class(name: &str) -> RawClass {
        RawClass {
            name: name.to_string(),
            content: format!("class {name}: ..."),
            range: Range::new(1, 20),
            extends: Vec::new(),
            implements: Vec::new(),
            is_exported: false,
            decorators: Vec::new(),
        }
    }

    #[test]
    fn test_receiver_parameters_filtered() {
        let processor = PythonPostProcessor::new();
        let classes = processor.process_classes(
            &[raw_class("C")],
            &[raw_member(ElementKind::Method, "m", 5)],
            &[],
            &[],
            &[],
        );
        let method = classes[0].child(ElementKind::Method, "m").unwrap();
        assert_eq!(method.parameters().count(), 0);
    }

    #[test]
    fn test_static_field_shadowed_by_member_is_dropped() {
        let processor = PythonPostProcessor::new();
        let statics = vec![RawStaticField {
            name: "m".to_string(),
            parent_name: "C".to_string(),
            content: "m = 1".to_string(),
            range: Range::new(2, 2),
            value_type: Some("int".to_string()),
            raw_value: Some("1".to_string()),
            is_readonly: false,
        }];
        let classes = processor.process_classes(
            &[raw_class("C")],
            &[raw_member(ElementKind::Method, "m", 5)],
            &statics,
            &[],
            &[],
        );
        assert_eq!(classes[0].children.len(), 1);
        assert_eq!(classes[0].children[0].kind, ElementKind::Method);
    }

    #[test]
    fn test_instance_field_wins_over_static_field() {
        let processor = PythonPostProcessor::new();
        let statics = vec![RawStaticField {
            name: "count".to_string(),
            parent_name: "C".to_string(),
            content: "count = 0".to_string(),
            range: Range::new(2, 2),
            value_type: Some("int".to_string()),
            raw_value: Some("0".to_string()),
            is_readonly: false,
        }];
        let props = vec![RawPropertyField {
            name: "count".to_string(),
            parent_name: "C".to_string(),
            content: "self.count = 0".to_string(),
            range: Range::new(4, 4),
            value_type: None,
            raw_value: Some("0".to_string()),
            is_readonly: false,
            is_optional: false,
        }];
        let classes =
            processor.process_classes(&[raw_class("C")], &[], &statics, &props, &[]);
        assert_eq!(classes[0].children.len(), 1);
        assert_eq!(classes[0].children[0].kind, ElementKind::PropertyField);
    }

    #[test]
    fn test_nameless_class_drops_only_itself() {
        let processor = PythonPostProcessor::new();
        let mut anonymous = raw_class("");
        anonymous.name = String::new();
        let classes =
            processor.process_classes(&[anonymous, raw_class("Kept")], &[], &[], &[], &[]);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Kept");
    }

    #[test]
    fn test_process_all_orders_by_start_line() {
        let processor = PythonPostProcessor::new();
        let bundle = RawBundle {
            imports: vec![RawImport {
                name: "os".to_string(),
                content: "import os".to_string(),
                range: Some(Range::new(1, 1)),
                module: Some("os".to_string()),
                ..Default::default()
            }],
            classes: vec![raw_class("C")],
            ..Default::default()
        };
        let tree = processor.process_all(&bundle, "import os\n");
        assert_eq!(tree.elements[0].kind, ElementKind::ImportGroup);
        assert_eq!(tree.elements[1].kind, ElementKind::Class);
        assert!(tree.elements[0]
            .attributes
            .contains_key(attr::INDIVIDUAL_IMPORTS));
    }
}
