//! TypeScript post-processor.
//!
//! No implicit receiver, so parameters pass through unchanged. Adds the
//! language extras: interfaces, enums, type aliases, and namespace nesting.

use serde_json::json;

use super::common;
use super::{sort_top_level, PostProcessor};
use crate::features::extraction::raw::{
    RawBundle, RawClass, RawDecorator, RawEnum, RawFunction, RawImport, RawInterface, RawMember,
    RawNamespace, RawPropertyField, RawStaticField, RawTypeAlias,
};
use crate::shared::models::{attr, Element, ElementKind, ElementTree};

const SKIP_RECEIVERS: bool = false;

pub struct TypeScriptPostProcessor;

impl TypeScriptPostProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process_interfaces(&self, raw_interfaces: &[RawInterface]) -> Vec<Element> {
        let mut interfaces = Vec::new();
        for raw in raw_interfaces {
            if raw.name.is_empty() || !raw.range.is_valid() {
                tracing::warn!("skipping malformed interface record");
                continue;
            }
            let mut element = Element::new(ElementKind::Interface, &raw.name, &raw.content)
                .with_range(raw.range);
            if !raw.extends.is_empty() {
                element = element.with_attr(attr::EXTENDS, json!(raw.extends));
            }
            if raw.is_exported {
                element = element.with_attr(attr::IS_EXPORTED, true);
            }
            interfaces.push(element);
        }
        interfaces
    }

    pub fn process_enums(&self, raw_enums: &[RawEnum]) -> Vec<Element> {
        let mut enums = Vec::new();
        for raw in raw_enums {
            if raw.name.is_empty() || !raw.range.is_valid() {
                tracing::warn!("skipping malformed enum record");
                continue;
            }
            let mut element =
                Element::new(ElementKind::Enum, &raw.name, &raw.content).with_range(raw.range);
            if raw.is_const {
                element = element.with_attr(attr::IS_CONST, true);
            }
            if raw.is_exported {
                element = element.with_attr(attr::IS_EXPORTED, true);
            }
            for member in &raw.members {
                if member.name.is_empty() {
                    continue;
                }
                let mut child =
                    Element::new(ElementKind::EnumMember, &member.name, &member.content)
                        .with_range(member.range)
                        .with_parent_name(&raw.name);
                if let Some(value) = &member.value {
                    child = child.with_attr(attr::RAW_VALUE, value.clone());
                }
                element.children.push(child);
            }
            enums.push(element);
        }
        enums
    }

    pub fn process_type_aliases(&self, raw_aliases: &[RawTypeAlias]) -> Vec<Element> {
        let mut aliases = Vec::new();
        for raw in raw_aliases {
            if raw.name.is_empty() || !raw.range.is_valid() {
                tracing::warn!("skipping malformed type alias record");
                continue;
            }
            let mut element = Element::new(ElementKind::TypeAlias, &raw.name, &raw.content)
                .with_range(raw.range);
            if let Some(value_type) = &raw.value_type {
                element = element.with_value_type(value_type.clone());
            }
            if raw.is_exported {
                element = element.with_attr(attr::IS_EXPORTED, true);
            }
            aliases.push(element);
        }
        aliases
    }

    /// Namespaces nest by their dotted parent path; only roots surface at
    /// the top level.
    pub fn process_namespaces(&self, raw_namespaces: &[RawNamespace]) -> Vec<Element> {
        self.namespaces_under(raw_namespaces, None)
    }

    fn namespaces_under(
        &self,
        records: &[RawNamespace],
        parent: Option<&str>,
    ) -> Vec<Element> {
        let mut namespaces = Vec::new();
        for raw in records
            .iter()
            .filter(|r| r.parent_name.as_deref() == parent)
        {
            if raw.name.is_empty() || !raw.range.is_valid() {
                tracing::warn!("skipping malformed namespace record");
                continue;
            }
            let path = match &raw.parent_name {
                Some(parent_path) => format!("{parent_path}.{}", raw.name),
                None => raw.name.clone(),
            };
            let mut element = Element::new(ElementKind::Namespace, &raw.name, &raw.content)
                .with_range(raw.range);
            if let Some(parent_path) = &raw.parent_name {
                element = element.with_parent_name(parent_path.clone());
            }
            if raw.is_exported {
                element = element.with_attr(attr::IS_EXPORTED, true);
            }
            element.children = self.namespaces_under(records, Some(&path));
            namespaces.push(element);
        }
        namespaces
    }
}

impl Default for TypeScriptPostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessor for TypeScriptPostProcessor {
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
        elements.extend(self.process_interfaces(&bundle.interfaces));
        elements.extend(self.process_enums(&bundle.enums));
        elements.extend(self.process_type_aliases(&bundle.type_aliases));
        elements.extend(self.process_namespaces(&bundle.namespaces));
        sort_top_level(&mut elements);
        ElementTree::new(elements)
    }
}
