//! Builders shared by the language post-processors.

use rustc_hash::FxHashMap;
use serde_json::{json, Value};

use crate::features::extraction::raw::{
    RawClass, RawDecorator, RawFunction, RawImport, RawMember, RawParameter, RawPropertyField,
    RawReturnInfo, RawStaticField,
};
use crate::features::navigation::slice_lines;
use crate::shared::models::{attr, Element, ElementKind, Range};

/// Global decorator list keyed by the decorated element's dotted path.
pub(crate) fn build_decorator_lookup(
    all: &[RawDecorator],
) -> FxHashMap<String, Vec<RawDecorator>> {
    let mut lookup: FxHashMap<String, Vec<RawDecorator>> = FxHashMap::default();
    for decorator in all {
        if let Some(parent) = &decorator.parent_name {
            lookup.entry(parent.clone()).or_default().push(decorator.clone());
        }
    }
    lookup
}

pub(crate) fn decorator_element(raw: &RawDecorator) -> Element {
    let mut element = Element::new(ElementKind::Decorator, &raw.name, &raw.content)
        .with_range(raw.range);
    if let Some(parent) = &raw.parent_name {
        element = element.with_parent_name(parent.clone());
    }
    if let Some(arguments) = &raw.arguments {
        element = element.with_attr(attr::ARGUMENTS, arguments.clone());
    }
    element
}

/// Attach each decorator exactly once: the record's own list first, then the
/// global list under the element's dotted path, deduplicated by
/// `(name, start_line)`.
pub(crate) fn attach_decorators(
    element: &mut Element,
    own: &[RawDecorator],
    lookup: &FxHashMap<String, Vec<RawDecorator>>,
    dotted_path: &str,
) {
    let mut seen: Vec<(String, u32)> = Vec::new();
    for decorator in own {
        seen.push((decorator.name.clone(), decorator.range.start_line));
        element.children.push(decorator_element(decorator));
    }
    if let Some(global) = lookup.get(dotted_path) {
        for decorator in global {
            let key = (decorator.name.clone(), decorator.range.start_line);
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            element.children.push(decorator_element(decorator));
        }
    }
}

/// Synthesize parameter children. Implicit receivers are filtered when the
/// language marks methods receiver-bearing.
pub(crate) fn parameter_elements(
    parent_path: &str,
    params: &[RawParameter],
    skip_receivers: bool,
) -> Vec<Element> {
    params
        .iter()
        .filter(|p| !(skip_receivers && matches!(p.name.as_str(), "self" | "cls")))
        .map(|p| {
            let mut element = Element::new(ElementKind::Parameter, &p.name, &p.name)
                .with_parent_name(parent_path)
                .with_attr(attr::OPTIONAL, p.optional);
            if let Some(value_type) = &p.value_type {
                element = element.with_value_type(value_type.clone());
            }
            if let Some(default) = &p.default {
                element = element.with_attr(attr::DEFAULT, default.clone());
            }
            element
        })
        .collect()
}

/// Synthesize the return annotation child iff there is an annotation or at
/// least one observed return expression.
pub(crate) fn return_annotation_element(
    parent_path: &str,
    owner_name: &str,
    info: &RawReturnInfo,
) -> Option<Element> {
    if info.is_empty() {
        return None;
    }
    let annotation = info.annotation.clone().unwrap_or_default();
    let mut element = Element::new(
        ElementKind::ReturnAnnotation,
        format!("{owner_name}_return"),
        annotation.clone(),
    )
    .with_parent_name(parent_path)
    .with_attr(attr::VALUES, json!(info.values));
    if !annotation.is_empty() {
        element = element.with_value_type(annotation);
    }
    Some(element)
}

/// Child ordering: decorators lead, synthesized children follow them, then
/// range-bearing children ascending by start line.
pub(crate) fn sort_children(children: &mut [Element]) {
    children.sort_by_key(|child| {
        let group = match (child.kind, child.range) {
            (ElementKind::Decorator, _) => 0u8,
            (_, None) => 1,
            (_, Some(_)) => 2,
        };
        let line = child.range.map(|r| r.start_line).unwrap_or(0);
        (group, line)
    });
}

/// Combined-imports normalization shared by every language: one
/// `import_group` spanning the earliest through the latest import.
pub(crate) fn combine_imports(raw_imports: &[RawImport], source: Option<&str>) -> Vec<Element> {
    let mut valid: Vec<&RawImport> = raw_imports
        .iter()
        .filter(|imp| match imp.range {
            Some(range) if range.is_valid() => true,
            Some(_) => {
                tracing::warn!(name = %imp.name, "dropping import with invalid range");
                false
            }
            None => {
                tracing::warn!(name = %imp.name, "dropping import without range");
                false
            }
        })
        .collect();
    if valid.is_empty() {
        return Vec::new();
    }
    valid.sort_by_key(|imp| imp.range.map(|r| r.start_line).unwrap_or(u32::MAX));

    let first = valid.first().and_then(|imp| imp.range).unwrap_or_default();
    let last = valid.last().and_then(|imp| imp.range).unwrap_or_default();
    let combined = Range {
        start_line: first.start_line,
        end_line: last.end_line,
        start_column: first.start_column,
        end_column: last.end_column,
    };

    let content = match source {
        Some(text) => slice_lines(text, combined.start_line, combined.end_line),
        None => valid
            .iter()
            .map(|imp| imp.content.clone())
            .collect::<Vec<_>>()
            .join("\n"),
    };

    let individual: Vec<Value> = valid
        .iter()
        .map(|imp| serde_json::to_value(imp).unwrap_or(Value::Null))
        .collect();

    vec![Element::new(ElementKind::ImportGroup, "imports", content)
        .with_range(combined)
        .with_attr(attr::INDIVIDUAL_IMPORTS, Value::Array(individual))]
}

/// One function record into an element with its synthesized children.
pub(crate) fn function_element(
    raw: &RawFunction,
    lookup: &FxHashMap<String, Vec<RawDecorator>>,
    skip_receivers: bool,
) -> Option<Element> {
    if raw.name.is_empty() {
        tracing::warn!("skipping function without a name");
        return None;
    }
    if !raw.range.is_valid() {
        tracing::warn!(name = %raw.name, "skipping function with invalid range");
        return None;
    }
    let mut element = Element::new(ElementKind::Function, &raw.name, &raw.content)
        .with_range(raw.range);
    if raw.is_async {
        element = element.with_attr(attr::IS_ASYNC, true);
    }
    if raw.is_exported {
        element = element.with_attr(attr::IS_EXPORTED, true);
    }
    attach_decorators(&mut element, &raw.decorators, lookup, &raw.name);
    element
        .children
        .extend(parameter_elements(&raw.name, &raw.parameters, skip_receivers));
    if let Some(ret) = return_annotation_element(&raw.name, &raw.name, &raw.return_info) {
        element.children.push(ret);
    }
    sort_children(&mut element.children);
    Some(element)
}

/// One member record into an element: kind validation, decorator-driven
/// retyping, then the synthesized children.
pub(crate) fn member_element(
    raw: &RawMember,
    lookup: &FxHashMap<String, Vec<RawDecorator>>,
    skip_receivers: bool,
) -> Option<Element> {
    if raw.name.is_empty() {
        tracing::warn!(parent = %raw.parent_name, "skipping member without a name");
        return None;
    }
    if !raw.range.is_valid() {
        tracing::warn!(name = %raw.name, "skipping member with invalid range");
        return None;
    }
    let mut kind = match raw.kind {
        ElementKind::Method | ElementKind::PropertyGetter | ElementKind::PropertySetter => {
            raw.kind
        }
        other => {
            tracing::warn!(name = %raw.name, kind = %other, "member with non-member kind, defaulting to method");
            ElementKind::Method
        }
    };
    // Decorator-driven retyping; the setter form wins when both appear.
    let setter_name = format!("{}.setter", raw.name);
    if raw.decorators.iter().any(|d| d.name == setter_name) {
        kind = ElementKind::PropertySetter;
    } else if raw.decorators.iter().any(|d| d.name == "property") {
        kind = ElementKind::PropertyGetter;
    }

    let dotted = format!("{}.{}", raw.parent_name, raw.name);
    let mut element = Element::new(kind, &raw.name, &raw.content)
        .with_range(raw.range)
        .with_parent_name(&raw.parent_name);
    if raw.is_static {
        element = element.with_attr(attr::IS_STATIC, true);
    }
    if raw.is_async {
        element = element.with_attr(attr::IS_ASYNC, true);
    }
    if let Some(accessibility) = &raw.accessibility {
        element = element.with_attr(attr::ACCESSIBILITY, accessibility.clone());
    }
    attach_decorators(&mut element, &raw.decorators, lookup, &dotted);
    element
        .children
        .extend(parameter_elements(&dotted, &raw.parameters, skip_receivers));
    if let Some(ret) = return_annotation_element(&dotted, &raw.name, &raw.return_info) {
        element.children.push(ret);
    }
    sort_children(&mut element.children);
    Some(element)
}

pub(crate) fn property_field_element(raw: &RawPropertyField) -> Option<Element> {
    if raw.name.is_empty() || !raw.range.is_valid() {
        tracing::warn!(parent = %raw.parent_name, "skipping malformed property field");
        return None;
    }
    let mut element = Element::new(ElementKind::PropertyField, &raw.name, &raw.content)
        .with_range(raw.range)
        .with_parent_name(&raw.parent_name);
    if let Some(value_type) = &raw.value_type {
        element = element.with_value_type(value_type.clone());
    }
    if let Some(raw_value) = &raw.raw_value {
        element = element.with_attr(attr::RAW_VALUE, raw_value.clone());
    }
    if raw.is_readonly {
        element = element.with_attr(attr::IS_READONLY, true);
    }
    if raw.is_optional {
        element = element.with_attr(attr::IS_OPTIONAL, true);
    }
    Some(element)
}

pub(crate) fn static_field_element(raw: &RawStaticField) -> Option<Element> {
    if raw.name.is_empty() || !raw.range.is_valid() {
        tracing::warn!(parent = %raw.parent_name, "skipping malformed static field");
        return None;
    }
    let mut element = Element::new(ElementKind::StaticField, &raw.name, &raw.content)
        .with_range(raw.range)
        .with_parent_name(&raw.parent_name);
    if let Some(value_type) = &raw.value_type {
        element = element.with_value_type(value_type.clone());
    }
    if let Some(raw_value) = &raw.raw_value {
        element = element.with_attr(attr::RAW_VALUE, raw_value.clone());
    }
    if raw.is_readonly {
        element = element.with_attr(attr::IS_READONLY, true);
    }
    Some(element)
}

/// Assemble every class: decorators, then members in source order through
/// the accessor state machine, then fields not shadowed by a member.
pub(crate) fn assemble_classes(
    raw_classes: &[RawClass],
    members: &[RawMember],
    static_fields: &[RawStaticField],
    property_fields: &[RawPropertyField],
    all_decorators: &[RawDecorator],
    skip_receivers: bool,
) -> Vec<Element> {
    use super::properties::MemberAssembly;

    let lookup = build_decorator_lookup(all_decorators);

    let mut members_by_class: FxHashMap<&str, Vec<&RawMember>> = FxHashMap::default();
    for member in members {
        members_by_class
            .entry(member.parent_name.as_str())
            .or_default()
            .push(member);
    }
    let mut props_by_class: FxHashMap<&str, Vec<&RawPropertyField>> = FxHashMap::default();
    for field in property_fields {
        props_by_class
            .entry(field.parent_name.as_str())
            .or_default()
            .push(field);
    }
    let mut statics_by_class: FxHashMap<&str, Vec<&RawStaticField>> = FxHashMap::default();
    for field in static_fields {
        statics_by_class
            .entry(field.parent_name.as_str())
            .or_default()
            .push(field);
    }

    let mut classes = Vec::new();
    for raw_class in raw_classes {
        if raw_class.name.is_empty() {
            tracing::warn!("skipping class without a name");
            continue;
        }
        if !raw_class.range.is_valid() {
            tracing::warn!(name = %raw_class.name, "skipping class with invalid range");
            continue;
        }
        let mut element = Element::new(ElementKind::Class, &raw_class.name, &raw_class.content)
            .with_range(raw_class.range);
        if !raw_class.extends.is_empty() {
            element = element.with_attr(attr::EXTENDS, json!(raw_class.extends));
        }
        if !raw_class.implements.is_empty() {
            element = element.with_attr(attr::IMPLEMENTS, json!(raw_class.implements));
        }
        if raw_class.is_exported {
            element = element.with_attr(attr::IS_EXPORTED, true);
        }
        attach_decorators(&mut element, &raw_class.decorators, &lookup, &raw_class.name);

        let mut class_members: Vec<&RawMember> = members_by_class
            .get(raw_class.name.as_str())
            .cloned()
            .unwrap_or_default();
        class_members.sort_by_key(|m| m.range.start_line);

        let mut assembly = MemberAssembly::new();
        for member in class_members {
            if let Some(processed) = member_element(member, &lookup, skip_receivers) {
                assembly.offer(processed);
            }
        }

        let mut field_names: Vec<String> = Vec::new();
        let mut field_children: Vec<Element> = Vec::new();

        let mut class_props: Vec<&RawPropertyField> = props_by_class
            .get(raw_class.name.as_str())
            .cloned()
            .unwrap_or_default();
        class_props.sort_by_key(|p| p.range.start_line);
        for field in class_props {
            if assembly.contains_name(&field.name) {
                tracing::warn!(name = %field.name, "property field shadowed by a member, dropping");
                continue;
            }
            if field_names.iter().any(|n| n == &field.name) {
                continue;
            }
            if let Some(processed) = property_field_element(field) {
                field_names.push(field.name.clone());
                field_children.push(processed);
            }
        }

        let mut class_statics: Vec<&RawStaticField> = statics_by_class
            .get(raw_class.name.as_str())
            .cloned()
            .unwrap_or_default();
        class_statics.sort_by_key(|s| s.range.start_line);
        for field in class_statics {
            if assembly.contains_name(&field.name) {
                tracing::warn!(name = %field.name, "static field shadowed by a member, dropping");
                continue;
            }
            if field_names.iter().any(|n| n == &field.name) {
                // Instance assignment wins over the class-body assignment.
                tracing::warn!(name = %field.name, "static field shadowed by an instance field, dropping");
                continue;
            }
            if let Some(processed) = static_field_element(field) {
                field_names.push(field.name.clone());
                field_children.push(processed);
            }
        }

        element.children.extend(assembly.into_children());
        element.children.extend(field_children);
        sort_children(&mut element.children);
        classes.push(element);
    }
    classes
}
