//! End-to-end extraction over TypeScript sources.

use codelift_core::{attr, global_registry, ElementKind, LanguageId, Orchestrator};
use pretty_assertions::assert_eq;

fn typescript() -> Orchestrator {
    global_registry()
        .orchestrator(LanguageId::TypeScript)
        .expect("typescript is built in")
}

const INTERFACE_SOURCE: &str = "\
interface I {
    f(): number;
}

class K implements I {
    @dec
    f(): number {
        return 1;
    }

    static N = 2;
}
";

#[test]
fn interface_and_implementing_class() {
    let tree = typescript().extract(INTERFACE_SOURCE);
    assert!(tree.find(ElementKind::Interface, "I").is_some());
    let class = tree.find(ElementKind::Class, "K").expect("class K");
    let implements = class
        .attributes
        .get(attr::IMPLEMENTS)
        .and_then(|v| v.as_array())
        .expect("implements attribute");
    let names: Vec<&str> = implements.iter().filter_map(|v| v.as_str()).collect();
    assert_eq!(names, vec!["I"]);

    let method = class.child(ElementKind::Method, "f").expect("K.f");
    let decorators: Vec<&str> = method.decorators().map(|d| d.name.as_str()).collect();
    assert_eq!(decorators, vec!["dec"]);

    let field = class.child(ElementKind::StaticField, "N").expect("K.N");
    assert_eq!(field.value_type.as_deref(), Some("int"));
    assert_eq!(field.attr_str(attr::RAW_VALUE), Some("2"));
}

#[test]
fn accessor_pair_from_get_set_keywords() {
    let source = "\
class Box {
    private width: number = 0;

    get size(): number {
        return this.width;
    }

    set size(value: number) {
        this.width = value;
    }
}
";
    let tree = typescript().extract(source);
    let class = tree.find(ElementKind::Class, "Box").unwrap();
    assert!(class.child(ElementKind::PropertyGetter, "size").is_some());
    assert!(class.child(ElementKind::PropertySetter, "size").is_some());
    let width = class.child(ElementKind::PropertyField, "width").unwrap();
    assert_eq!(width.value_type.as_deref(), Some("number"));
}

#[test]
fn readonly_and_optional_markers() {
    let source = "\
class Config {
    readonly host: string = 'localhost';
    port?: number;
}
";
    let tree = typescript().extract(source);
    let class = tree.find(ElementKind::Class, "Config").unwrap();
    let host = class.child(ElementKind::PropertyField, "host").unwrap();
    assert!(host.attr_bool(attr::IS_READONLY));
    let port = class.child(ElementKind::PropertyField, "port").unwrap();
    assert!(port.attr_bool(attr::IS_OPTIONAL));
}

#[test]
fn import_variants() {
    let source = "\
import Default from './a';
import * as ns from './b';
import { one, two as alias } from './c';
import './side-effect';
";
    let tree = typescript().extract(source);
    let group = tree.import_group().expect("import group");
    let range = group.range.unwrap();
    assert_eq!((range.start_line, range.end_line), (1, 4));
    let individual = group
        .attributes
        .get(attr::INDIVIDUAL_IMPORTS)
        .and_then(|v| v.as_array())
        .unwrap();
    assert_eq!(individual.len(), 4);
    assert_eq!(individual[0]["default_import"], "Default");
    assert_eq!(individual[1]["namespace_import"], "ns");
    assert_eq!(individual[2]["named"][1]["alias"], "alias");
    assert_eq!(individual[3]["side_effect"], true);
}

#[test]
fn enums_and_members() {
    let source = "\
export enum Color {
    Red,
    Blue = 4,
}
";
    let tree = typescript().extract(source);
    let color = tree.find(ElementKind::Enum, "Color").expect("enum Color");
    assert!(color.attr_bool(attr::IS_EXPORTED));
    let members: Vec<&str> = color
        .children
        .iter()
        .filter(|c| c.kind == ElementKind::EnumMember)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(members, vec!["Red", "Blue"]);
    let blue = color.child(ElementKind::EnumMember, "Blue").unwrap();
    assert_eq!(blue.attr_str(attr::RAW_VALUE), Some("4"));
}

#[test]
fn type_alias_carries_aliased_type() {
    let tree = typescript().extract("export type Identifier = string | number;\n");
    let alias = tree.find(ElementKind::TypeAlias, "Identifier").unwrap();
    assert_eq!(alias.value_type.as_deref(), Some("string | number"));
    assert!(alias.attr_bool(attr::IS_EXPORTED));
}

#[test]
fn deeply_nested_namespaces() {
    let source = "\
namespace A {
    export namespace B {
        export namespace C {
            export const x = 1;
        }
    }
}
";
    let tree = typescript().extract(source);
    let a = tree.find(ElementKind::Namespace, "A").expect("namespace A");
    let b = a.child(ElementKind::Namespace, "B").expect("A.B");
    let c = b.child(ElementKind::Namespace, "C").expect("A.B.C");
    assert_eq!(c.parent_name.as_deref(), Some("A.B"));
    // nested declarations do not leak to the top level
    assert_eq!(tree.len(), 1);
}

#[test]
fn exported_function_range_includes_export_keyword() {
    let source = "export function run(): void {\n    work();\n}\n";
    let tree = typescript().extract(source);
    let function = tree.find(ElementKind::Function, "run").unwrap();
    assert!(function.attr_bool(attr::IS_EXPORTED));
    assert!(function.content.starts_with("export function run"));
}

#[test]
fn methods_skip_object_literal_functions() {
    let source = "\
const handlers = {
    onClick() {
        return 1;
    },
};
";
    let tree = typescript().extract(source);
    assert!(tree.walk().all(|e| e.kind != ElementKind::Method));
}

#[test]
fn locate_fast_path() {
    let range = typescript().locate(INTERFACE_SOURCE, ElementKind::Method, Some("f"), Some("K"));
    assert_eq!((range.start_line, range.end_line), (6, 9));

    let interface = typescript().locate(INTERFACE_SOURCE, ElementKind::Interface, Some("I"), None);
    assert_eq!((interface.start_line, interface.end_line), (1, 3));

    let miss = typescript().locate(INTERFACE_SOURCE, ElementKind::Enum, Some("E"), None);
    assert!(miss.is_zero());
}

#[test]
fn re_export_from_module_counts_as_import() {
    let source = "export { thing } from './dep';\n";
    let tree = typescript().extract(source);
    let group = tree.import_group().expect("import group");
    let individual = group
        .attributes
        .get(attr::INDIVIDUAL_IMPORTS)
        .and_then(|v| v.as_array())
        .unwrap();
    assert_eq!(individual.len(), 1);
    assert_eq!(individual[0]["module"], "./dep");
}

#[test]
fn plain_re_export_is_not_an_import() {
    let source = "const a = 1;\nexport { a };\n";
    let tree = typescript().extract(source);
    assert!(tree.import_group().is_none());
}
