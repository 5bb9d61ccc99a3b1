//! Post-Processor
//!
//! Converts the raw record bundle into the typed element tree: combined
//! imports, functions and classes with decorator attachment, parameter and
//! return synthesis, accessor pairing, and the language extras.
//!
//! Recovery is local: a malformed record is logged and skipped, a nameless
//! class drops only itself, and the returned tree is always a best-effort
//! prefix of the successful elements.

mod common;
mod properties;
pub mod python;
pub mod typescript;

pub use python::PythonPostProcessor;
pub use typescript::TypeScriptPostProcessor;

use crate::features::extraction::raw::{
    RawBundle, RawClass, RawDecorator, RawFunction, RawImport, RawMember, RawPropertyField,
    RawStaticField,
};
use crate::shared::models::{Element, ElementTree};

/// Contract every language post-processor implements.
pub trait PostProcessor: Send + Sync {
    /// Roll every import into one `import_group` element named `imports`.
    fn process_imports(&self, raw_imports: &[RawImport], source: Option<&str>) -> Vec<Element>;

    /// Top-level functions with parameters, return annotation, decorators.
    fn process_functions(
        &self,
        raw_functions: &[RawFunction],
        all_decorators: &[RawDecorator],
    ) -> Vec<Element>;

    /// Classes with members, property fields, and static fields assembled
    /// in source order.
    fn process_classes(
        &self,
        raw_classes: &[RawClass],
        members: &[RawMember],
        static_fields: &[RawStaticField],
        property_fields: &[RawPropertyField],
        all_decorators: &[RawDecorator],
    ) -> Vec<Element>;

    /// Run everything, including language extras, over one bundle.
    fn process_all(&self, bundle: &RawBundle, source: &str) -> ElementTree;
}

/// Top-level ordering: ascending by start line, rangeless elements last.
pub(crate) fn sort_top_level(elements: &mut [Element]) {
    elements.sort_by_key(|e| e.range.map(|r| r.start_line).unwrap_or(u32::MAX));
}
