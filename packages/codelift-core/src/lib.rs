//! codelift-core: language-aware code element extraction.
//!
//! Parses a source file with tree-sitter, enumerates its semantic elements
//! (classes, functions, accessors, fields, imports, decorators, ...), and
//! builds a typed, addressable element tree with precise line ranges. A
//! dotted path language resolves individual elements and projects slices of
//! their text for rewriting by a manipulation backend.
//!
//! ```no_run
//! use codelift_core::{global_registry, LanguageId, PathResolver};
//!
//! let orchestrator = global_registry()
//!     .orchestrator(LanguageId::Python)
//!     .expect("python is built in");
//! let tree = orchestrator.extract("class C:\n    def m(self):\n        return 0\n");
//! let resolver = PathResolver::for_language(LanguageId::Python);
//! let body = resolver.select(&tree, "C.m[body]");
//! assert_eq!(body.as_deref(), Some("return 0"));
//! ```

pub mod features;
pub mod shared;

pub use features::extraction::{RawBundle, RawExtractor};
pub use features::navigation::SyntaxNavigator;
pub use features::orchestration::Orchestrator;
pub use features::paths::{PathPart, PathResolver, PathSegment};
pub use features::postprocess::PostProcessor;
pub use features::registry::{
    create_registry, global_registry, LanguageFlavor, LanguageId, LanguageRegistry,
};
pub use shared::models::{
    attr, CodeliftError, Element, ElementKind, ElementTree, ErrorKind, Range, Result,
};
