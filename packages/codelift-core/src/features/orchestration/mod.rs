//! Orchestrator
//!
//! Composes a parser, navigator, extractor, and post-processor for one
//! language behind `extract` and `locate`. Parsing happens once per call;
//! nothing is cached across calls, so concurrent calls are independent.

use rayon::prelude::*;
use tree_sitter::Parser;

use crate::features::extraction::RawExtractor;
use crate::features::postprocess::PostProcessor;
use crate::features::registry::LanguageId;
use crate::shared::models::{ElementKind, ElementTree, Range};

pub struct Orchestrator {
    language_id: LanguageId,
    extractor: Box<dyn RawExtractor>,
    post_processor: Box<dyn PostProcessor>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("language_id", &self.language_id)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn new(
        language_id: LanguageId,
        extractor: Box<dyn RawExtractor>,
        post_processor: Box<dyn PostProcessor>,
    ) -> Self {
        Self {
            language_id,
            extractor,
            post_processor,
        }
    }

    pub fn language_id(&self) -> LanguageId {
        self.language_id
    }

    /// Full pipeline over one source buffer.
    ///
    /// Internal failures downgrade to an empty tree; the caller never sees
    /// a partially-constructed element.
    pub fn extract(&self, source: &str) -> ElementTree {
        let mut parser = Parser::new();
        if let Err(err) = parser.set_language(&self.extractor.grammar()) {
            tracing::error!(language = self.language_id.name(), error = %err, "failed to load grammar");
            return ElementTree::empty();
        }
        let Some(tree) = parser.parse(source, None) else {
            tracing::error!(language = self.language_id.name(), "parser returned no tree");
            return ElementTree::empty();
        };
        let nav = crate::features::navigation::SyntaxNavigator::new(
            self.extractor.grammar(),
            source.as_bytes(),
        );
        let bundle = self.extractor.extract_all(tree.root_node(), &nav);
        self.post_processor.process_all(&bundle, source)
    }

    /// Fast-path location without building a tree; `(0, 0)` on miss.
    pub fn locate(
        &self,
        source: &str,
        kind: ElementKind,
        name: Option<&str>,
        parent: Option<&str>,
    ) -> Range {
        let mut parser = Parser::new();
        if parser.set_language(&self.extractor.grammar()).is_err() {
            return Range::zero();
        }
        let Some(tree) = parser.parse(source, None) else {
            return Range::zero();
        };
        let nav = crate::features::navigation::SyntaxNavigator::new(
            self.extractor.grammar(),
            source.as_bytes(),
        );

        // The import group is synthesized, so its location is the span of
        // every individual import.
        if kind == ElementKind::ImportGroup {
            let imports = self.extractor.extract_imports(tree.root_node(), &nav);
            return imports
                .iter()
                .filter_map(|imp| imp.range)
                .fold(None::<Range>, |acc, range| {
                    Some(match acc {
                        Some(current) => current.span_with(&range),
                        None => range,
                    })
                })
                .unwrap_or_else(Range::zero);
        }

        match self.extractor.locate_query(kind, name, parent) {
            Some(query) => nav.locate(tree.root_node(), &query),
            None => Range::zero(),
        }
    }

    /// Batch extraction; every file is independent, so files run in
    /// parallel while each pipeline stays single-threaded.
    pub fn extract_many(&self, sources: &[&str]) -> Vec<ElementTree> {
        sources.par_iter().map(|source| self.extract(source)).collect()
    }
}
