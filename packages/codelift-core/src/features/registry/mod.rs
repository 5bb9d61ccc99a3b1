//! Language Registry
//!
//! Maps language identifiers and file extensions to orchestrator factories.
//! The process-wide registry is built once and frozen; lookups for unknown
//! identifiers return a typed `Unsupported` error rather than failing
//! silently.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::features::extraction::{PythonExtractor, TypeScriptExtractor};
use crate::features::orchestration::Orchestrator;
use crate::features::postprocess::{PythonPostProcessor, TypeScriptPostProcessor};
use crate::shared::models::{CodeliftError, Result};

/// Language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Python,
    TypeScript,
}

/// Brace discipline of a language; drives the `def`/`body` projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFlavor {
    Indentation,
    CurlyBrace,
}

impl LanguageId {
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Python => "python",
            LanguageId::TypeScript => "typescript",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "python" => Some(LanguageId::Python),
            "typescript" => Some(LanguageId::TypeScript),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Some(LanguageId::Python),
            "ts" | "tsx" => Some(LanguageId::TypeScript),
            _ => None,
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            LanguageId::Python => &["py", "pyi"],
            LanguageId::TypeScript => &["ts", "tsx"],
        }
    }

    pub fn flavor(&self) -> LanguageFlavor {
        match self {
            LanguageId::Python => LanguageFlavor::Indentation,
            LanguageId::TypeScript => LanguageFlavor::CurlyBrace,
        }
    }
}

type OrchestratorFactory = fn() -> Orchestrator;

/// Registry of orchestrator factories, write-once at startup.
pub struct LanguageRegistry {
    factories: HashMap<LanguageId, OrchestratorFactory>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, language: LanguageId, factory: OrchestratorFactory) {
        self.factories.insert(language, factory);
    }

    /// Construct an orchestrator for the language.
    pub fn orchestrator(&self, language: LanguageId) -> Result<Orchestrator> {
        match self.factories.get(&language) {
            Some(factory) => Ok(factory()),
            None => Err(CodeliftError::Unsupported(language.name().to_string())),
        }
    }

    pub fn orchestrator_by_name(&self, name: &str) -> Result<Orchestrator> {
        match LanguageId::parse(name) {
            Some(language) => self.orchestrator(language),
            None => Err(CodeliftError::Unsupported(name.to_string())),
        }
    }

    pub fn orchestrator_for_extension(&self, ext: &str) -> Result<Orchestrator> {
        match LanguageId::from_extension(ext) {
            Some(language) => self.orchestrator(language),
            None => Err(CodeliftError::Unsupported(ext.to_string())),
        }
    }

    pub fn supports(&self, language: LanguageId) -> bool {
        self.factories.contains_key(&language)
    }

    pub fn languages(&self) -> impl Iterator<Item = LanguageId> + '_ {
        self.factories.keys().copied()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn python_orchestrator() -> Orchestrator {
    Orchestrator::new(
        LanguageId::Python,
        Box::new(PythonExtractor::new()),
        Box::new(PythonPostProcessor::new()),
    )
}

fn typescript_orchestrator() -> Orchestrator {
    Orchestrator::new(
        LanguageId::TypeScript,
        Box::new(TypeScriptExtractor::new()),
        Box::new(TypeScriptPostProcessor::new()),
    )
}

/// Registry with every built-in language registered.
pub fn create_registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    registry.register(LanguageId::Python, python_orchestrator);
    registry.register(LanguageId::TypeScript, typescript_orchestrator);
    registry
}

/// Process-wide frozen registry.
pub fn global_registry() -> &'static LanguageRegistry {
    static REGISTRY: Lazy<LanguageRegistry> = Lazy::new(create_registry);
    &REGISTRY
}
