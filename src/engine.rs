//! The compilation pipeline.
//!
//! Strict staging: Parse → Assemble → Validate. This is the single path
//! from source text to a validated definition map; the CLI and tests both
//! go through it. The stages themselves are pure; all I/O stays in
//! [`CompilerPipeline::read_file`] and the CLI.

use std::collections::HashMap;
use std::path::Path;

use crate::assembler::{self, NamespaceBlock};
use crate::ast::{Definition, NAMESPACE_SEPARATOR};
use crate::diagnostics::{
    span_of, unspanned, ErrorKind, ErrorReporting, FppError, SourceContext, UnitContext,
};
use crate::grammar;
use crate::validation;

/// The validated output of one compilation unit: the mapping from fully
/// qualified type name to definition that the external renderer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUnit {
    pub definitions: HashMap<String, Definition>,
}

impl CompiledUnit {
    pub fn get(&self, fully_qualified_name: &str) -> Option<&Definition> {
        self.definitions.get(fully_qualified_name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition names in deterministic order.
    pub fn sorted_names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.definitions.keys().collect();
        names.sort();
        names
    }
}

/// The front-end pipeline. Parsing and assembly always run; deriving
/// validation can be switched off for tooling that wants the raw AST.
pub struct CompilerPipeline {
    pub validate: bool,
}

impl Default for CompilerPipeline {
    fn default() -> Self {
        Self { validate: true }
    }
}

impl CompilerPipeline {
    /// Compiles one unit, reporting the first failure.
    pub fn compile(&self, filename: &str, source: &str) -> Result<CompiledUnit, FppError> {
        self.check(filename, source).map_err(|mut errors| errors.remove(0))
    }

    /// Compiles one unit, reporting every validation failure. Parse and
    /// assembly failures are singular by construction.
    pub fn check(&self, filename: &str, source: &str) -> Result<CompiledUnit, Vec<FppError>> {
        let source_context = SourceContext::from_file(filename, source);

        let blocks = Self::parse_blocks(source, &source_context).map_err(|error| vec![error])?;

        let assembly = UnitContext::new(source_context.clone(), "assembly");
        let definitions = assembler::assemble(&blocks).map_err(|kind| {
            let span = match kind.definition() {
                Some(name) => span_of(source, bare_name(name)),
                None => unspanned(),
            };
            vec![assembly.report(kind, span)]
        })?;

        let unit = CompiledUnit { definitions };
        if !self.validate {
            return Ok(unit);
        }

        let context = UnitContext::new(source_context, "validation");
        let mut errors = Vec::new();
        for name in unit.sorted_names() {
            let definition = &unit.definitions[name];
            for kind in validation::check_definition(definition) {
                errors.push(context.report(kind, span_of(source, &definition.type_name)));
            }
        }
        if errors.is_empty() {
            Ok(unit)
        } else {
            Err(errors)
        }
    }

    /// Parses one unit into namespace blocks with pure parsing logic, no
    /// assembly or validation.
    pub fn parse_source(source: &str) -> Result<Vec<NamespaceBlock>, FppError> {
        Self::parse_blocks(source, &SourceContext::from_file("source", source))
    }

    fn parse_blocks(
        source: &str,
        source_context: &SourceContext,
    ) -> Result<Vec<NamespaceBlock>, FppError> {
        let context = UnitContext::new(source_context.clone(), "parse");

        let mut candidates = grammar::document().parse(source);
        if candidates.is_empty() {
            return Err(context.report(
                ErrorKind::NoParse {
                    construct: "compilation unit".to_string(),
                },
                unspanned(),
            ));
        }
        let (blocks, remainder) = candidates.remove(0);

        // Trailing content is tolerated only at the single-namespace-per-file
        // boundary of the statement form: everything from a second
        // `namespace` keyword on is left unconsumed by design.
        let trailing = remainder.trim_start();
        if !trailing.is_empty() && !trailing.starts_with("namespace") {
            let offset = source.len() - trailing.len();
            let at: String = trailing.chars().take(24).collect();
            return Err(context.report(
                ErrorKind::UnconsumedInput { at },
                (offset..source.len()).into(),
            ));
        }

        Ok(blocks)
    }

    /// Reads a file with standardized error handling.
    pub fn read_file(path: &Path) -> Result<String, FppError> {
        std::fs::read_to_string(path).map_err(|error| {
            let context = UnitContext::new(
                SourceContext::fallback("CompilerPipeline::read_file"),
                "file-system",
            );
            context.report(
                ErrorKind::FileUnreadable {
                    path: path.display().to_string(),
                    reason: error.to_string(),
                },
                unspanned(),
            )
        })
    }
}

// The unqualified tail of a fully qualified name, for source-span lookup.
fn bare_name(fully_qualified: &str) -> &str {
    fully_qualified
        .rsplit(NAMESPACE_SEPARATOR)
        .next()
        .unwrap_or(fully_qualified)
}
