//! The deriving validator.
//!
//! Validation only inspects a completed [`Definition`]; it never mutates
//! one. Every declared deriving's rule runs (no short-circuit on the first
//! failure), and a definition is accepted only when the returned
//! violation list is empty.

pub mod rules;

pub use rules::forbidden_with;

use crate::ast::Definition;
use crate::diagnostics::ErrorKind;

/// Applies every declared deriving's mutual-exclusion and structural rules.
/// The returned kinds are bare, typed violations; the pipeline attaches
/// source context before surfacing them.
pub fn check_definition(definition: &Definition) -> Vec<ErrorKind> {
    let mut violations = Vec::new();
    for &deriving in &definition.derivings {
        rules::check_conflicts(definition, deriving, &mut violations);
        rules::check_structure(definition, deriving, &mut violations);
    }
    violations
}
