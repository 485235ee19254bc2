//! The unified error model for the front-end.
//!
//! Parse failure inside the grammar is an empty result sequence, never an
//! error value; the types here exist for the boundaries around the grammar:
//! a compilation unit that yields no parse at all, assembly clashes, and
//! deriving-validation failures. Every error is a typed, inspectable value
//! naming the offending definition and rule; formatting is left to `miette`.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Deriving;

/// Source text plus a display name, convertible to a `miette` named source.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from real compilation-unit content.
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a placeholder when real source is unavailable.
    pub fn fallback(context: &str) -> Self {
        Self {
            name: "fallback".to_string(),
            content: format!("// {}", context),
        }
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

/// The single error type: what went wrong, where, and how to present it.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct FppError {
    pub kind: ErrorKind,
    pub source_info: SourceInfo,
    pub diagnostic_info: DiagnosticInfo,
}

/// All failure kinds as one enum; variants carry the definition name, the
/// deriving tag, and the violated rule where applicable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    // Parse boundary - the grammar produced no usable parse
    #[error("no valid parse for {construct}")]
    NoParse { construct: String },
    #[error("unconsumed input near `{at}`")]
    UnconsumedInput { at: String },

    // Assembly - fully-qualified-name and constructor bookkeeping
    #[error("duplicate definition `{name}` in one compilation unit")]
    DuplicateDefinition { name: String },
    #[error("duplicate constructor `{constructor}` in `{definition}`")]
    DuplicateConstructor {
        definition: String,
        constructor: String,
    },

    // Deriving validation
    #[error("`{definition}`: deriving {deriving} cannot be combined with {other}")]
    ConflictingDerivings {
        definition: String,
        deriving: Deriving,
        other: Deriving,
    },
    #[error("`{definition}`: deriving {deriving} expects {expected} constructors, found {actual}")]
    ConstructorCount {
        definition: String,
        deriving: Deriving,
        expected: &'static str,
        actual: usize,
    },
    #[error("`{definition}`: deriving {deriving} expects constructor `{constructor}` to take {expected} arguments, found {actual}")]
    ArgumentCount {
        definition: String,
        deriving: Deriving,
        constructor: String,
        expected: &'static str,
        actual: usize,
    },
    #[error("`{definition}`: deriving {deriving} does not allow conditions ({count} declared)")]
    ConditionsForbidden {
        definition: String,
        deriving: Deriving,
        count: usize,
    },
    #[error("`{definition}`: deriving {deriving} forbids namespace-qualified constructor `{constructor}`")]
    QualifiedConstructor {
        definition: String,
        deriving: Deriving,
        constructor: String,
    },
    #[error("`{definition}`: deriving {deriving} requires argument `{argument}` of `{constructor}` to be {requirement}")]
    ArgumentShape {
        definition: String,
        deriving: Deriving,
        constructor: String,
        argument: String,
        requirement: String,
    },

    // Driver I/O
    #[error("cannot read `{path}`: {reason}")]
    FileUnreadable { path: String, reason: String },
}

impl ErrorKind {
    /// The error category, for dispatch and test assertions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoParse { .. } | Self::UnconsumedInput { .. } => ErrorCategory::Parse,

            Self::DuplicateDefinition { .. } | Self::DuplicateConstructor { .. } => {
                ErrorCategory::Assembly
            }

            Self::ConflictingDerivings { .. }
            | Self::ConstructorCount { .. }
            | Self::ArgumentCount { .. }
            | Self::ConditionsForbidden { .. }
            | Self::QualifiedConstructor { .. }
            | Self::ArgumentShape { .. } => ErrorCategory::Validation,

            Self::FileUnreadable { .. } => ErrorCategory::Io,
        }
    }

    /// Suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::NoParse { .. } => "no_parse",
            Self::UnconsumedInput { .. } => "unconsumed_input",
            Self::DuplicateDefinition { .. } => "duplicate_definition",
            Self::DuplicateConstructor { .. } => "duplicate_constructor",
            Self::ConflictingDerivings { .. } => "conflicting_derivings",
            Self::ConstructorCount { .. } => "constructor_count",
            Self::ArgumentCount { .. } => "argument_count",
            Self::ConditionsForbidden { .. } => "conditions_forbidden",
            Self::QualifiedConstructor { .. } => "qualified_constructor",
            Self::ArgumentShape { .. } => "argument_shape",
            Self::FileUnreadable { .. } => "file_unreadable",
        }
    }

    /// The definition a validation-stage kind refers to, if any.
    pub fn definition(&self) -> Option<&str> {
        match self {
            Self::DuplicateConstructor { definition, .. }
            | Self::ConflictingDerivings { definition, .. }
            | Self::ConstructorCount { definition, .. }
            | Self::ArgumentCount { definition, .. }
            | Self::ConditionsForbidden { definition, .. }
            | Self::QualifiedConstructor { definition, .. }
            | Self::ArgumentShape { definition, .. } => Some(definition),
            Self::DuplicateDefinition { name } => Some(name),
            _ => None,
        }
    }

    /// The deriving tag a validation kind refers to, if any.
    pub fn deriving(&self) -> Option<Deriving> {
        match self {
            Self::ConflictingDerivings { deriving, .. }
            | Self::ConstructorCount { deriving, .. }
            | Self::ArgumentCount { deriving, .. }
            | Self::ConditionsForbidden { deriving, .. }
            | Self::QualifiedConstructor { deriving, .. }
            | Self::ArgumentShape { deriving, .. } => Some(*deriving),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Assembly,
    Validation,
    Io,
}

/// Context-specific source information.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

/// Diagnostic enhancement data.
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

/// Context-aware error creation; each pipeline stage knows how to
/// contextualize a bare [`ErrorKind`].
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> FppError;
}

/// The general-purpose reporting context: one compilation unit, one phase.
pub struct UnitContext {
    pub source: SourceContext,
    pub phase: String,
}

impl UnitContext {
    pub fn new(source: SourceContext, phase: impl Into<String>) -> Self {
        Self {
            source,
            phase: phase.into(),
        }
    }
}

impl ErrorReporting for UnitContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> FppError {
        let error_code = format!("fpp::{}::{}", self.phase, kind.code_suffix());

        FppError {
            kind,
            source_info: SourceInfo {
                source: self.source.to_named_source(),
                primary_span: span,
                phase: self.phase.clone(),
            },
            diagnostic_info: DiagnosticInfo {
                help: None,
                error_code,
            },
        }
    }
}

impl Diagnostic for FppError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

impl FppError {
    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::NoParse { .. } => "no valid parse".into(),
            ErrorKind::UnconsumedInput { .. } => "parsing stopped here".into(),
            ErrorKind::DuplicateDefinition { .. } => "already defined".into(),
            ErrorKind::DuplicateConstructor { .. } => "duplicate constructor".into(),
            ErrorKind::ConflictingDerivings { .. } => "conflicting derivings".into(),
            ErrorKind::ConstructorCount { .. } => "wrong constructor count".into(),
            ErrorKind::ArgumentCount { .. } => "wrong argument count".into(),
            ErrorKind::ConditionsForbidden { .. } => "conditions not allowed".into(),
            ErrorKind::QualifiedConstructor { .. } => "qualified constructor name".into(),
            ErrorKind::ArgumentShape { .. } => "invalid argument shape".into(),
            ErrorKind::FileUnreadable { .. } => "unreadable file".into(),
        }
    }
}

/// A placeholder span for errors not tied to a source location.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

/// Best-effort span of the first occurrence of `needle` in `source`, for
/// labeling the definition an error refers to. Falls back to [`unspanned`].
pub fn span_of(source: &str, needle: &str) -> SourceSpan {
    match source.find(needle) {
        Some(start) => SourceSpan::from(start..start + needle.len()),
        None => unspanned(),
    }
}

/// Prints an error with full miette diagnostics.
pub fn print_error(error: FppError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
