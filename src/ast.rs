//! The FPP abstract syntax tree.
//!
//! Plain immutable value containers with structural equality. Nodes are
//! constructed by the grammar during parsing, copied and namespace-qualified
//! by the assembler, and only ever inspected afterwards.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The namespace separator used in fully qualified names and in
/// namespace-qualified constructor names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// A literal default value for an argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    IntList(Vec<i64>),
}

/// One argument of a constructor. A missing `type_name` means
/// "untyped/mixed"; `nullable` and `is_list` are independent flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub type_name: Option<String>,
    pub nullable: bool,
    pub is_list: bool,
    pub default: Option<Literal>,
}

impl Argument {
    /// A plain, non-nullable, non-list argument with no default.
    pub fn plain(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            nullable: false,
            is_list: false,
            default: None,
        }
    }
}

/// One named variant of a definition. `alias`, when present, is the
/// generated-code-facing name; argument order is significant and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    pub name: String,
    pub alias: Option<String>,
    pub arguments: Vec<Argument>,
}

impl Constructor {
    /// A zero-argument constructor with no alias.
    pub fn nullary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: Vec::new(),
        }
    }

    /// Whether this constructor is one of the recognized scalar shapes: a
    /// bare `Bool`, `Float`, `Int`, or `String` with no arguments.
    pub fn is_scalar_shape(&self) -> bool {
        self.arguments.is_empty()
            && matches!(self.name.as_str(), "Bool" | "Float" | "Int" | "String")
    }
}

/// A structural constraint attached to a definition: the name of a marker the
/// definition extends (marker form) or must satisfy (wrapper forms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub marker: String,
}

impl Condition {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

/// A `use` statement: a fully qualified name and an optional local alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub qualified_name: String,
    pub alias: Option<String>,
}

/// A declared capability tag. Each tag carries a fixed forbidden-with set
/// and, for the structural tags, a validation rule; both live in the
/// validation module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Deriving {
    AggregateChanged,
    Command,
    DomainEvent,
    Enum,
    Equals,
    Exception,
    FromArray,
    FromScalar,
    FromString,
    MicroAggregateChanged,
    Query,
    ToArray,
    ToScalar,
    ToString,
    Uuid,
}

impl Deriving {
    pub fn as_str(&self) -> &'static str {
        match self {
            Deriving::AggregateChanged => "AggregateChanged",
            Deriving::Command => "Command",
            Deriving::DomainEvent => "DomainEvent",
            Deriving::Enum => "Enum",
            Deriving::Equals => "Equals",
            Deriving::Exception => "Exception",
            Deriving::FromArray => "FromArray",
            Deriving::FromScalar => "FromScalar",
            Deriving::FromString => "FromString",
            Deriving::MicroAggregateChanged => "MicroAggregateChanged",
            Deriving::Query => "Query",
            Deriving::ToArray => "ToArray",
            Deriving::ToScalar => "ToScalar",
            Deriving::ToString => "ToString",
            Deriving::Uuid => "Uuid",
        }
    }
}

impl fmt::Display for Deriving {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared type. `conditions` are non-empty only for marker-extension
/// and constrained-wrapper forms; `markers` holds the behavior forms'
/// annotations; `guid_type`/`elem_type` are the parenthesized identifier and
/// element types of the command/event forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub namespace: String,
    pub type_name: String,
    pub markers: Vec<String>,
    pub conditions: Vec<Condition>,
    pub constructors: Vec<Constructor>,
    pub derivings: BTreeSet<Deriving>,
    pub imports: Vec<Import>,
    pub guid_type: Option<String>,
    pub elem_type: Option<String>,
}

impl Definition {
    /// A definition with the given name and nothing else; the grammar fills
    /// in the construct-specific fields, the assembler the namespace.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            namespace: String::new(),
            type_name: type_name.into(),
            markers: Vec::new(),
            conditions: Vec::new(),
            constructors: Vec::new(),
            derivings: BTreeSet::new(),
            imports: Vec::new(),
            guid_type: None,
            elem_type: None,
        }
    }

    /// `<namespace>\<type_name>`, or the bare type name when the definition
    /// has not been namespace-qualified yet.
    pub fn fully_qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.type_name.clone()
        } else {
            format!(
                "{}{}{}",
                self.namespace, NAMESPACE_SEPARATOR, self.type_name
            )
        }
    }

    pub fn has_deriving(&self, deriving: Deriving) -> bool {
        self.derivings.contains(&deriving)
    }
}
