//! Grammar rules for the value-type constructs: enumerations, records,
//! markers, and the primitive scalar wrappers.

use std::collections::BTreeSet;

use crate::ast::{Argument, Condition, Constructor, Definition, Deriving, Literal};
use crate::combinator::{sep_by1, Parser};
use crate::lexical::{
    bool_lit, char_p, comma, float_lit, int, ints, newline, pad, pipe, spaces, spaces1,
    string_lit,
};

use super::{identifier, keyword, qualified_name, type_name};

/// A parsed type reference: `?Name[]` in its general form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub nullable: bool,
    pub is_list: bool,
}

/// `(?)? <QualifiedName> ([])?`. Nullability and list-ness are independent.
pub fn type_ref() -> Parser<TypeRef> {
    char_p('?').optional().bind(move |question| {
        qualified_name().bind(move |name| {
            crate::lexical::literal("[]")
                .optional()
                .map(move |brackets| TypeRef {
                    name: name.clone(),
                    nullable: question.is_some(),
                    is_list: brackets.is_some(),
                })
        })
    })
}

/// The optional `: Marker (, Marker)*` annotation clause shared by the
/// marker, wrapper, and behavior forms.
pub(crate) fn marker_annotations() -> Parser<Vec<String>> {
    spaces()
        .then(&char_p(':'))
        .then(&spaces())
        .then(&sep_by1(&qualified_name(), &comma()))
        .optional()
        .map(|annotations| annotations.unwrap_or_default())
}

/// `enum <Name> = <Ctor> (| <Ctor>)* <newline>`. The terminating line break
/// is mandatory; without it the whole construct yields no parse.
pub fn enum_def() -> Parser<Definition> {
    keyword("enum").then(&type_name()).bind(|name| {
        spaces()
            .then(&char_p('='))
            .then(&spaces())
            .then(&sep_by1(&type_name(), &pipe()))
            .skip(&newline())
            .map(move |constructors| {
                let mut def = Definition::named(name.clone());
                def.constructors = constructors.into_iter().map(Constructor::nullary).collect();
                def.derivings = BTreeSet::from([Deriving::Enum]);
                def
            })
    })
}

/// `marker <Name> (: <Base> (, <Base>)*)? ;`. Base markers become the
/// definition's conditions.
pub fn marker_def() -> Parser<Definition> {
    keyword("marker").then(&type_name()).bind(|name| {
        marker_annotations()
            .skip(&spaces())
            .skip(&char_p(';'))
            .map(move |bases| {
                let mut def = Definition::named(name.clone());
                def.conditions = bases.into_iter().map(Condition::new).collect();
                def
            })
    })
}

/// `<kind> <Name> (: <Marker> (, <Marker>)*)? ;` for the primitive wrapper
/// kinds. Each carries exactly one implicit zero-argument constructor named
/// after the wrapped primitive, and the derivings that kind implies.
pub fn wrapper_def() -> Parser<Definition> {
    wrapper_kind("bool", "Bool")
        .alt(&wrapper_kind("int", "Int"))
        .alt(&wrapper_kind("float", "Float"))
        .alt(&wrapper_kind("string", "String"))
        .alt(&wrapper_kind("guid", "Guid"))
        .alt(&wrapper_kind("uuid", "Uuid"))
}

fn wrapper_kind(kind: &'static str, constructor: &'static str) -> Parser<Definition> {
    keyword(kind).then(&type_name()).bind(move |name| {
        marker_annotations()
            .skip(&spaces())
            .skip(&char_p(';'))
            .map(move |constraints| {
                let mut def = Definition::named(name.clone());
                def.conditions = constraints.into_iter().map(Condition::new).collect();
                def.constructors = vec![Constructor::nullary(constructor)];
                def.derivings = wrapper_derivings(kind);
                def
            })
    })
}

fn wrapper_derivings(kind: &str) -> BTreeSet<Deriving> {
    match kind {
        "guid" | "uuid" => BTreeSet::from([Deriving::Uuid]),
        "string" => BTreeSet::from([
            Deriving::Equals,
            Deriving::FromScalar,
            Deriving::FromString,
            Deriving::ToScalar,
            Deriving::ToString,
        ]),
        _ => BTreeSet::from([Deriving::Equals, Deriving::FromScalar, Deriving::ToScalar]),
    }
}

/// `data <Name> = { <arg> (, <arg>)* }`. One record constructor with an
/// explicitly typed, ordered argument list.
pub fn data_def() -> Parser<Definition> {
    keyword("data").then(&type_name()).bind(|name| {
        spaces()
            .then(&char_p('='))
            .then(&pad())
            .then(&char_p('{'))
            .then(&pad())
            .then(&sep_by1(&named_argument(), &comma()))
            .skip(&pad())
            .skip(&char_p('}'))
            .map(move |arguments| {
                let mut def = Definition::named(name.clone());
                let mut derivings = BTreeSet::from([Deriving::Equals, Deriving::ToArray]);
                if arguments.len() >= 2 {
                    derivings.insert(Deriving::FromArray);
                }
                def.derivings = derivings;
                def.constructors = vec![Constructor {
                    name: name.clone(),
                    alias: None,
                    arguments,
                }];
                def
            })
    })
}

/// `<type> $<name> (= <literal>)?`, or a bare `$<name>` for untyped/mixed.
fn named_argument() -> Parser<Argument> {
    typed_argument().alt(&untyped_argument())
}

fn untyped_argument() -> Parser<Argument> {
    char_p('$').then(&identifier()).map(|name| Argument {
        name,
        type_name: None,
        nullable: false,
        is_list: false,
        default: None,
    })
}

fn typed_argument() -> Parser<Argument> {
    type_ref().bind(|reference| {
        spaces1()
            .then(&char_p('$'))
            .then(&identifier())
            .bind(move |name| {
                let reference = reference.clone();
                spaces()
                    .then(&char_p('='))
                    .then(&spaces())
                    .then(&default_literal(&reference))
                    .optional()
                    .map(move |default| Argument {
                        name: name.clone(),
                        type_name: Some(reference.name.clone()),
                        nullable: reference.nullable,
                        is_list: reference.is_list,
                        default,
                    })
            })
    })
}

/// The default-value literal admitted for a given type reference. A default
/// that is not lexically compatible with the declared type is a parse
/// failure, not a warning.
fn default_literal(reference: &TypeRef) -> Parser<Literal> {
    if reference.is_list {
        return match reference.name.as_str() {
            "int" => ints().map(Literal::IntList),
            _ => any_literal(),
        };
    }
    match reference.name.as_str() {
        "bool" => bool_lit().map(Literal::Bool),
        "int" => int().map(Literal::Int),
        "float" => float_lit()
            .map(Literal::Float)
            .alt(&int().map(|n| Literal::Float(n as f64))),
        "string" => string_lit().map(Literal::String),
        _ => any_literal(),
    }
}

fn any_literal() -> Parser<Literal> {
    float_lit()
        .map(Literal::Float)
        .alt(&int().map(Literal::Int))
        .alt(&bool_lit().map(Literal::Bool))
        .alt(&string_lit().map(Literal::String))
        .alt(&ints().map(Literal::IntList))
}
