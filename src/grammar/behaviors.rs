//! Grammar rules for the behavior constructs: commands and events.
//!
//! Both share one shape:
//! `<kind> <Name> (: <Marker>,*)? ( <GuidType> (, <ElemType>)? ) =
//!  <Ctor> (as <alias>)? { <type>,* } (| ...)* ;`

use std::collections::BTreeSet;

use crate::ast::{Argument, Constructor, Definition, Deriving, NAMESPACE_SEPARATOR};
use crate::combinator::{sat, sep_by1, Parser};
use crate::lexical::{char_p, comma, literal, many_str, pad, pipe, spaces, spaces1};

use super::types::{marker_annotations, type_ref};
use super::{keyword, qualified_name, type_name};

pub fn command_def() -> Parser<Definition> {
    behavior_def("command", Deriving::Command)
}

pub fn event_def() -> Parser<Definition> {
    behavior_def("event", Deriving::DomainEvent)
}

fn behavior_def(kind: &'static str, tag: Deriving) -> Parser<Definition> {
    keyword(kind).then(&type_name()).bind(move |name| {
        marker_annotations().bind(move |markers| {
            let name = name.clone();
            spaces()
                .then(&char_p('('))
                .then(&pad())
                .then(&id_types())
                .skip(&pad())
                .skip(&char_p(')'))
                .bind(move |(guid_type, elem_type)| {
                    let name = name.clone();
                    let markers = markers.clone();
                    spaces()
                        .then(&char_p('='))
                        .then(&pad())
                        .then(&sep_by1(&behavior_constructor(), &pipe()))
                        .skip(&spaces())
                        .skip(&char_p(';'))
                        .map(move |constructors| {
                            let mut def = Definition::named(name.clone());
                            def.markers = markers.clone();
                            def.guid_type = Some(guid_type.clone());
                            def.elem_type = elem_type.clone();
                            def.constructors = constructors;
                            def.derivings = BTreeSet::from([tag]);
                            def
                        })
                })
        })
    })
}

/// The parenthesized identifier type and optional element type.
fn id_types() -> Parser<(String, Option<String>)> {
    qualified_name().bind(|guid_type| {
        comma()
            .then(&qualified_name())
            .optional()
            .map(move |elem_type| (guid_type.clone(), elem_type))
    })
}

/// `<Ctor> (as <alias>)? { <type> (, <type>)* }`. Arguments are type-only;
/// names are synthesized from the type.
fn behavior_constructor() -> Parser<Constructor> {
    type_name().bind(|name| {
        alias_clause().bind(move |alias| {
            let name = name.clone();
            spaces()
                .then(&char_p('{'))
                .then(&pad())
                .then(&sep_by1(&type_argument(), &comma()))
                .skip(&pad())
                .skip(&char_p('}'))
                .map(move |arguments| Constructor {
                    name: name.clone(),
                    alias: alias.clone(),
                    arguments,
                })
        })
    })
}

fn alias_clause() -> Parser<Option<String>> {
    spaces1()
        .then(&literal("as"))
        .then(&spaces1())
        .then(&alias_name())
        .optional()
}

/// Generated-code-facing names admit dashes and dots on top of the
/// identifier characters: `register-user`, `user.registered`.
fn alias_name() -> Parser<String> {
    let start = sat(|c| c.is_ascii_alphabetic());
    let rest = many_str(&sat(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
    }));
    start.bind(move |first| rest.map(move |tail| format!("{}{}", first, tail)))
}

fn type_argument() -> Parser<Argument> {
    type_ref().map(|reference| Argument {
        name: synthesized_name(&reference.name),
        type_name: Some(reference.name),
        nullable: reference.nullable,
        is_list: reference.is_list,
        default: None,
    })
}

// The unqualified segment of the type, first letter lowered: Foo\UserId
// becomes userId.
fn synthesized_name(type_name: &str) -> String {
    let bare = type_name
        .rsplit(NAMESPACE_SEPARATOR)
        .next()
        .unwrap_or(type_name);
    let mut chars = bare.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
