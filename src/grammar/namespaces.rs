//! Grammar rules for `use` imports and the two namespace surface forms.

use crate::assembler::NamespaceBlock;
use crate::ast::Import;
use crate::combinator::{many, many1, Parser};
use crate::lexical::{char_p, literal, pad, spaces, spaces1};

use super::{construct, keyword, qualified_name, type_name};

/// `use <QualifiedName> (as <Alias>)? ;`
pub fn use_import() -> Parser<Import> {
    keyword("use").then(&qualified_name()).bind(|qualified_name| {
        spaces1()
            .then(&literal("as"))
            .then(&spaces1())
            .then(&type_name())
            .optional()
            .skip(&spaces())
            .skip(&char_p(';'))
            .map(move |alias| Import {
                qualified_name: qualified_name.clone(),
                alias,
            })
    })
}

/// `namespace <Name> { <use>* <construct>* }`, the braced form. Nested
/// sub-namespaces are expressed through segmented names (`Foo\Bar`), and a
/// file may hold any number of sibling blocks.
fn braced_namespace() -> Parser<NamespaceBlock> {
    keyword("namespace")
        .then(&qualified_name())
        .bind(|namespace| {
            pad().then(&char_p('{'))
                .then(&pad())
                .then(&many(&use_import().skip(&pad())))
                .bind(move |imports| {
                    let namespace = namespace.clone();
                    many(&construct().skip(&pad()))
                        .skip(&char_p('}'))
                        .map(move |definitions| NamespaceBlock {
                            namespace: namespace.clone(),
                            imports: imports.clone(),
                            definitions,
                        })
                })
        })
}

/// `namespace <Name> ; <use>* <construct>*`, the statement form, applying
/// to the remainder of the file. Consumption stops where constructs stop
/// matching, so a second `namespace` keyword (and anything after it) is left
/// as unconsumed remainder rather than folded in.
fn statement_namespace() -> Parser<NamespaceBlock> {
    keyword("namespace")
        .then(&qualified_name())
        .bind(|namespace| {
            spaces()
                .then(&char_p(';'))
                .then(&pad())
                .then(&many(&use_import().skip(&pad())))
                .bind(move |imports| {
                    let namespace = namespace.clone();
                    many(&construct().skip(&pad()))
                        .map(move |definitions| NamespaceBlock {
                            namespace: namespace.clone(),
                            imports: imports.clone(),
                            definitions,
                        })
                })
        })
}

/// A whole compilation unit: either a run of braced namespace blocks or a
/// single statement-form namespace. The braced alternative is preferred;
/// the two forms cannot both match one input.
pub fn document() -> Parser<Vec<NamespaceBlock>> {
    pad().then(
        &many1(&braced_namespace().skip(&pad()))
            .alt(&statement_namespace().map(|block| vec![block])),
    )
}
