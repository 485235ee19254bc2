//! One parser per FPP surface construct.
//!
//! Every rule returns a fully formed AST value, never text, and follows the
//! same failure policy: a construct that does not match its full mandatory
//! shape (missing terminator, wrong arity) yields an empty result sequence,
//! never a partial node. Disambiguation happens structurally: the ambiguous
//! prefixes that name scanning produces are pruned by the mandatory tokens
//! that follow them, so taking the head of a rule's result sequence commits
//! to a parse only after the grammar itself has ruled out the alternatives.

pub mod behaviors;
pub mod namespaces;
pub mod types;

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::ast::Definition;
use crate::combinator::{sep_by1, Parser};
use crate::lexical::{char_p, digit, letter, literal, many_str, spaces1, underscore};

pub use namespaces::{document, use_import};

/// Identifiers reserved in generated code. A declared type name whose
/// lowercase form appears here is rejected at parse time: the maximal
/// candidate is dropped from the scanner's result sequence, leaving only its
/// shorter prefixes. The table is immutable, process-wide static data.
pub static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "and", "as", "break", "callable", "case", "catch", "class",
        "clone", "const", "continue", "declare", "default", "do", "else",
        "elseif", "enddeclare", "endfor", "endforeach", "endif", "endswitch",
        "endwhile", "enum", "extends", "final", "finally", "fn", "for",
        "foreach", "function", "global", "goto", "if", "implements",
        "include", "include_once", "instanceof", "insteadof", "interface",
        "match", "namespace", "new", "or", "private", "protected", "public",
        "readonly", "require", "require_once", "return", "static", "switch",
        "throw", "trait", "try", "use", "var", "while", "xor", "yield",
    ]
    .into_iter()
    .collect()
});

/// A keyword followed by mandatory horizontal whitespace.
pub(crate) fn keyword(word: &'static str) -> Parser<()> {
    literal(word).then(&spaces1())
}

/// A bare identifier: a letter or underscore, then letters, digits, and
/// underscores. Prefix ambiguity from the trailing scan is preserved,
/// longest candidate first. No reserved-word filtering.
pub fn identifier() -> Parser<String> {
    let start = letter().alt(&underscore());
    let rest = many_str(&letter().alt(&digit()).alt(&underscore()));
    start.bind(move |first| rest.map(move |tail| format!("{}{}", first, tail)))
}

/// A declared type name: an identifier whose maximal candidate is removed
/// from the result sequence iff it is a reserved word. A name that merely
/// starts with a keyword but is strictly longer parses in full.
pub fn type_name() -> Parser<String> {
    let ident = identifier();
    Parser::new(move |input| {
        let mut results = ident.parse(input);
        if let Some((maximal, _)) = results.first() {
            if RESERVED_WORDS.contains(maximal.to_ascii_lowercase().as_str()) {
                results.remove(0);
            }
        }
        results
    })
}

/// A possibly segmented name: `Foo` or `Foo\Bar\Baz`.
pub fn qualified_name() -> Parser<String> {
    sep_by1(&type_name(), &char_p('\\')).map(|segments| segments.join("\\"))
}

/// Any top-level type construct.
pub fn construct() -> Parser<Definition> {
    types::enum_def()
        .alt(&types::data_def())
        .alt(&types::marker_def())
        .alt(&types::wrapper_def())
        .alt(&behaviors::command_def())
        .alt(&behaviors::event_def())
}
