//! Character-class and token-level parsers built from the combinator engine.
//!
//! Numeric and identifier scanners keep the engine's full prefix ambiguity
//! (`nat` on `"345"` yields 345, 34, 3 in that order). Whitespace and exact
//! text carry no information, so those parsers collapse to a single maximal
//! result; that is the lazy-evaluation/bounding concession that keeps the
//! ambiguous-result sequences from exploding on long inputs.

use crate::combinator::{many, many1, sat, sep_by, Parser};

pub fn char_p(expected: char) -> Parser<char> {
    sat(move |c| c == expected)
}

pub fn digit() -> Parser<char> {
    sat(|c| c.is_ascii_digit())
}

pub fn lower() -> Parser<char> {
    sat(|c| c.is_ascii_lowercase())
}

pub fn upper() -> Parser<char> {
    sat(|c| c.is_ascii_uppercase())
}

pub fn letter() -> Parser<char> {
    lower().alt(&upper())
}

pub fn alphanum() -> Parser<char> {
    letter().alt(&digit())
}

pub fn underscore() -> Parser<char> {
    char_p('_')
}

/// Zero or more `p`, collected into a `String` instead of a sequence.
pub fn many_str(p: &Parser<char>) -> Parser<String> {
    many(p).map(|chars| chars.into_iter().collect())
}

/// One or more `p`, collected into a `String`.
pub fn many1_str(p: &Parser<char>) -> Parser<String> {
    many1(p).map(|chars| chars.into_iter().collect())
}

/// Zero-or-more run of horizontal whitespace. Always succeeds, single
/// maximal result.
pub fn spaces() -> Parser<()> {
    Parser::new(|input| vec![((), input.trim_start_matches([' ', '\t']))])
}

/// One-or-more run of horizontal whitespace.
pub fn spaces1() -> Parser<()> {
    Parser::new(|input| {
        let rest = input.trim_start_matches([' ', '\t']);
        if rest.len() == input.len() {
            Vec::new()
        } else {
            vec![((), rest)]
        }
    })
}

/// Zero-or-more whitespace including line breaks. Always succeeds.
pub fn pad() -> Parser<()> {
    Parser::new(|input| vec![((), input.trim_start_matches([' ', '\t', '\r', '\n']))])
}

/// One-or-more whitespace including line breaks.
pub fn pad1() -> Parser<()> {
    Parser::new(|input| {
        let rest = input.trim_start_matches([' ', '\t', '\r', '\n']);
        if rest.len() == input.len() {
            Vec::new()
        } else {
            vec![((), rest)]
        }
    })
}

/// A line terminator, optionally preceded by horizontal whitespace.
pub fn newline() -> Parser<()> {
    Parser::new(|input| {
        let rest = input.trim_start_matches([' ', '\t']);
        match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
            Some(stripped) => vec![((), stripped)],
            None => Vec::new(),
        }
    })
}

/// Exact text, single result.
pub fn literal(expected: &'static str) -> Parser<&'static str> {
    Parser::new(move |input| match input.strip_prefix(expected) {
        Some(rest) => vec![(expected, rest)],
        None => Vec::new(),
    })
}

/// A comma, optionally padded by whitespace or line breaks on both sides.
pub fn comma() -> Parser<char> {
    pad().then(&char_p(',')).skip(&pad())
}

/// The constructor separator: a `|` padded like [`comma`].
pub fn pipe() -> Parser<char> {
    pad().then(&char_p('|')).skip(&pad())
}

/// One or more digits. Ambiguity propagates from `many1`: every shorter
/// prefix is also offered, so `"345"` parses as 345, then 34, then 3.
/// Prefixes that overflow `i64` are dropped from the sequence.
pub fn nat() -> Parser<i64> {
    let digits = many1_str(&digit());
    Parser::new(move |input| {
        digits
            .parse(input)
            .into_iter()
            .filter_map(|(text, rest)| text.parse::<i64>().ok().map(|n| (n, rest)))
            .collect()
    })
}

/// An optionally negated natural number.
pub fn int() -> Parser<i64> {
    char_p('-').then(&nat()).map(|n| -n).alt(&nat())
}

/// A bracketed, comma-separated integer list: `[1, 2, 3]` or `[]`.
pub fn ints() -> Parser<Vec<i64>> {
    char_p('[')
        .then(&pad())
        .then(&sep_by(&int(), &comma()))
        .skip(&pad())
        .skip(&char_p(']'))
}

/// `true` or `false`.
pub fn bool_lit() -> Parser<bool> {
    literal("true")
        .map(|_| true)
        .alt(&literal("false").map(|_| false))
}

/// A decimal literal with a mandatory fractional part, greedily consumed.
pub fn float_lit() -> Parser<f64> {
    Parser::new(|input| {
        let unsigned = input.strip_prefix('-').unwrap_or(input);
        let after_whole = unsigned.trim_start_matches(|c: char| c.is_ascii_digit());
        if after_whole.len() == unsigned.len() {
            return Vec::new();
        }
        let Some(frac) = after_whole.strip_prefix('.') else {
            return Vec::new();
        };
        let after_frac = frac.trim_start_matches(|c: char| c.is_ascii_digit());
        if after_frac.len() == frac.len() {
            return Vec::new();
        }
        let consumed = input.len() - after_frac.len();
        match input[..consumed].parse::<f64>() {
            Ok(value) => vec![(value, &input[consumed..])],
            Err(_) => Vec::new(),
        }
    })
}

/// A single- or double-quoted string literal. Escape sequences are not
/// interpreted; the quote character simply may not appear in the body.
pub fn string_lit() -> Parser<String> {
    Parser::new(|input| {
        let quote = match input.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Vec::new(),
        };
        match input[1..].find(quote) {
            Some(end) => vec![(input[1..1 + end].to_string(), &input[2 + end..])],
            None => Vec::new(),
        }
    })
}
