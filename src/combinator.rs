//! The generic parser-combinator engine.
//!
//! A [`Parser<T>`] is a pure function from an input slice to an ordered,
//! finite sequence of `(value, remainder)` pairs. The sequence order encodes
//! preference: earlier pairs are better parses, conventionally the greediest
//! consumption first. An empty sequence is the only failure signal; there is
//! no error type at this layer.
//!
//! Parsers hold no mutable state and are cheap to clone (a shared function
//! pointer), so a grammar built once can be reused across inputs and shared
//! between threads.

use std::sync::Arc;

type RunFn<T> = dyn for<'a> Fn(&'a str) -> Vec<(T, &'a str)> + Send + Sync;

/// An ambiguity-preserving parser: input text in, ordered candidate parses out.
pub struct Parser<T> {
    run: Arc<RunFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T: Send + Sync + 'static> Parser<T> {
    /// Wraps a raw parse function.
    pub fn new(run: impl for<'a> Fn(&'a str) -> Vec<(T, &'a str)> + Send + Sync + 'static) -> Self {
        Self { run: Arc::new(run) }
    }

    /// Runs the parser, returning every candidate parse in preference order.
    /// Callers that want "the" parse take the head of the sequence.
    pub fn parse<'a>(&self, input: &'a str) -> Vec<(T, &'a str)> {
        (self.run)(input)
    }

    /// Succeeds without consuming anything, yielding exactly one pair.
    pub fn result(value: T) -> Self
    where
        T: Clone,
    {
        Parser::new(move |input| vec![(value.clone(), input)])
    }

    /// Fails on every input.
    pub fn zero() -> Self {
        Parser::new(|_| Vec::new())
    }

    /// Monadic sequencing: for every candidate of `self`, runs the parser
    /// derived from its value on the corresponding remainder, concatenating
    /// all result sequences in order (outer loop over `self`, inner loop over
    /// each derived parser).
    pub fn bind<U: Send + Sync + 'static>(
        &self,
        f: impl Fn(T) -> Parser<U> + Send + Sync + 'static,
    ) -> Parser<U> {
        let run = Arc::clone(&self.run);
        Parser::new(move |input| {
            let mut out = Vec::new();
            for (value, rest) in run(input) {
                out.extend(f(value).parse(rest));
            }
            out
        })
    }

    /// Transforms every candidate value, preserving order and remainders.
    pub fn map<U: Send + Sync + 'static>(
        &self,
        f: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> Parser<U> {
        let run = Arc::clone(&self.run);
        Parser::new(move |input| {
            run(input)
                .into_iter()
                .map(|(value, rest)| (f(value), rest))
                .collect()
        })
    }

    /// Ordered choice: `self`'s candidates first, then `other`'s, both on the
    /// same input. Concatenation order is the single source of preference.
    pub fn alt(&self, other: &Parser<T>) -> Parser<T> {
        let first = Arc::clone(&self.run);
        let second = Arc::clone(&other.run);
        Parser::new(move |input| {
            let mut out = first(input);
            out.extend(second(input));
            out
        })
    }

    /// Sequences `self` then `next`, keeping `next`'s value.
    pub fn then<U: Send + Sync + 'static>(&self, next: &Parser<U>) -> Parser<U> {
        let first = Arc::clone(&self.run);
        let second = next.clone();
        Parser::new(move |input| {
            let mut out = Vec::new();
            for (_, rest) in first(input) {
                out.extend(second.parse(rest));
            }
            out
        })
    }

    /// Sequences `self` then `next`, keeping `self`'s value.
    pub fn skip<U: Send + Sync + 'static>(&self, next: &Parser<U>) -> Parser<T>
    where
        T: Clone,
    {
        let first = Arc::clone(&self.run);
        let second = next.clone();
        Parser::new(move |input| {
            let mut out = Vec::new();
            for (value, rest) in first(input) {
                for (_, rem) in second.parse(rest) {
                    out.push((value.clone(), rem));
                }
            }
            out
        })
    }

    /// Zero-or-one occurrence; the present parse is preferred to the absent
    /// one, which consumes nothing.
    pub fn optional(&self) -> Parser<Option<T>>
    where
        T: Clone,
    {
        let run = Arc::clone(&self.run);
        Parser::new(move |input| {
            let mut out: Vec<(Option<T>, &str)> = run(input)
                .into_iter()
                .map(|(value, rest)| (Some(value), rest))
                .collect();
            out.push((None, input));
            out
        })
    }
}

/// Consumes exactly one character; fails on empty input.
pub fn item() -> Parser<char> {
    Parser::new(|input| match input.chars().next() {
        Some(c) => vec![(c, &input[c.len_utf8()..])],
        None => Vec::new(),
    })
}

/// A single character satisfying `predicate`.
pub fn sat(predicate: impl Fn(char) -> bool + Send + Sync + 'static) -> Parser<char> {
    Parser::new(move |input| match input.chars().next() {
        Some(c) if predicate(c) => vec![(c, &input[c.len_utf8()..])],
        _ => Vec::new(),
    })
}

/// Zero or more repetitions of `p`, collected into a sequence. The head of
/// the output is always the maximal consumption; later entries are
/// successively shorter prefixes, ending with the zero-repetition parse of
/// the original, unconsumed input.
pub fn many<T: Clone + Send + Sync + 'static>(p: &Parser<T>) -> Parser<Vec<T>> {
    let p = p.clone();
    Parser::new(move |input| {
        let mut out = Vec::new();
        repetitions(&p, input, &mut Vec::new(), &mut out);
        out.push((Vec::new(), input));
        out
    })
}

/// One or more repetitions of `p`; fails where `p` cannot match at all.
pub fn many1<T: Clone + Send + Sync + 'static>(p: &Parser<T>) -> Parser<Vec<T>> {
    let p = p.clone();
    Parser::new(move |input| {
        let mut out = Vec::new();
        repetitions(&p, input, &mut Vec::new(), &mut out);
        out
    })
}

// Depth-first expansion of "one more repetition, then recurse" before "stop
// here", which puts longer consumptions first. A repetition that consumes no
// input terminates the recursion so a non-consuming parser cannot loop.
fn repetitions<'a, T: Clone>(
    p: &Parser<T>,
    input: &'a str,
    prefix: &mut Vec<T>,
    out: &mut Vec<(Vec<T>, &'a str)>,
) where
    T: Send + Sync + 'static,
{
    for (value, rest) in p.parse(input) {
        prefix.push(value);
        if rest.len() < input.len() {
            repetitions(p, rest, prefix, out);
        }
        out.push((prefix.clone(), rest));
        prefix.pop();
    }
}

/// One or more `p`, separated by `sep`; separator values are discarded.
pub fn sep_by1<T, S>(p: &Parser<T>, sep: &Parser<S>) -> Parser<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    let head = p.clone();
    let tail = many(&sep.then(p));
    head.bind(move |first| {
        tail.map(move |mut rest| {
            let mut items = Vec::with_capacity(rest.len() + 1);
            items.push(first.clone());
            items.append(&mut rest);
            items
        })
    })
}

/// Like [`sep_by1`] but also admits zero occurrences, yielding the empty
/// sequence as a valid parse of the original input.
pub fn sep_by<T, S>(p: &Parser<T>, sep: &Parser<S>) -> Parser<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    sep_by1(p, sep).alt(&Parser::result(Vec::new()))
}
