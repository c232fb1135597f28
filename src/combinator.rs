//! Combinators: they never inspect the input themselves, they build new
//! parsers out of existing ones. Failure handling follows one rule — a failed
//! sub-parser's consumption is never visible to whatever runs next, because
//! the failed branch returns an error instead of an advanced state.

use std::marker::PhantomData;

use crate::character::{is_char, whitespace};
use crate::error::ParseError;
use crate::parse::{PResult, Parser};
use crate::state::ParseState;

/// Runs each parser in order, threading the state through and collecting the
/// results. Stops at the first failure.
#[derive(Debug, Default)]
pub struct Sequence<'a, T, F>
where
    F: Parser<'a, T>,
{
    items: Vec<F>,
    _t: PhantomData<(&'a (), T)>,
}

impl<'a, T, F> Sequence<'a, T, F>
where
    F: Parser<'a, T>,
{
    pub fn new(items: Vec<F>) -> Self {
        Self {
            items,
            _t: PhantomData,
        }
    }
}

impl<'a, T, F: Parser<'a, T>> Parser<'a, Vec<T>> for Sequence<'a, T, F> {
    fn run(&self, state: ParseState<'a>) -> PResult<'a, Vec<T>> {
        let mut current = state;
        let mut out = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let (next, value) = item.run(current)?;
            current = next;
            out.push(value);
        }
        Ok((current, out))
    }
}

/// Tries each branch from the original incoming state and returns the first
/// success. Branch order matters: ambiguous grammars resolve to the first
/// matching branch. If every branch fails, the failure index is whatever the
/// last branch reported.
#[derive(Debug, Default)]
pub struct OneOf<'a, T, F>
where
    F: Parser<'a, T>,
{
    branches: Vec<F>,
    _t: PhantomData<(&'a (), T)>,
}

impl<'a, T, F> OneOf<'a, T, F>
where
    F: Parser<'a, T>,
{
    pub fn new(branches: Vec<F>) -> Self {
        Self {
            branches,
            _t: PhantomData,
        }
    }
}

impl<'a, T, F: Parser<'a, T>> Parser<'a, T> for OneOf<'a, T, F> {
    fn run(&self, state: ParseState<'a>) -> PResult<'a, T> {
        let mut last: Option<ParseError> = None;
        for branch in &self.branches {
            match branch.run(state) {
                Ok(hit) => return Ok(hit),
                Err(e) => last = Some(e),
            }
        }
        let index = last.map_or(state.index, |e| e.index());
        Err(ParseError::NoMatch { index })
    }
}

/// Transforms the success payload. `f` never runs on the failure path.
pub fn map<'a, T, U, F, G>(parser: F, f: G) -> impl Fn(ParseState<'a>) -> PResult<'a, U>
where
    F: Parser<'a, T>,
    G: Fn(T) -> U,
{
    move |state| {
        let (next, value) = parser.run(state)?;
        Ok((next, f(value)))
    }
}

/// Rewrites the error. Only active on the failure path; the success path
/// passes through untouched. Used to give grammar-specific messages.
pub fn map_err<'a, T, F, G>(parser: F, f: G) -> impl Fn(ParseState<'a>) -> PResult<'a, T>
where
    F: Parser<'a, T>,
    G: Fn(ParseError) -> ParseError,
{
    move |state| parser.run(state).map_err(|e| f(e))
}

/// Monadic bind: `f` picks the next parser from the result just produced,
/// and that parser runs from the already-advanced state. Short-circuits on
/// failure. This is what lets the shape of what comes next depend on what
/// was just parsed.
pub fn then<'a, T, U, F, G, P>(parser: F, f: G) -> impl Fn(ParseState<'a>) -> PResult<'a, U>
where
    F: Parser<'a, T>,
    G: Fn(T) -> P,
    P: Parser<'a, U>,
{
    move |state| {
        let (next, value) = parser.run(state)?;
        f(value).run(next)
    }
}

/// Defers parser construction to run time, once per invocation. A grammar
/// that refers to itself wraps the recursive reference in `lazy` so the
/// parser graph is never built eagerly.
pub fn lazy<'a, T, F, P>(thunk: F) -> impl Fn(ParseState<'a>) -> PResult<'a, T>
where
    F: Fn() -> P,
    P: Parser<'a, T>,
{
    move |state| thunk().run(state)
}

/// Heterogeneous two-parser sequencing.
pub fn and<'a, A, B, F, G>(first: F, second: G) -> impl Fn(ParseState<'a>) -> PResult<'a, (A, B)>
where
    F: Parser<'a, A>,
    G: Parser<'a, B>,
{
    move |state| {
        let (s0, a) = first.run(state)?;
        let (s1, b) = second.run(s0)?;
        Ok((s1, (a, b)))
    }
}

/// Runs the parser for its consumption only.
pub fn discard<'a, T, F>(parser: F) -> impl Fn(ParseState<'a>) -> PResult<'a, ()>
where
    F: Parser<'a, T>,
{
    map(parser, |_| ())
}

/// Zero or more matches. Never fails: the first failing attempt is discarded
/// and the last good state is returned with whatever was collected.
pub fn repeat0<'a, T, F>(parser: F) -> impl Fn(ParseState<'a>) -> PResult<'a, Vec<T>>
where
    F: Parser<'a, T>,
{
    move |state| {
        let mut out = Vec::new();
        let mut current = state;
        while let Ok((next, value)) = parser.run(current) {
            out.push(value);
            current = next;
        }
        Ok((current, out))
    }
}

/// One or more matches.
pub fn repeat1<'a, T, F>(parser: F) -> impl Fn(ParseState<'a>) -> PResult<'a, Vec<T>>
where
    F: Parser<'a, T>,
{
    move |state| {
        let mut out = Vec::new();
        let mut current = state;
        loop {
            match parser.run(current) {
                Ok((next, value)) => {
                    out.push(value);
                    current = next;
                }
                Err(e) => {
                    if out.is_empty() {
                        return Err(ParseError::ExpectedAtLeastOne { index: e.index() });
                    }
                    return Ok((current, out));
                }
            }
        }
    }
}

/// Values separated by a separator. A separator only counts when another
/// value follows it, so a trailing separator is left unconsumed and the
/// state backtracks to just after the last value.
pub fn delimited0<'a, T, S, F, G>(
    value: F,
    separator: G,
) -> impl Fn(ParseState<'a>) -> PResult<'a, Vec<T>>
where
    F: Parser<'a, T>,
    G: Parser<'a, S>,
{
    move |state| {
        let mut out = Vec::new();
        let mut last_good = match value.run(state) {
            Ok((next, item)) => {
                out.push(item);
                next
            }
            Err(_) => return Ok((state, out)),
        };
        loop {
            let after_sep = match separator.run(last_good) {
                Ok((next, _)) => next,
                Err(_) => return Ok((last_good, out)),
            };
            match value.run(after_sep) {
                Ok((next, item)) => {
                    out.push(item);
                    last_good = next;
                }
                Err(_) => return Ok((last_good, out)),
            }
        }
    }
}

/// Like `delimited0` but fails when no value was ever parsed.
pub fn delimited1<'a, T, S, F, G>(
    value: F,
    separator: G,
) -> impl Fn(ParseState<'a>) -> PResult<'a, Vec<T>>
where
    F: Parser<'a, T>,
    G: Parser<'a, S>,
{
    let inner = delimited0(value, separator);
    move |state| {
        let (next, out) = inner(state)?;
        if out.is_empty() {
            return Err(ParseError::ExpectedAtLeastOne { index: state.index });
        }
        Ok((next, out))
    }
}

/// Absorbs failure: on success the advanced state and `Some(value)`, on
/// failure the original state and `None`.
pub fn optional<'a, T, F>(parser: F) -> impl Fn(ParseState<'a>) -> PResult<'a, Option<T>>
where
    F: Parser<'a, T>,
{
    move |state| match parser.run(state) {
        Ok((next, value)) => Ok((next, Some(value))),
        Err(_) => Ok((state, None)),
    }
}

/// Runs left, content, right in order and yields only the content's result.
pub fn wrapped<'a, L, T, R, F, G, H>(
    left: F,
    content: G,
    right: H,
) -> impl Fn(ParseState<'a>) -> PResult<'a, T>
where
    F: Parser<'a, L>,
    G: Parser<'a, T>,
    H: Parser<'a, R>,
{
    move |state| {
        let (s0, _) = left.run(state)?;
        let (s1, value) = content.run(s0)?;
        let (s2, _) = right.run(s1)?;
        Ok((s2, value))
    }
}

/// Skips whitespace on both sides of the parser.
pub fn padded<'a, T, F>(parser: F) -> impl Fn(ParseState<'a>) -> PResult<'a, T>
where
    F: Parser<'a, T>,
{
    move |state| {
        let (s0, _) = whitespace(state)?;
        let (s1, value) = parser.run(s0)?;
        let (s2, _) = whitespace(s1)?;
        Ok((s2, value))
    }
}

/// Single-character bracket pair with whitespace trimming around the
/// brackets and the content, yielding only the content's result.
pub fn bracketed<'a, T, F>(
    open: char,
    close: char,
    content: F,
) -> impl Fn(ParseState<'a>) -> PResult<'a, T>
where
    F: Parser<'a, T>,
{
    padded(wrapped(is_char(open), padded(content), is_char(close)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::character::{digits, letters, literal};
    use crate::parse::StateFn;
    use std::cell::Cell;

    #[test]
    fn test_sequence() {
        let parser = Sequence::new(vec![literal("a"), literal("b"), literal("c")]);
        let (s, res) = parser.run(ParseState::new("abcd")).unwrap();
        assert_eq!(res, vec!["a", "b", "c"]);
        assert_eq!(s.remaining(), "d");

        let err = parser.run(ParseState::new("abx")).unwrap_err();
        assert_eq!(err.index(), 2);
    }

    #[test]
    fn test_one_of() {
        let parser = OneOf::new(vec![literal("a"), literal("b")]);
        let (_, res) = parser.run(ParseState::new("b")).unwrap();
        assert_eq!(res, "b");

        let err = parser.run(ParseState::new("c")).unwrap_err();
        assert!(matches!(err, ParseError::NoMatch { index: 0 }));
    }

    fn ab_then_x<'a>(state: ParseState<'a>) -> PResult<'a, &'a str> {
        map(and(literal("ab"), literal("x")), |(a, _)| a).run(state)
    }

    fn abc<'a>(state: ParseState<'a>) -> PResult<'a, &'a str> {
        literal("abc")(state)
    }

    #[test]
    fn test_one_of_backtracks() {
        // the first branch consumes "ab" before failing; the second branch
        // must still see the original state
        let parser = OneOf::new(vec![ab_then_x as StateFn<&str>, abc as StateFn<&str>]);
        let (s, res) = parser.run(ParseState::new("abc")).unwrap();
        assert_eq!(res, "abc");
        assert_eq!(s.index, 3);
    }

    #[test]
    fn test_map() {
        let parser = map(digits, |d: &str| d.len());
        let (_, res) = parser(ParseState::new("12345")).unwrap();
        assert_eq!(res, 5);
    }

    #[test]
    fn test_map_err() {
        let parser = map_err(digits, |e| ParseError::grammar("wanted a count", e.index()));
        let err = parser(ParseState::new("abc")).unwrap_err();
        assert_eq!(err.to_string(), "wanted a count at 0");
        // success path untouched
        assert!(parser(ParseState::new("7")).is_ok());
    }

    #[test]
    fn test_then() {
        // the first character decides what the rest must be
        let parser = then(OneOf::new(vec![literal("#"), literal("$")]), |tag| {
            if tag == "#" {
                digits as StateFn<&str>
            } else {
                letters as StateFn<&str>
            }
        });
        let (_, res) = parser(ParseState::new("#123")).unwrap();
        assert_eq!(res, "123");
        let (_, res) = parser(ParseState::new("$abc")).unwrap();
        assert_eq!(res, "abc");
        assert!(parser(ParseState::new("#abc")).is_err());
    }

    #[test]
    fn test_repeat0() {
        {
            let (s, res) = repeat0(digits)(ParseState::new("123abc")).unwrap();
            assert_eq!(res, vec!["123"]);
            assert_eq!(s.index, 3);
            // the rest stays available to the next parser in the chain
            let (_, tail) = letters(s).unwrap();
            assert_eq!(tail, "abc");
        }
        {
            let (s, res) = repeat0(digits)(ParseState::new("abc")).unwrap();
            assert!(res.is_empty());
            assert_eq!(s.index, 0);
        }
    }

    #[test]
    fn test_repeat1() {
        let (_, res) = repeat1(literal("ab"))(ParseState::new("ababab")).unwrap();
        assert_eq!(res.len(), 3);

        let err = repeat1(digits)(ParseState::new("abc")).unwrap_err();
        assert!(matches!(err, ParseError::ExpectedAtLeastOne { index: 0 }));
    }

    #[test]
    fn test_delimited0() {
        let (s, res) = delimited0(letters, literal(","))(ParseState::new("a,b,c,d")).unwrap();
        assert_eq!(res, vec!["a", "b", "c", "d"]);
        assert_eq!(s.remaining(), "");

        let (s, res) = delimited0(letters, literal(","))(ParseState::new("123")).unwrap();
        assert!(res.is_empty());
        assert_eq!(s.index, 0);
    }

    #[test]
    fn test_delimited0_trailing_separator() {
        let (s, res) = delimited0(letters, literal(","))(ParseState::new("a,b,")).unwrap();
        assert_eq!(res, vec!["a", "b"]);
        // the trailing comma is not consumed
        assert_eq!(s.remaining(), ",");
    }

    #[test]
    fn test_delimited1() {
        let (_, res) = delimited1(digits, literal(";"))(ParseState::new("1;2;3")).unwrap();
        assert_eq!(res, vec!["1", "2", "3"]);

        let err = delimited1(digits, literal(";"))(ParseState::new("x")).unwrap_err();
        assert!(matches!(err, ParseError::ExpectedAtLeastOne { index: 0 }));
    }

    #[test]
    fn test_optional() {
        let (s, res) = optional(literal("x"))(ParseState::new("y")).unwrap();
        assert_eq!(res, None);
        assert_eq!(s.index, 0);

        let (s, res) = optional(literal("x"))(ParseState::new("xy")).unwrap();
        assert_eq!(res, Some("x"));
        assert_eq!(s.index, 1);
    }

    #[test]
    fn test_wrapped() {
        let (s, res) = wrapped(literal("{"), letters, literal("}"))(ParseState::new("{a}")).unwrap();
        assert_eq!(res, "a");
        assert_eq!(s.remaining(), "");

        let (_, res) =
            wrapped(literal("<<"), letters, literal(">>"))(ParseState::new("<<foobar>>")).unwrap();
        assert_eq!(res, "foobar");
    }

    #[test]
    fn test_bracketed() {
        let (s, res) = bracketed('(', ')', digits)(ParseState::new("  ( 42 )  x")).unwrap();
        assert_eq!(res, "42");
        assert_eq!(s.remaining(), "x");

        let (_, res) = bracketed('[', ']', letters)(ParseState::new("[abc]")).unwrap();
        assert_eq!(res, "abc");
    }

    #[test]
    fn test_lazy_defers_construction() {
        let calls = Cell::new(0u32);
        let parser = lazy(|| {
            calls.set(calls.get() + 1);
            literal("x")
        });
        assert_eq!(calls.get(), 0);
        parser(ParseState::new("x")).unwrap();
        assert_eq!(calls.get(), 1);
        parser(ParseState::new("x")).unwrap();
        assert_eq!(calls.get(), 2);
    }

    // recursive grammar: counts the nesting depth of balanced parentheses
    fn nesting<'a>(state: ParseState<'a>) -> PResult<'a, usize> {
        let (next, inner) = optional(wrapped(
            is_char('('),
            lazy(|| nesting as StateFn<usize>),
            is_char(')'),
        ))
        .run(state)?;
        Ok((next, inner.map_or(0, |d| d + 1)))
    }

    #[test]
    fn test_recursive_grammar() {
        let (s, depth) = nesting(ParseState::new("((()))")).unwrap();
        assert_eq!(depth, 3);
        assert_eq!(s.remaining(), "");

        let (s, depth) = nesting(ParseState::new("xyz")).unwrap();
        assert_eq!(depth, 0);
        assert_eq!(s.index, 0);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let parser = repeat0(OneOf::new(vec![literal("a"), literal("b")]));
        let first = parser(ParseState::new("abba!"));
        let second = parser(ParseState::new("abba!"));
        assert_eq!(first, second);
    }
}
