//! Parsers that inspect the remaining input directly: literals, character
//! runs, and the derived `whitespace` and `number` parsers. All of them fail
//! without consuming anything and report the index they started from.

use crate::combinator::{and, discard, optional, repeat0, OneOf};
use crate::error::ParseError;
use crate::parse::{PResult, Parser};
use crate::state::ParseState;

fn found_snippet(rest: &str) -> String {
    const MAX: usize = 16;
    if rest.len() <= MAX {
        return rest.to_string();
    }
    let mut end = MAX;
    while !rest.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &rest[..end])
}

/// Matches `pattern` exactly at the cursor and yields it.
pub fn literal<'p, 'a>(pattern: &'p str) -> impl Fn(ParseState<'a>) -> PResult<'a, &'p str> {
    move |state| {
        let rest = state.remaining();
        if rest.is_empty() {
            return Err(ParseError::EndOfInput {
                expected: pattern.to_string(),
                index: state.index,
            });
        }
        if rest.starts_with(pattern) {
            Ok((state.advance(pattern.len()), pattern))
        } else {
            Err(ParseError::ExpectedLiteral {
                expected: pattern.to_string(),
                found: found_snippet(rest),
                index: state.index,
            })
        }
    }
}

/// Matches a single expected character.
pub fn is_char<'a>(expected: char) -> impl Fn(ParseState<'a>) -> PResult<'a, char> {
    move |state| match state.remaining().chars().next() {
        None => Err(ParseError::EndOfInput {
            expected: expected.to_string(),
            index: state.index,
        }),
        Some(c) if c == expected => Ok((state.advance(expected.len_utf8()), expected)),
        Some(c) => Err(ParseError::ExpectedLiteral {
            expected: expected.to_string(),
            found: c.to_string(),
            index: state.index,
        }),
    }
}

fn class_run<'a>(
    state: ParseState<'a>,
    pred: fn(char) -> bool,
    class: &'static str,
) -> PResult<'a, &'a str> {
    let rest = state.remaining();
    if rest.is_empty() {
        return Err(ParseError::EndOfInput {
            expected: class.to_string(),
            index: state.index,
        });
    }
    let end = rest.find(|c| !pred(c)).unwrap_or(rest.len());
    if end == 0 {
        return Err(ParseError::ExpectedClass {
            class,
            index: state.index,
        });
    }
    Ok((state.advance(end), &rest[..end]))
}

/// Longest leading run of `[A-Za-z]+`.
pub fn letters<'a>(state: ParseState<'a>) -> PResult<'a, &'a str> {
    class_run(state, |c| c.is_ascii_alphabetic(), "letters")
}

/// Longest leading run of `[0-9]+`.
pub fn digits<'a>(state: ParseState<'a>) -> PResult<'a, &'a str> {
    class_run(state, |c| c.is_ascii_digit(), "digits")
}

/// Consumes any run of spaces, tabs, newlines, and carriage returns. Never
/// fails; callers use it only for the consumption, so the result is unit.
pub fn whitespace(state: ParseState<'_>) -> PResult<'_, ()> {
    discard(repeat0(OneOf::new(vec![
        literal(" "),
        literal("\t"),
        literal("\n"),
        literal("\r"),
    ])))(state)
}

/// Signed decimal literal: optional `-`, a digit run, and an optional
/// fractional part. Yields the matched text; no exponents and no numeric
/// conversion, grammars `map` the string afterwards.
pub fn number(state: ParseState<'_>) -> PResult<'_, String> {
    let (s0, sign) = optional(literal("-")).run(state)?;
    let (s1, whole) = digits(s0)?;
    let (s2, fraction) = optional(and(literal("."), digits)).run(s1)?;

    let mut text = String::new();
    if let Some(sign) = sign {
        text.push_str(sign);
    }
    text.push_str(whole);
    if let Some((point, frac)) = fraction {
        text.push_str(point);
        text.push_str(frac);
    }
    Ok((s2, text))
}
