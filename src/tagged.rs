//! Demo consumer: tag-dispatched literals of the form `tag:value`, where the
//! tag decides which parser reads the value. Exercises `then` — the
//! continuation picks the next parser from the result just produced.

use serde::Serialize;

use crate::character::{digits, is_char, letters};
use crate::combinator::{and, map, then};
use crate::error::ParseError;
use crate::parse::{run_parser, PResult, StateFn};
use crate::state::ParseState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TaggedValue {
    Word(String),
    Int(i64),
}

/// `string:hello` -> `Word("hello")`, `number:48` -> `Int(48)`.
pub fn tagged_value(state: ParseState<'_>) -> PResult<'_, TaggedValue> {
    then(map(and(letters, is_char(':')), |(tag, _)| tag), dispatch)(state)
}

pub fn parse(source: &str) -> Result<TaggedValue, ParseError> {
    run_parser(tagged_value, source)
}

fn dispatch<'a>(tag: &str) -> StateFn<'a, TaggedValue> {
    match tag {
        "string" => word_value as StateFn<'a, TaggedValue>,
        "number" => int_value as StateFn<'a, TaggedValue>,
        _ => unknown_tag as StateFn<'a, TaggedValue>,
    }
}

fn word_value<'a>(state: ParseState<'a>) -> PResult<'a, TaggedValue> {
    let (next, word) = letters(state)?;
    Ok((next, TaggedValue::Word(word.to_string())))
}

fn int_value<'a>(state: ParseState<'a>) -> PResult<'a, TaggedValue> {
    let (next, text) = digits(state)?;
    let value = text.parse::<i64>().map_err(|source| ParseError::InvalidNumber {
        source,
        index: state.index,
    })?;
    Ok((next, TaggedValue::Int(value)))
}

fn unknown_tag<'a>(state: ParseState<'a>) -> PResult<'a, TaggedValue> {
    Err(ParseError::grammar(
        "expected a \"string\" or \"number\" tag",
        state.index,
    ))
}
