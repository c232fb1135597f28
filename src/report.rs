use std::fmt;

use serde::Serialize;

use crate::parse::Parser;
use crate::state::ParseState;

/// Snapshot of a finished run, for debug display by demo programs. Not part
/// of the combinator contract. Field declaration order is the serialization
/// order: isError, target, index, result, error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T> {
    pub is_error: bool,
    pub target: String,
    pub index: usize,
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> Report<T> {
    /// Runs the parser over `target` and captures either the final index and
    /// result, or the failure index and message.
    pub fn capture<'a>(parser: impl Parser<'a, T>, target: &'a str) -> Self
    where
        T: 'a,
    {
        match parser.run(ParseState::new(target)) {
            Ok((state, value)) => Self {
                is_error: false,
                target: target.to_string(),
                index: state.index,
                result: Some(value),
                error: None,
            },
            Err(e) => Self {
                is_error: true,
                target: target.to_string(),
                index: e.index(),
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl<T: Serialize> fmt::Display for Report<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(text) => write!(f, "{text}"),
            Err(e) => write!(f, "<unserializable report: {e}>"),
        }
    }
}
