use std::num::ParseIntError;

use thiserror::Error;

/// A parse failure. Every variant records the index into the target where the
/// failure was reported; nothing before that index was consumed by the failed
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected:?} but input ended unexpectedly at {index}")]
    EndOfInput { expected: String, index: usize },
    #[error("expected {expected:?} but got {found:?} at {index}")]
    ExpectedLiteral {
        expected: String,
        found: String,
        index: usize,
    },
    #[error("expected {class} at {index}")]
    ExpectedClass { class: &'static str, index: usize },
    #[error("no matches found at {index}")]
    NoMatch { index: usize },
    #[error("at least one match expected but found none at {index}")]
    ExpectedAtLeastOne { index: usize },
    #[error("invalid numeric literal at {index}: {source}")]
    InvalidNumber {
        source: ParseIntError,
        index: usize,
    },
    #[error("{message} at {index}")]
    Grammar { message: String, index: usize },
}

impl ParseError {
    /// Index into the target where this failure was reported.
    pub fn index(&self) -> usize {
        match self {
            Self::EndOfInput { index, .. }
            | Self::ExpectedLiteral { index, .. }
            | Self::ExpectedClass { index, .. }
            | Self::NoMatch { index }
            | Self::ExpectedAtLeastOne { index }
            | Self::InvalidNumber { index, .. }
            | Self::Grammar { index, .. } => *index,
        }
    }

    /// A grammar-author failure, used by `map_err` rewrites and by grammars
    /// that reject a value after it was read.
    pub fn grammar(message: impl Into<String>, index: usize) -> Self {
        Self::Grammar {
            message: message.into(),
            index,
        }
    }
}
