use crate::error::ParseError;
use crate::state::ParseState;

pub type PResult<'a, T> = Result<(ParseState<'a>, T), ParseError>;

/// A parser moves the cursor forward and produces a typed value, or fails
/// with an error carrying the failure index. Any function with that shape is
/// a parser; combinators close over their constituents to build new ones.
/// Parsers hold no mutable state, so one parser value may be run any number
/// of times.
pub trait Parser<'a, T> {
    fn run(&self, state: ParseState<'a>) -> PResult<'a, T>;
}

impl<'a, T, F> Parser<'a, T> for F
where
    F: Fn(ParseState<'a>) -> PResult<'a, T>,
{
    fn run(&self, state: ParseState<'a>) -> PResult<'a, T> {
        self(state)
    }
}

/// Plain-function parser. Grammar rules written as `fn` items coerce to this,
/// which lets them share a single type in `OneOf` branch lists and `then`
/// continuations.
pub type StateFn<'a, T> = fn(ParseState<'a>) -> PResult<'a, T>;

/// Builds the initial state over `target` and applies the parser once. This
/// is the entry point for external callers; `target` does not have to be
/// fully consumed.
pub fn run_parser<'a, T>(parser: impl Parser<'a, T>, target: &'a str) -> Result<T, ParseError> {
    let (_, result) = parser.run(ParseState::new(target))?;
    Ok(result)
}
