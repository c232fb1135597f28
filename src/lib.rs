//! A small parser-combinator toolkit: primitive text parsers plus combinators
//! that compose into arbitrary grammars. A parser is any function from a
//! [`ParseState`] cursor to a `Result` of the advanced cursor and a typed
//! value; combinators build new parsers out of existing ones without running
//! anything until [`run_parser`] is called.
//!
//! ```
//! use kombi::character::number;
//! use kombi::run_parser;
//!
//! assert_eq!(run_parser(number, "-12.34").unwrap(), "-12.34");
//! ```

pub mod character;
pub mod combinator;
pub mod error;
pub mod parse;
pub mod polish;
pub mod report;
pub mod state;
pub mod tagged;

pub use error::ParseError;
pub use parse::{run_parser, PResult, Parser, StateFn};
pub use report::Report;
pub use state::ParseState;
