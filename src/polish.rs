//! Demo consumer: a Polish-notation calculator. The grammar is built
//! entirely from the toolkit — `number`, `whitespace`, `literal`,
//! `bracketed`, `OneOf`, `lazy` — and the engine never sees the AST shape.
//!
//! `(+ 10 (/ 40 20))` parses to a nested operation tree and evaluates to 12.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::character::{literal, number, whitespace};
use crate::combinator::{bracketed, lazy, map_err, padded, OneOf};
use crate::error::ParseError;
use crate::parse::{PResult, Parser, StateFn};
use crate::state::ParseState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Op {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Op {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

/// Expression tree. Serializes as tagged `{"type": ..., "value": ...}`
/// nodes for the debug JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Expr {
    Number(i64),
    Operation {
        op: Op,
        a: Box<Expr>,
        b: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
}

/// An expression is a signed integer literal or a bracketed operation.
pub fn expression(state: ParseState<'_>) -> PResult<'_, Expr> {
    lazy(|| OneOf::new(vec![number_literal as StateFn<Expr>, operation as StateFn<Expr>])).run(state)
}

/// Parses a complete expression, requiring the whole input to be consumed.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let (state, expr) = padded(expression).run(ParseState::new(source))?;
    if !state.is_empty() {
        return Err(ParseError::grammar("unexpected trailing input", state.index));
    }
    Ok(expr)
}

pub fn eval(expr: &Expr) -> Result<i64, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Operation { op, a, b } => {
            let a = eval(a)?;
            let b = eval(b)?;
            match op {
                Op::Add => Ok(a + b),
                Op::Sub => Ok(a - b),
                Op::Mul => Ok(a * b),
                Op::Div => {
                    if b == 0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    Ok(a / b)
                }
            }
        }
    }
}

fn number_literal<'a>(state: ParseState<'a>) -> PResult<'a, Expr> {
    let (next, text) = number(state)?;
    let value = text.parse::<i64>().map_err(|source| ParseError::InvalidNumber {
        source,
        index: state.index,
    })?;
    Ok((next, Expr::Number(value)))
}

fn operator<'a>(state: ParseState<'a>) -> PResult<'a, Op> {
    let symbols = OneOf::new(vec![literal("+"), literal("-"), literal("*"), literal("/")]);
    let (next, symbol) = map_err(symbols, |e| {
        ParseError::grammar("expected an operator (one of + - * /)", e.index())
    })
    .run(state)?;
    let op = Op::from_symbol(symbol)
        .ok_or_else(|| ParseError::grammar("expected an operator (one of + - * /)", state.index))?;
    Ok((next, op))
}

fn operation<'a>(state: ParseState<'a>) -> PResult<'a, Expr> {
    bracketed('(', ')', operation_body).run(state)
}

fn operation_body<'a>(state: ParseState<'a>) -> PResult<'a, Expr> {
    let (s0, op) = operator(state)?;
    let (s1, _) = whitespace(s0)?;
    let (s2, a) = expression(s1)?;
    let (s3, _) = whitespace(s2)?;
    let (s4, b) = expression(s3)?;
    Ok((
        s4,
        Expr::Operation {
            op,
            a: Box::new(a),
            b: Box::new(b),
        },
    ))
}
