//! Turns one input line into a polynomial or a command.

use std::str::FromStr;

use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use crate::{
    command::Command,
    error::ParseError,
    polynomial::{Coefficient, Exponent, Monomial, Polynomial},
};

#[derive(Parser)]
#[grammar = "calc.pest"]
struct LineParser;

/// Largest exponent accepted in a literal.
pub const MAX_LITERAL_EXPONENT: Exponent = i32::MAX as Exponent;

/// A successfully parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    /// Blank or comment line, to be skipped.
    Ignored,
    Polynomial(Polynomial),
    Command(Command),
}

/// Classifies and parses one line, without its terminating newline.
///
/// Lines starting with `#` are comments, lines starting with a letter are
/// commands and anything else must be a polynomial literal.
pub fn parse_line(line: &str) -> Result<Line, ParseError> {
    match line.chars().next() {
        None | Some('#') => Ok(Line::Ignored),
        Some(c) if c.is_ascii_alphabetic() => parse_command(line).map(Line::Command),
        Some(_) => parse_polynomial(line).map(Line::Polynomial),
    }
}

/// Parses a polynomial literal such as `(1,0)+((2,1),3)` or `-7`.
pub fn parse_polynomial(text: &str) -> Result<Polynomial, ParseError> {
    let literal = LineParser::parse(Rule::literal, text)
        .map_err(|_| ParseError::WrongPoly)?
        .next()
        .ok_or(ParseError::WrongPoly)?;

    let poly = literal
        .into_inner()
        .next()
        .ok_or(ParseError::WrongPoly)?;
    build_polynomial(poly)
}

fn build_polynomial(poly: Pair<'_, Rule>) -> Result<Polynomial, ParseError> {
    assert!(poly.as_rule() == Rule::poly);

    let inner = poly.into_inner().next().ok_or(ParseError::WrongPoly)?;
    match inner.as_rule() {
        Rule::coefficient => inner
            .as_str()
            .parse::<Coefficient>()
            .map(Polynomial::from_coefficient)
            .map_err(|_| ParseError::WrongPoly),
        Rule::monomials => inner
            .into_inner()
            .map(build_monomial)
            .collect::<Result<Vec<_>, _>>()
            .map(Polynomial::from_monomials),
        _ => unreachable!("invalid grammar"),
    }
}

fn build_monomial(monomial: Pair<'_, Rule>) -> Result<Monomial, ParseError> {
    assert!(monomial.as_rule() == Rule::monomial);

    let mut iter = monomial.into_inner();
    let coefficient = build_polynomial(iter.next().ok_or(ParseError::WrongPoly)?)?;
    let exponent = iter
        .next()
        .ok_or(ParseError::WrongPoly)?
        .as_str()
        .parse::<Exponent>()
        .ok()
        .filter(|e| *e <= MAX_LITERAL_EXPONENT)
        .ok_or(ParseError::WrongPoly)?;

    Ok(Monomial::new(coefficient, exponent))
}

/// Parses a command line. The name ends at the first whitespace character,
/// and a parameter, when the command takes one, follows after exactly one
/// space.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let (name, rest) = match line.find(|c: char| c.is_ascii_whitespace()) {
        Some(idx) => line.split_at(idx),
        None => (line, ""),
    };

    let plain = |command| {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(ParseError::WrongCommand)
        }
    };

    match name {
        "ZERO" => plain(Command::Zero),
        "IS_COEFF" => plain(Command::IsCoeff),
        "IS_ZERO" => plain(Command::IsZero),
        "CLONE" => plain(Command::Clone),
        "ADD" => plain(Command::Add),
        "MUL" => plain(Command::Mul),
        "NEG" => plain(Command::Neg),
        "SUB" => plain(Command::Sub),
        "IS_EQ" => plain(Command::IsEq),
        "DEG" => plain(Command::Deg),
        "PRINT" => plain(Command::Print),
        "POP" => plain(Command::Pop),
        "DEG_BY" => parse_argument(rest, Rule::unsigned_argument)
            .map(Command::DegBy)
            .ok_or(ParseError::DegByWrongVariable),
        "AT" => parse_argument(rest, Rule::signed_argument)
            .map(Command::At)
            .ok_or(ParseError::AtWrongValue),
        "COMPOSE" => parse_argument(rest, Rule::unsigned_argument)
            .map(Command::Compose)
            .ok_or(ParseError::ComposeWrongParameter),
        _ => Err(ParseError::WrongCommand),
    }
}

/// Parses `" <number>"`, checking both the syntax and the range of `T`.
fn parse_argument<T: FromStr>(rest: &str, rule: Rule) -> Option<T> {
    let argument = rest.strip_prefix(' ')?;
    LineParser::parse(rule, argument).ok()?;
    argument.parse().ok()
}
