//! Knowledge-base text parser
//!
//! One clause per line, literals separated by `|`, `∨` or a standalone `v`:
//!
//! ```text
//! # comments and blank lines are skipped
//! ~Odia(Marco,Cesar) | Padre(x,Cesar)
//! Odia(Marco,Cesar)
//! ```
//!
//! Argument symbols starting with a lowercase letter are variables; any
//! other symbol is a constant, or a function when followed by arguments.

use crate::error::{Error, Result};
use crate::logic::{Clause, Literal, Term};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, multispace0, multispace1, satisfy},
    combinator::{all_consuming, map, opt, recognize},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse knowledge-base text into clauses, in line order.
pub fn parse_knowledge_base(text: &str) -> Result<Vec<Clause>> {
    let mut clauses = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (_, literals) = all_consuming(parse_disjunction)(line)
            .map_err(|e| parse_error(idx + 1, e))?;
        clauses.push(Clause::new(literals));
    }
    Ok(clauses)
}

/// Read and parse a knowledge-base file
pub fn load_knowledge_base(path: impl AsRef<Path>) -> Result<Vec<Clause>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let clauses = parse_knowledge_base(&text)?;
    debug!(path = %path.display(), clauses = clauses.len(), "loaded knowledge base");
    Ok(clauses)
}

/// Parse a single literal such as `~Odia(Marco,Cesar)`
pub fn parse_literal(text: &str) -> Result<Literal> {
    let (_, literal) = all_consuming(delimited(multispace0, literal, multispace0))(text)
        .map_err(|e| parse_error(1, e))?;
    Ok(literal)
}

/// Build clauses from literal strings that are already split per clause.
///
/// An empty inner list is the empty clause. Errors report the clause's
/// position (1-based) as the line.
pub fn clauses_from_strings(clauses: &[Vec<String>]) -> Result<Vec<Clause>> {
    clauses
        .iter()
        .enumerate()
        .map(|(idx, literals)| {
            literals
                .iter()
                .map(|text| {
                    parse_literal(text).map_err(|e| match e {
                        Error::Parse { message, .. } => Error::Parse {
                            line: idx + 1,
                            message,
                        },
                        other => other,
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Clause::new)
        })
        .collect()
}

fn parse_error(line: usize, err: nom::Err<nom::error::Error<&str>>) -> Error {
    let message = match err {
        nom::Err::Error(e) | nom::Err::Failure(e) if e.input.is_empty() => {
            "unexpected end of input".to_string()
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let snippet: String = e.input.chars().take(24).collect();
            format!("unexpected input at `{}`", snippet)
        }
        nom::Err::Incomplete(_) => "incomplete input".to_string(),
    };
    Error::Parse { line, message }
}

/// Parse literals separated by `|`, `∨` or `v`; the letter needs whitespace on both sides
fn parse_disjunction(input: &str) -> IResult<&str, Vec<Literal>> {
    separated_list1(
        alt((
            delimited(multispace0, alt((tag("|"), tag("∨"))), multispace0),
            delimited(multispace1, tag("v"), multispace1),
        )),
        literal,
    )(input)
}

/// Parse a literal
fn literal(input: &str) -> IResult<&str, Literal> {
    let (input, negated) = map(opt(terminated(char('~'), multispace0)), |n| n.is_some())(input)?;
    let (input, name) = parse_predicate_name(input)?;
    let (input, args) = opt(delimited(
        tuple((multispace0, char('('), multispace0)),
        separated_list0(tuple((multispace0, char(','), multispace0)), parse_term),
        tuple((multispace0, char(')'))),
    ))(input)?;

    Ok((input, Literal::atom(name, args.unwrap_or_default(), !negated)))
}

/// Parse a term: a symbol, optionally applied to arguments
fn parse_term(input: &str) -> IResult<&str, Term> {
    let (input, name) = parse_symbol(input)?;
    let (input, args) = opt(delimited(
        tuple((multispace0, char('('), multispace0)),
        separated_list1(tuple((multispace0, char(','), multispace0)), parse_term),
        tuple((multispace0, char(')'))),
    ))(input)?;

    let term = match args {
        Some(args) => Term::function(name, args),
        None => Term::from_symbol(name),
    };
    Ok((input, term))
}

/// Predicate names start with a letter
fn parse_predicate_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic()),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

fn parse_symbol(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphanumeric() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}
