//! AsciiMath parser.
//!
//! Grammar of the supported subset:
//!
//! ```text
//! formula := term*
//! term    := script ('/' script)*
//! script  := simple ('_' simple)? ('^' simple)?
//! simple  := number | "text(...)" | '"' ... '"' | sqrt simple | bar simple
//!          | group | symbol | letter | operator
//! group   := ( [ or { followed by term* and the matching bracket
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, digit1, multispace0, one_of, satisfy},
    combinator::{cut, map, opt, recognize},
    error::{Error as NomError, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult,
};

use super::symbols::{self, Symbol};
use crate::error::ParseError;

/// A node of a parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(String),
    Identifier(String),
    Symbol(&'static Symbol),
    Operator(char),
    Text(String),
    Group {
        open: char,
        close: char,
        body: Vec<Node>,
    },
    Sqrt(Box<Node>),
    Overline(Box<Node>),
    Scripts {
        base: Box<Node>,
        sub: Option<Box<Node>>,
        sup: Option<Box<Node>>,
    },
    Fraction {
        numerator: Box<Node>,
        denominator: Box<Node>,
    },
}

impl Node {
    /// The node with one level of round, square or curly brackets removed.
    ///
    /// Brackets only group operands of fractions, roots and scripts; they are not drawn there.
    pub fn unbracketed(&self) -> Option<&[Node]> {
        match self {
            Node::Group { body, .. } => Some(body),
            _ => None,
        }
    }
}

const OPERATORS: &str = "+-=<>,.!|':;";

/// Deepest nesting of groups, roots, bars and scripts accepted.
pub const MAX_NESTING: usize = 64;

/// Parse a complete formula.
pub fn parse_formula(source: &str) -> Result<Vec<Node>, ParseError> {
    let mut nodes = Vec::new();
    let mut rest = source.trim_start();

    while !rest.is_empty() {
        match term(rest, 0) {
            Ok((remaining, node)) => {
                nodes.push(node);
                rest = remaining.trim_start();
            }
            Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
                return Err(ParseError::Syntax {
                    position: source.len() - e.input.len(),
                    message: "nesting too deep".to_string(),
                });
            }
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                // Report where the innermost parser gave up when it got further than `rest`
                let at = if e.input.len() < rest.len() { e.input } else { rest };
                return Err(syntax_error(source, at));
            }
            Err(nom::Err::Incomplete(_)) => return Err(ParseError::UnexpectedEof),
        }
    }

    Ok(nodes)
}

fn syntax_error(source: &str, rest: &str) -> ParseError {
    let position = source.len() - rest.len();
    let Some(c) = rest.chars().next() else {
        return ParseError::UnexpectedEof;
    };
    let message = match c {
        '(' | '[' | '{' => format!("unclosed `{}`", c),
        ')' | ']' | '}' => format!("unmatched `{}`", c),
        '^' | '_' | '/' => {
            if rest.trim_end().len() == 1 {
                return ParseError::UnexpectedEof;
            }
            format!("missing operand for `{}`", c)
        }
        _ => format!("unexpected `{}`", c),
    };
    ParseError::Syntax { position, message }
}

fn term(input: &str, depth: usize) -> IResult<&str, Node> {
    let (mut input, mut node) = script(input, depth)?;
    loop {
        match preceded(
            pair(multispace0, char('/')),
            preceded(multispace0, |i| script(i, depth)),
        )(input)
        {
            Ok((rest, denominator)) => {
                node = Node::Fraction {
                    numerator: Box::new(node),
                    denominator: Box::new(denominator),
                };
                input = rest;
            }
            Err(nom::Err::Error(_)) => return Ok((input, node)),
            Err(e) => return Err(e),
        }
    }
}

fn script(input: &str, depth: usize) -> IResult<&str, Node> {
    let (input, base) = simple(input, depth)?;
    let (input, sub) = opt(preceded(
        pair(multispace0, char('_')),
        preceded(multispace0, |i| simple(i, depth + 1)),
    ))(input)?;
    let (input, sup) = opt(preceded(
        pair(multispace0, char('^')),
        preceded(multispace0, |i| simple(i, depth + 1)),
    ))(input)?;

    if sub.is_none() && sup.is_none() {
        return Ok((input, base));
    }
    Ok((
        input,
        Node::Scripts {
            base: Box::new(base),
            sub: sub.map(Box::new),
            sup: sup.map(Box::new),
        },
    ))
}

fn simple(input: &str, depth: usize) -> IResult<&str, Node> {
    if depth > MAX_NESTING {
        return Err(nom::Err::Failure(NomError::new(input, ErrorKind::TooLarge)));
    }
    alt((
        number,
        text,
        |i| unary(i, depth),
        |i| group(i, depth),
        symbol,
        identifier,
        operator,
    ))(input)
}

fn number(input: &str) -> IResult<&str, Node> {
    map(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| Node::Number(s.to_string()),
    )(input)
}

fn text(input: &str) -> IResult<&str, Node> {
    map(
        alt((
            delimited(tag("text("), take_until(")"), char(')')),
            delimited(char('"'), take_until("\""), char('"')),
        )),
        |s: &str| Node::Text(s.to_string()),
    )(input)
}

fn unary(input: &str, depth: usize) -> IResult<&str, Node> {
    let operand = |i| simple(i, depth + 1);
    alt((
        map(
            preceded(tag("sqrt"), cut(preceded(multispace0, operand))),
            |n| Node::Sqrt(Box::new(n)),
        ),
        map(
            preceded(tag("bar"), cut(preceded(multispace0, operand))),
            |n| Node::Overline(Box::new(n)),
        ),
    ))(input)
}

fn group(input: &str, depth: usize) -> IResult<&str, Node> {
    let (input, open) = one_of("([{")(input)?;
    let close = match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    };
    let (input, body) = many0(preceded(multispace0, |i| term(i, depth + 1)))(input)?;
    let (input, _) = preceded(multispace0, char(close))(input)?;
    Ok((input, Node::Group { open, close, body }))
}

fn symbol(input: &str) -> IResult<&str, Node> {
    match symbols::lookup(input) {
        Some(sym) => Ok((&input[sym.name.len()..], Node::Symbol(sym))),
        None => Err(nom::Err::Error(NomError::new(input, ErrorKind::Tag))),
    }
}

fn identifier(input: &str) -> IResult<&str, Node> {
    map(satisfy(|c| c.is_alphabetic()), |c| {
        Node::Identifier(c.to_string())
    })(input)
}

fn operator(input: &str) -> IResult<&str, Node> {
    map(one_of(OPERATORS), Node::Operator)(input)
}
