use nom::{
    branch::alt,
    bytes::complete::{take_until, take_while, take_while1},
    character::complete::{char, digit1},
    combinator::recognize,
    error::ParseError,
    sequence::{delimited, pair},
    IResult, Parser,
};

use super::errors::PatternParsingError;

pub type PatternResult<'a, O> = IResult<&'a str, O, PatternParsingError<'a>>;

/// Zero or more whitespace characters, Unicode included (U+00A0, U+2003, ...).
pub fn space0<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    take_while(char::is_whitespace).parse(input)
}

pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(space0, inner, space0)
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

// e.g. "account", "_", "$ref", "user_id2"
pub fn identifier(input: &str) -> PatternResult<'_, &str> {
    recognize(pair(
        take_while1(is_identifier_start),
        take_while(is_identifier_char),
    ))
    .parse(input)
}

// 'display name' or "it's"; no escape sequences
fn quoted_key(input: &str) -> PatternResult<'_, &str> {
    alt((
        delimited(char('\''), take_until("'"), char('\'')),
        delimited(char('"'), take_until("\""), char('"')),
    ))
    .parse(input)
}

/// Field name on the left of `:` - identifier, digit run, or quoted string.
pub fn field_key(input: &str) -> PatternResult<'_, &str> {
    alt((quoted_key, identifier, digit1)).parse(input)
}
