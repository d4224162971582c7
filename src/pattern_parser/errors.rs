use nom::error::{ContextError, ParseError};
use thiserror::Error;

/// Error raised when pattern text cannot be turned into a [`Pattern`](super::ast::Pattern).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternSyntaxError {
    #[error("Pattern Parsing Error: empty pattern")]
    Empty,

    #[error("Pattern Parsing Error: it must start with {{ and end with }}")]
    Unbraced,

    #[error("Pattern Parsing Error: {message} at offset {offset}")]
    Malformed { offset: usize, message: String },

    #[error("Pattern Parsing Error: nesting deeper than {0} levels")]
    TooDeep(usize),
}

/// nom error carried through the record grammar.
///
/// Each entry is the remaining input at the failure point plus a context label.
#[derive(Debug, PartialEq)]
pub struct PatternParsingError<'a> {
    pub errors: Vec<(&'a str, &'static str)>,
    pub too_deep: bool,
}

impl<'a> PatternParsingError<'a> {
    pub fn new(input: &'a str, ctx: &'static str) -> Self {
        PatternParsingError {
            errors: vec![(input, ctx)],
            too_deep: false,
        }
    }

    pub fn nesting_limit(input: &'a str) -> Self {
        PatternParsingError {
            errors: vec![(input, "nesting limit exceeded")],
            too_deep: true,
        }
    }

    /// Convert to the public error, measuring offsets against `source`.
    ///
    /// The innermost entry points at the failing token and the innermost
    /// context label describes what was expected there.
    pub fn into_syntax_error(self, source: &str, max_depth: usize) -> PatternSyntaxError {
        if self.too_deep {
            return PatternSyntaxError::TooDeep(max_depth);
        }
        let offset = self
            .errors
            .first()
            .map(|(rest, _)| source.len().saturating_sub(rest.len()))
            .unwrap_or(0);
        let message = self
            .errors
            .iter()
            .map(|(_, ctx)| *ctx)
            .find(|ctx| *ctx != "unknown error")
            .unwrap_or("unexpected input")
            .to_string();
        PatternSyntaxError::Malformed { offset, message }
    }
}

impl<'a> ParseError<&'a str> for PatternParsingError<'a> {
    fn from_error_kind(input: &'a str, _kind: nom::error::ErrorKind) -> Self {
        PatternParsingError::new(input, "unknown error")
    }

    fn append(_input: &'a str, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> ContextError<&'a str> for PatternParsingError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, ctx));
        other
    }
}
