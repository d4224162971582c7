use nom::{
    character::complete::char,
    combinator::{cut, opt},
    error::context,
    multi::separated_list0,
    sequence::pair,
    Parser,
};

use super::ast::{FieldPattern, RecordPattern};
use super::common::{field_key, identifier, space0, ws, PatternResult};
use super::errors::PatternParsingError;

/// Recursive-descent grammar for `{ name: marker | {...}, ... }`.
pub(super) struct RecordGrammar<'m> {
    pub marker: &'m str,
    pub max_depth: usize,
}

impl RecordGrammar<'_> {
    pub fn parse_record<'a>(&self, input: &'a str, depth: usize) -> PatternResult<'a, RecordPattern> {
        // Check depth limit before descending
        if depth > self.max_depth {
            return Err(nom::Err::Failure(PatternParsingError::nesting_limit(input)));
        }

        let (input, _) = context("expected '{'", char('{')).parse(input)?;
        let (input, _) = space0.parse(input)?;

        let (input, entries) =
            separated_list0(pair(char(','), space0), |i| self.parse_entry(i, depth))
                .parse(input)?;

        // A trailing comma is only allowed after at least one entry
        let input = if entries.is_empty() {
            input
        } else {
            opt(pair(char(','), space0)).parse(input)?.0
        };

        let (input, _) = cut(context("expected ',' or '}'", char('}'))).parse(input)?;

        Ok((input, RecordPattern::from_fields(entries)))
    }

    fn parse_entry<'a>(&self, input: &'a str, depth: usize) -> PatternResult<'a, (String, FieldPattern)> {
        let (input, key) = field_key(input)?;
        let (input, _) = cut(context("expected ':'", ws(char(':')))).parse(input)?;
        let (input, value) = self.parse_value(input, depth)?;
        let (input, _) = space0.parse(input)?;
        Ok((input, (key.to_string(), value)))
    }

    fn parse_value<'a>(&self, input: &'a str, depth: usize) -> PatternResult<'a, FieldPattern> {
        if input.starts_with('{') {
            let (input, nested) = self.parse_record(input, depth + 1)?;
            return Ok((input, FieldPattern::Nested(nested)));
        }
        match identifier(input) {
            Ok((rest, name)) if name == self.marker => Ok((rest, FieldPattern::Leaf)),
            _ => Err(nom::Err::Failure(PatternParsingError::new(
                input,
                "expected marker or nested record",
            ))),
        }
    }
}
