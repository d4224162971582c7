//! Pattern text -> [`Pattern`] tree.
//!
//! Accepted surface syntax:
//! - `undefined` - the subject must be absent
//! - `{ name: _, other: { nested: _ } }` - required fields, optionally nested
//!
//! The record body is parsed by a dedicated grammar (see `record.rs`), not by
//! a general expression evaluator.

use lazy_static::lazy_static;

pub use ast::{FieldPattern, MarkedPattern, Pattern, RecordPattern, DEFAULT_MARKER};
pub use errors::PatternSyntaxError;
use errors::PatternParsingError;
use record::RecordGrammar;

pub mod ast;
mod common;
pub(crate) mod errors;
mod record;

/// Literal that stands for the `Empty` pattern.
pub const UNDEFINED_LITERAL: &str = "undefined";

/// Default limit on record nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Hard ceiling on record nesting. Each level costs several stack frames, and
/// 128 levels stay well inside a 2 MB thread stack.
pub const MAX_NESTING_LIMIT: usize = 128;

/// Parser settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Identifier that marks a presence-only field
    pub marker: String,
    /// Maximum number of nested `{ }` levels, counting the outermost one.
    /// Values above [`MAX_NESTING_LIMIT`] are lowered to it.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            marker: DEFAULT_MARKER.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternParser {
    config: ParserConfig,
}

lazy_static! {
    static ref DEFAULT_PARSER: PatternParser = PatternParser::default();
}

impl PatternParser {
    pub fn new(mut config: ParserConfig) -> Self {
        if config.max_depth > MAX_NESTING_LIMIT {
            log::warn!(
                "Pattern max_depth {} lowered to {}",
                config.max_depth,
                MAX_NESTING_LIMIT
            );
            config.max_depth = MAX_NESTING_LIMIT;
        }
        PatternParser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse pattern text.
    ///
    /// Surrounding whitespace is ignored. Fails with [`PatternSyntaxError`] on
    /// empty input, on text that is neither `undefined` nor brace-delimited, and
    /// on a malformed record body.
    pub fn parse(&self, text: &str) -> Result<Pattern, PatternSyntaxError> {
        log::trace!("Parsing pattern: {}", text);

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PatternSyntaxError::Empty);
        }
        if trimmed == UNDEFINED_LITERAL {
            return Ok(Pattern::Empty);
        }
        if !trimmed.starts_with('{') || !trimmed.ends_with('}') {
            return Err(PatternSyntaxError::Unbraced);
        }

        let grammar = RecordGrammar {
            marker: &self.config.marker,
            max_depth: self.config.max_depth,
        };
        let into_syntax_error = |err: PatternParsingError<'_>| {
            err.into_syntax_error(trimmed, self.config.max_depth)
        };

        let (rest, record) = match grammar.parse_record(trimmed, 1) {
            Ok(parsed) => parsed,
            Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
                return Err(into_syntax_error(err))
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(PatternSyntaxError::Malformed {
                    offset: trimmed.len(),
                    message: "incomplete input".to_string(),
                })
            }
        };

        // e.g. "{a: _} {b: _}" starts and ends with braces but holds two records
        let rest = rest.trim_start();
        if !rest.is_empty() {
            return Err(PatternSyntaxError::Malformed {
                offset: trimmed.len() - rest.len(),
                message: "unexpected trailing input".to_string(),
            });
        }

        Ok(Pattern::Record(record))
    }

    /// Canonical text for `pattern` using this parser's marker, so that
    /// `parse(&render(p))` gives back `p`.
    pub fn render(&self, pattern: &Pattern) -> String {
        pattern.display_with_marker(&self.config.marker).to_string()
    }

    /// Like [`parse`](Self::parse), but for text that may be missing altogether.
    pub fn parse_optional(&self, text: Option<&str>) -> Result<Pattern, PatternSyntaxError> {
        match text {
            Some(text) => self.parse(text),
            None => Err(PatternSyntaxError::Empty),
        }
    }
}

/// Shared parser with the default marker and nesting limit.
pub fn default_parser() -> &'static PatternParser {
    &DEFAULT_PARSER
}

/// Parse with the default marker (`_`) and nesting limit.
pub fn parse_pattern(text: &str) -> Result<Pattern, PatternSyntaxError> {
    DEFAULT_PARSER.parse(text)
}

/// Parse possibly-missing pattern text with the default parser.
pub fn parse_optional(text: Option<&str>) -> Result<Pattern, PatternSyntaxError> {
    DEFAULT_PARSER.parse_optional(text)
}
