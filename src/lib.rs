//! ShapeMatch - structural pattern matching over nested JSON records
//!
//! This crate provides:
//! - A parser for shape patterns such as `{a: _, b: {c: _}}` and `undefined`
//! - Subset-style structural validation of a pattern against a subject
//! - Ordered case dispatch that hands the first matching case its bound fields
//! - A cache for parsed patterns

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod matcher;
pub mod pattern_cache;
pub mod pattern_parser;

pub use dispatch::{DispatchError, DispatchState, Matcher, NoMatchError};
pub use matcher::{check, extract, matches, Bindings, Mismatch, MismatchReason};
pub use pattern_parser::{
    parse_optional, parse_pattern, FieldPattern, ParserConfig, Pattern, PatternParser,
    PatternSyntaxError, RecordPattern,
};
