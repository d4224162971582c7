use thiserror::Error;

use crate::pattern_parser::PatternSyntaxError;

/// No case matched the subject before `done()`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Match error: No pattern matched the subject ({attempts} case(s) tried)")]
pub struct NoMatchError {
    pub attempts: usize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Syntax(#[from] PatternSyntaxError),

    #[error(transparent)]
    NoMatch(#[from] NoMatchError),
}
