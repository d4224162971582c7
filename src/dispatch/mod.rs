//! Ordered case dispatch over a single subject.
//!
//! ```
//! use serde_json::json;
//! use shapematch::dispatch::Matcher;
//!
//! let subject = json!({"a": 1, "b": {"c": 2}});
//! let total = Matcher::on(Some(&subject))
//!     .case("{x: _}", |_| 0)?
//!     .case("{a: _, b: {c: _}}", |bindings| {
//!         let [a, b] = bindings.positional::<2>().unwrap_or_default();
//!         a.and_then(|a| a.as_i64()).unwrap_or(0) + b.and_then(|b| b["c"].as_i64()).unwrap_or(0)
//!     })?
//!     .done()?;
//! assert_eq!(total, 3);
//! # Ok::<(), shapematch::dispatch::DispatchError>(())
//! ```

use std::sync::Arc;

use serde_json::Value;

pub use errors::{DispatchError, NoMatchError};

use crate::matcher::{self, Bindings};
use crate::pattern_cache::PatternCache;
use crate::pattern_parser::{default_parser, Pattern, PatternParser, PatternSyntaxError};

mod errors;

/// Progress of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState<R> {
    /// No case has matched yet
    Searching { attempts: usize },
    /// Case number `case` (0-based) matched and its handler produced `result`
    Matched { case: usize, result: R },
}

impl<R> Default for DispatchState<R> {
    fn default() -> Self {
        DispatchState::Searching { attempts: 0 }
    }
}

impl<R> DispatchState<R> {
    pub fn is_matched(&self) -> bool {
        matches!(self, DispatchState::Matched { .. })
    }

    pub fn attempts(&self) -> usize {
        match self {
            DispatchState::Searching { attempts } => *attempts,
            DispatchState::Matched { case, .. } => case + 1,
        }
    }

    /// One dispatch step. A no-op once `Matched`; the handler runs at most once
    /// and only when `pattern` matches `subject`.
    pub fn advance<'s, F>(self, pattern: &Pattern, subject: Option<&'s Value>, handler: F) -> Self
    where
        F: FnOnce(Bindings<'s>) -> R,
    {
        let attempts = match self {
            DispatchState::Searching { attempts } => attempts,
            matched => return matched,
        };

        match matcher::check(pattern, subject) {
            Ok(()) => {
                log::debug!("Case {} matched: {}", attempts, pattern);
                let result = handler(Bindings::collect(pattern, subject));
                DispatchState::Matched {
                    case: attempts,
                    result,
                }
            }
            Err(mismatch) => {
                log::debug!("Case {} rejected: {} ({})", attempts, pattern, mismatch);
                DispatchState::Searching {
                    attempts: attempts + 1,
                }
            }
        }
    }

    pub fn into_result(self) -> Result<R, NoMatchError> {
        match self {
            DispatchState::Matched { result, .. } => Ok(result),
            DispatchState::Searching { attempts } => Err(NoMatchError { attempts }),
        }
    }
}

/// Fluent front end over [`DispatchState`].
///
/// Cases are tried in the order they are chained. The first matching case's
/// handler receives the subject values at that pattern's top-level fields;
/// every later case is skipped without being parsed.
pub struct Matcher<'s, 'c, R> {
    subject: Option<&'s Value>,
    parser: &'c PatternParser,
    cache: Option<&'c PatternCache>,
    state: DispatchState<R>,
}

impl<'s, R> Matcher<'s, 'static, R> {
    pub fn on(subject: Option<&'s Value>) -> Self {
        Matcher {
            subject,
            parser: default_parser(),
            cache: None,
            state: DispatchState::default(),
        }
    }
}

impl<'s, 'c, R> Matcher<'s, 'c, R> {
    /// Parse case patterns with `parser` instead of the default one.
    pub fn with_parser(self, parser: &'c PatternParser) -> Self {
        Matcher { parser, ..self }
    }

    /// Look case patterns up in `cache` before parsing them.
    pub fn with_cache(self, cache: &'c PatternCache) -> Self {
        Matcher {
            cache: Some(cache),
            ..self
        }
    }

    fn resolve(&self, text: &str) -> Result<Arc<Pattern>, PatternSyntaxError> {
        match self.cache {
            Some(cache) => cache.get_or_parse(text, self.parser),
            None => Ok(Arc::new(self.parser.parse(text)?)),
        }
    }

    /// Try a case given as pattern text.
    ///
    /// A malformed pattern aborts the dispatch with [`PatternSyntaxError`],
    /// unless an earlier case already matched.
    pub fn case<F>(self, pattern: &str, handler: F) -> Result<Self, PatternSyntaxError>
    where
        F: FnOnce(Bindings<'s>) -> R,
    {
        if self.state.is_matched() {
            return Ok(self);
        }
        let pattern = self.resolve(pattern)?;
        Ok(self.case_pattern(&pattern, handler))
    }

    /// Try a case with an already parsed pattern.
    pub fn case_pattern<F>(self, pattern: &Pattern, handler: F) -> Self
    where
        F: FnOnce(Bindings<'s>) -> R,
    {
        let state = self.state.advance(pattern, self.subject, handler);
        Matcher { state, ..self }
    }

    /// Catch-all case; matches any subject if nothing matched before it.
    pub fn otherwise<F>(self, handler: F) -> Self
    where
        F: FnOnce() -> R,
    {
        let state = match self.state {
            DispatchState::Searching { attempts } => {
                log::debug!("Case {} taken as fallback", attempts);
                DispatchState::Matched {
                    case: attempts,
                    result: handler(),
                }
            }
            matched => matched,
        };
        Matcher { state, ..self }
    }

    pub fn is_matched(&self) -> bool {
        self.state.is_matched()
    }

    pub fn state(&self) -> &DispatchState<R> {
        &self.state
    }

    /// Finish the dispatch: the matched handler's result, or [`NoMatchError`].
    pub fn done(self) -> Result<R, NoMatchError> {
        self.state.into_result()
    }

    /// Like [`done`](Self::done), with `None` for "nothing matched".
    pub fn into_option(self) -> Option<R> {
        self.state.into_result().ok()
    }
}
