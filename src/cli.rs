//! Input loading and case dispatch behind the `shapematch` binary.
//!
//! Output of a successful dispatch:
//! `{"case": <index>, "pattern": <trimmed text>, "fields": [...], "values": [...]}`

use std::io::Read;
use std::path::Path;

use serde_json::{json, Value};
use thiserror::Error;

use crate::dispatch::{DispatchError, Matcher};
use crate::pattern_cache::PatternCache;
use crate::pattern_parser::PatternParser;

/// Path that selects stdin as the subject source
pub const STDIN_PATH: &str = "-";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {what} {path}")]
    Read {
        what: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Subject is not valid JSON")]
    Subject(#[from] serde_json::Error),

    #[error("Cases file must be a YAML list of strings")]
    Cases(#[from] serde_yaml::Error),

    #[error("No cases given; use --case or --cases-file")]
    NoCases,
}

/// Read the JSON subject from `path`, or from stdin when `path` is `-`.
pub fn read_subject(path: &Path) -> Result<Value, InputError> {
    if path == Path::new(STDIN_PATH) {
        return read_subject_from(std::io::stdin().lock(), "stdin");
    }
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        what: "subject file",
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

pub fn read_subject_from<R: Read>(mut reader: R, name: &str) -> Result<Value, InputError> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|source| InputError::Read {
            what: "subject from",
            path: name.to_string(),
            source,
        })?;
    Ok(serde_json::from_str(&buffer)?)
}

pub fn read_cases_file(path: &Path) -> Result<Vec<String>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        what: "cases file",
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Ordered case list: the `--case` values first, then the cases file.
pub fn collect_cases(
    inline: Vec<String>,
    cases_file: Option<&Path>,
) -> Result<Vec<String>, InputError> {
    let mut cases = inline;
    if let Some(path) = cases_file {
        cases.extend(read_cases_file(path)?);
    }
    if cases.is_empty() {
        return Err(InputError::NoCases);
    }
    Ok(cases)
}

/// Try `cases` in order and describe the first one that matches `subject`.
pub fn dispatch_cases(
    subject: Option<&Value>,
    cases: &[String],
    parser: &PatternParser,
    cache: &PatternCache,
) -> Result<Value, DispatchError> {
    let mut matcher = Matcher::on(subject).with_parser(parser).with_cache(cache);
    for (index, text) in cases.iter().enumerate() {
        matcher = matcher.case(text, |bindings| {
            json!({
                "case": index,
                "pattern": text.trim(),
                "fields": bindings.names(),
                "values": bindings.to_json(),
            })
        })?;
    }
    Ok(matcher.done()?)
}
