//! Structural validation of a [`Pattern`] against a JSON subject.
//!
//! Matching is subset-style: a record pattern lists the fields a subject must
//! have, and any extra subject fields are ignored. The matcher never looks at
//! scalar values.
//!
//! Subject policy:
//! - `None` is an absent subject.
//! - A present value that is not a JSON object (null, number, string, array)
//!   behaves like a record with zero fields.
//! - A key mapped to JSON `null` is present.

use serde_json::{Map, Value};

use crate::pattern_parser::{FieldPattern, Pattern, RecordPattern};

pub use bindings::Bindings;

mod bindings;

/// Why a pattern was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    /// `undefined` pattern, but a subject was given
    SubjectPresent,
    /// Fields were required, but there was no subject
    SubjectAbsent,
    /// Fields were required, but the subject has none
    NoFields,
    /// A required field is missing
    MissingField,
}

/// First failing check, in pattern declaration order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason:?} at {}", display_path(.path))]
pub struct Mismatch {
    /// Field names from the top-level subject down to the failing spot
    pub path: Vec<String>,
    pub reason: MismatchReason,
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}

impl Mismatch {
    fn at(path: &[&str], reason: MismatchReason) -> Self {
        Mismatch {
            path: path.iter().map(|name| name.to_string()).collect(),
            reason,
        }
    }
}

/// Decide whether `subject` has the shape described by `pattern`.
pub fn matches(pattern: &Pattern, subject: Option<&Value>) -> bool {
    check(pattern, subject).is_ok()
}

/// Same decision as [`matches`], reporting the first failing field.
pub fn check(pattern: &Pattern, subject: Option<&Value>) -> Result<(), Mismatch> {
    match pattern {
        Pattern::Empty => match subject {
            None => Ok(()),
            Some(_) => Err(Mismatch::at(&[], MismatchReason::SubjectPresent)),
        },
        Pattern::Record(record) => {
            let mut path = Vec::new();
            check_record(record, subject, &mut path)
        }
    }
}

/// On a match, the subject values at the pattern's top-level names.
pub fn extract<'s>(pattern: &Pattern, subject: Option<&'s Value>) -> Option<Bindings<'s>> {
    if !matches(pattern, subject) {
        return None;
    }
    Some(Bindings::collect(pattern, subject))
}

fn fields_of(subject: &Value) -> Option<&Map<String, Value>> {
    subject.as_object().filter(|fields| !fields.is_empty())
}

fn check_record<'p>(
    record: &'p RecordPattern,
    subject: Option<&Value>,
    path: &mut Vec<&'p str>,
) -> Result<(), Mismatch> {
    // An empty record pattern accepts an absent subject too
    let Some(subject) = subject else {
        return if record.is_empty() {
            Ok(())
        } else {
            Err(Mismatch::at(path, MismatchReason::SubjectAbsent))
        };
    };

    let Some(fields) = fields_of(subject) else {
        return if record.is_empty() {
            Ok(())
        } else {
            Err(Mismatch::at(path, MismatchReason::NoFields))
        };
    };

    for (name, sub_pattern) in record.iter() {
        let value = fields.get(name);
        match sub_pattern {
            FieldPattern::Leaf => {
                if value.is_none() {
                    path.push(name);
                    let mismatch = Mismatch::at(path, MismatchReason::MissingField);
                    path.pop();
                    return Err(mismatch);
                }
            }
            // Nested shape is only enforced when the subject has the field
            FieldPattern::Nested(nested) => {
                if let Some(value) = value {
                    path.push(name);
                    let result = check_record(nested, Some(value), path);
                    path.pop();
                    result?;
                }
            }
        }
    }

    Ok(())
}
