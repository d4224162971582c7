use serde_json::{Map, Value};

use crate::pattern_parser::Pattern;

/// Subject values bound by a successful match, one per top-level pattern field.
///
/// Values are the whole subject sub-values, not flattened nested extractions.
/// A field whose nested sub-pattern was skipped because the subject lacks it
/// binds to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings<'s> {
    names: Vec<String>,
    values: Vec<Option<&'s Value>>,
}

impl<'s> Bindings<'s> {
    pub(crate) fn collect(pattern: &Pattern, subject: Option<&'s Value>) -> Self {
        let names: Vec<String> = pattern
            .field_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let values = names
            .iter()
            .map(|name| subject.and_then(|subject| subject.get(name.as_str())))
            .collect();
        Bindings { names, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'s Value> {
        self.values.get(index).copied().flatten()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[Option<&'s Value>] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&'s Value>)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Fixed-arity view for handlers that destructure their arguments.
    ///
    /// Returns `None` when the pattern declared a different number of fields.
    pub fn positional<const N: usize>(&self) -> Option<[Option<&'s Value>; N]> {
        self.values.clone().try_into().ok()
    }

    /// Values as a JSON array, absent values as `null`.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.values
                .iter()
                .map(|value| value.cloned().unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// Values keyed by field name, in declaration order.
    pub fn to_object(&self) -> Map<String, Value> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.cloned().unwrap_or(Value::Null)))
            .collect()
    }
}
