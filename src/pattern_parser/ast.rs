use std::fmt;

/// Marker token written by `Display` and accepted by the default parser.
///
/// A tree parsed under another marker re-parses only with that marker; use
/// [`Pattern::display_with_marker`] to render it for such a parser.
pub const DEFAULT_MARKER: &str = "_";

/// Parsed shape description.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Pattern {
    /// `undefined` - the subject must be absent.
    Empty,
    /// `{ ... }` - the subject must carry at least these fields.
    Record(RecordPattern),
}

/// Ordered field list of a `{ ... }` block.
///
/// Declaration order is significant: it is the order in which matched values
/// are handed to a case handler.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct RecordPattern {
    fields: Vec<(String, FieldPattern)>,
}

/// Value side of a `name: value` entry.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FieldPattern {
    /// The field must be present; its value is not inspected.
    Leaf,
    /// The field is checked recursively when the subject has it.
    Nested(RecordPattern),
}

impl Pattern {
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldPattern)>,
        K: Into<String>,
    {
        Pattern::Record(RecordPattern::from_fields(fields))
    }

    pub fn is_empty_pattern(&self) -> bool {
        matches!(self, Pattern::Empty)
    }

    /// Render with `marker` as the leaf token instead of [`DEFAULT_MARKER`].
    ///
    /// ```
    /// use shapematch::{FieldPattern, Pattern};
    ///
    /// let pattern = Pattern::record(vec![("a", FieldPattern::Leaf)]);
    /// assert_eq!(pattern.display_with_marker("any").to_string(), "{a: any}");
    /// ```
    pub fn display_with_marker<'a>(&'a self, marker: &'a str) -> MarkedPattern<'a> {
        MarkedPattern {
            pattern: self,
            marker,
        }
    }

    /// Top-level field names in declaration order. `Empty` declares none.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Pattern::Empty => Vec::new(),
            Pattern::Record(record) => record.names().collect(),
        }
    }
}

impl RecordPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs. A repeated name keeps the slot of its
    /// first occurrence and the value of its last one.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldPattern)>,
        K: Into<String>,
    {
        let mut record = RecordPattern::new();
        for (name, value) in fields {
            record.insert(name, value);
        }
        record
    }

    /// Insert a field. Returns the value it replaced, if the name was already declared.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldPattern) -> Option<FieldPattern> {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldPattern> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldPattern)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl FieldPattern {
    pub fn nested<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldPattern)>,
        K: Into<String>,
    {
        FieldPattern::Nested(RecordPattern::from_fields(fields))
    }
}

fn is_plain_key(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => name.chars().all(|c| c.is_ascii_digit()),
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn write_key(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_key(name) {
        write!(f, "{}", name)
    } else if name.contains('\'') {
        write!(f, "\"{}\"", name)
    } else {
        write!(f, "'{}'", name)
    }
}

/// [`Pattern`] rendered with a chosen leaf marker.
#[derive(Debug, Clone, Copy)]
pub struct MarkedPattern<'a> {
    pattern: &'a Pattern,
    marker: &'a str,
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &RecordPattern, marker: &str) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (name, value)) in record.fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_key(f, name)?;
        write!(f, ": ")?;
        match value {
            FieldPattern::Leaf => write!(f, "{}", marker)?,
            FieldPattern::Nested(nested) => write_record(f, nested, marker)?,
        }
    }
    write!(f, "}}")
}

impl fmt::Display for MarkedPattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pattern {
            Pattern::Empty => write!(f, "undefined"),
            Pattern::Record(record) => write_record(f, record, self.marker),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with_marker(DEFAULT_MARKER))
    }
}

impl fmt::Display for RecordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(f, self, DEFAULT_MARKER)
    }
}

impl fmt::Display for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPattern::Leaf => write!(f, "{}", DEFAULT_MARKER),
            FieldPattern::Nested(record) => write_record(f, record, DEFAULT_MARKER),
        }
    }
}
