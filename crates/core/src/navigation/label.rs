//! Destination label templates.
//!
//! A label such as `"Episode {number}"` is filled in with the arguments that
//! came with the navigation event. Every placeholder must resolve; a label is
//! either fully expanded or rejected, never shown half-filled.

use indexmap::IndexMap;
use std::fmt;

/// Arguments attached to a navigation event, keyed by placeholder name.
///
/// Values are converted to text when inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: IndexMap<String, String>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arguments = Arguments::new();
        for (name, value) in iter {
            arguments.insert(name, value);
        }
        arguments
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (name, value)) in self.values.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("}")
    }
}

/// Error raised when a label references an argument that wasn't provided.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("could not find {name} in {arguments} to fill label {label}")]
    MissingArgument {
        name: String,
        label: String,
        /// Rendering of the arguments that were available, `null` when none were.
        arguments: String,
    },
}

/// A piece of a label template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim.
    Literal(&'a str),
    /// Name found between `{` and `}`.
    Placeholder(&'a str),
}

/// Splits a label into literal text and `{name}` placeholders, left to right.
///
/// A placeholder opens at `{` and closes at the first `}` after a name of at
/// least one character; the character right after `{` is always part of the
/// name, even when it is a brace. A line break before the closing brace means
/// the `{` is plain text.
pub struct Segments<'a> {
    label: &'a str,
    position: usize,
}

impl<'a> Segments<'a> {
    pub fn new(label: &'a str) -> Self {
        Segments { label, position: 0 }
    }

    /// Finds the next placeholder at or after `from`, returning the byte
    /// offsets of its opening and closing braces.
    fn next_placeholder(&self, from: usize) -> Option<(usize, usize)> {
        let bytes = self.label.as_bytes();
        let mut open = from;

        while open < bytes.len() {
            open += bytes[open..].iter().position(|&b| b == b'{')?;

            if let Some(close) = self.closing_brace(open) {
                return Some((open, close));
            }

            open += 1;
        }

        None
    }

    fn closing_brace(&self, open: usize) -> Option<usize> {
        let name = &self.label[open + 1..];
        let mut chars = name.char_indices();

        match chars.next() {
            Some((_, '\n')) | None => return None,
            Some(_) => {}
        }

        for (index, c) in chars {
            match c {
                '}' => return Some(open + 1 + index),
                '\n' => return None,
                _ => {}
            }
        }

        None
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.label.len() {
            return None;
        }

        match self.next_placeholder(self.position) {
            Some((open, _)) if open > self.position => {
                let literal = &self.label[self.position..open];
                self.position = open;
                Some(Segment::Literal(literal))
            }
            Some((open, close)) => {
                self.position = close + 1;
                Some(Segment::Placeholder(&self.label[open + 1..close]))
            }
            None => {
                let literal = &self.label[self.position..];
                self.position = self.label.len();
                Some(Segment::Literal(literal))
            }
        }
    }
}

/// Expands every `{name}` placeholder in `label` with the matching argument.
///
/// Labels without placeholders are returned unchanged.
///
/// # Errors
///
/// Returns [`LabelError::MissingArgument`] for the first placeholder whose name
/// is not in `arguments`, or for any placeholder when `arguments` is `None`.
///
/// # Example
///
/// ```
/// use appbar_core::navigation::label::{fill_label, Arguments};
///
/// let arguments = Arguments::new().with("id", 42);
/// assert_eq!(fill_label("Show {id}", Some(&arguments))?, "Show 42");
/// assert!(fill_label("Show {id}", None).is_err());
/// # Ok::<(), appbar_core::navigation::label::LabelError>(())
/// ```
pub fn fill_label(label: &str, arguments: Option<&Arguments>) -> Result<String, LabelError> {
    let mut title = String::with_capacity(label.len());

    for segment in Segments::new(label) {
        match segment {
            Segment::Literal(text) => title.push_str(text),
            Segment::Placeholder(name) => {
                let Some(value) = arguments.and_then(|arguments| arguments.get(name)) else {
                    return Err(LabelError::MissingArgument {
                        name: name.to_string(),
                        label: label.to_string(),
                        arguments: arguments
                            .map(|arguments| arguments.to_string())
                            .unwrap_or_else(|| "null".to_string()),
                    });
                };
                title.push_str(value);
            }
        }
    }

    Ok(title)
}
