// SPDX-License-Identifier: Apache-2.0

//! The dotted-path expression language used by side-effect definitions.
//!
//! Paths are compiled once when a definition is constructed and interpreted
//! against a JSON projection of the runtime context. `a.b[2].c` selects the
//! field `a`, then index `2` of the array `b`, then the field `c`.

use std::fmt::{
    self,
    Display,
    Formatter,
};
use std::str::FromStr;

use serde_json::Value;

use crate::Error;

/// One step of a compiled context path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Select a field of an object.
    Field(String),
    /// Select an element of an array.
    Index(usize),
}

/// A compiled dotted-path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPath {
    source: String,
    segments: Vec<PathSegment>,
}

/// Outcome of resolving a path against a context value.
///
/// Absence and type mismatch are deliberately distinct: an absent value is
/// omitted from a constructed request body, a mismatch fails the enclosing
/// side effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// The full path resolved to a value.
    Found(&'a Value),
    /// An intermediate or final segment was missing.
    Absent,
    /// A segment was applied to a value of the wrong shape.
    Mismatch {
        /// The segment that could not be applied.
        segment: PathSegment,
        /// What the value actually was at that point.
        actual: &'static str,
    },
}

impl ContextPath {
    /// Compiles a dotted-path expression.
    ///
    /// # Errors
    /// - [`Error::InvalidPath`] if the expression is empty, has an empty
    ///   segment, or has malformed index brackets.
    pub fn parse(source: &str) -> crate::Result<Self> {
        if source.is_empty() {
            return Err(Error::invalid_path(source, "path is empty"));
        }

        let mut segments = Vec::new();

        for part in source.split('.') {
            if part.is_empty() {
                return Err(Error::invalid_path(source, "empty path segment"));
            }

            let (name, indexes) = match part.find('[') {
                Some(bracket) => part.split_at(bracket),
                None => (part, ""),
            };

            if name.is_empty() {
                return Err(Error::invalid_path(source, "index without a field name"));
            }

            segments.push(PathSegment::Field(name.to_owned()));

            let mut rest = indexes;
            while !rest.is_empty() {
                let Some(inner) = rest.strip_prefix('[') else {
                    return Err(Error::invalid_path(source, "expected `[` before index"));
                };

                let Some(close) = inner.find(']') else {
                    return Err(Error::invalid_path(source, "unterminated index bracket"));
                };

                let index: usize = inner[..close]
                    .parse()
                    .map_err(|_| Error::invalid_path(source, "index is not an unsigned integer"))?;

                segments.push(PathSegment::Index(index));
                rest = &inner[close + 1..];
            }
        }

        Ok(Self { source: source.to_owned(), segments })
    }

    /// The original dotted expression this path was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled segments, in application order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Resolves this path against a context value.
    #[must_use]
    pub fn resolve<'a>(&self, context: &'a Value) -> Resolution<'a> {
        let mut current = context;

        for segment in &self.segments {
            match (segment, current) {
                (PathSegment::Field(name), Value::Object(map)) => match map.get(name) {
                    Some(next) => current = next,
                    None => return Resolution::Absent,
                },
                (PathSegment::Index(index), Value::Array(items)) => match items.get(*index) {
                    Some(next) => current = next,
                    None => return Resolution::Absent,
                },
                // `null` reads as absence, not as a shape violation.
                (_, Value::Null) => return Resolution::Absent,
                (segment, other) => {
                    return Resolution::Mismatch {
                        segment: segment.clone(),
                        actual: json_type_name(other),
                    }
                }
            }
        }

        Resolution::Found(current)
    }
}

impl FromStr for ContextPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ContextPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
