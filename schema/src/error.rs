//! Structural errors raised while constructing or parsing a document.
//!
//! Every error carries an [`ErrorKind`] with the literal values involved and a
//! path locating the failing node inside the document, e.g.
//! `corrections[0].data.content[1].edges`. Construction is all-or-nothing: an
//! error in any node fails every ancestor, so no partial document is produced.

use std::fmt;

use crate::v1::CategoryKey;

/// One step of the path from the document root to the failing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field of an object.
    Field(&'static str),
    /// A position in an ordered sequence.
    Index(usize),
}

/// The kind of structural violation, with the data needed to reproduce it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    /// An axis' edge sequence is not strictly increasing.
    #[error("bin edges not in increasing order: {edges:?}")]
    EdgeOrder {
        /// The offending edge sequence.
        edges: Vec<f64>,
    },
    /// An axis has fewer than two edges, so it describes no bin.
    #[error("at least two bin edges are required, found {found}")]
    TooFewEdges {
        /// Number of edges present.
        found: usize,
    },
    /// A bin edge or constant leaf is NaN or infinite.
    #[error("number {value} is not finite")]
    NonFiniteNumber {
        /// The offending number.
        value: f64,
    },
    /// `content` does not have one entry per bin (or per key).
    #[error("number of content elements ({found}) must match number of bins or keys ({expected})")]
    ContentCountMismatch {
        /// Entries implied by the edges or keys.
        expected: usize,
        /// Entries present.
        found: usize,
    },
    /// A multi-binning declares a different number of axes than inputs.
    #[error("number of axes ({edges}) must match number of inputs ({inputs})")]
    AxisCountMismatch {
        /// Number of edge lists.
        edges: usize,
        /// Number of input names.
        inputs: usize,
    },
    /// A category lists the same key twice.
    #[error("duplicate category key {key}")]
    DuplicateKey {
        /// The repeated key.
        key: CategoryKey,
    },
    /// The document declares a schema version this shape does not implement.
    #[error("unsupported schema version {found}, expected {expected}")]
    SchemaVersion {
        /// The version implemented by this document shape.
        expected: i64,
        /// The version found in the document.
        found: i64,
    },
    /// A content object has an unknown `nodetype`, or none and no formula shape.
    #[error("{}", describe_discriminator(.found))]
    UnknownDiscriminator {
        /// The discriminator found, or `None` when it is missing.
        found: Option<String>,
    },
    /// An object carries a field outside its declared set.
    #[error("unrecognized field {field:?}")]
    UnrecognizedField {
        /// The extra field name.
        field: String,
    },
    /// A required field is absent.
    #[error("missing field {field:?}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },
    /// A value has the wrong JSON type.
    #[error("expected {expected}, found {found}")]
    InvalidType {
        /// Description of what was expected.
        expected: &'static str,
        /// JSON type actually found.
        found: &'static str,
    },
    /// A string field holds a value outside its enumerated literals.
    #[error("invalid value {found:?}, expected one of {allowed:?}")]
    InvalidLiteral {
        /// The value found.
        found: String,
        /// The accepted literals.
        allowed: &'static [&'static str],
    },
    /// A JSON integer does not fit the integer type of its field.
    #[error("integer {found} is out of range for {range}")]
    IntegerOutOfRange {
        /// The integer as written.
        found: String,
        /// The accepted range.
        range: &'static str,
    },
    /// A formula parameter points past the end of the supplied arguments.
    #[error("parameter index {index} is out of range for {available} arguments")]
    ParameterOutOfRange {
        /// The offending parameter index.
        index: usize,
        /// Number of arguments supplied.
        available: usize,
    },
    /// The input text is not well-formed JSON.
    #[error("malformed JSON: {message}")]
    Syntax {
        /// The JSON parser's message.
        message: String,
    },
}

fn describe_discriminator(found: &Option<String>) -> String {
    match found {
        Some(found) => format!(
            "unknown nodetype {found:?}, expected one of \"binning\", \"multibinning\", \"category\""
        ),
        None => "content object has no nodetype and is not a formula".to_owned(),
    }
}

/// A structural error located inside a document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    path: Vec<PathSegment>,
    kind: ErrorKind,
}

impl SchemaError {
    /// Creates an error at the root of whatever is being constructed.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }

    /// The kind of violation.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Path from the document root to the failing node.
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Prefixes the path with a field name, as the error leaves that field.
    #[must_use]
    pub fn in_field(mut self, field: &'static str) -> Self {
        self.path.insert(0, PathSegment::Field(field));
        self
    }

    /// Prefixes the path with a sequence index.
    #[must_use]
    pub fn in_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    /// Renders the path as `a.b[2].c`; empty for the root.
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(i) => {
                    out.push_str(&format!("[{i}]"));
                }
            }
        }
        out
    }
}

impl From<ErrorKind> for SchemaError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path_string(), self.kind)
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_fields_and_indices() {
        let err = SchemaError::new(ErrorKind::TooFewEdges { found: 1 })
            .in_field("edges")
            .in_index(1)
            .in_field("content")
            .in_field("data")
            .in_index(0)
            .in_field("corrections");
        assert_eq!(err.path_string(), "corrections[0].data.content[1].edges");
        assert_eq!(
            err.to_string(),
            "corrections[0].data.content[1].edges: at least two bin edges are required, found 1"
        );
    }

    #[test]
    fn root_error_has_no_path_prefix() {
        let err = SchemaError::new(ErrorKind::SchemaVersion {
            expected: 1,
            found: 2,
        });
        assert!(err.path().is_empty());
        assert_eq!(err.to_string(), "unsupported schema version 2, expected 1");
    }

    #[test]
    fn missing_discriminator_message() {
        let err = ErrorKind::UnknownDiscriminator { found: None };
        assert_eq!(
            err.to_string(),
            "content object has no nodetype and is not a formula"
        );
    }
}
