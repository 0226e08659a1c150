//! Validation errors.
//!
//! Every failure is structured: it names the document tag, the path of the
//! offending field and why the value was refused, so a rejected poll event can
//! be diagnosed without looking at the raw input.

use std::fmt;

use crate::wire::{FieldPath, JsonKind, TAG_FIELD};

/// Why a JSON document was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The `@type` tag is missing or not part of the closed set.
    #[error("unrecognised `@type` discriminator {}", Found(.found.as_deref()))]
    UnknownDiscriminator {
        /// The tag as found in the document, if any.
        found: Option<String>,
    },

    /// The tag is known but one of its fields does not fit the declared shape.
    #[error("`{tag}`: field `{field}` {reason}")]
    ShapeMismatch {
        /// Tag of the document that declares the field.
        tag: &'static str,
        /// Path of the field, relative to that document.
        field: FieldPath,
        reason: Mismatch,
    },

    /// A value embedded in the document failed its own validation.
    #[error("`{tag}`: nested validation failed at `{path}`")]
    NestedValidationFailure {
        /// Tag of the outer document.
        tag: &'static str,
        /// Full path from the outer document to the failing field.
        path: FieldPath,
        /// The failure as reported by the embedded structure.
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Path of the failing field, relative to the validated document.
    #[must_use]
    pub fn path(&self) -> FieldPath {
        match self {
            Self::UnknownDiscriminator { .. } => FieldPath::key(TAG_FIELD),
            Self::ShapeMismatch { field, .. } => field.clone(),
            Self::NestedValidationFailure { path, .. } => path.clone(),
        }
    }

    /// Tag of the document the error was raised for, when one was recognised.
    #[must_use]
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Self::UnknownDiscriminator { .. } => None,
            Self::ShapeMismatch { tag, .. } | Self::NestedValidationFailure { tag, .. } => {
                Some(*tag)
            }
        }
    }

    /// The innermost error of a nesting chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::NestedValidationFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Re-anchor a field-level error under `prefix` while staying inside the
    /// same document.
    ///
    /// Discriminator errors are left untouched: tags are only read at
    /// document roots, which are wrapped with [`nested`](Self::nested).
    #[must_use]
    pub fn within(self, prefix: FieldPath) -> Self {
        match self {
            Self::ShapeMismatch { tag, field, reason } => Self::ShapeMismatch {
                tag,
                field: prefix.join(&field),
                reason,
            },
            Self::NestedValidationFailure { tag, path, source } => {
                Self::NestedValidationFailure {
                    tag,
                    path: prefix.join(&path),
                    source,
                }
            }
            discriminator @ Self::UnknownDiscriminator { .. } => discriminator,
        }
    }

    /// Wrap the failure of a structure embedded at `prefix` inside a document
    /// tagged `tag`.
    #[must_use]
    pub fn nested(self, tag: &'static str, prefix: FieldPath) -> Self {
        Self::NestedValidationFailure {
            tag,
            path: prefix.join(&self.path()),
            source: Box::new(self),
        }
    }
}

/// The reason a single field was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("is missing")]
    Missing,

    #[error("expected {expected}, found {actual}")]
    WrongType { expected: JsonKind, actual: JsonKind },

    #[error("`{value}` is not one of {}", Allowed(.allowed))]
    NotInSet {
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("contains `{value}` more than once")]
    Duplicate { value: String },

    #[error("`{value}` is neither an RFC 3339 timestamp nor epoch milliseconds")]
    InvalidTimestamp { value: String },

    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedTag {
        expected: &'static str,
        found: String,
    },
}

/// A string that is not part of a closed wire enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not one of {}", Allowed(.allowed))]
pub struct UnknownLiteral {
    pub value: String,
    pub allowed: &'static [&'static str],
}

struct Found<'a>(Option<&'a str>);

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(tag) => write!(f, "`{tag}`"),
            None => f.write_str("(missing)"),
        }
    }
}

struct Allowed<'a>(&'a [&'static str]);

impl fmt::Display for Allowed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, name) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}
