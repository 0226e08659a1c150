//! Typed field extraction from JSON objects.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Mismatch, ValidationError};
use crate::time::{Timestamp, parse_timestamp};
use crate::wire::{ClosedEnum, FieldPath, TAG_FIELD};

/// The kind of a JSON value, as used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    /// Only ever expected, never observed: integers are numbers on the wire.
    Integer,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a JSON value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "a boolean",
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::String => "a string",
            Self::Array => "an array",
            Self::Object => "an object",
        })
    }
}

/// Read the `@type` discriminator of `raw` and resolve it within the closed
/// set `E`.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownDiscriminator`] when `raw` is not an
/// object, has no `@type`, or its `@type` is not a member of `E`.
pub fn discriminator<E: ClosedEnum>(raw: &Value) -> Result<E, ValidationError> {
    let found = match raw.get(TAG_FIELD) {
        None => None,
        Some(Value::String(tag)) => {
            if let Some(known) = E::from_wire(tag) {
                return Ok(known);
            }
            Some(tag.clone())
        }
        Some(other) => Some(other.to_string()),
    };
    Err(ValidationError::UnknownDiscriminator { found })
}

/// Read-only view over the fields of a tagged JSON object.
///
/// Every accessor reports failures as [`ValidationError::ShapeMismatch`]
/// against the view's tag, with the field path relative to the object.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    tag: &'static str,
    object: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Open a view over `value`, which must be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ShapeMismatch`] at the document root when
    /// `value` is not an object.
    pub fn new(tag: &'static str, value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(object) => Ok(Self { tag, object }),
            other => Err(ValidationError::ShapeMismatch {
                tag,
                field: FieldPath::root(),
                reason: Mismatch::WrongType {
                    expected: JsonKind::Object,
                    actual: JsonKind::of(other),
                },
            }),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    fn mismatch(&self, field: FieldPath, reason: Mismatch) -> ValidationError {
        ValidationError::ShapeMismatch {
            tag: self.tag,
            field,
            reason,
        }
    }

    fn wrong_type(&self, field: FieldPath, expected: JsonKind, actual: &Value) -> ValidationError {
        self.mismatch(
            field,
            Mismatch::WrongType {
                expected,
                actual: JsonKind::of(actual),
            },
        )
    }

    /// The raw value of a required field.
    ///
    /// # Errors
    ///
    /// Returns [`Mismatch::Missing`] when the field is absent.
    pub fn raw(&self, name: &str) -> Result<&'a Value, ValidationError> {
        self.object
            .get(name)
            .ok_or_else(|| self.mismatch(FieldPath::key(name), Mismatch::Missing))
    }

    /// A required real number. JSON integers are accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing
    /// or not a number.
    pub fn number(&self, name: &str) -> Result<f64, ValidationError> {
        let value = self.raw(name)?;
        value
            .as_f64()
            .ok_or_else(|| self.wrong_type(FieldPath::key(name), JsonKind::Number, value))
    }

    /// A required integer. Whole numbers written with a fraction (`360.0`)
    /// are accepted; numbers with a fractional part are refused.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing
    /// or not an integer representable as `i64`.
    pub fn integer(&self, name: &str) -> Result<i64, ValidationError> {
        let value = self.raw(name)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().and_then(whole_number))
            .ok_or_else(|| self.wrong_type(FieldPath::key(name), JsonKind::Integer, value))
    }

    /// A required boolean.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing
    /// or not a boolean.
    pub fn boolean(&self, name: &str) -> Result<bool, ValidationError> {
        let value = self.raw(name)?;
        value
            .as_bool()
            .ok_or_else(|| self.wrong_type(FieldPath::key(name), JsonKind::Boolean, value))
    }

    /// An optional boolean. Absence yields `None`; `null` is refused.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is present
    /// but not a boolean.
    pub fn optional_boolean(&self, name: &str) -> Result<Option<bool>, ValidationError> {
        match self.object.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.wrong_type(FieldPath::key(name), JsonKind::Boolean, value)),
        }
    }

    /// A required string, copied out of the document.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing
    /// or not a string.
    pub fn string(&self, name: &str) -> Result<String, ValidationError> {
        let value = self.raw(name)?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.wrong_type(FieldPath::key(name), JsonKind::String, value))
    }

    /// A required member of the closed enumeration `E`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing,
    /// not a string, or not one of `E`'s literals.
    pub fn enumeration<E: ClosedEnum>(&self, name: &str) -> Result<E, ValidationError> {
        let value = self.raw(name)?;
        self.literal(FieldPath::key(name), value)
    }

    /// A required array of distinct members of `E`, order preserved.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing,
    /// not an array, or one of its entries is invalid or repeated. The path
    /// names the offending entry.
    pub fn enum_set<E: ClosedEnum + PartialEq>(&self, name: &str) -> Result<Vec<E>, ValidationError> {
        let items = self.array(name)?;
        let mut members: Vec<E> = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let path = FieldPath::key(name).then_index(index);
            let member: E = self.literal(path.clone(), item)?;
            if members.contains(&member) {
                return Err(self.mismatch(
                    path,
                    Mismatch::Duplicate {
                        value: member.as_str().to_string(),
                    },
                ));
            }
            members.push(member);
        }
        Ok(members)
    }

    /// A required array of members of `E`. Repeated members are kept once,
    /// at their first position.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing,
    /// not an array, or one of its entries is invalid. The path names the
    /// offending entry.
    pub fn enum_list_distinct<E: ClosedEnum + PartialEq>(
        &self,
        name: &str,
    ) -> Result<Vec<E>, ValidationError> {
        let items = self.array(name)?;
        let mut members: Vec<E> = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let member: E = self.literal(FieldPath::key(name).then_index(index), item)?;
            if !members.contains(&member) {
                members.push(member);
            }
        }
        Ok(members)
    }

    fn literal<E: ClosedEnum>(&self, path: FieldPath, value: &Value) -> Result<E, ValidationError> {
        let Some(text) = value.as_str() else {
            return Err(self.wrong_type(path, JsonKind::String, value));
        };
        E::from_wire(text).ok_or_else(|| {
            self.mismatch(
                path,
                Mismatch::NotInSet {
                    value: text.to_string(),
                    allowed: E::WIRE_NAMES,
                },
            )
        })
    }

    /// A required array.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing
    /// or not an array.
    pub fn array(&self, name: &str) -> Result<&'a [Value], ValidationError> {
        let value = self.raw(name)?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.wrong_type(FieldPath::key(name), JsonKind::Array, value))
    }

    /// A required nested object, viewed under the same tag.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the field is missing
    /// or not an object.
    pub fn object(&self, name: &str) -> Result<Fields<'a>, ValidationError> {
        let value = self.raw(name)?;
        Fields::new(self.tag, value).map_err(|err| err.within(FieldPath::key(name)))
    }

    /// A required array of objects, each parsed by `parse`.
    ///
    /// Errors raised by `parse` are re-anchored under `name[index]`.
    ///
    /// # Errors
    ///
    /// Returns the first failure, in array order.
    pub fn objects<T>(
        &self,
        name: &str,
        parse: impl Fn(&Fields<'a>) -> Result<T, ValidationError>,
    ) -> Result<Vec<T>, ValidationError> {
        self.array(name)?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Fields::new(self.tag, item)
                    .and_then(|fields| parse(&fields))
                    .map_err(|err| err.within(FieldPath::key(name).then_index(index)))
            })
            .collect()
    }

    /// A required timestamp: an RFC 3339 string or integer epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] with
    /// [`Mismatch::InvalidTimestamp`] for any other representation.
    pub fn timestamp(&self, name: &str) -> Result<Timestamp, ValidationError> {
        let value = self.raw(name)?;
        parse_timestamp(value).ok_or_else(|| {
            self.mismatch(
                FieldPath::key(name),
                Mismatch::InvalidTimestamp {
                    value: value.to_string(),
                },
            )
        })
    }

    /// Check that the object's own `@type` is exactly `expected`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] on `@type` when the tag is
    /// missing, not a string, or a different literal.
    pub fn expect_tag(&self, expected: &'static str) -> Result<(), ValidationError> {
        let value = self.raw(TAG_FIELD)?;
        let Some(found) = value.as_str() else {
            return Err(self.wrong_type(FieldPath::key(TAG_FIELD), JsonKind::String, value));
        };
        if found == expected {
            return Ok(());
        }
        Err(self.mismatch(
            FieldPath::key(TAG_FIELD),
            Mismatch::UnexpectedTag {
                expected,
                found: found.to_string(),
            },
        ))
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn whole_number(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}
