//! Wire-level helpers shared by every validator.
//!
//! - [`closed_enum!`](crate::closed_enum) declares a closed set of wire literals.
//! - [`FieldPath`] locates a field inside a JSON document.
//! - [`Fields`] reads typed fields out of a JSON object and turns every
//!   failure into a structured [`ValidationError`](crate::error::ValidationError).

mod closed_enum;
mod fields;
mod path;

pub use closed_enum::ClosedEnum;
pub use fields::{Fields, JsonKind, discriminator};
pub use path::{FieldPath, PathSegment};

/// The discriminator field carried by every tagged document.
pub const TAG_FIELD: &str = "@type";
