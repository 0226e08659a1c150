//! The poll event envelope: an entity plus its deletion flag.

use serde_json::Value;

use crate::entity::{Entity, EntityKey, validate_entity};
use crate::error::ValidationError;
use crate::wire::Fields;

/// Name of the deletion flag carried next to the entity fields.
pub const DELETED_FIELD: &str = "deleted";

/// One entity document from a poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PollEvent {
    pub entity: Entity,
    /// `true` when the hub reports the entity as removed.
    pub deleted: bool,
}

impl PollEvent {
    /// Validate a raw event.
    ///
    /// The entity is validated in full even when the event is a deletion.
    /// An absent `deleted` flag means upsert.
    ///
    /// # Errors
    ///
    /// Returns the entity's validation error, or a
    /// [`ValidationError::ShapeMismatch`] on `deleted` when the flag is present
    /// but not a boolean (including `null`).
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        let entity = validate_entity(raw)?;
        let fields = Fields::new(entity.kind().as_str(), raw)?;
        let deleted = fields.optional_boolean(DELETED_FIELD)?.unwrap_or(false);
        Ok(Self { entity, deleted })
    }

    #[must_use]
    pub fn key(&self) -> EntityKey {
        self.entity.key()
    }
}
