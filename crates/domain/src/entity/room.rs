//! Room: a named grouping of devices.

use serde::Serialize;

use crate::error::ValidationError;
use crate::id::RoomId;
use crate::wire::Fields;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub icon_id: String,
    pub name: String,
}

impl Room {
    /// Read a room from its envelope.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] on the first field that is
    /// missing or not a string.
    pub fn validate(fields: &Fields<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: RoomId::new(fields.string("id")?),
            icon_id: fields.string("iconId")?,
            name: fields.string("name")?,
        })
    }
}
