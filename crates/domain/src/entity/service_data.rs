//! Service data: the current state of one service of one device.

use serde::Serialize;

use crate::error::ValidationError;
use crate::id::{DeviceId, ServiceId};
use crate::state::{DeviceState, StateVariant, validate_device_state};
use crate::wire::{FieldPath, Fields};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceServiceData {
    pub id: ServiceId,
    pub device_id: DeviceId,
    /// Hub-relative resource path, e.g. `/devices/{deviceId}/services/{id}`.
    pub path: String,
    pub state: DeviceState,
}

impl DeviceServiceData {
    /// Read the envelope, then the embedded `state`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] for an invalid envelope
    /// field, or a [`ValidationError::NestedValidationFailure`] rooted at
    /// `state` when the state document is invalid.
    pub fn validate(fields: &Fields<'_>) -> Result<Self, ValidationError> {
        let id = ServiceId::new(fields.string("id")?);
        let device_id = DeviceId::new(fields.string("deviceId")?);
        let path = fields.string("path")?;
        let state = validate_device_state(fields.raw("state")?)
            .map_err(|err| err.nested(fields.tag(), FieldPath::key("state")))?;
        Ok(Self {
            id,
            device_id,
            path,
            state,
        })
    }

    /// The state narrowed to `S`, when the reported tag is `S`'s tag.
    #[must_use]
    pub fn state_as<S: StateVariant>(&self) -> Option<&S> {
        S::from_state(&self.state)
    }
}
