//! Entities reported by the hub's poll stream.
//!
//! Three shapes share the stream, selected by their own `@type`:
//! [`Room`], [`Device`] and [`DeviceServiceData`]. Each carries a stable `id`
//! which, together with its [`EntityKind`], forms the [`EntityKey`] the
//! registry reconciles on.

mod device;
mod room;
mod service_data;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub use device::{Device, DeviceModel, DeviceStatus};
pub use room::Room;
pub use service_data::DeviceServiceData;

use crate::closed_enum;
use crate::error::ValidationError;
use crate::wire::{Fields, discriminator};

closed_enum!(
    /// The entity shapes found in a poll cycle.
    EntityKind {
        Room => "room",
        Device => "device",
        ServiceData => "DeviceServiceData",
    }
);

/// Reconciliation key: ids are only unique within their own kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityKey {
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// A validated entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type")]
pub enum Entity {
    #[serde(rename = "room")]
    Room(Room),
    #[serde(rename = "device")]
    Device(Device),
    #[serde(rename = "DeviceServiceData")]
    ServiceData(DeviceServiceData),
}

impl Entity {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Room(_) => EntityKind::Room,
            Self::Device(_) => EntityKind::Device,
            Self::ServiceData(_) => EntityKind::ServiceData,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Room(room) => room.id.as_str(),
            Self::Device(device) => device.id.as_str(),
            Self::ServiceData(service) => service.id.as_str(),
        }
    }

    #[must_use]
    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.kind(), self.id())
    }
}

impl From<Room> for Entity {
    fn from(room: Room) -> Self {
        Self::Room(room)
    }
}

impl From<Device> for Entity {
    fn from(device: Device) -> Self {
        Self::Device(device)
    }
}

impl From<DeviceServiceData> for Entity {
    fn from(service: DeviceServiceData) -> Self {
        Self::ServiceData(service)
    }
}

/// Validate a raw entity document, dispatching on its `@type`.
///
/// # Errors
///
/// - [`ValidationError::UnknownDiscriminator`] when the `@type` is missing or
///   is not one of `room`, `device`, `DeviceServiceData`.
/// - [`ValidationError::ShapeMismatch`] when an envelope field is invalid.
/// - [`ValidationError::NestedValidationFailure`] when the `state` of a
///   `DeviceServiceData` is invalid.
pub fn validate_entity(raw: &Value) -> Result<Entity, ValidationError> {
    let kind: EntityKind = discriminator(raw)?;
    let fields = Fields::new(kind.as_str(), raw)?;
    match kind {
        EntityKind::Room => Room::validate(&fields).map(Entity::Room),
        EntityKind::Device => Device::validate(&fields).map(Entity::Device),
        EntityKind::ServiceData => DeviceServiceData::validate(&fields).map(Entity::ServiceData),
    }
}
