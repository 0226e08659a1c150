//! In-memory view of the entities reported by the hub.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::entity::{Device, DeviceServiceData, Entity, EntityKey, EntityKind, Room};
use crate::error::ValidationError;
use crate::id::{DeviceId, RoomId, ServiceId};
use crate::poll_event::PollEvent;
use crate::state::StateVariant;

/// What applying one poll event did to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The key was not present and now is.
    Inserted(EntityKey),
    /// The previous value under the key was overwritten by a different one.
    Replaced(EntityKey),
    /// The event carried the value already stored.
    Unchanged(EntityKey),
    Removed(EntityKey),
    /// A deletion for a key that is not present.
    AlreadyAbsent(EntityKey),
}

impl Applied {
    #[must_use]
    pub fn key(&self) -> &EntityKey {
        match self {
            Self::Inserted(key)
            | Self::Replaced(key)
            | Self::Unchanged(key)
            | Self::Removed(key)
            | Self::AlreadyAbsent(key) => key,
        }
    }

    /// Whether the registry differs from before the event.
    #[must_use]
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Self::Inserted(_) | Self::Replaced(_) | Self::Removed(_)
        )
    }
}

/// Latest validated entity per `(kind, id)`, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entries: BTreeMap<EntityKey, Entity>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw poll event and apply it.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the event. The registry is left
    /// untouched in that case.
    pub fn apply(&mut self, raw: &Value) -> Result<Applied, ValidationError> {
        let event = PollEvent::from_json(raw)?;
        Ok(self.apply_event(event))
    }

    /// Apply an already validated event.
    ///
    /// A deletion removes the key whatever the carried entity holds. An
    /// upsert replaces the stored entity wholesale.
    pub fn apply_event(&mut self, event: PollEvent) -> Applied {
        let key = event.key();
        if event.deleted {
            return match self.entries.remove(&key) {
                Some(_) => Applied::Removed(key),
                None => Applied::AlreadyAbsent(key),
            };
        }
        match self.entries.insert(key.clone(), event.entity) {
            None => Applied::Inserted(key),
            Some(previous) if Some(&previous) == self.entries.get(&key) => Applied::Unchanged(key),
            Some(_) => Applied::Replaced(key),
        }
    }

    #[must_use]
    pub fn get(&self, kind: EntityKind, id: &str) -> Option<&Entity> {
        self.entries.get(&EntityKey::new(kind, id))
    }

    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        match self.get(EntityKind::Room, id.as_str()) {
            Some(Entity::Room(room)) => Some(room),
            _ => None,
        }
    }

    #[must_use]
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        match self.get(EntityKind::Device, id.as_str()) {
            Some(Entity::Device(device)) => Some(device),
            _ => None,
        }
    }

    #[must_use]
    pub fn service(&self, id: &ServiceId) -> Option<&DeviceServiceData> {
        match self.get(EntityKind::ServiceData, id.as_str()) {
            Some(Entity::ServiceData(service)) => Some(service),
            _ => None,
        }
    }

    /// The state of a service, narrowed to `S`.
    ///
    /// `None` when the service is unknown or reports another tag.
    #[must_use]
    pub fn service_state<S: StateVariant>(&self, id: &ServiceId) -> Option<&S> {
        self.service(id).and_then(DeviceServiceData::state_as::<S>)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.entries.values().filter_map(|entity| match entity {
            Entity::Room(room) => Some(room),
            _ => None,
        })
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.entries.values().filter_map(|entity| match entity {
            Entity::Device(device) => Some(device),
            _ => None,
        })
    }

    pub fn services(&self) -> impl Iterator<Item = &DeviceServiceData> {
        self.entries.values().filter_map(|entity| match entity {
            Entity::ServiceData(service) => Some(service),
            _ => None,
        })
    }

    pub fn devices_in_room<'a>(&'a self, room: &'a RoomId) -> impl Iterator<Item = &'a Device> {
        self.devices().filter(move |device| &device.room_id == room)
    }

    pub fn services_of_device<'a>(
        &'a self,
        device: &'a DeviceId,
    ) -> impl Iterator<Item = &'a DeviceServiceData> {
        self.services()
            .filter(move |service| &service.device_id == device)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &Entity)> {
        self.entries.iter()
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}
