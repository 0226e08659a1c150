//! Notifications emitted while a poll cycle is applied.

use shc_domain::entity::{Entity, EntityKey};

use crate::rejection_log::RejectedEvent;

/// One observable outcome of a poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryChange {
    /// A new key entered the registry.
    Inserted(Entity),
    /// An existing key now holds a different value.
    Replaced(Entity),
    Removed(EntityKey),
    /// An event failed validation and was skipped.
    Rejected(RejectedEvent),
}

impl RegistryChange {
    /// Key of the affected entity. Rejections have none.
    #[must_use]
    pub fn key(&self) -> Option<EntityKey> {
        match self {
            Self::Inserted(entity) | Self::Replaced(entity) => Some(entity.key()),
            Self::Removed(key) => Some(key.clone()),
            Self::Rejected(_) => None,
        }
    }
}
