//! Typed identifier newtypes backed by the hub's string ids.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an id as reported by the hub.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Access the inner id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Room`](crate::entity::Room), e.g. `hz_1`.
    RoomId
);

define_id!(
    /// Identifier of a [`Device`](crate::entity::Device), e.g. `hdm:ZigBee:000d6f0012345678`.
    DeviceId
);

define_id!(
    /// Identifier of a [`DeviceServiceData`](crate::entity::DeviceServiceData) record.
    ServiceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_inner_id() {
        let id = RoomId::new("hz_1");
        assert_eq!(id.to_string(), "hz_1");
        assert_eq!(id.as_str(), "hz_1");
    }

    #[test]
    fn should_compare_equal_when_built_from_str_or_string() {
        assert_eq!(
            DeviceId::from("roomClimateControl_hz_1"),
            DeviceId::from("roomClimateControl_hz_1".to_string())
        );
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = ServiceId::new("ValveTappet");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ValveTappet\"");
        let parsed: ServiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_order_lexicographically() {
        assert!(RoomId::new("hz_1") < RoomId::new("hz_2"));
    }
}
