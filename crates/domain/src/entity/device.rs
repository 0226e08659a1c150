//! Device: a physical or virtual appliance exposing services.

use serde::Serialize;

use crate::closed_enum;
use crate::error::ValidationError;
use crate::id::{DeviceId, RoomId};
use crate::state::DeviceServiceType;
use crate::wire::Fields;

closed_enum!(
    /// Hardware models known to the hub.
    DeviceModel {
        VentilationService => "VENTILATION_SERVICE",
        /// Radiator thermostat.
        Trv => "TRV",
        /// Virtual device grouping the thermostats of a room.
        RoomClimateControl => "ROOM_CLIMATE_CONTROL",
        HueBridgeManager => "HUE_BRIDGE_MANAGER",
        HueLightRoomControl => "HUE_LIGHT_ROOM_CONTROL",
        /// Battery-powered wall thermostat.
        Rth2Bat => "RTH2_BAT",
    }
);

closed_enum!(
    /// Reachability of a device.
    DeviceStatus {
        Available => "AVAILABLE",
        Unavailable => "UNAVAILABLE",
    }
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub root_device_id: DeviceId,
    /// Services exposed by the device, in the order the hub lists them.
    pub device_service_ids: Vec<DeviceServiceType>,
    pub manufacturer: String,
    pub room_id: RoomId,
    pub device_model: DeviceModel,
    pub serial: String,
    pub profile: String,
    pub name: String,
    pub status: DeviceStatus,
}

impl Device {
    /// Read a device from its envelope.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] on the first field that is
    /// missing, ill-typed, or outside its closed set. Unknown service types
    /// are reported at `deviceServiceIds[index]`; repeated ones are folded.
    pub fn validate(fields: &Fields<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: DeviceId::new(fields.string("id")?),
            root_device_id: DeviceId::new(fields.string("rootDeviceId")?),
            device_service_ids: fields.enum_list_distinct("deviceServiceIds")?,
            manufacturer: fields.string("manufacturer")?,
            room_id: RoomId::new(fields.string("roomId")?),
            device_model: fields.enumeration("deviceModel")?,
            serial: fields.string("serial")?,
            profile: fields.string("profile")?,
            name: fields.string("name")?,
            status: fields.enumeration("status")?,
        })
    }

    /// Whether the hub currently reaches this device.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == DeviceStatus::Available
    }

    #[must_use]
    pub fn exposes(&self, service: DeviceServiceType) -> bool {
        self.device_service_ids.contains(&service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, validate_entity};
    use crate::error::Mismatch;
    use crate::wire::{ClosedEnum, FieldPath};
    use serde_json::{Value, json};

    fn thermostat() -> Value {
        json!({
            "@type": "device",
            "id": "hdm:HomeMaticIP:3014F711A0001916D859A8A9",
            "rootDeviceId": "64-da-a0-02-14-9b",
            "deviceServiceIds": ["TemperatureLevel", "ValveTappet", "Thermostat"],
            "manufacturer": "BOSCH",
            "roomId": "hz_1",
            "deviceModel": "TRV",
            "serial": "3014F711A0001916D859A8A9",
            "profile": "GENERIC",
            "name": "Radiator thermostat",
            "status": "AVAILABLE",
            "childDeviceIds": []
        })
    }

    fn validate(raw: &Value) -> Result<Device, ValidationError> {
        match validate_entity(raw)? {
            Entity::Device(device) => Ok(device),
            other => panic!("expected a device, got {other:?}"),
        }
    }

    #[test]
    fn should_validate_device_when_all_fields_are_present() {
        let device = validate(&thermostat()).unwrap();
        assert_eq!(device.device_model, DeviceModel::Trv);
        assert_eq!(device.room_id, RoomId::new("hz_1"));
        assert_eq!(
            device.device_service_ids,
            vec![
                DeviceServiceType::TemperatureLevel,
                DeviceServiceType::ValveTappet,
                DeviceServiceType::Thermostat,
            ]
        );
        assert!(device.is_available());
        assert!(device.exposes(DeviceServiceType::ValveTappet));
        assert!(!device.exposes(DeviceServiceType::BinarySwitch));
    }

    #[test]
    fn should_refuse_unknown_service_type() {
        let mut raw = thermostat();
        raw["deviceServiceIds"] = json!(["TemperatureLevel", "DoorLock"]);
        let err = validate(&raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ShapeMismatch {
                tag: "device",
                field: FieldPath::key("deviceServiceIds").then_index(1),
                reason: Mismatch::NotInSet {
                    value: "DoorLock".to_string(),
                    allowed: DeviceServiceType::WIRE_NAMES,
                },
            }
        );
    }

    #[test]
    fn should_refuse_power_meter_service_type() {
        let mut raw = thermostat();
        raw["deviceServiceIds"] = json!(["BinarySwitch", "PowerMeter"]);
        let err = validate(&raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ShapeMismatch {
                tag: "device",
                field: FieldPath::key("deviceServiceIds").then_index(1),
                reason: Mismatch::NotInSet {
                    value: "PowerMeter".to_string(),
                    allowed: DeviceServiceType::WIRE_NAMES,
                },
            }
        );
    }

    #[test]
    fn should_fold_repeated_service_type() {
        let mut raw = thermostat();
        raw["deviceServiceIds"] = json!(["Thermostat", "ValveTappet", "Thermostat"]);
        let device = validate(&raw).unwrap();
        assert_eq!(
            device.device_service_ids,
            vec![DeviceServiceType::Thermostat, DeviceServiceType::ValveTappet]
        );
    }

    #[test]
    fn should_refuse_unknown_device_model() {
        let mut raw = thermostat();
        raw["deviceModel"] = json!("SMOKE_DETECTOR");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.path(), FieldPath::key("deviceModel"));
    }

    #[test]
    fn should_refuse_status_in_lowercase() {
        let mut raw = thermostat();
        raw["status"] = json!("available");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.path(), FieldPath::key("status"));
    }

    #[test]
    fn should_serialize_back_to_hub_field_names() {
        let device = validate(&thermostat()).unwrap();
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["deviceModel"], "TRV");
        assert_eq!(json["rootDeviceId"], "64-da-a0-02-14-9b");
        assert_eq!(json["deviceServiceIds"][2], "Thermostat");
    }
}
