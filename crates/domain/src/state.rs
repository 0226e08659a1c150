//! Device state documents.
//!
//! Every service of a device reports its current value as a JSON object whose
//! `@type` selects one of a closed set of shapes. [`validate_device_state`]
//! resolves the tag and checks the document against exactly that shape.
//!
//! ```
//! use serde_json::json;
//! use shc_domain::state::{BinarySwitchState, DeviceState, validate_device_state};
//!
//! let state = validate_device_state(&json!({"@type": "binarySwitchState", "on": true})).unwrap();
//! assert_eq!(state, DeviceState::BinarySwitch(BinarySwitchState { on: true }));
//! ```

mod catalog;
mod climate;
mod enums;
mod variants;

use serde::Serialize;
use serde_json::Value;

pub use catalog::{DeviceServiceType, DeviceStateTag};
pub use climate::{ClimateControlState, DayProfile, Schedule, SwitchPoint};
pub use enums::{
    ChildLock, ControlMode, OperationMode, SilentMode, TemperatureLevel, ValveTappetStatus,
    Weekday,
};
pub use variants::{
    BinarySwitchState, ChildLockState, HumidityLevelState, MultiLevelSwitchState,
    PowerMeterState, SilentModeState, StateVariant, TemperatureLevelState,
    TemperatureLevelSwitchPointValue, TemperatureOffsetState, ThermostatSupportedControlModeState,
    ValveTappetState, VentilationDelayState,
};

use crate::error::ValidationError;
use crate::wire::{Fields, discriminator};

/// A validated device state, tagged the way the hub tags it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type")]
pub enum DeviceState {
    #[serde(rename = "temperatureLevelState")]
    TemperatureLevel(TemperatureLevelState),
    #[serde(rename = "ventilationDelayState")]
    VentilationDelay(VentilationDelayState),
    #[serde(rename = "childLockState")]
    ChildLock(ChildLockState),
    #[serde(rename = "humidityLevelState")]
    HumidityLevel(HumidityLevelState),
    #[serde(rename = "valveTappetState")]
    ValveTappet(ValveTappetState),
    #[serde(rename = "silentModeState")]
    SilentMode(SilentModeState),
    #[serde(rename = "temperatureOffsetState")]
    TemperatureOffset(TemperatureOffsetState),
    #[serde(rename = "thermostatSupportedControlModeState")]
    ThermostatSupportedControlMode(ThermostatSupportedControlModeState),
    #[serde(rename = "temperatureLevelSwitchPointValue")]
    TemperatureLevelSwitchPointValue(TemperatureLevelSwitchPointValue),
    #[serde(rename = "binarySwitchState")]
    BinarySwitch(BinarySwitchState),
    #[serde(rename = "multiLevelSwitchState")]
    MultiLevelSwitch(MultiLevelSwitchState),
    #[serde(rename = "powerMeterState")]
    PowerMeter(PowerMeterState),
    #[serde(rename = "climateControlState")]
    ClimateControl(ClimateControlState),
}

impl DeviceState {
    /// The tag this state was validated against.
    #[must_use]
    pub const fn tag(&self) -> DeviceStateTag {
        match self {
            Self::TemperatureLevel(_) => DeviceStateTag::TemperatureLevel,
            Self::VentilationDelay(_) => DeviceStateTag::VentilationDelay,
            Self::ChildLock(_) => DeviceStateTag::ChildLock,
            Self::HumidityLevel(_) => DeviceStateTag::HumidityLevel,
            Self::ValveTappet(_) => DeviceStateTag::ValveTappet,
            Self::SilentMode(_) => DeviceStateTag::SilentMode,
            Self::TemperatureOffset(_) => DeviceStateTag::TemperatureOffset,
            Self::ThermostatSupportedControlMode(_) => {
                DeviceStateTag::ThermostatSupportedControlMode
            }
            Self::TemperatureLevelSwitchPointValue(_) => {
                DeviceStateTag::TemperatureLevelSwitchPointValue
            }
            Self::BinarySwitch(_) => DeviceStateTag::BinarySwitch,
            Self::MultiLevelSwitch(_) => DeviceStateTag::MultiLevelSwitch,
            Self::PowerMeter(_) => DeviceStateTag::PowerMeter,
            Self::ClimateControl(_) => DeviceStateTag::ClimateControl,
        }
    }

    /// Narrow to a concrete variant.
    #[must_use]
    pub fn as_variant<S: StateVariant>(&self) -> Option<&S> {
        S::from_state(self)
    }
}

impl DeviceStateTag {
    /// Validate `fields` against the shape selected by this tag.
    ///
    /// # Errors
    ///
    /// Returns the first field that does not fit the shape.
    pub fn validate(self, fields: &Fields<'_>) -> Result<DeviceState, ValidationError> {
        fn read<S: StateVariant>(fields: &Fields<'_>) -> Result<DeviceState, ValidationError> {
            S::validate(fields).map(Into::into)
        }

        match self {
            Self::TemperatureLevel => read::<TemperatureLevelState>(fields),
            Self::VentilationDelay => read::<VentilationDelayState>(fields),
            Self::ChildLock => read::<ChildLockState>(fields),
            Self::HumidityLevel => read::<HumidityLevelState>(fields),
            Self::ValveTappet => read::<ValveTappetState>(fields),
            Self::SilentMode => read::<SilentModeState>(fields),
            Self::TemperatureOffset => read::<TemperatureOffsetState>(fields),
            Self::ThermostatSupportedControlMode => {
                read::<ThermostatSupportedControlModeState>(fields)
            }
            Self::TemperatureLevelSwitchPointValue => {
                read::<TemperatureLevelSwitchPointValue>(fields)
            }
            Self::BinarySwitch => read::<BinarySwitchState>(fields),
            Self::MultiLevelSwitch => read::<MultiLevelSwitchState>(fields),
            Self::PowerMeter => read::<PowerMeterState>(fields),
            Self::ClimateControl => read::<ClimateControlState>(fields),
        }
    }
}

/// Validate a raw device-state document.
///
/// # Errors
///
/// - [`ValidationError::UnknownDiscriminator`] when `raw` is not an object or
///   its `@type` is missing or unknown.
/// - [`ValidationError::ShapeMismatch`] when a field of the selected shape is
///   missing, ill-typed or outside its closed set.
/// - [`ValidationError::NestedValidationFailure`] when an embedded schedule is
///   invalid.
pub fn validate_device_state(raw: &Value) -> Result<DeviceState, ValidationError> {
    let tag: DeviceStateTag = discriminator(raw)?;
    let fields = Fields::new(tag.as_str(), raw)?;
    tag.validate(&fields)
}
