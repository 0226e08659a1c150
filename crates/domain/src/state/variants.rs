//! Flat device-state variants.

use serde::Serialize;
use serde_json::Value;

use super::catalog::DeviceStateTag;
use super::enums::{ChildLock, ControlMode, SilentMode, TemperatureLevel, ValveTappetStatus};
use super::DeviceState;
use crate::error::ValidationError;
use crate::time::Timestamp;
use crate::wire::Fields;

/// A single catalog entry: one tag, one shape.
pub trait StateVariant: Sized + Into<DeviceState> {
    /// The tag this shape is selected by.
    const TAG: DeviceStateTag;

    /// Read this variant's fields. The tag has already been resolved.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a field is missing or ill-typed.
    fn validate(fields: &Fields<'_>) -> Result<Self, ValidationError>;

    /// Narrow a [`DeviceState`] to this variant.
    fn from_state(state: &DeviceState) -> Option<&Self>;

    /// Validate a standalone document whose `@type` must be exactly [`Self::TAG`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ShapeMismatch`] when the document is not
    /// an object, carries another tag, or has an invalid field.
    fn validate_tagged(raw: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(Self::TAG.as_str(), raw)?;
        fields.expect_tag(Self::TAG.as_str())?;
        Self::validate(&fields)
    }
}

macro_rules! state_variant {
    ($ty:ident, $variant:ident, |$fields:ident| $body:expr) => {
        impl $crate::state::StateVariant for $ty {
            const TAG: $crate::state::DeviceStateTag = $crate::state::DeviceStateTag::$variant;

            fn validate(
                $fields: &$crate::wire::Fields<'_>,
            ) -> Result<Self, $crate::error::ValidationError> {
                Ok($body)
            }

            fn from_state(state: &$crate::state::DeviceState) -> Option<&Self> {
                match state {
                    $crate::state::DeviceState::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for $crate::state::DeviceState {
            fn from(inner: $ty) -> Self {
                Self::$variant(inner)
            }
        }
    };
}

/// Room or thermostat temperature reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureLevelState {
    pub temperature: f64,
}

state_variant!(TemperatureLevelState, TemperatureLevel, |fields| Self {
    temperature: fields.number("temperature")?,
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VentilationDelayState {
    pub delay: f64,
}

state_variant!(VentilationDelayState, VentilationDelay, |fields| Self {
    delay: fields.number("delay")?,
});

/// Reported by the `Thermostat` service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildLockState {
    pub child_lock: ChildLock,
}

state_variant!(ChildLockState, ChildLock, |fields| Self {
    child_lock: fields.enumeration("childLock")?,
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HumidityLevelState {
    pub humidity: f64,
}

state_variant!(HumidityLevelState, HumidityLevel, |fields| Self {
    humidity: fields.number("humidity")?,
});

/// Valve position and the result of the last adaption run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValveTappetState {
    pub position: f64,
    pub value: ValveTappetStatus,
}

state_variant!(ValveTappetState, ValveTappet, |fields| Self {
    position: fields.number("position")?,
    value: fields.enumeration("value")?,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SilentModeState {
    pub mode: SilentMode,
}

state_variant!(SilentModeState, SilentMode, |fields| Self {
    mode: fields.enumeration("mode")?,
});

/// Temperature offset applied by a thermostat, with its allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureOffsetState {
    pub max_offset: f64,
    pub min_offset: f64,
    pub offset: f64,
    pub step_size: f64,
}

state_variant!(TemperatureOffsetState, TemperatureOffset, |fields| Self {
    max_offset: fields.number("maxOffset")?,
    min_offset: fields.number("minOffset")?,
    offset: fields.number("offset")?,
    step_size: fields.number("stepSize")?,
});

/// Control modes a thermostat accepts, in the order the hub lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermostatSupportedControlModeState {
    pub supported_control_modes: Vec<ControlMode>,
}

state_variant!(
    ThermostatSupportedControlModeState,
    ThermostatSupportedControlMode,
    |fields| Self {
        supported_control_modes: fields.enum_set("supportedControlModes")?,
    }
);

/// Value of a schedule switch point. Also valid as a standalone document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureLevelSwitchPointValue {
    pub temperature_level: TemperatureLevel,
}

state_variant!(
    TemperatureLevelSwitchPointValue,
    TemperatureLevelSwitchPointValue,
    |fields| Self {
        temperature_level: fields.enumeration("temperatureLevel")?,
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BinarySwitchState {
    pub on: bool,
}

state_variant!(BinarySwitchState, BinarySwitch, |fields| Self {
    on: fields.boolean("on")?,
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MultiLevelSwitchState {
    pub level: f64,
}

state_variant!(MultiLevelSwitchState, MultiLevelSwitch, |fields| Self {
    level: fields.number("level")?,
});

/// Energy metering of a smart plug.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerMeterState {
    pub energy_consumption: f64,
    pub power_consumption: f64,
    pub energy_consumption_start_date: Timestamp,
}

state_variant!(PowerMeterState, PowerMeter, |fields| Self {
    energy_consumption: fields.number("energyConsumption")?,
    power_consumption: fields.number("powerConsumption")?,
    energy_consumption_start_date: fields.timestamp("energyConsumptionStartDate")?,
});

pub(super) use state_variant;
