//! Room climate control state and its weekly schedule.

use serde::{Serialize, Serializer};

use super::DeviceState;
use super::enums::{ControlMode, OperationMode, Weekday};
use super::variants::{StateVariant, TemperatureLevelSwitchPointValue, state_variant};
use crate::error::ValidationError;
use crate::wire::{FieldPath, Fields};

/// State of a `RoomClimateControl` service.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateControlState {
    pub boost_mode: bool,
    pub low: bool,
    pub operation_mode: OperationMode,
    pub room_control_mode: ControlMode,
    pub schedule: Schedule,
    pub setpoint_temperature: f64,
    pub setpoint_temperature_for_level_comfort: f64,
    pub setpoint_temperature_for_level_eco: f64,
    pub summer_mode: bool,
    pub supports_boost_mode: bool,
    pub ventilation_mode: bool,
}

state_variant!(ClimateControlState, ClimateControl, |fields| Self {
    boost_mode: fields.boolean("boostMode")?,
    low: fields.boolean("low")?,
    operation_mode: fields.enumeration("operationMode")?,
    room_control_mode: fields.enumeration("roomControlMode")?,
    schedule: Schedule::validate(&fields.object("schedule")?)
        .map_err(|err| err.nested(fields.tag(), FieldPath::key("schedule")))?,
    setpoint_temperature: fields.number("setpointTemperature")?,
    setpoint_temperature_for_level_comfort: fields.number("setpointTemperatureForLevelComfort")?,
    setpoint_temperature_for_level_eco: fields.number("setpointTemperatureForLevelEco")?,
    summer_mode: fields.boolean("summerMode")?,
    supports_boost_mode: fields.boolean("supportsBoostMode")?,
    ventilation_mode: fields.boolean("ventilationMode")?,
});

/// Weekly schedule: one profile per configured day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub profiles: Vec<DayProfile>,
}

impl Schedule {
    /// Read a schedule object. Paths in errors are relative to the schedule.
    ///
    /// # Errors
    ///
    /// Returns the first invalid profile or switch point.
    pub fn validate(fields: &Fields<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            profiles: fields.objects("profiles", DayProfile::validate)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProfile {
    pub day: Weekday,
    pub switch_points: Vec<SwitchPoint>,
}

impl DayProfile {
    fn validate(fields: &Fields<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            day: fields.enumeration("day")?,
            switch_points: fields.objects("switchPoints", SwitchPoint::validate)?,
        })
    }
}

/// Level change at a minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPoint {
    pub start_time_minutes: i64,
    #[serde(serialize_with = "serialize_tagged_value")]
    pub value: TemperatureLevelSwitchPointValue,
}

impl SwitchPoint {
    fn validate(fields: &Fields<'_>) -> Result<Self, ValidationError> {
        let start_time_minutes = fields.integer("startTimeMinutes")?;
        let value = TemperatureLevelSwitchPointValue::validate_tagged(fields.raw("value")?)
            .map_err(|err| err.within(FieldPath::key("value")))?;
        Ok(Self {
            start_time_minutes,
            value,
        })
    }
}

fn serialize_tagged_value<S: Serializer>(
    value: &TemperatureLevelSwitchPointValue,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    DeviceState::from(*value).serialize(serializer)
}
