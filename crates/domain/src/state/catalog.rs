//! The closed catalog of device-state tags and the service types that report them.

use crate::closed_enum;

closed_enum!(
    /// Every `@type` a device-state document may carry.
    DeviceStateTag {
        TemperatureLevel => "temperatureLevelState",
        VentilationDelay => "ventilationDelayState",
        ChildLock => "childLockState",
        HumidityLevel => "humidityLevelState",
        ValveTappet => "valveTappetState",
        SilentMode => "silentModeState",
        TemperatureOffset => "temperatureOffsetState",
        ThermostatSupportedControlMode => "thermostatSupportedControlModeState",
        TemperatureLevelSwitchPointValue => "temperatureLevelSwitchPointValue",
        BinarySwitch => "binarySwitchState",
        MultiLevelSwitch => "multiLevelSwitchState",
        PowerMeter => "powerMeterState",
        ClimateControl => "climateControlState",
    }
);

closed_enum!(
    /// Service identifiers listed in `Device.deviceServiceIds`.
    DeviceServiceType {
        TemperatureLevel => "TemperatureLevel",
        VentilationDelay => "VentilationDelay",
        Thermostat => "Thermostat",
        ValveTappet => "ValveTappet",
        SilentMode => "SilentMode",
        TemperatureOffset => "TemperatureOffset",
        ThermostatSupportedControlMode => "ThermostatSupportedControlMode",
        RoomClimateControl => "RoomClimateControl",
        BinarySwitch => "BinarySwitch",
        MultiLevelSwitch => "MultiLevelSwitch",
        HumidityLevel => "HumidityLevel",
    }
);

impl DeviceServiceType {
    /// The state tag this service reports.
    #[must_use]
    pub const fn state_tag(self) -> DeviceStateTag {
        match self {
            Self::TemperatureLevel => DeviceStateTag::TemperatureLevel,
            Self::VentilationDelay => DeviceStateTag::VentilationDelay,
            Self::Thermostat => DeviceStateTag::ChildLock,
            Self::ValveTappet => DeviceStateTag::ValveTappet,
            Self::SilentMode => DeviceStateTag::SilentMode,
            Self::TemperatureOffset => DeviceStateTag::TemperatureOffset,
            Self::ThermostatSupportedControlMode => DeviceStateTag::ThermostatSupportedControlMode,
            Self::RoomClimateControl => DeviceStateTag::ClimateControl,
            Self::BinarySwitch => DeviceStateTag::BinarySwitch,
            Self::MultiLevelSwitch => DeviceStateTag::MultiLevelSwitch,
            Self::HumidityLevel => DeviceStateTag::HumidityLevel,
        }
    }
}

impl DeviceStateTag {
    /// The service that reports this state, if any.
    ///
    /// `temperatureLevelSwitchPointValue` only occurs inside schedules, and no
    /// service type is listed for `powerMeterState`.
    #[must_use]
    pub const fn service_type(self) -> Option<DeviceServiceType> {
        match self {
            Self::TemperatureLevel => Some(DeviceServiceType::TemperatureLevel),
            Self::VentilationDelay => Some(DeviceServiceType::VentilationDelay),
            Self::ChildLock => Some(DeviceServiceType::Thermostat),
            Self::HumidityLevel => Some(DeviceServiceType::HumidityLevel),
            Self::ValveTappet => Some(DeviceServiceType::ValveTappet),
            Self::SilentMode => Some(DeviceServiceType::SilentMode),
            Self::TemperatureOffset => Some(DeviceServiceType::TemperatureOffset),
            Self::ThermostatSupportedControlMode => {
                Some(DeviceServiceType::ThermostatSupportedControlMode)
            }
            Self::TemperatureLevelSwitchPointValue | Self::PowerMeter => None,
            Self::BinarySwitch => Some(DeviceServiceType::BinarySwitch),
            Self::MultiLevelSwitch => Some(DeviceServiceType::MultiLevelSwitch),
            Self::ClimateControl => Some(DeviceServiceType::RoomClimateControl),
        }
    }
}
