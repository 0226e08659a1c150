//! Enumerations referenced by device-state variants.

use crate::closed_enum;

closed_enum!(
    /// Child lock of a thermostat.
    ChildLock {
        On => "ON",
        Off => "OFF",
    }
);

closed_enum!(
    /// Outcome of the last valve adaption run.
    ValveTappetStatus {
        AdaptionSuccessful => "VALVE_ADAPTION_SUCCESSFUL",
        RangeTooBig => "RANGE_TOO_BIG",
    }
);

closed_enum!(
    /// Silent mode of a thermostat. The hub only ever reports one value.
    SilentMode {
        Silent => "MODE_SILENT",
    }
);

closed_enum!(
    /// Control mode of a thermostat or a room climate control.
    ControlMode {
        Heating => "HEATING",
        Off => "OFF",
    }
);

closed_enum!(
    /// Target level of a schedule switch point.
    TemperatureLevel {
        Eco => "ECO",
        Comfort => "COMFORT",
    }
);

closed_enum!(
    /// Whether a room climate control follows its schedule.
    OperationMode {
        Automatic => "AUTOMATIC",
        Manual => "MANUAL",
    }
);

closed_enum!(
    /// Day of a schedule profile.
    Weekday {
        Monday => "MONDAY",
        Tuesday => "TUESDAY",
        Wednesday => "WEDNESDAY",
        Thursday => "THURSDAY",
        Friday => "FRIDAY",
        Saturday => "SATURDAY",
        Sunday => "SUNDAY",
    }
);
