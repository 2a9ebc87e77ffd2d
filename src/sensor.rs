//! OpenHardwareMonitor sensor records.

use serde::{Deserialize, Deserializer};

/// One reading of the WMI class `Sensor` published by OpenHardwareMonitor.
///
/// Properties missing from the provider's answer, or reported as `NULL`,
/// decode to the field type's zero value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename = "Sensor", rename_all = "PascalCase", default)]
pub struct Sensor {
    /// Kind of measurement, e.g. `Temperature` or `Fan`.
    #[serde(deserialize_with = "null_as_default")]
    pub sensor_type: String,
    /// Provider-internal identifier, e.g. `/intelcpu/0/temperature/1`.
    #[serde(deserialize_with = "null_as_default")]
    pub identifier: String,
    /// Identifier of the owning hardware component.
    #[serde(deserialize_with = "null_as_default")]
    pub parent: String,
    /// Human-readable sensor name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Current reading, unit implied by [`Sensor::sensor_type`].
    #[serde(deserialize_with = "null_as_default")]
    pub value: f32,
    /// Highest reading seen by the provider.
    #[serde(deserialize_with = "null_as_default")]
    pub max: f32,
    /// Lowest reading seen by the provider.
    #[serde(deserialize_with = "null_as_default")]
    pub min: f32,
    /// Disambiguates sensors of the same type and name under one parent.
    #[serde(deserialize_with = "null_as_default")]
    pub index: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Sensor types with a dedicated per-kind metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Clock speed in megahertz.
    Clock,
    /// Duty cycle in percent.
    Control,
    /// Fan speed in revolutions per minute.
    Fan,
    /// Flow in liters per hour.
    Flow,
    /// Generic level in percent.
    Level,
    /// Load in percent.
    Load,
    /// Temperature in degrees Celsius.
    Temperature,
    /// Voltage in volts.
    Voltage,
}

impl SensorKind {
    /// All kinds, in descriptor registration order.
    pub const ALL: [SensorKind; 8] = [
        SensorKind::Clock,
        SensorKind::Control,
        SensorKind::Fan,
        SensorKind::Flow,
        SensorKind::Level,
        SensorKind::Load,
        SensorKind::Temperature,
        SensorKind::Voltage,
    ];

    /// Maps a provider `SensorType` string. Matching is case-sensitive.
    pub fn from_sensor_type(sensor_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.sensor_type() == sensor_type)
    }

    /// The provider's `SensorType` string.
    pub fn sensor_type(&self) -> &'static str {
        match self {
            SensorKind::Clock => "Clock",
            SensorKind::Control => "Control",
            SensorKind::Fan => "Fan",
            SensorKind::Flow => "Flow",
            SensorKind::Level => "Level",
            SensorKind::Load => "Load",
            SensorKind::Temperature => "Temperature",
            SensorKind::Voltage => "Voltage",
        }
    }

    /// Metric name below the collector subsystem.
    pub fn metric_name(&self) -> &'static str {
        match self {
            SensorKind::Clock => "sensor_clock_mhz",
            SensorKind::Control => "sensor_control_percent",
            SensorKind::Fan => "sensor_fan_speed_rpm",
            SensorKind::Flow => "sensor_flow_liters_per_hour",
            SensorKind::Level => "sensor_level_percent",
            SensorKind::Load => "sensor_load_percent",
            SensorKind::Temperature => "sensor_temperature_degrees",
            SensorKind::Voltage => "sensor_voltage_volts",
        }
    }

    /// Metric help text.
    pub fn help(&self) -> &'static str {
        match self {
            SensorKind::Clock => "Clock speed from an OpenHardwareMonitor sensor in megahertz",
            SensorKind::Control => "Duty cycle from an OpenHardwareMonitor sensor in percent",
            SensorKind::Fan => {
                "Fan speed from an OpenHardwareMonitor sensor in revolutions per minute"
            }
            SensorKind::Flow => "Flow from an OpenHardwareMonitor sensor in liters per hour",
            SensorKind::Level => {
                "Generic level measure from an OpenHardwareMonitor sensor in percent"
            }
            SensorKind::Load => "Load from an OpenHardwareMonitor sensor in percentages",
            SensorKind::Temperature => {
                "Temperature from an OpenHardwareMonitor sensor in degrees Celsius"
            }
            SensorKind::Voltage => "Voltage from an OpenHardwareMonitor sensor in volts",
        }
    }
}
