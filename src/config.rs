//! Configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::source::OPEN_HARDWARE_MONITOR_NAMESPACE;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix of every exported metric name (e.g., "windows")
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// OpenHardwareMonitor collector configuration
    #[serde(default)]
    pub open_hardware_monitor: SensorConfig,
}

/// OpenHardwareMonitor collector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Descriptor layout
    #[serde(default)]
    pub policy: Policy,

    /// WMI namespace to query
    #[serde(default = "default_wmi_namespace")]
    pub wmi_namespace: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            wmi_namespace: default_wmi_namespace(),
        }
    }
}

/// How sensor records are mapped onto metric descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// One metric per sensor kind, labeled `parent`, `index`, `name`.
    /// Sensors of other kinds are dropped.
    #[default]
    PerKind,
    /// A single metric for all sensors, with an extra `sensor_type` label.
    Unified,
}

fn default_namespace() -> String {
    "windows".to_string()
}

fn default_wmi_namespace() -> String {
    OPEN_HARDWARE_MONITOR_NAMESPACE.to_string()
}

impl Config {
    /// Parses configuration from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            open_hardware_monitor: SensorConfig::default(),
        }
    }
}
