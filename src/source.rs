//! Sensor data providers.

use crate::error::Result;
use crate::sensor::Sensor;

/// WMI namespace OpenHardwareMonitor publishes its sensors in.
pub const OPEN_HARDWARE_MONITOR_NAMESPACE: &str = "root/OpenHardwareMonitor";

/// Query issued against the provider on each scrape.
pub const SENSOR_QUERY: &str = "SELECT * FROM Sensor";

/// A provider of current sensor records.
pub trait SensorSource: std::fmt::Debug + Send + Sync + 'static {
    /// Returns every sensor record the provider currently knows about, in
    /// provider order.
    ///
    /// Blocks until the provider answers.
    fn query_all(&self) -> Result<Vec<Sensor>>;
}

/// Queries the `Sensor` class of a WMI namespace.
///
/// A fresh COM connection is opened on the calling thread for every query.
#[derive(Debug, Clone)]
pub struct WmiSource {
    namespace: String,
}

impl WmiSource {
    /// Creates a source for the given WMI namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The WMI namespace queried.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Default for WmiSource {
    fn default() -> Self {
        Self::new(OPEN_HARDWARE_MONITOR_NAMESPACE)
    }
}

#[cfg(windows)]
impl SensorSource for WmiSource {
    fn query_all(&self) -> Result<Vec<Sensor>> {
        use crate::error::Error;
        use wmi::{COMLibrary, WMIConnection};

        tracing::debug!(namespace = %self.namespace, query = SENSOR_QUERY, "querying WMI");

        let com = COMLibrary::new().map_err(|e| Error::query(&self.namespace, e))?;
        let connection = WMIConnection::with_namespace_path(&self.namespace, com)
            .map_err(|e| Error::query(&self.namespace, e))?;
        connection
            .raw_query::<Sensor>(SENSOR_QUERY)
            .map_err(|e| Error::query(&self.namespace, e))
    }
}

#[cfg(not(windows))]
impl SensorSource for WmiSource {
    fn query_all(&self) -> Result<Vec<Sensor>> {
        tracing::debug!(namespace = %self.namespace, query = SENSOR_QUERY, "querying WMI");

        Err(crate::error::Error::query(
            &self.namespace,
            std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "WMI is only available on Windows",
            ),
        ))
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use fake::StaticSource;

#[cfg(any(test, feature = "test-util"))]
mod fake {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::SensorSource;
    use crate::error::{Error, Result};
    use crate::sensor::Sensor;

    /// Scripted [`SensorSource`] replaying canned answers.
    ///
    /// Answers are handed out in order; once one is left it is repeated for
    /// every further query. A scripted failure is returned as
    /// [`Error::Query`].
    #[derive(Debug)]
    pub struct StaticSource {
        script: Mutex<VecDeque<std::result::Result<Vec<Sensor>, String>>>,
    }

    impl StaticSource {
        /// Always answers with `sensors`.
        pub fn new(sensors: Vec<Sensor>) -> Self {
            Self::with_script(vec![Ok(sensors)])
        }

        /// Always fails with `reason`.
        pub fn failing(reason: impl Into<String>) -> Self {
            Self::with_script(vec![Err(reason.into())])
        }

        /// Answers with each entry of `script` in turn.
        pub fn with_script(script: Vec<std::result::Result<Vec<Sensor>, String>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
            }
        }
    }

    impl SensorSource for StaticSource {
        fn query_all(&self) -> Result<Vec<Sensor>> {
            let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
            let answer = if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            };

            match answer {
                Some(Ok(sensors)) => Ok(sensors),
                Some(Err(reason)) => Err(Error::query("static", reason)),
                None => Ok(Vec::new()),
            }
        }
    }
}
