//! Metric descriptors.
//!
//! See [`Desc`] for details.

/// Static metadata describing the shape of one exported metric: its
/// fully-qualified name, help text and ordered variable label names.
///
/// A [`Desc`] is created once, when a collector is constructed, and is never
/// mutated afterwards. Every [`ConstMetric`](crate::metric::ConstMetric)
/// emitted for it carries label values in the order of
/// [`Desc::variable_labels`].
///
/// ```
/// # use ohm_collector::desc::{build_fq_name, Desc};
/// let desc = Desc::new(
///     build_fq_name("windows", "open_hardware_monitor", "sensor_value"),
///     "Value from an OpenHardwareMonitor sensor",
///     &["parent", "index", "name", "sensor_type"],
/// );
/// assert_eq!("windows_open_hardware_monitor_sensor_value", desc.fq_name());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desc {
    fq_name: String,
    help: String,
    variable_labels: Vec<&'static str>,
}

impl Desc {
    /// Creates a new [`Desc`].
    pub fn new(
        fq_name: impl Into<String>,
        help: impl Into<String>,
        variable_labels: &[&'static str],
    ) -> Self {
        Self {
            fq_name: fq_name.into(),
            help: help.into(),
            variable_labels: variable_labels.to_vec(),
        }
    }

    /// Fully-qualified metric name.
    pub fn fq_name(&self) -> &str {
        &self.fq_name
    }

    /// Help text.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Ordered label names.
    pub fn variable_labels(&self) -> &[&'static str] {
        &self.variable_labels
    }
}

/// Joins the non-empty components of a metric name with `_`.
///
/// Empty components are skipped, so a collector without a namespace still
/// produces a well-formed name.
pub fn build_fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}
