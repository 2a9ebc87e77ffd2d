//! Collector for OpenHardwareMonitor sensors.
//!
//! See [`SensorCollector`] for details.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, trace, Span};

use crate::collector::{Collector, ScrapeContext};
use crate::config::{Config, Policy};
use crate::desc::{build_fq_name, Desc};
use crate::error::Result;
use crate::metric::{ConstMetric, MetricSink};
use crate::sensor::{Sensor, SensorKind};
use crate::source::{SensorSource, WmiSource};

/// Subsystem part of every metric name, also used as the collector's log tag.
pub const SUBSYSTEM: &str = "open_hardware_monitor";

const LABELS: [&str; 3] = ["parent", "index", "name"];
const UNIFIED_LABELS: [&str; 4] = ["parent", "index", "name", "sensor_type"];

#[derive(Debug)]
enum Descriptors {
    PerKind(HashMap<SensorKind, Arc<Desc>>),
    Unified(Arc<Desc>),
}

impl Descriptors {
    fn new(namespace: &str, policy: Policy) -> Self {
        match policy {
            Policy::PerKind => Descriptors::PerKind(
                SensorKind::ALL
                    .into_iter()
                    .map(|kind| {
                        let desc = Desc::new(
                            build_fq_name(namespace, SUBSYSTEM, kind.metric_name()),
                            kind.help(),
                            &LABELS,
                        );
                        (kind, Arc::new(desc))
                    })
                    .collect(),
            ),
            Policy::Unified => Descriptors::Unified(Arc::new(Desc::new(
                build_fq_name(namespace, SUBSYSTEM, "sensor_value"),
                "Value from an OpenHardwareMonitor sensor, unit implied by sensor_type",
                &UNIFIED_LABELS,
            ))),
        }
    }
}

/// Exposes every sensor published by OpenHardwareMonitor as a gauge.
///
/// Each call to [`Collector::collect`] queries the [`SensorSource`] once and
/// sends one [`ConstMetric`] per returned record, in provider order. Nothing
/// is cached between scrapes.
///
/// With [`Policy::PerKind`] (the default) each [`SensorKind`] has its own
/// metric, e.g. `windows_open_hardware_monitor_sensor_temperature_degrees`,
/// labeled `parent`, `index` and `name`; records of any other sensor type
/// are skipped. With [`Policy::Unified`] every record goes to
/// `windows_open_hardware_monitor_sensor_value` with an extra `sensor_type`
/// label.
///
/// ```
/// # use ohm_collector::collector::{Collector, ScrapeContext};
/// # use ohm_collector::config::Config;
/// # use ohm_collector::openhardwaremonitor::SensorCollector;
/// # use ohm_collector::sensor::Sensor;
/// # use ohm_collector::source::SensorSource;
/// #
/// #[derive(Debug)]
/// struct OneCore;
///
/// impl SensorSource for OneCore {
///     fn query_all(&self) -> ohm_collector::Result<Vec<Sensor>> {
///         Ok(vec![Sensor {
///             sensor_type: "Temperature".to_string(),
///             parent: "cpu0".to_string(),
///             name: "Core #1".to_string(),
///             value: 45.5,
///             index: 1,
///             ..Default::default()
///         }])
///     }
/// }
///
/// let collector =
///     SensorCollector::with_source(&tracing::Span::current(), &Config::default(), OneCore);
/// let mut metrics = Vec::new();
/// collector.collect(&ScrapeContext::new(), &mut metrics).unwrap();
///
/// assert_eq!(
///     "windows_open_hardware_monitor_sensor_temperature_degrees",
///     metrics[0].desc().fq_name()
/// );
/// assert_eq!(&["cpu0", "1", "Core #1"], metrics[0].label_values());
/// assert_eq!(45.5, metrics[0].value());
/// ```
#[derive(Debug)]
pub struct SensorCollector<S = WmiSource> {
    span: Span,
    source: S,
    descriptors: Descriptors,
}

impl SensorCollector {
    /// Creates a collector querying OpenHardwareMonitor over WMI with the
    /// default configuration.
    ///
    /// Diagnostics are emitted in a child span of `logger`.
    pub fn new(logger: &Span) -> Self {
        Self::with_config(logger, &Config::default())
    }

    /// Creates a collector querying the WMI namespace named in `config`.
    pub fn with_config(logger: &Span, config: &Config) -> Self {
        let source = WmiSource::new(config.open_hardware_monitor.wmi_namespace.clone());
        Self::with_source(logger, config, source)
    }
}

impl<S: SensorSource> SensorCollector<S> {
    /// Creates a collector reading from an arbitrary [`SensorSource`].
    pub fn with_source(logger: &Span, config: &Config, source: S) -> Self {
        Self {
            span: tracing::info_span!(parent: logger, "collector", collector = SUBSYSTEM),
            source,
            descriptors: Descriptors::new(&config.namespace, config.open_hardware_monitor.policy),
        }
    }

    /// The descriptors metrics of this collector are emitted for.
    pub fn descriptors(&self) -> Vec<&Desc> {
        match &self.descriptors {
            Descriptors::PerKind(descs) => SensorKind::ALL
                .iter()
                .filter_map(|kind| descs.get(kind))
                .map(|desc| &**desc)
                .collect(),
            Descriptors::Unified(desc) => vec![&**desc],
        }
    }

    fn collect_sensors(&self, sink: &mut dyn MetricSink) -> Result<()> {
        let sensors = self.source.query_all()?;

        for sensor in sensors {
            if let Some(metric) = self.observe(sensor)? {
                sink.send(metric)?;
            }
        }

        Ok(())
    }

    fn observe(&self, sensor: Sensor) -> Result<Option<ConstMetric>> {
        let Sensor {
            sensor_type,
            parent,
            name,
            value,
            index,
            ..
        } = sensor;

        let metric = match &self.descriptors {
            Descriptors::PerKind(descs) => {
                let desc = match SensorKind::from_sensor_type(&sensor_type)
                    .and_then(|kind| descs.get(&kind))
                {
                    Some(desc) => desc,
                    None => {
                        trace!(%sensor_type, %name, "skipping sensor without metric");
                        return Ok(None);
                    }
                };
                let index = itoa::Buffer::new().format(index).to_string();
                ConstMetric::gauge(desc, f64::from(value), vec![parent, index, name])?
            }
            Descriptors::Unified(desc) => {
                let index = itoa::Buffer::new().format(index).to_string();
                ConstMetric::gauge(desc, f64::from(value), vec![parent, index, name, sensor_type])?
            }
        };

        Ok(Some(metric))
    }
}

impl<S: SensorSource> Collector for SensorCollector<S> {
    fn collect(&self, _ctx: &ScrapeContext, sink: &mut dyn MetricSink) -> Result<()> {
        let _entered = self.span.enter();

        if let Err(err) = self.collect_sensors(sink) {
            error!(
                collector = SUBSYSTEM,
                error = %err,
                "failed collecting open hardware monitor metrics"
            );
            return Err(err);
        }

        Ok(())
    }
}
