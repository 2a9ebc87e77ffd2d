//! Constant metric observations and the sinks they are sent to.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use prometheus_client::metrics::MetricType;

use crate::desc::Desc;
use crate::error::{Error, Result};

/// A single point-in-time observation, created during a scrape and discarded
/// once encoded.
///
/// Every [`ConstMetric`] is a gauge. Label values are ordered like the
/// descriptor's [`Desc::variable_labels`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConstMetric {
    desc: Arc<Desc>,
    value: f64,
    label_values: Vec<String>,
}

impl ConstMetric {
    /// Creates a new gauge observation for `desc`.
    ///
    /// Fails with [`Error::Cardinality`] if the number of label values
    /// differs from the number of label names of `desc`.
    pub fn gauge(desc: &Arc<Desc>, value: f64, label_values: Vec<String>) -> Result<Self> {
        let expected = desc.variable_labels().len();
        if label_values.len() != expected {
            return Err(Error::Cardinality {
                name: desc.fq_name().to_string(),
                expected,
                actual: label_values.len(),
            });
        }

        Ok(Self {
            desc: desc.clone(),
            value,
            label_values,
        })
    }

    /// The descriptor this observation belongs to.
    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    /// The OpenMetrics type of the observation.
    pub fn metric_type(&self) -> MetricType {
        MetricType::Gauge
    }

    /// The observed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Label values, in descriptor order.
    pub fn label_values(&self) -> &[String] {
        &self.label_values
    }

    /// Label name and value pairs, in descriptor order.
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.desc
            .variable_labels()
            .iter()
            .copied()
            .zip(self.label_values.iter().map(String::as_str))
    }
}

/// Write-only destination of [`ConstMetric`]s produced by a
/// [`Collector`](crate::collector::Collector).
pub trait MetricSink {
    /// Accepts one observation.
    fn send(&mut self, metric: ConstMetric) -> Result<()>;
}

impl MetricSink for Vec<ConstMetric> {
    fn send(&mut self, metric: ConstMetric) -> Result<()> {
        self.push(metric);
        Ok(())
    }
}

impl MetricSink for Sender<ConstMetric> {
    fn send(&mut self, metric: ConstMetric) -> Result<()> {
        Sender::send(self, metric).map_err(|_| Error::SinkClosed)
    }
}
