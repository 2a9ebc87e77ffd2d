//! Bridge from [`Collector`]s into a `prometheus-client`
//! [`Registry`](prometheus_client::registry::Registry).
//!
//! See [`Exporter`] for details.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Instant;

use prometheus_client::encoding::{
    DescriptorEncoder, EncodeLabelValue, EncodeMetric, LabelValueEncoder,
};
use prometheus_client::metrics::gauge::ConstGauge;
use tracing::{debug, error, warn, Span};

use crate::collector::{Collector, ScrapeContext};
use crate::desc::{build_fq_name, Desc};
use crate::error::Result;
use crate::metric::ConstMetric;

/// Runs a set of named [`Collector`]s on every scrape of the registry it is
/// registered with.
///
/// Besides the collectors' own metrics, two gauges are exported per
/// collector: `<namespace>_exporter_collector_duration_seconds` and
/// `<namespace>_exporter_collector_success`. A failing collector is logged
/// and reported with a success value of `0`; the other collectors are
/// unaffected.
///
/// ```
/// # use ohm_collector::exporter::Exporter;
/// # use ohm_collector::openhardwaremonitor::SensorCollector;
/// # use prometheus_client::registry::Registry;
/// #
/// let logger = tracing::Span::current();
/// let mut exporter = Exporter::new(&logger, "windows");
/// exporter.register(
///     "open_hardware_monitor",
///     Box::new(SensorCollector::new(&logger)),
/// );
///
/// let mut registry = Registry::default();
/// registry.register_collector(Box::new(exporter));
/// ```
#[derive(Debug)]
pub struct Exporter {
    span: Span,
    collectors: Vec<(String, Box<dyn Collector>)>,
    duration: Arc<Desc>,
    success: Arc<Desc>,
}

impl Exporter {
    /// Creates an exporter without collectors.
    pub fn new(logger: &Span, namespace: &str) -> Self {
        Self {
            span: logger.clone(),
            collectors: Vec::new(),
            duration: Arc::new(Desc::new(
                build_fq_name(namespace, "exporter", "collector_duration_seconds"),
                "Duration of a collection",
                &["collector"],
            )),
            success: Arc::new(Desc::new(
                build_fq_name(namespace, "exporter", "collector_success"),
                "Whether the collector was successful",
                &["collector"],
            )),
        }
    }

    /// Adds a collector, run after all previously registered ones.
    pub fn register(&mut self, name: impl Into<String>, collector: Box<dyn Collector>) {
        self.collectors.push((name.into(), collector));
    }

    /// Runs every collector once and returns all observations.
    pub fn scrape(&self) -> Result<Vec<ConstMetric>> {
        let _entered = self.span.enter();
        let ctx = ScrapeContext::new();
        let mut metrics = Vec::new();
        let mut outcomes = Vec::with_capacity(self.collectors.len());

        for (name, collector) in &self.collectors {
            let started = Instant::now();
            let mut buffer = Vec::new();
            let success = match collector.collect(&ctx, &mut buffer) {
                Ok(()) => true,
                Err(err) => {
                    warn!(collector = %name, error = %err, "collector failed");
                    false
                }
            };
            metrics.append(&mut buffer);
            outcomes.push((name, started.elapsed(), success));
        }

        for (name, elapsed, success) in outcomes {
            metrics.push(ConstMetric::gauge(
                &self.duration,
                elapsed.as_secs_f64(),
                vec![name.clone()],
            )?);
            metrics.push(ConstMetric::gauge(
                &self.success,
                if success { 1.0 } else { 0.0 },
                vec![name.clone()],
            )?);
        }

        debug!(
            metrics = metrics.len(),
            elapsed = ?ctx.elapsed(),
            "scrape finished"
        );
        Ok(metrics)
    }
}

impl prometheus_client::collector::Collector for Exporter {
    fn encode(&self, mut encoder: DescriptorEncoder) -> std::result::Result<(), std::fmt::Error> {
        let metrics = self.scrape().map_err(|err| {
            error!(parent: &self.span, error = %err, "scrape failed");
            std::fmt::Error
        })?;

        encode_metrics(&mut encoder, &metrics)
    }
}

/// Encodes `metrics` as gauges, writing each descriptor once.
///
/// Observations sharing a descriptor are grouped under it; descriptors are
/// written in the order they are first seen.
pub fn encode_metrics(
    encoder: &mut DescriptorEncoder,
    metrics: &[ConstMetric],
) -> std::result::Result<(), std::fmt::Error> {
    let mut families: Vec<Vec<&ConstMetric>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for metric in metrics {
        match positions.get(metric.desc().fq_name()) {
            Some(&i) => families[i].push(metric),
            None => {
                positions.insert(metric.desc().fq_name(), families.len());
                families.push(vec![metric]);
            }
        }
    }

    for family in families {
        let first = family[0];
        let desc = first.desc();
        let mut family_encoder = encoder.encode_descriptor(
            desc.fq_name(),
            desc.help(),
            None,
            first.metric_type(),
        )?;

        for metric in family {
            let labels: Vec<(&str, Escaped)> = metric
                .labels()
                .map(|(name, value)| (name, Escaped(value)))
                .collect();
            let metric_encoder = family_encoder.encode_family(&labels)?;
            ConstGauge::new(metric.value()).encode(metric_encoder)?;
        }
    }

    Ok(())
}

/// Label value with backslashes, double quotes and line feeds escaped for the
/// text exposition format.
#[derive(Debug, Clone, Copy)]
struct Escaped<'a>(&'a str);

impl EncodeLabelValue for Escaped<'_> {
    fn encode(&self, encoder: &mut LabelValueEncoder) -> std::result::Result<(), std::fmt::Error> {
        let mut rest = self.0;
        while let Some(i) = rest.find(['\\', '"', '\n']) {
            encoder.write_str(&rest[..i])?;
            encoder.write_str(match rest.as_bytes()[i] {
                b'\\' => "\\\\",
                b'"' => "\\\"",
                _ => "\\n",
            })?;
            rest = &rest[i + 1..];
        }
        encoder.write_str(rest)
    }
}
