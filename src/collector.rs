//! Metric collector interface.
//!
//! See [`Collector`] for details.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::metric::MetricSink;

/// The [`Collector`] abstraction allows a host exporter to gather metrics
/// from many sources on each scrape.
///
/// An example use-case is a collector that retrieves a set of hardware
/// sensor readings ad-hoc on each scrape, see
/// [`SensorCollector`](crate::openhardwaremonitor::SensorCollector).
///
/// Register a [`Collector`] with an
/// [`Exporter`](crate::exporter::Exporter) via
/// [`Exporter::register`](crate::exporter::Exporter::register).
///
/// ```
/// # use std::sync::Arc;
/// # use ohm_collector::collector::{Collector, ScrapeContext};
/// # use ohm_collector::desc::Desc;
/// # use ohm_collector::metric::{ConstMetric, MetricSink};
/// #
/// #[derive(Debug)]
/// struct MyCollector {
///     desc: Arc<Desc>,
/// }
///
/// impl Collector for MyCollector {
///     fn collect(
///         &self,
///         _ctx: &ScrapeContext,
///         sink: &mut dyn MetricSink,
///     ) -> ohm_collector::Result<()> {
///         sink.send(ConstMetric::gauge(&self.desc, 42.0, vec![])?)
///     }
/// }
///
/// let collector = MyCollector {
///     desc: Arc::new(Desc::new("my_gauge", "some help", &[])),
/// };
/// let mut metrics = Vec::new();
/// collector.collect(&ScrapeContext::new(), &mut metrics).unwrap();
/// assert_eq!(1, metrics.len());
/// ```
pub trait Collector: std::fmt::Debug + Send + Sync + 'static {
    /// Called on each scrape. Sends the current observations to `sink`.
    fn collect(&self, ctx: &ScrapeContext, sink: &mut dyn MetricSink) -> Result<()>;
}

/// Per-scrape state handed to every [`Collector`].
///
/// Collectors treat it as opaque.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeContext {
    started: Instant,
}

impl ScrapeContext {
    /// Starts a new scrape.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since the scrape started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for ScrapeContext {
    fn default() -> Self {
        Self::new()
    }
}
