#![deny(dead_code)]
#![deny(missing_docs)]
#![deny(unused)]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

//! Prometheus collector exposing the hardware sensors published by
//! [OpenHardwareMonitor](https://openhardwaremonitor.org/) over WMI.
//!
//! On every scrape the [`SensorCollector`](openhardwaremonitor::SensorCollector)
//! queries the `root/OpenHardwareMonitor` namespace once and turns each
//! returned sensor into a gauge. Collectors are plugged into a
//! `prometheus-client` [`Registry`](prometheus_client::registry::Registry)
//! through an [`Exporter`](exporter::Exporter).
//!
//! # Examples
//!
//! ```
//! use ohm_collector::config::Config;
//! use ohm_collector::exporter::Exporter;
//! use ohm_collector::openhardwaremonitor::SensorCollector;
//! use ohm_collector::sensor::Sensor;
//! use ohm_collector::source::SensorSource;
//! use prometheus_client::encoding::text::encode;
//! use prometheus_client::registry::Registry;
//!
//! // A provider answering with a single fan sensor. On Windows the default
//! // `WmiSource` asks OpenHardwareMonitor instead.
//! #[derive(Debug)]
//! struct Fans;
//!
//! impl SensorSource for Fans {
//!     fn query_all(&self) -> ohm_collector::Result<Vec<Sensor>> {
//!         Ok(vec![Sensor {
//!             sensor_type: "Fan".to_string(),
//!             parent: "/lpc/nct6775".to_string(),
//!             name: "Fan #1".to_string(),
//!             value: 1200.0,
//!             ..Default::default()
//!         }])
//!     }
//! }
//!
//! let logger = tracing::Span::current();
//! let mut exporter = Exporter::new(&logger, "windows");
//! exporter.register(
//!     "open_hardware_monitor",
//!     Box::new(SensorCollector::with_source(&logger, &Config::default(), Fans)),
//! );
//!
//! let mut registry = Registry::default();
//! registry.register_collector(Box::new(exporter));
//!
//! // When a monitoring system like Prometheus scrapes the local node, encode
//! // all metrics in the registry in the text format.
//! let mut buffer = String::new();
//! encode(&mut buffer, &registry).unwrap();
//!
//! assert!(buffer.contains(
//!     "windows_open_hardware_monitor_sensor_fan_speed_rpm{parent=\"/lpc/nct6775\",index=\"0\",name=\"Fan #1\"} 1200.0\n"
//! ));
//! ```

pub mod collector;
pub mod config;
pub mod desc;
pub mod error;
pub mod exporter;
pub mod metric;
pub mod openhardwaremonitor;
pub mod sensor;
pub mod source;

pub use error::{Error, Result};
