use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ohm_collector::collector::{Collector, ScrapeContext};
use ohm_collector::config::{Config, Policy};
use ohm_collector::exporter::Exporter;
use ohm_collector::openhardwaremonitor::SensorCollector;
use ohm_collector::sensor::Sensor;
use ohm_collector::source::SensorSource;
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use tracing::Span;

const SENSOR_TYPES: [&str; 9] = [
    "Clock",
    "Control",
    "Fan",
    "Flow",
    "Level",
    "Load",
    "Temperature",
    "Voltage",
    "Power",
];

#[derive(Debug)]
struct Rack {
    sensors: Vec<Sensor>,
}

impl Rack {
    fn new(count: u32) -> Self {
        let sensors = (0..count)
            .map(|i| Sensor {
                sensor_type: SENSOR_TYPES[i as usize % SENSOR_TYPES.len()].to_string(),
                identifier: format!("/hw/{}/sensor/{i}", i % 16),
                parent: format!("/hw/{}", i % 16),
                name: format!("Sensor #{i}"),
                value: i as f32 * 0.5,
                max: 0.0,
                min: 0.0,
                index: i,
            })
            .collect();
        Self { sensors }
    }
}

impl SensorSource for Rack {
    fn query_all(&self) -> ohm_collector::Result<Vec<Sensor>> {
        Ok(self.sensors.clone())
    }
}

fn config(policy: Policy) -> Config {
    let mut config = Config::default();
    config.open_hardware_monitor.policy = policy;
    config
}

pub fn collect(c: &mut Criterion) {
    for policy in [Policy::PerKind, Policy::Unified] {
        c.bench_function(&format!("collect 1000 sensors ({policy:?})"), |b| {
            let collector =
                SensorCollector::with_source(&Span::none(), &config(policy), Rack::new(1000));

            b.iter(|| {
                let mut metrics = Vec::new();
                collector
                    .collect(&ScrapeContext::new(), &mut metrics)
                    .unwrap();
                black_box(metrics);
            })
        });
    }

    c.bench_function("scrape and encode 1000 sensors", |b| {
        let logger = Span::none();
        let mut exporter = Exporter::new(&logger, "windows");
        exporter.register(
            "open_hardware_monitor",
            Box::new(SensorCollector::with_source(
                &logger,
                &config(Policy::PerKind),
                Rack::new(1000),
            )),
        );
        let mut registry = Registry::default();
        registry.register_collector(Box::new(exporter));

        b.iter(|| {
            let mut buffer = String::new();
            encode(&mut buffer, &registry).unwrap();
            black_box(buffer);
        })
    });
}

criterion_group!(benches, collect);
criterion_main!(benches);
