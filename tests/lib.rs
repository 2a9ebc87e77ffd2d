use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ohm_collector::config::{Config, Policy};
use ohm_collector::exporter::Exporter;
use ohm_collector::openhardwaremonitor::SensorCollector;
use ohm_collector::sensor::Sensor;
use ohm_collector::source::SensorSource;
use ohm_collector::Error;
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use tracing::Span;

#[derive(Debug)]
struct Board {
    available: Arc<AtomicBool>,
}

impl SensorSource for Board {
    fn query_all(&self) -> ohm_collector::Result<Vec<Sensor>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(Error::query(
                "root/OpenHardwareMonitor",
                "OpenHardwareMonitor is not running",
            ));
        }

        Ok(vec![
            sensor("Temperature", "cpu0", "Core #1", 45.5, 1),
            sensor("Power", "cpu0", "CPU Package", 35.25, 0),
            sensor("Load", "gpu0", "GPU Core", 12.0, 0),
            sensor("Temperature", "cpu0", "Core #2", 47.0, 2),
        ])
    }
}

fn sensor(sensor_type: &str, parent: &str, name: &str, value: f32, index: u32) -> Sensor {
    Sensor {
        sensor_type: sensor_type.to_string(),
        parent: parent.to_string(),
        name: name.to_string(),
        value,
        index,
        ..Default::default()
    }
}

fn registry(policy: Policy, available: Arc<AtomicBool>) -> Registry {
    let mut config = Config::default();
    config.open_hardware_monitor.policy = policy;

    let logger = Span::none();
    let mut exporter = Exporter::new(&logger, &config.namespace);
    exporter.register(
        "open_hardware_monitor",
        Box::new(SensorCollector::with_source(
            &logger,
            &config,
            Board { available },
        )),
    );

    let mut registry = Registry::default();
    registry.register_collector(Box::new(exporter));
    registry
}

fn scrape(registry: &Registry) -> String {
    let mut buffer = String::new();
    encode(&mut buffer, registry).unwrap();
    buffer
}

#[test]
fn per_kind_exposition() {
    let registry = registry(Policy::PerKind, Arc::new(AtomicBool::new(true)));
    let output = scrape(&registry);

    assert!(output.contains("# TYPE windows_open_hardware_monitor_sensor_temperature_degrees gauge\n"));
    assert!(output.contains(
        "windows_open_hardware_monitor_sensor_temperature_degrees{parent=\"cpu0\",index=\"1\",name=\"Core #1\"} 45.5\n"
    ));
    assert!(output.contains(
        "windows_open_hardware_monitor_sensor_temperature_degrees{parent=\"cpu0\",index=\"2\",name=\"Core #2\"} 47.0\n"
    ));
    assert!(output.contains(
        "windows_open_hardware_monitor_sensor_load_percent{parent=\"gpu0\",index=\"0\",name=\"GPU Core\"} 12.0\n"
    ));
    assert!(!output.contains("CPU Package"));
    assert!(output.contains(
        "windows_exporter_collector_success{collector=\"open_hardware_monitor\"} 1.0\n"
    ));

    // Observations of one metric are written as a single family even when
    // the provider interleaves sensor types.
    assert_eq!(
        1,
        output
            .matches("# TYPE windows_open_hardware_monitor_sensor_temperature_degrees")
            .count()
    );
}

#[test]
fn unified_exposition() {
    let registry = registry(Policy::Unified, Arc::new(AtomicBool::new(true)));
    let output = scrape(&registry);

    assert!(output.contains(
        "windows_open_hardware_monitor_sensor_value{parent=\"cpu0\",index=\"1\",name=\"Core #1\",sensor_type=\"Temperature\"} 45.5\n"
    ));
    assert!(output.contains(
        "windows_open_hardware_monitor_sensor_value{parent=\"cpu0\",index=\"0\",name=\"CPU Package\",sensor_type=\"Power\"} 35.25\n"
    ));
    assert_eq!(
        4,
        output
            .lines()
            .filter(|line| line.starts_with("windows_open_hardware_monitor_sensor_value{"))
            .count()
    );
}

#[test]
fn provider_outage_marks_collector_failed() {
    let available = Arc::new(AtomicBool::new(false));
    let registry = registry(Policy::PerKind, available.clone());

    let output = scrape(&registry);
    assert!(!output.contains("windows_open_hardware_monitor_sensor_"));
    assert!(output.contains(
        "windows_exporter_collector_success{collector=\"open_hardware_monitor\"} 0.0\n"
    ));

    // The next scrape queries again and recovers.
    available.store(true, Ordering::SeqCst);
    let output = scrape(&registry);
    assert!(output.contains("windows_open_hardware_monitor_sensor_temperature_degrees{"));
    assert!(output.contains(
        "windows_exporter_collector_success{collector=\"open_hardware_monitor\"} 1.0\n"
    ));
}

#[test]
fn scrapes_are_idempotent() {
    let registry = registry(Policy::PerKind, Arc::new(AtomicBool::new(true)));

    let strip_durations = |output: String| {
        output
            .lines()
            .filter(|line| !line.starts_with("windows_exporter_collector_duration_seconds{"))
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    assert_eq!(
        strip_durations(scrape(&registry)),
        strip_durations(scrape(&registry))
    );
}

#[derive(Debug)]
struct Disk;

impl SensorSource for Disk {
    fn query_all(&self) -> ohm_collector::Result<Vec<Sensor>> {
        Ok(vec![sensor(
            "Temperature",
            "/hdd/0",
            "Disk \"C:\\\" temp\nx",
            30.0,
            0,
        )])
    }
}

#[test]
fn sensor_names_are_escaped() {
    let logger = Span::none();
    let mut exporter = Exporter::new(&logger, "windows");
    exporter.register(
        "open_hardware_monitor",
        Box::new(SensorCollector::with_source(&logger, &Config::default(), Disk)),
    );
    let mut registry = Registry::default();
    registry.register_collector(Box::new(exporter));

    let output = scrape(&registry);

    assert!(output.contains(
        r#"windows_open_hardware_monitor_sensor_temperature_degrees{parent="/hdd/0",index="0",name="Disk \"C:\\\" temp\nx"} 30.0"#
    ));
    assert!(output.lines().all(|line| !line.starts_with("x\"")));
}
