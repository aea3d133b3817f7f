use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use telemon::error::MonitorError;
use telemon::{
    AlertEvent, AlertKind, CallbackSink, DiskMetrics, JsonlSink, MonitorConfig,
    MonitorController, Sample, Sink,
};

use super::common::MockSource;

struct FailingSink;

impl Sink for FailingSink {
    fn emit(&mut self, _sample: &Sample, _alerts: &[AlertEvent]) -> telemon::Result<()> {
        Err(MonitorError::sink_write("disk full"))
    }
}

fn controller_with(source: Arc<MockSource>) -> MonitorController {
    MonitorController::new(source, MonitorConfig::default()).unwrap()
}

#[test]
fn test_failed_channel_degrades_without_killing_the_cycle() {
    let source = Arc::new(MockSource::new());
    source.set_fail_disk(true);
    let controller = controller_with(Arc::clone(&source));

    controller.start(Duration::from_millis(50), None).unwrap();
    std::thread::sleep(Duration::from_millis(250));
    controller.stop();

    // The cycle itself survives: the disk channel is zeroed while the other
    // channels carry real readings.
    let latest = controller.latest().expect("cycles kept running");
    assert_eq!(latest.disk, DiskMetrics::default());
    assert_eq!(latest.cpu.percent, 25.0);
    assert!(controller.summary().unwrap().samples >= 2);
}

#[test]
fn test_broken_sink_never_stops_monitoring() {
    let source = Arc::new(MockSource::new());
    let controller = controller_with(Arc::clone(&source));

    controller
        .start(Duration::from_millis(50), Some(Box::new(FailingSink)))
        .unwrap();
    std::thread::sleep(Duration::from_millis(300));
    controller.stop();

    assert!(source.cycles() >= 3, "observed {} cycles", source.cycles());
    assert!(controller.latest().is_some());
}

#[test]
fn test_callback_sink_sees_every_cycle_and_its_alerts() {
    let emits = Arc::new(AtomicUsize::new(0));
    let alert_count = Arc::new(AtomicUsize::new(0));
    let emits_cb = Arc::clone(&emits);
    let alerts_cb = Arc::clone(&alert_count);

    let sink = CallbackSink::new(move |_sample, alerts| {
        emits_cb.fetch_add(1, Ordering::SeqCst);
        alerts_cb.fetch_add(alerts.len(), Ordering::SeqCst);
        if let Some(alert) = alerts.first() {
            assert_eq!(alert.kind, AlertKind::HighCpu);
            assert_eq!(alert.value, 95.0);
        }
    });

    // cpu at 95 raises HighCpu every cycle; memory and disk stay quiet
    let source = Arc::new(MockSource::with_percents(95.0, 50.0, 50.0));
    let controller = controller_with(source);

    controller
        .start(Duration::from_millis(50), Some(Box::new(sink)))
        .unwrap();
    std::thread::sleep(Duration::from_millis(300));
    controller.stop();

    let emitted = emits.load(Ordering::SeqCst);
    assert!(emitted >= 2);
    // Re-emission per cycle, no debounce
    assert_eq!(alert_count.load(Ordering::SeqCst), emitted);
}

#[test]
fn test_persisted_records_reproduce_samples_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("telemetry.jsonl");

    let controller = controller_with(Arc::new(MockSource::new()));
    controller
        .start(
            Duration::from_millis(50),
            Some(Box::new(JsonlSink::new(&path).unwrap())),
        )
        .unwrap();
    std::thread::sleep(Duration::from_millis(250));
    controller.stop();

    let reader = BufReader::new(File::open(&path).unwrap());
    let parsed: Vec<Sample> = reader
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();

    assert!(!parsed.is_empty());
    for sample in &parsed {
        assert_eq!(sample.cpu.percent, 25.0);
        assert_eq!(sample.cpu.per_core, vec![25.0, 25.0]);
    }
    assert_eq!(parsed.last(), controller.latest().as_ref());
}
