use std::sync::Arc;
use std::time::Duration;

use telemon::error::MonitorError;
use telemon::{Channel, MonitorConfig, MonitorController, Sample};

use super::common::MockSource;

fn controller_with(source: Arc<MockSource>) -> MonitorController {
    MonitorController::new(source, MonitorConfig::default()).unwrap()
}

#[test]
fn test_zero_capacity_rejected_at_construction() {
    let config = MonitorConfig {
        history_capacity: 0,
        ..Default::default()
    };
    let result = MonitorController::new(Arc::new(MockSource::new()), config);
    assert!(matches!(result, Err(MonitorError::InvalidConfig(_))));
}

#[test]
fn test_zero_interval_rejected_at_start() {
    let controller = controller_with(Arc::new(MockSource::new()));
    let result = controller.start(Duration::ZERO, None);
    assert!(matches!(result, Err(MonitorError::InvalidConfig(_))));
    assert!(!controller.is_running());
}

#[test]
fn test_lifecycle_start_collect_stop() {
    let source = Arc::new(MockSource::new());
    let controller = controller_with(Arc::clone(&source));

    assert!(!controller.is_running());
    assert!(controller.latest().is_none());
    assert!(controller.summary().is_none());

    controller.start(Duration::from_millis(50), None).unwrap();
    assert!(controller.is_running());
    std::thread::sleep(Duration::from_millis(300));
    controller.stop();
    assert!(!controller.is_running());

    let latest: Sample = controller.latest().expect("at least one cycle completed");
    assert_eq!(latest.cpu.percent, 25.0);
    assert_eq!(latest.memory.percent, 50.0);

    let summary = controller.summary().expect("history is non-empty");
    assert!(summary.samples >= 2);
    assert_eq!(summary.cpu.avg, 25.0);
    assert_eq!(summary.cpu.max, 25.0);
    assert_eq!(summary.cpu.min, 25.0);

    // No further cycles after stop returns
    let cycles = source.cycles();
    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(source.cycles(), cycles);
}

#[test]
fn test_start_is_idempotent() {
    let source = Arc::new(MockSource::new());
    let controller = controller_with(Arc::clone(&source));

    controller.start(Duration::from_millis(100), None).unwrap();
    controller.start(Duration::from_millis(100), None).unwrap();
    controller.start(Duration::from_millis(10), None).unwrap();

    std::thread::sleep(Duration::from_millis(550));
    controller.stop();

    // A duplicate loop would roughly double the cycle count within the
    // window; one loop at 100ms produces at most ~7 cycles here.
    assert!(source.cycles() <= 8, "observed {} cycles", source.cycles());
    assert!(source.cycles() >= 3, "observed {} cycles", source.cycles());
}

#[test]
fn test_stop_then_start_resumes_cycling() {
    let source = Arc::new(MockSource::new());
    let controller = controller_with(Arc::clone(&source));

    controller.start(Duration::from_millis(50), None).unwrap();
    std::thread::sleep(Duration::from_millis(200));
    controller.stop();
    let after_first_run = controller.summary().unwrap().samples;

    controller.start(Duration::from_millis(50), None).unwrap();
    std::thread::sleep(Duration::from_millis(200));
    controller.stop();
    let after_second_run = controller.summary().unwrap().samples;

    assert!(after_second_run > after_first_run);
}

#[test]
fn test_stop_is_idempotent_and_legal_when_idle() {
    let controller = controller_with(Arc::new(MockSource::new()));
    controller.stop();
    controller.start(Duration::from_millis(50), None).unwrap();
    controller.stop();
    controller.stop();
    assert!(!controller.is_running());
}

#[test]
fn test_concurrent_readers_observe_aligned_channels() {
    let controller = Arc::new(controller_with(Arc::new(MockSource::new())));
    controller.start(Duration::from_millis(20), None).unwrap();

    let mut readers = Vec::new();
    for _ in 0..4 {
        let handle = Arc::clone(&controller);
        readers.push(std::thread::spawn(move || {
            for _ in 0..50 {
                let snapshot = handle.history_snapshot();
                let len = snapshot.timestamps.len();
                assert_eq!(snapshot.cpu_percent.len(), len);
                assert_eq!(snapshot.memory_percent.len(), len);
                assert_eq!(snapshot.disk_percent.len(), len);
                assert_eq!(snapshot.network_sent.len(), len);
                assert_eq!(snapshot.network_recv.len(), len);

                if let Some(summary) = handle.summary() {
                    assert!(summary.samples > 0);
                }
                std::thread::sleep(Duration::from_millis(5));
            }
        }));
    }
    for reader in readers {
        reader.join().unwrap();
    }
    controller.stop();
}

#[test]
fn test_history_channel_values() {
    let controller = controller_with(Arc::new(MockSource::with_percents(30.0, 60.0, 70.0)));
    controller.start(Duration::from_millis(50), None).unwrap();
    std::thread::sleep(Duration::from_millis(250));
    controller.stop();

    let cpu = controller.history(Channel::CpuPercent);
    assert!(!cpu.is_empty());
    assert!(cpu.iter().all(|&v| v == 30.0));
    assert_eq!(
        controller.history(Channel::MemoryPercent).len(),
        cpu.len()
    );
}

#[test]
fn test_set_history_capacity_rebuilds_keeping_tail() {
    let controller = controller_with(Arc::new(MockSource::new()));
    controller.start(Duration::from_millis(20), None).unwrap();
    std::thread::sleep(Duration::from_millis(300));
    controller.stop();

    let before = controller.summary().unwrap().samples;
    assert!(before > 2);

    controller.set_history_capacity(2).unwrap();
    let snapshot = controller.history_snapshot();
    assert_eq!(snapshot.timestamps.len(), 2);

    assert!(matches!(
        controller.set_history_capacity(0),
        Err(MonitorError::InvalidConfig(_))
    ));
}

#[test]
fn test_reset_clears_history_and_latest() {
    let controller = controller_with(Arc::new(MockSource::new()));
    controller.start(Duration::from_millis(50), None).unwrap();
    std::thread::sleep(Duration::from_millis(150));
    controller.stop();

    assert!(controller.latest().is_some());
    controller.reset();
    assert!(controller.latest().is_none());
    assert!(controller.summary().is_none());
    assert!(controller.history_snapshot().timestamps.is_empty());
}

#[test]
fn test_system_info_passthrough() {
    let controller = controller_with(Arc::new(MockSource::new()));
    let info = controller.system_info().unwrap();
    assert_eq!(info.hostname, "mockhost");
    assert_eq!(info.cpu_count, 2);
}
