//! One collection cycle: pull from the source, append to history, evaluate
//! alerts, forward to the sink.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use super::alerts::{evaluate_alerts, AlertConfig};
use super::history::MetricsHistory;
use super::metrics::Sample;
use super::sink::Sink;
use super::source::MetricsSource;

/// Shared mutable state between the sampling loop (sole writer) and the
/// controller's read surface. Everything behind one lock so readers always
/// observe a fully-appended cycle.
pub(crate) struct MonitorState {
    pub history: MetricsHistory,
    pub latest: Option<Sample>,
}

impl MonitorState {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: MetricsHistory::with_capacity(capacity),
            latest: None,
        }
    }
}

pub(crate) struct SampleRecorder {
    source: Arc<dyn MetricsSource>,
    state: Arc<Mutex<MonitorState>>,
    alert_config: AlertConfig,
    disk_path: PathBuf,
    sink: Option<Box<dyn Sink>>,
}

impl SampleRecorder {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        state: Arc<Mutex<MonitorState>>,
        alert_config: AlertConfig,
        disk_path: PathBuf,
        sink: Option<Box<dyn Sink>>,
    ) -> Self {
        Self {
            source,
            state,
            alert_config,
            disk_path,
            sink,
        }
    }

    /// Run one cycle. A channel the source cannot read this cycle degrades
    /// to zeroed values; a failing sink is reported and ignored. Neither
    /// aborts monitoring.
    ///
    /// The source calls happen before the state lock is taken: the CPU
    /// sample in particular blocks for its measurement interval, and only
    /// the append needs exclusion.
    pub fn collect_cycle(&mut self) -> Sample {
        let cpu = self.source.sample_cpu().unwrap_or_else(|e| {
            log::warn!("cpu channel unavailable this cycle: {e}");
            Default::default()
        });
        let memory = self.source.sample_memory().unwrap_or_else(|e| {
            log::warn!("memory channel unavailable this cycle: {e}");
            Default::default()
        });
        let disk = self.source.sample_disk(&self.disk_path).unwrap_or_else(|e| {
            log::warn!("disk channel unavailable this cycle: {e}");
            Default::default()
        });
        let network = self.source.sample_network().unwrap_or_else(|e| {
            log::warn!("network channel unavailable this cycle: {e}");
            Default::default()
        });

        let sample = Sample {
            timestamp: chrono::Utc::now().timestamp(),
            cpu,
            memory,
            disk,
            network,
        };

        {
            let mut state = self.state.lock();
            state.history.record(&sample);
            state.latest = Some(sample.clone());
        }

        let alerts = evaluate_alerts(&sample, &self.alert_config);
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.emit(&sample, &alerts) {
                log::warn!("sink emit failed: {e}");
            }
        }

        sample
    }
}
