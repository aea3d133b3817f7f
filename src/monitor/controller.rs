//! Monitor lifecycle and concurrent read surface.
//!
//! The controller owns the background sampling loop: `start` spawns a
//! dedicated single-worker runtime driving one timed task, `stop` signals it
//! and joins. Reads (`latest`, `summary`, `history`) are safe from any thread
//! in any state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use crate::error::{MonitorError, Result};

use super::alerts::AlertConfig;
use super::history::{Channel, HistorySnapshot, DEFAULT_HISTORY_CAPACITY};
use super::metrics::{Sample, SystemInfo};
use super::recorder::{MonitorState, SampleRecorder};
use super::sink::Sink;
use super::source::MetricsSource;
use super::summary::Summary;

/// Monitor construction options
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Samples retained per channel
    pub history_capacity: usize,
    /// Mount point watched by the disk channel
    pub disk_path: PathBuf,
    pub alerts: AlertConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            disk_path: PathBuf::from("/"),
            alerts: AlertConfig::default(),
        }
    }
}

/// Handle to the running loop; present only in the Running state
struct Worker {
    shutdown_tx: broadcast::Sender<()>,
    runtime: tokio::runtime::Runtime,
}

/// Owns the sampling loop and all history buffers.
///
/// States: Idle -> Running -> Idle. `start` while Running is ignored,
/// `stop` while Idle is a no-op. The sampling task is the sole writer to the
/// shared state; every public read takes a snapshot under the same lock, so
/// concurrent readers never observe a half-appended cycle.
pub struct MonitorController {
    source: Arc<dyn MetricsSource>,
    config: MonitorConfig,
    state: Arc<Mutex<MonitorState>>,
    worker: Mutex<Option<Worker>>,
}

impl MonitorController {
    pub fn new(source: Arc<dyn MetricsSource>, config: MonitorConfig) -> Result<Self> {
        if config.history_capacity == 0 {
            return Err(MonitorError::invalid_config(
                "history capacity must be positive",
            ));
        }
        let state = Arc::new(Mutex::new(MonitorState::with_capacity(
            config.history_capacity,
        )));
        Ok(Self {
            source,
            config,
            state,
            worker: Mutex::new(None),
        })
    }

    /// Begin background sampling every `interval`. Idempotent: a second call
    /// while Running is ignored, keeping at most one active loop per
    /// controller.
    pub fn start(&self, period: Duration, sink: Option<Box<dyn Sink>>) -> Result<()> {
        if period.is_zero() {
            return Err(MonitorError::invalid_config(
                "sampling interval must be positive",
            ));
        }

        let mut worker = self.worker.lock();
        if worker.is_some() {
            log::debug!("monitor already running, start ignored");
            return Ok(());
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .thread_name("telemon-worker")
            .build()?;

        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        let recorder = SampleRecorder::new(
            Arc::clone(&self.source),
            Arc::clone(&self.state),
            self.config.alerts.clone(),
            self.config.disk_path.clone(),
            sink,
        );
        runtime.spawn(sampling_task(recorder, period, shutdown_rx));

        *worker = Some(Worker {
            shutdown_tx,
            runtime,
        });
        log::info!("monitor started (interval {:?})", period);
        Ok(())
    }

    /// Signal the loop to exit after its current cycle and block until the
    /// background activity has terminated. No-op when Idle.
    ///
    /// Liveness caveat: a source call that blocks indefinitely blocks this
    /// join correspondingly; cancellation is cooperative, checked between
    /// cycles, and never preempts an in-flight collection.
    pub fn stop(&self) {
        let mut worker = self.worker.lock();
        if let Some(worker) = worker.take() {
            let _ = worker.shutdown_tx.send(());
            // Dropping the runtime joins its worker thread; the in-flight
            // cycle's poll always runs to completion first.
            drop(worker.runtime);
            log::info!("monitor stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.lock().is_some()
    }

    /// Most recent fully-collected sample, if any cycle has completed
    pub fn latest(&self) -> Option<Sample> {
        self.state.lock().latest.clone()
    }

    /// Summary statistics over the retained history, or `None` before the
    /// first cycle
    pub fn summary(&self) -> Option<Summary> {
        self.state.lock().history.summary()
    }

    /// One channel's retained values in arrival order
    pub fn history(&self, channel: Channel) -> Vec<f64> {
        self.state.lock().history.channel(channel)
    }

    /// All channels plus timestamps, index-aligned, taken under one lock
    /// acquisition
    pub fn history_snapshot(&self) -> HistorySnapshot {
        self.state.lock().history.snapshot()
    }

    /// Rebuild all history buffers with a new capacity, keeping the newest
    /// retained samples
    pub fn set_history_capacity(&self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(MonitorError::invalid_config(
                "history capacity must be positive",
            ));
        }
        self.state.lock().history.rebuild(capacity);
        Ok(())
    }

    /// Discard all retained history and the latest sample
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.history.clear();
        state.latest = None;
    }

    pub fn system_info(&self) -> Result<SystemInfo> {
        self.source.system_info()
    }
}

impl Drop for MonitorController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The timed sampling loop. Each tick runs one full cycle; collection
/// failures are degraded inside the recorder and never break the loop.
async fn sampling_task(
    mut recorder: SampleRecorder,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                recorder.collect_cycle();
            }
            _ = shutdown.recv() => {
                log::debug!("sampling task shutting down");
                break;
            }
        }
    }
}
