//! Telemetry monitoring core.
//!
//! A background loop collects host metrics at a fixed interval, retains a
//! bounded recent history per channel, raises threshold alerts, and
//! optionally forwards each sample to a sink. [`MonitorController`] is the
//! entry point; everything else supports one of its cycles.

pub mod alerts;
mod controller;
mod history;
mod metrics;
mod recorder;
mod sink;
mod source;
mod summary;

pub use alerts::{evaluate_alerts, AlertConfig, AlertEvent, AlertKind};
pub use controller::{MonitorConfig, MonitorController};
pub use history::{
    Channel, HistoryBuffer, HistorySnapshot, MetricsHistory, DEFAULT_HISTORY_CAPACITY,
};
pub use metrics::{
    CpuMetrics, DiskMetrics, MemoryMetrics, NetworkMetrics, Sample, SystemInfo,
};
pub use sink::{CallbackSink, ConsoleSink, FanoutSink, JsonlSink, Sink};
pub use source::{MetricsSource, SysinfoSource};
pub use summary::{ChannelStats, Summary};
