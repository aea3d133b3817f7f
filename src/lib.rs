// Telemon Library - Public API

// Re-export error types
pub mod error;
pub use error::{MonitorError, Result};

// Module declarations
pub mod monitor;

// Re-export commonly used types
pub use monitor::{
    evaluate_alerts, AlertConfig, AlertEvent, AlertKind, CallbackSink, Channel, ConsoleSink,
    CpuMetrics, DiskMetrics, FanoutSink, HistoryBuffer, HistorySnapshot, JsonlSink,
    MemoryMetrics, MetricsHistory, MetricsSource, MonitorConfig, MonitorController,
    NetworkMetrics, Sample, Sink, Summary, SysinfoSource, SystemInfo,
};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
