use serde::{Deserialize, Serialize};

/// One complete collection cycle's readings across all metric channels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: i64, // Unix timestamp, second resolution
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub disk: DiskMetrics,
    pub network: NetworkMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuMetrics {
    /// Overall usage across all cores (0-100)
    pub percent: f32,
    /// Per-core usage, core order as reported by the source
    pub per_core: Vec<f32>,
    /// Current frequency in MHz, if the source reports one
    pub frequency_mhz: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    /// Usage percent as reported by the source, not derived from the
    /// byte counters (OS accounting semantics vary by platform)
    pub percent: f32,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
    pub swap_percent: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskMetrics {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub percent: f32,
    /// Cumulative bytes read since boot
    pub read_bytes: u64,
    /// Cumulative bytes written since boot
    pub write_bytes: u64,
}

/// Cumulative network counters, aggregated over all interfaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errors_in: u64,
    pub errors_out: u64,
}

/// Static system information (hostname, platform, boot time)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub boot_time: i64,
    pub uptime_secs: u64,
    pub cpu_count: usize,
}
