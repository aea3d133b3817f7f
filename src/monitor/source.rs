//! Metrics source contract and the sysinfo-backed implementation.
//!
//! The monitoring core never reads OS counters itself; it consumes this trait.
//! [`SysinfoSource`] is the production collaborator, and tests substitute a
//! deterministic implementation.

use std::path::Path;

use parking_lot::Mutex;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::error::{MonitorError, Result};

use super::metrics::{CpuMetrics, DiskMetrics, MemoryMetrics, NetworkMetrics, SystemInfo};

/// Point-in-time readings for each metric channel.
///
/// All calls are synchronous and best-effort: a channel that cannot be read
/// returns `Err(SourceUnavailable)`, and sub-metrics that do not exist on the
/// host (no swap, unknown frequency) come back as zero or `None` rather than
/// a partially populated struct.
pub trait MetricsSource: Send + Sync {
    fn sample_cpu(&self) -> Result<CpuMetrics>;
    fn sample_memory(&self) -> Result<MemoryMetrics>;
    fn sample_disk(&self, path: &Path) -> Result<DiskMetrics>;
    fn sample_network(&self) -> Result<NetworkMetrics>;
    fn system_info(&self) -> Result<SystemInfo>;
}

/// Production source backed by the `sysinfo` crate.
///
/// Interior mutability keeps the trait `&self` while sysinfo requires
/// `&mut` refreshes; each handle has its own lock so a slow CPU sample does
/// not serialize against the other channels.
pub struct SysinfoSource {
    system: Mutex<System>,
    disks: Mutex<Disks>,
    networks: Mutex<Networks>,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());

        Self {
            system: Mutex::new(System::new_with_specifics(refresh_kind)),
            disks: Mutex::new(Disks::new_with_refreshed_list()),
            networks: Mutex::new(Networks::new_with_refreshed_list()),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SysinfoSource {
    /// Usage is a delta between two refreshes, so this call blocks for
    /// sysinfo's minimum update interval. Callers must not hold any shared
    /// lock across it.
    fn sample_cpu(&self) -> Result<CpuMetrics> {
        let mut system = self.system.lock();
        system.refresh_cpu_all();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_cpu_all();

        let cpus = system.cpus();
        if cpus.is_empty() {
            return Err(MonitorError::source_unavailable("no CPUs reported"));
        }

        let frequency_mhz = cpus
            .first()
            .map(|cpu| cpu.frequency())
            .filter(|&freq| freq > 0)
            .map(|freq| freq as f64);

        Ok(CpuMetrics {
            percent: system.global_cpu_usage(),
            per_core: cpus.iter().map(|cpu| cpu.cpu_usage()).collect(),
            frequency_mhz,
        })
    }

    fn sample_memory(&self) -> Result<MemoryMetrics> {
        let mut system = self.system.lock();
        system.refresh_memory();

        let total = system.total_memory();
        let used = system.used_memory();
        let swap_total = system.total_swap();
        let swap_used = system.used_swap();

        Ok(MemoryMetrics {
            total_bytes: total,
            available_bytes: system.available_memory(),
            used_bytes: used,
            percent: if total > 0 {
                (used as f32 / total as f32) * 100.0
            } else {
                0.0
            },
            swap_total_bytes: swap_total,
            swap_used_bytes: swap_used,
            swap_percent: if swap_total > 0 {
                (swap_used as f32 / swap_total as f32) * 100.0
            } else {
                0.0
            },
        })
    }

    fn sample_disk(&self, path: &Path) -> Result<DiskMetrics> {
        let mut disks = self.disks.lock();
        disks.refresh(true);

        let disk = disks
            .iter()
            .find(|disk| disk.mount_point() == path)
            .ok_or_else(|| {
                MonitorError::source_unavailable(format!(
                    "no disk mounted at {}",
                    path.display()
                ))
            })?;

        let total = disk.total_space();
        let free = disk.available_space();
        let used = total.saturating_sub(free);
        let io = disk.usage();

        Ok(DiskMetrics {
            total_bytes: total,
            used_bytes: used,
            free_bytes: free,
            percent: if total > 0 {
                (used as f32 / total as f32) * 100.0
            } else {
                0.0
            },
            read_bytes: io.total_read_bytes,
            write_bytes: io.total_written_bytes,
        })
    }

    fn sample_network(&self) -> Result<NetworkMetrics> {
        let mut networks = self.networks.lock();
        networks.refresh(true);

        // Aggregate cumulative counters across every interface
        let mut metrics = NetworkMetrics::default();
        for data in networks.values() {
            metrics.bytes_sent += data.total_transmitted();
            metrics.bytes_recv += data.total_received();
            metrics.packets_sent += data.total_packets_transmitted();
            metrics.packets_recv += data.total_packets_received();
            metrics.errors_in += data.total_errors_on_received();
            metrics.errors_out += data.total_errors_on_transmitted();
        }

        Ok(metrics)
    }

    fn system_info(&self) -> Result<SystemInfo> {
        let hostname = System::host_name().unwrap_or_else(|| "Unknown".to_string());
        let platform = System::name().unwrap_or_else(|| "Unknown".to_string());
        let boot_time = System::boot_time() as i64;
        let now = chrono::Utc::now().timestamp();

        Ok(SystemInfo {
            hostname,
            platform,
            boot_time,
            uptime_secs: (now - boot_time).max(0) as u64,
            cpu_count: self.system.lock().cpus().len(),
        })
    }
}
