use std::collections::VecDeque;

use super::metrics::Sample;
use super::summary::{ChannelStats, Summary};

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Fixed-capacity FIFO buffer: once full, the oldest element is evicted
/// before every insert. Capacity is immutable; growing or shrinking goes
/// through [`HistoryBuffer::rebuilt`], which constructs a new buffer.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    capacity: usize,
    values: VecDeque<T>,
}

impl<T: Clone> HistoryBuffer<T> {
    /// Create an empty buffer. Capacity must be positive; callers validate
    /// this at configuration time.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "history capacity must be positive");
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a value, evicting the oldest one when the buffer is full.
    /// Never fails.
    pub fn push(&mut self, value: T) {
        if self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    /// Independent snapshot of the contents in arrival order
    pub fn to_vec(&self) -> Vec<T> {
        self.values.iter().cloned().collect()
    }

    /// Build a new buffer with a different capacity, keeping the newest
    /// `min(len, new_capacity)` values in arrival order.
    pub fn rebuilt(&self, capacity: usize) -> Self {
        debug_assert!(capacity > 0, "history capacity must be positive");
        let skip = self.values.len().saturating_sub(capacity);
        let mut values = VecDeque::with_capacity(capacity);
        values.extend(self.values.iter().skip(skip).cloned());
        Self { capacity, values }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// One metric stream retained in history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    CpuPercent,
    MemoryPercent,
    DiskPercent,
    NetworkSent,
    NetworkRecv,
}

/// Aligned copy of every history channel, taken under one lock acquisition.
/// Index `i` across all vectors refers to the same collection cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySnapshot {
    pub timestamps: Vec<i64>,
    pub cpu_percent: Vec<f32>,
    pub memory_percent: Vec<f32>,
    pub disk_percent: Vec<f32>,
    pub network_sent: Vec<u64>,
    pub network_recv: Vec<u64>,
}

/// Bounded history for all metric channels of the monitor.
///
/// All buffers always have the same length: [`MetricsHistory::record`] is the
/// only way to append, and it feeds every channel from one sample.
#[derive(Debug, Clone)]
pub struct MetricsHistory {
    capacity: usize,
    timestamps: HistoryBuffer<i64>,
    cpu_percent: HistoryBuffer<f32>,
    memory_percent: HistoryBuffer<f32>,
    disk_percent: HistoryBuffer<f32>,
    network_sent: HistoryBuffer<u64>,
    network_recv: HistoryBuffer<u64>,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            timestamps: HistoryBuffer::new(capacity),
            cpu_percent: HistoryBuffer::new(capacity),
            memory_percent: HistoryBuffer::new(capacity),
            disk_percent: HistoryBuffer::new(capacity),
            network_sent: HistoryBuffer::new(capacity),
            network_recv: HistoryBuffer::new(capacity),
        }
    }

    /// Append one cycle's readings to every channel
    pub fn record(&mut self, sample: &Sample) {
        self.timestamps.push(sample.timestamp);
        self.cpu_percent.push(sample.cpu.percent);
        self.memory_percent.push(sample.memory.percent);
        self.disk_percent.push(sample.disk.percent);
        self.network_sent.push(sample.network.bytes_sent);
        self.network_recv.push(sample.network.bytes_recv);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replace every buffer with a rebuilt one of the new capacity, keeping
    /// the newest values. Mirrors an adjustable "max history" control, which
    /// rebuilds rather than mutating capacity in place.
    pub fn rebuild(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.timestamps = self.timestamps.rebuilt(capacity);
        self.cpu_percent = self.cpu_percent.rebuilt(capacity);
        self.memory_percent = self.memory_percent.rebuilt(capacity);
        self.disk_percent = self.disk_percent.rebuilt(capacity);
        self.network_sent = self.network_sent.rebuilt(capacity);
        self.network_recv = self.network_recv.rebuilt(capacity);
    }

    pub fn clear(&mut self) {
        self.timestamps.clear();
        self.cpu_percent.clear();
        self.memory_percent.clear();
        self.disk_percent.clear();
        self.network_sent.clear();
        self.network_recv.clear();
    }

    /// One channel's values in arrival order, widened to f64
    pub fn channel(&self, channel: Channel) -> Vec<f64> {
        match channel {
            Channel::CpuPercent => self.cpu_percent.iter().map(|&v| v as f64).collect(),
            Channel::MemoryPercent => self.memory_percent.iter().map(|&v| v as f64).collect(),
            Channel::DiskPercent => self.disk_percent.iter().map(|&v| v as f64).collect(),
            Channel::NetworkSent => self.network_sent.iter().map(|&v| v as f64).collect(),
            Channel::NetworkRecv => self.network_recv.iter().map(|&v| v as f64).collect(),
        }
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            timestamps: self.timestamps.to_vec(),
            cpu_percent: self.cpu_percent.to_vec(),
            memory_percent: self.memory_percent.to_vec(),
            disk_percent: self.disk_percent.to_vec(),
            network_sent: self.network_sent.to_vec(),
            network_recv: self.network_recv.to_vec(),
        }
    }

    /// Summary statistics over the retained percent channels, or `None`
    /// when no cycles have been recorded yet
    pub fn summary(&self) -> Option<Summary> {
        let cpu = ChannelStats::over(self.cpu_percent.iter().map(|&v| v as f64))?;
        let memory = ChannelStats::over(self.memory_percent.iter().map(|&v| v as f64))?;
        let disk = ChannelStats::over(self.disk_percent.iter().map(|&v| v as f64))?;
        Some(Summary {
            cpu,
            memory,
            disk,
            samples: self.len(),
        })
    }
}

impl Default for MetricsHistory {
    fn default() -> Self {
        Self::new()
    }
}
