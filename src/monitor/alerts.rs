//! Threshold alerts over a single sample.
//!
//! Evaluation is stateless: every cycle re-checks each rule independently and
//! may re-emit the same alert while the condition holds. Nothing is retained
//! between cycles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::metrics::Sample;

/// Alert thresholds in percent. A reading must strictly exceed its threshold
/// to raise an alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    pub cpu_threshold: f64,
    pub memory_threshold: f64,
    pub disk_threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cpu_threshold: 80.0,
            memory_threshold: 80.0,
            disk_threshold: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    HighCpu,
    HighMemory,
    HighDisk,
}

/// A threshold violation observed in one collection cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub value: f64,
    pub threshold: f64,
    pub timestamp: i64,
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            AlertKind::HighCpu => "HIGH CPU USAGE",
            AlertKind::HighMemory => "HIGH MEMORY USAGE",
            AlertKind::HighDisk => "HIGH DISK USAGE",
        };
        write!(
            f,
            "{}: {:.1}% (threshold: {:.1}%)",
            label, self.value, self.threshold
        )
    }
}

/// Evaluate one sample against the configured thresholds.
///
/// Rules are checked independently; a sample can raise zero, one, or several
/// alerts in the same cycle.
pub fn evaluate_alerts(sample: &Sample, config: &AlertConfig) -> Vec<AlertEvent> {
    let mut alerts = Vec::new();

    if f64::from(sample.cpu.percent) > config.cpu_threshold {
        alerts.push(AlertEvent {
            kind: AlertKind::HighCpu,
            value: f64::from(sample.cpu.percent),
            threshold: config.cpu_threshold,
            timestamp: sample.timestamp,
        });
    }

    if f64::from(sample.memory.percent) > config.memory_threshold {
        alerts.push(AlertEvent {
            kind: AlertKind::HighMemory,
            value: f64::from(sample.memory.percent),
            threshold: config.memory_threshold,
            timestamp: sample.timestamp,
        });
    }

    if f64::from(sample.disk.percent) > config.disk_threshold {
        alerts.push(AlertEvent {
            kind: AlertKind::HighDisk,
            value: f64::from(sample.disk.percent),
            threshold: config.disk_threshold,
            timestamp: sample.timestamp,
        });
    }

    alerts
}
