//! Consumers of produced samples and alerts.
//!
//! A sink is invoked once per successful cycle. Sink failures are reported
//! by the recorder and never abort monitoring.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{Local, TimeZone};
use colored::Colorize;
use humansize::{format_size, BINARY};

use crate::error::Result;

use super::alerts::AlertEvent;
use super::metrics::Sample;

/// External consumer of one cycle's sample and alerts
pub trait Sink: Send {
    fn emit(&mut self, sample: &Sample, alerts: &[AlertEvent]) -> Result<()>;
}

/// Formatted per-cycle text output on stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, sample: &Sample, alerts: &[AlertEvent]) -> Result<()> {
        let when = Local
            .timestamp_opt(sample.timestamp, 0)
            .single()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| sample.timestamp.to_string());

        println!("\n{}", "=".repeat(60));
        println!("{} - {}", "System Telemetry".bold().bright_cyan(), when);
        println!("{}", "=".repeat(60));

        println!("\n{}", "CPU Usage:".bold());
        println!("  Overall: {:.1}%", sample.cpu.percent);
        println!("  Cores: {}", sample.cpu.per_core.len());
        if let Some(freq) = sample.cpu.frequency_mhz {
            println!("  Frequency: {:.0} MHz", freq);
        }

        println!("\n{}", "Memory Usage:".bold());
        println!(
            "  Used: {} / {}",
            format_size(sample.memory.used_bytes, BINARY),
            format_size(sample.memory.total_bytes, BINARY)
        );
        println!("  Percentage: {:.1}%", sample.memory.percent);
        println!(
            "  Available: {}",
            format_size(sample.memory.available_bytes, BINARY)
        );
        println!("  Swap: {:.1}%", sample.memory.swap_percent);

        println!("\n{}", "Disk Usage:".bold());
        println!(
            "  Used: {} / {}",
            format_size(sample.disk.used_bytes, BINARY),
            format_size(sample.disk.total_bytes, BINARY)
        );
        println!("  Percentage: {:.1}%", sample.disk.percent);
        println!("  Free: {}", format_size(sample.disk.free_bytes, BINARY));

        println!("\n{}", "Network:".bold());
        println!(
            "  Sent: {}",
            format_size(sample.network.bytes_sent, BINARY)
        );
        println!(
            "  Received: {}",
            format_size(sample.network.bytes_recv, BINARY)
        );
        println!("  Packets Sent: {}", sample.network.packets_sent);
        println!("  Packets Received: {}", sample.network.packets_recv);

        if !alerts.is_empty() {
            println!("\n{}", "=".repeat(60));
            println!("{}", "ALERTS:".bold().bright_red());
            for alert in alerts {
                println!("  {}", alert.to_string().yellow());
            }
            println!("{}", "=".repeat(60));
        }

        Ok(())
    }
}

/// Append-only newline-delimited JSON persistence, one object per line
/// mirroring [`Sample`] exactly. No schema versioning and no atomic-write
/// guarantee: an interrupted write may corrupt the last line.
#[derive(Debug)]
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self { file })
    }
}

impl Sink for JsonlSink {
    fn emit(&mut self, sample: &Sample, _alerts: &[AlertEvent]) -> Result<()> {
        let line = serde_json::to_string(sample)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }
}

/// Adapter for UI-refresh style callbacks
pub struct CallbackSink {
    callback: Box<dyn FnMut(&Sample, &[AlertEvent]) + Send>,
}

impl CallbackSink {
    pub fn new(callback: impl FnMut(&Sample, &[AlertEvent]) + Send + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Sink for CallbackSink {
    fn emit(&mut self, sample: &Sample, alerts: &[AlertEvent]) -> Result<()> {
        (self.callback)(sample, alerts);
        Ok(())
    }
}

/// Forwards each cycle to several sinks, isolating their failures from each
/// other: every sink sees every cycle even when a sibling keeps failing.
pub struct FanoutSink {
    sinks: Vec<Box<dyn Sink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }
}

impl Sink for FanoutSink {
    fn emit(&mut self, sample: &Sample, alerts: &[AlertEvent]) -> Result<()> {
        let mut failures = Vec::new();
        for sink in &mut self.sinks {
            if let Err(e) = sink.emit(sample, alerts) {
                failures.push(e.to_string());
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(crate::error::MonitorError::sink_write(failures.join("; ")))
        }
    }
}
