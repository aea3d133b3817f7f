use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};
use colored::Colorize;

use telemon::{
    ConsoleSink, FanoutSink, JsonlSink, MonitorConfig, MonitorController, Sink, Summary,
    SysinfoSource, SystemInfo,
};

fn main() -> Result<()> {
    telemon::init_logging();

    let matches = Command::new("telemon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Host telemetry monitor: CPU, memory, disk and network sampling with alerts")
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("SECONDS")
                .help("Seconds between samples")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("5"),
        )
        .arg(
            Arg::new("history")
                .long("history")
                .value_name("SAMPLES")
                .help("Samples retained per metric channel")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new("save")
                .short('s')
                .long("save")
                .value_name("FILE")
                .help("Append each sample as a JSON line to FILE"),
        )
        .arg(
            Arg::new("path")
                .long("path")
                .value_name("MOUNT")
                .help("Disk mount point to watch")
                .default_value("/"),
        )
        .arg(
            Arg::new("no-display")
                .long("no-display")
                .help("Suppress per-sample console output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let interval = matches.get_one::<u64>("interval").copied().unwrap_or(5);
    let history = matches.get_one::<usize>("history").copied().unwrap_or(100);
    let disk_path = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"));
    let save_path = matches.get_one::<String>("save").cloned();
    let display = !matches.get_flag("no-display");

    let source = Arc::new(SysinfoSource::new());
    let controller = MonitorController::new(
        source,
        MonitorConfig {
            history_capacity: history,
            disk_path,
            ..Default::default()
        },
    )?;

    print_system_info(&controller.system_info()?);

    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    if display {
        sinks.push(Box::new(ConsoleSink::new()));
    }
    if let Some(path) = save_path {
        sinks.push(Box::new(JsonlSink::new(&path)?));
        println!("Appending samples to {}", path);
    }
    let sink: Option<Box<dyn Sink>> = match sinks.len() {
        0 => None,
        1 => sinks.pop(),
        _ => Some(Box::new(FanoutSink::new(sinks))),
    };

    controller.start(Duration::from_secs(interval), sink)?;
    println!(
        "\nMonitoring every {}s, press Ctrl+C to stop",
        interval
    );

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))?;

    while running.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(200));
    }

    println!("\nStopping monitor...");
    controller.stop();

    if let Some(summary) = controller.summary() {
        print_summary(&summary);
    } else {
        println!("No data collected");
    }

    Ok(())
}

fn print_system_info(info: &SystemInfo) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "SYSTEM INFORMATION".bold().bright_cyan());
    println!("{}", "=".repeat(60));
    println!("  Hostname: {}", info.hostname);
    println!("  Platform: {}", info.platform);
    println!("  Cpu Count: {}", info.cpu_count);
    println!("  Uptime: {}", format_uptime(info.uptime_secs));
}

fn print_summary(summary: &Summary) {
    println!("\n{}", "=".repeat(60));
    println!(
        "{} ({} samples)",
        "SESSION SUMMARY".bold().bright_cyan(),
        summary.samples
    );
    println!("{}", "=".repeat(60));
    for (label, stats) in [
        ("CPU", &summary.cpu),
        ("Memory", &summary.memory),
        ("Disk", &summary.disk),
    ] {
        println!(
            "  {:<8} avg {:>5.1}%  max {:>5.1}%  min {:>5.1}%",
            label, stats.avg, stats.max, stats.min
        );
    }
}

fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}
