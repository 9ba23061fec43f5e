use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::Parser;
use framepace::clock::{Clock, SyntheticClock, SystemClock};
use framepace::config::MonitorConfig;
use framepace::evaluation::{ReportFormat, ReportLog};
use framepace::logging;
use framepace::profiling::Stopwatch;
use framepace::tasks::PacingMonitor;
use framepace::timed_block;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Headless render loop that reports adaptive frame-time statistics.
#[derive(Debug, Parser)]
#[command(name = "framepace", version)]
struct Cli {
    /// JSON monitor config; command line limits override it
    #[arg(long, env = "FRAMEPACE_CONFIG")]
    config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Stop once the clock passes this many seconds
    #[arg(long)]
    seconds: Option<f64>,

    /// Simulate a clock at this rate instead of timing real frames
    #[arg(long)]
    hz: Option<f64>,

    /// Simulated jitter as a fraction of the frame period
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Per-frame sleep when timing real frames
    #[arg(long, default_value_t = 16)]
    sleep_ms: u64,

    /// Write the report log here (a directory gets a timestamped file name)
    #[arg(long)]
    export: Option<PathBuf>,

    #[arg(long, default_value = "csv")]
    format: ReportFormat,

    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the JSON schema of the config file and exit
    #[arg(long)]
    print_schema: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_schema {
        println!("{}", serde_json::to_string_pretty(&MonitorConfig::schema())?);
        return Ok(());
    }

    logging::init(&cli.log_level).map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    let mut config = match &cli.config {
        Some(path) => MonitorConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MonitorConfig::default(),
    };
    if cli.frames.is_some() {
        config.max_frames = cli.frames;
    }
    if cli.seconds.is_some() {
        config.max_seconds = cli.seconds;
    }

    let (clock, sleep): (Box<dyn Clock>, Duration) = match cli.hz {
        Some(hz) => {
            let period = 1.0 / hz;
            let clock = SyntheticClock::new(period, cli.jitter * period, cli.seed)
                .context("invalid simulated clock")?;
            (Box::new(clock), Duration::ZERO)
        }
        None => (
            Box::new(SystemClock::new()),
            Duration::from_millis(cli.sleep_ms),
        ),
    };

    let mut monitor = PacingMonitor::new(clock, config).context("invalid monitor config")?;

    let mut stopwatch = Stopwatch::start();
    monitor.run(|_| {
        timed_block!("frame");
        if !sleep.is_zero() {
            thread::sleep(sleep);
        }
        ControlFlow::Continue(())
    });
    stopwatch.stop_and_log("pacing run");

    if let Some(path) = cli.export {
        let path = if path.is_dir() {
            path.join(ReportLog::default_file_name(&Local::now(), cli.format))
        } else {
            path
        };
        monitor
            .log()
            .export(&path, cli.format)
            .with_context(|| format!("failed to export reports to {}", path.display()))?;
        info!(path = %path.display(), reports = monitor.log().len(), "reports exported");
    }

    Ok(())
}
