mod pacing_monitor;

pub use pacing_monitor::PacingMonitor;
