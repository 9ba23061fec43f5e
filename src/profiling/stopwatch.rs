use std::time::{Duration, Instant};
use tracing::info;

/// Start/stop interval timer.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
    end: Option<Instant>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            end: None,
        }
    }

    pub fn restart(&mut self) {
        self.start = Instant::now();
        self.end = None;
    }

    /// Freezes the interval and returns it. Stopping twice keeps the first end.
    pub fn stop(&mut self) -> Duration {
        let end = *self.end.get_or_insert_with(Instant::now);
        end - self.start
    }

    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Interval so far, or the frozen interval once stopped.
    pub fn elapsed(&self) -> Duration {
        match self.end {
            Some(end) => end - self.start,
            None => self.start.elapsed(),
        }
    }

    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Rate implied by treating the interval as one frame.
    pub fn fps(&self) -> Option<f64> {
        let secs = self.elapsed().as_secs_f64();
        (secs > 0.0).then(|| 1.0 / secs)
    }

    pub fn stop_and_log(&mut self, message: &str) -> f64 {
        self.stop();
        let millis = self.elapsed_millis();
        info!("{message} millis {millis:.3}");
        millis
    }
}
