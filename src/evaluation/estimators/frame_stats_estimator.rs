use crate::config::EstimatorConfig;
use crate::error::PacingError;
use crate::evaluation::estimators::{Estimator, FrameEstimator, WindowMoments};
use crate::evaluation::{Anomaly, Report};
use tracing::{debug, warn};

/// Point-in-time copy of an estimator's internals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorState {
    pub last_timestamp: f64,
    pub sum_dt: f64,
    pub sum_dt_squared: f64,
    pub sample_count: usize,
    pub window_size: usize,
}

/// Windowed frame-time statistics with a self-sizing window.
///
/// Every call to [`sample`](FrameEstimator::sample) turns a clock reading
/// into a delta against the previous reading. Once `window_size` deltas are
/// collected a [`Report`] is produced, the accumulators are cleared and the
/// window is resized so the next one spans roughly
/// [`report_interval`](EstimatorConfig::report_interval) seconds at the
/// observed frame rate.
///
/// The previous reading starts at `0.0`, so the first delta equals the first
/// timestamp. Use [`starting_at`](Self::starting_at) to pick another origin.
#[derive(Debug, Clone)]
pub struct FrameStatsEstimator {
    config: EstimatorConfig,
    origin: f64,
    last_timestamp: f64,
    moments: WindowMoments,
    window_size: usize,
}

impl Default for FrameStatsEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStatsEstimator {
    pub fn new() -> Self {
        Self::from_valid_config(EstimatorConfig::default(), 0.0)
    }

    pub fn with_config(config: EstimatorConfig) -> Result<Self, PacingError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, 0.0))
    }

    /// Uses `origin` instead of `0.0` as the reading before the first sample.
    pub fn starting_at(mut self, origin: f64) -> Self {
        self.origin = origin;
        self.last_timestamp = origin;
        self
    }

    fn from_valid_config(config: EstimatorConfig, origin: f64) -> Self {
        Self {
            window_size: config.clamp_window(config.initial_window),
            config,
            origin,
            last_timestamp: origin,
            moments: WindowMoments::default(),
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    #[inline]
    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }

    pub fn state(&self) -> EstimatorState {
        EstimatorState {
            last_timestamp: self.last_timestamp,
            sum_dt: self.moments.sum(),
            sum_dt_squared: self.moments.sum_sq(),
            sample_count: self.moments.len(),
            window_size: self.window_size,
        }
    }

    fn finish_window(&mut self) -> Report {
        let samples = self.moments.len();
        let m = self.moments.summarize();
        self.moments.clear();

        let mut anomaly = m.anomaly;
        let (fps, next_window) = if anomaly == Some(Anomaly::NonFinite) {
            (1.0 / m.mean, self.config.clamp_window(self.config.min_window))
        } else if m.mean <= 0.0 {
            anomaly = Some(Anomaly::NonPositiveMean(m.mean));
            (f64::INFINITY, self.config.clamp_window(self.config.min_window))
        } else {
            // `as` saturates, so a vanishing mean cannot wrap the window.
            let proposed = (self.config.report_interval / m.mean).round() as usize;
            (1.0 / m.mean, self.config.clamp_window(proposed))
        };

        self.window_size = next_window;

        let report = Report {
            mean_dt: m.mean,
            std_dt: m.std_dev,
            standard_error: m.standard_error,
            fps,
            samples,
            next_window,
            anomaly,
        };

        match &report.anomaly {
            Some(a) => warn!(anomaly = %a, samples, next_window, "degraded frame statistics"),
            None => debug!(
                mean_dt = report.mean_dt,
                std_dt = report.std_dt,
                fps = report.fps,
                next_window,
                "frame window complete"
            ),
        }

        report
    }
}

impl FrameEstimator for FrameStatsEstimator {
    fn sample(&mut self, current_time: f64) -> Option<Report> {
        let dt = current_time - self.last_timestamp;
        self.last_timestamp = current_time;
        self.moments.add(dt);

        if self.moments.len() < self.window_size {
            return None;
        }
        Some(self.finish_window())
    }

    #[inline]
    fn window_size(&self) -> usize {
        self.window_size
    }

    #[inline]
    fn sample_count(&self) -> usize {
        self.moments.len()
    }

    fn reset(&mut self) {
        *self = Self::from_valid_config(self.config, self.origin);
    }
}
