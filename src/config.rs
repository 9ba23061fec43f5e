use crate::error::PacingError;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_INITIAL_WINDOW: usize = 60;
pub const DEFAULT_REPORT_INTERVAL: f64 = 1.0;
pub const DEFAULT_MIN_WINDOW: usize = 1;
pub const DEFAULT_PRECISION: usize = 3;

fn default_initial_window() -> usize {
    DEFAULT_INITIAL_WINDOW
}
fn default_report_interval() -> f64 {
    DEFAULT_REPORT_INTERVAL
}
fn default_min_window() -> usize {
    DEFAULT_MIN_WINDOW
}
fn default_precision() -> usize {
    DEFAULT_PRECISION
}
fn default_title_prefix() -> String {
    "framepace".to_string()
}

/// Window sizing for [`FrameStatsEstimator`](crate::evaluation::FrameStatsEstimator).
///
/// After every report the next window is resized to
/// `round(report_interval / mean_dt)` samples, bounded by
/// `min_window` and `max_window`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EstimatorConfig {
    #[serde(default = "default_initial_window")]
    #[schemars(
        title = "Initial Window",
        description = "Samples in the first window, before any frame rate is known",
        range(min = 1)
    )]
    pub initial_window: usize,

    #[serde(default = "default_report_interval")]
    #[schemars(
        title = "Report Interval",
        description = "Wall-clock seconds each adaptive window should span"
    )]
    pub report_interval: f64,

    #[serde(default = "default_min_window")]
    #[schemars(
        title = "Min Window",
        description = "Lower bound for the adaptive window",
        range(min = 1)
    )]
    pub min_window: usize,

    #[serde(default)]
    #[schemars(
        title = "Max Window",
        description = "Upper bound for the adaptive window (None = unbounded)"
    )]
    pub max_window: Option<usize>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            initial_window: DEFAULT_INITIAL_WINDOW,
            report_interval: DEFAULT_REPORT_INTERVAL,
            min_window: DEFAULT_MIN_WINDOW,
            max_window: None,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<(), PacingError> {
        if self.initial_window == 0 {
            return Err(PacingError::InvalidConfig(
                "initial_window must be >= 1".into(),
            ));
        }
        if self.min_window == 0 {
            return Err(PacingError::InvalidConfig("min_window must be >= 1".into()));
        }
        if !self.report_interval.is_finite() || self.report_interval <= 0.0 {
            return Err(PacingError::InvalidConfig(format!(
                "report_interval must be finite and > 0, got {}",
                self.report_interval
            )));
        }
        if let Some(max) = self.max_window {
            if max < self.min_window {
                return Err(PacingError::InvalidConfig(format!(
                    "max_window ({max}) must be >= min_window ({})",
                    self.min_window
                )));
            }
        }
        Ok(())
    }

    /// Applies the configured bounds to a proposed window size.
    #[inline]
    pub fn clamp_window(&self, proposed: usize) -> usize {
        let lower = proposed.max(self.min_window).max(1);
        match self.max_window {
            Some(max) => lower.min(max.max(1)),
            None => lower,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MonitorConfig {
    #[serde(default)]
    pub estimator: EstimatorConfig,

    #[serde(default)]
    #[schemars(
        title = "Max Frames",
        description = "Stop after this many frames (None = unlimited)"
    )]
    pub max_frames: Option<u64>,

    #[serde(default)]
    #[schemars(
        title = "Max Seconds",
        description = "Stop once the clock has advanced this far (None = unlimited)"
    )]
    pub max_seconds: Option<f64>,

    #[serde(default = "default_title_prefix")]
    #[schemars(title = "Title Prefix", description = "Leading text of the title line")]
    pub title_prefix: String,

    #[serde(default = "default_precision")]
    #[schemars(
        title = "Precision",
        description = "Decimal places for millisecond values",
        range(max = 9)
    )]
    pub precision: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorConfig::default(),
            max_frames: None,
            max_seconds: None,
            title_prefix: default_title_prefix(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), PacingError> {
        self.estimator.validate()?;
        if self.max_frames == Some(0) {
            return Err(PacingError::InvalidConfig("max_frames must be > 0".into()));
        }
        if let Some(s) = self.max_seconds {
            if !s.is_finite() || s < 0.0 {
                return Err(PacingError::InvalidConfig(format!(
                    "max_seconds must be finite and >= 0, got {s}"
                )));
            }
        }
        if self.precision > 9 {
            return Err(PacingError::InvalidConfig(format!(
                "precision must be <= 9, got {}",
                self.precision
            )));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, PacingError> {
        let cfg: MonitorConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PacingError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn schema() -> Schema {
        schema_for!(MonitorConfig)
    }
}
