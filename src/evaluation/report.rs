use crate::utils::math::normal_probability;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};
use strum_macros::IntoStaticStr;

/// Reason a report's statistics could not be taken at face value.
///
/// Only the most severe condition is kept: `NonFinite` over
/// `NonPositiveMean` over `NegativeVariance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, IntoStaticStr)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Anomaly {
    /// `mean(dt^2) - mean(dt)^2` came out below zero; carries the raw value.
    /// The deviation and standard error were clamped to zero.
    NegativeVariance(f64),
    /// Mean frame time was zero or negative; `fps` is reported as infinite.
    NonPositiveMean(f64),
    /// An accumulator held NaN or infinity.
    NonFinite,
}

impl Display for Anomaly {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Anomaly::NegativeVariance(v) => write!(f, "negative variance ({v:e}) clamped to zero"),
            Anomaly::NonPositiveMean(m) => write!(f, "non-positive mean frame time ({m})"),
            Anomaly::NonFinite => write!(f, "non-finite frame time accumulators"),
        }
    }
}

/// Summary of one completed window of frame-time samples.
///
/// Times are in seconds and `fps` in Hz; unit conversion for display is
/// left to [`TitleFormatter`](crate::evaluation::TitleFormatter).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Report {
    pub mean_dt: f64,
    pub std_dt: f64,
    pub standard_error: f64,
    pub fps: f64,
    /// Samples aggregated into this report.
    pub samples: usize,
    /// Window size chosen for the next report.
    pub next_window: usize,
    pub anomaly: Option<Anomaly>,
}

impl Report {
    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.anomaly.is_some()
    }

    #[inline]
    pub fn mean_ms(&self) -> f64 {
        self.mean_dt * 1000.0
    }

    #[inline]
    pub fn std_ms(&self) -> f64 {
        self.std_dt * 1000.0
    }

    #[inline]
    pub fn standard_error_ms(&self) -> f64 {
        self.standard_error * 1000.0
    }

    /// Probability that a single frame finishes within `budget` seconds,
    /// treating frame times as normally distributed around the window mean.
    ///
    /// Returns `None` when the statistics are not finite.
    pub fn budget_hit_probability(&self, budget: f64) -> Option<f64> {
        if !self.mean_dt.is_finite() || !self.std_dt.is_finite() || !budget.is_finite() {
            return None;
        }
        if self.std_dt == 0.0 {
            return Some(if self.mean_dt <= budget { 1.0 } else { 0.0 });
        }
        Some(normal_probability((budget - self.mean_dt) / self.std_dt))
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "n={}, mean={:.6}s, std={:.6}s, se={:.6}s, fps={:.2}, next={}",
            self.samples, self.mean_dt, self.std_dt, self.standard_error, self.fps, self.next_window
        )?;
        if let Some(a) = &self.anomaly {
            write!(f, " ({a})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(mean: f64, std: f64) -> Report {
        Report {
            mean_dt: mean,
            std_dt: std,
            standard_error: std / 60f64.sqrt(),
            fps: 1.0 / mean,
            samples: 60,
            next_window: 60,
            anomaly: None,
        }
    }

    #[test]
    fn millisecond_helpers() {
        let r = report(0.016, 0.002);
        assert!((r.mean_ms() - 16.0).abs() < 1e-12);
        assert!((r.std_ms() - 2.0).abs() < 1e-12);
        assert!((r.standard_error_ms() - 2.0 / 60f64.sqrt()).abs() < 1e-12);
        assert!(!r.is_degraded());
    }

    #[test]
    fn budget_probability_at_mean_is_half() {
        let r = report(0.016, 0.002);
        let p = r.budget_hit_probability(0.016).unwrap();
        assert!((p - 0.5).abs() < 1e-12, "p={p}");

        let generous = r.budget_hit_probability(0.030).unwrap();
        let tight = r.budget_hit_probability(0.010).unwrap();
        assert!(generous > 0.999);
        assert!(tight < 0.01);
    }

    #[test]
    fn budget_probability_with_zero_deviation_is_step() {
        let r = report(0.016, 0.0);
        assert_eq!(r.budget_hit_probability(0.017), Some(1.0));
        assert_eq!(r.budget_hit_probability(0.016), Some(1.0));
        assert_eq!(r.budget_hit_probability(0.015), Some(0.0));
    }

    #[test]
    fn budget_probability_none_for_non_finite() {
        let mut r = report(0.016, 0.002);
        r.mean_dt = f64::NAN;
        assert!(r.budget_hit_probability(0.016).is_none());
    }

    #[test]
    fn display_mentions_anomaly() {
        let mut r = report(0.5, 0.0);
        r.anomaly = Some(Anomaly::NegativeVariance(-1e-18));
        let s = r.to_string();
        assert!(s.starts_with("n=60, mean=0.500000s"), "{s}");
        assert!(s.contains("negative variance"), "{s}");
    }

    #[test]
    fn anomaly_kind_names() {
        let k: &'static str = Anomaly::NegativeVariance(-1.0).into();
        assert_eq!(k, "negative-variance");
        let k: &'static str = Anomaly::NonFinite.into();
        assert_eq!(k, "non-finite");
    }

    #[test]
    fn serializes_anomaly_tagged() {
        let mut r = report(0.5, 0.0);
        r.anomaly = Some(Anomaly::NonPositiveMean(0.0));
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v["anomaly"]["kind"], "non-positive-mean");
        assert_eq!(v["samples"], 60);
    }
}
