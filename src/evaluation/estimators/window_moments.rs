use crate::evaluation::Anomaly;
use crate::evaluation::estimators::Estimator;

/// First and second raw moments over one window: `sum(v)`, `sum(v^2)`, `n`.
///
/// Values are accepted as-is, including negative and non-finite ones;
/// [`summarize`](WindowMoments::summarize) flags what it cannot trust.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WindowMoments {
    len: usize,
    sum: f64,
    sum_sq: f64,
}

/// Statistics derived from a [`WindowMoments`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub mean_sq: f64,
    /// Never negative unless non-finite; see `anomaly`.
    pub variance: f64,
    pub std_dev: f64,
    pub standard_error: f64,
    pub anomaly: Option<Anomaly>,
}

impl WindowMoments {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    #[inline]
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn summarize(&self) -> Moments {
        let n = self.len as f64;
        let mean = self.sum / n;
        let mean_sq = self.sum_sq / n;

        if !mean.is_finite() || !mean_sq.is_finite() {
            let variance = mean_sq - mean * mean;
            let std_dev = variance.sqrt();
            return Moments {
                mean,
                mean_sq,
                variance,
                std_dev,
                standard_error: std_dev / n.sqrt(),
                anomaly: Some(Anomaly::NonFinite),
            };
        }

        let raw = mean_sq - mean * mean;
        let (variance, anomaly) = if raw < 0.0 {
            (0.0, Some(Anomaly::NegativeVariance(raw)))
        } else {
            (raw, None)
        };
        let std_dev = variance.sqrt();

        Moments {
            mean,
            mean_sq,
            variance,
            std_dev,
            standard_error: std_dev / n.sqrt(),
            anomaly,
        }
    }
}

impl Estimator for WindowMoments {
    #[inline]
    fn add(&mut self, v: f64) {
        self.len += 1;
        self.sum += v;
        self.sum_sq += v * v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.len > 0 {
            self.sum / self.len as f64
        } else {
            f64::NAN
        }
    }
}
