use crate::clock::Clock;
use crate::error::PacingError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Simulated frame clock: advances by a fixed period plus uniform jitter
/// in `[-jitter, jitter]`. Starts at `0.0` and never steps backwards.
#[derive(Debug, Clone)]
pub struct SyntheticClock {
    period: f64,
    jitter: f64,
    seed: u64,
    t: f64,
    rng: StdRng,
}

impl SyntheticClock {
    pub fn new(period: f64, jitter: f64, seed: u64) -> Result<Self, PacingError> {
        if !period.is_finite() || period <= 0.0 {
            return Err(PacingError::InvalidConfig(format!(
                "period must be finite and > 0, got {period}"
            )));
        }
        if !jitter.is_finite() || !(0.0..=period).contains(&jitter) {
            return Err(PacingError::InvalidConfig(format!(
                "jitter must be within [0, {period}], got {jitter}"
            )));
        }
        Ok(Self {
            period,
            jitter,
            seed,
            t: 0.0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Jitter-free clock ticking at `hz` frames per second.
    pub fn from_rate(hz: f64) -> Result<Self, PacingError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(PacingError::InvalidConfig(format!(
                "rate must be finite and > 0, got {hz}"
            )));
        }
        Self::new(1.0 / hz, 0.0, 0)
    }

    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Rewinds to `0.0` and re-seeds the jitter source.
    pub fn restart(&mut self) {
        self.t = 0.0;
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

impl Clock for SyntheticClock {
    fn now(&mut self) -> f64 {
        let step = if self.jitter > 0.0 {
            self.period + self.rng.random_range(-self.jitter..=self.jitter)
        } else {
            self.period
        };
        self.t += step.max(0.0);
        self.t
    }
}
