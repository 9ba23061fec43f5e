use crate::clock::Clock;
use std::time::Instant;

/// Wall-clock time since construction, from [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
