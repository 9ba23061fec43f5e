use crate::clock::Clock;

/// Replays a fixed list of readings, then keeps returning the last one
/// (or `0.0` for an empty script).
pub struct ScriptedClock {
    pub readings: Vec<f64>,
    idx: usize,
}

impl ScriptedClock {
    pub fn new(readings: Vec<f64>) -> Self {
        Self { readings, idx: 0 }
    }

    /// `0, step, 2*step, ...` with `n` entries, computed as `k * step`.
    pub fn evenly_spaced(n: usize, step: f64) -> Self {
        Self::new((0..n).map(|k| k as f64 * step).collect())
    }

    pub fn consumed(&self) -> usize {
        self.idx
    }
}

impl Clock for ScriptedClock {
    fn now(&mut self) -> f64 {
        match self.readings.get(self.idx) {
            Some(&t) => {
                self.idx += 1;
                t
            }
            None => self.readings.last().copied().unwrap_or(0.0),
        }
    }
}
