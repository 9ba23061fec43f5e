/// Source of frame timestamps.
///
/// Readings are in seconds and are expected to be monotonically
/// non-decreasing, but consumers must not rely on it: a clock that steps
/// backwards produces negative frame deltas, which the estimator accepts.
pub trait Clock {
    /// Returns the current reading.
    fn now(&mut self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&mut self) -> f64 {
        (**self).now()
    }
}
