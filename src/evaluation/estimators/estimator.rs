use crate::evaluation::Report;

/// Online scalar estimator (e.g., streaming mean).
///
/// Implementations accept values incrementally via [`add`] and expose the
/// current estimate via [`estimation`].
///
/// [`add`]: Estimator::add
/// [`estimation`]: Estimator::estimation
pub trait Estimator {
    /// Incorporates a new observation.
    fn add(&mut self, v: f64);

    /// Returns the current estimate.
    fn estimation(&self) -> f64;
}

/// Turns a stream of absolute frame timestamps into periodic reports.
pub trait FrameEstimator {
    /// Feeds the clock reading for the current frame. Returns a report only
    /// on the call that completes a window.
    fn sample(&mut self, current_time: f64) -> Option<Report>;

    /// Samples required to complete the current window.
    fn window_size(&self) -> usize;

    /// Samples accumulated so far in the current window.
    fn sample_count(&self) -> usize;

    /// Returns to the initial state.
    fn reset(&mut self);
}
