mod estimator;
mod frame_stats_estimator;
mod window_moments;

pub use estimator::{Estimator, FrameEstimator};
pub use frame_stats_estimator::{EstimatorState, FrameStatsEstimator};
pub use window_moments::{Moments, WindowMoments};
