mod estimators;
mod preview;
mod report;

pub use estimators::{
    Estimator, EstimatorState, FrameEstimator, FrameStatsEstimator, Moments, WindowMoments,
};
pub use preview::{ReportFormat, ReportLog, TitleFormatter};
pub use report::{Anomaly, Report};
