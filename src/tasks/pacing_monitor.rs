use crate::clock::Clock;
use crate::config::MonitorConfig;
use crate::error::PacingError;
use crate::evaluation::{FrameEstimator, FrameStatsEstimator, Report, ReportLog, TitleFormatter};
use std::ops::ControlFlow;
use std::sync::mpsc::Sender;
use tracing::{debug, info};

/// Single-threaded frame loop host.
///
/// Each iteration runs the caller's frame callback, reads the clock once and
/// feeds the reading to an owned [`FrameStatsEstimator`]. Completed windows
/// are formatted as a title line, recorded in a [`ReportLog`] and forwarded
/// to the optional progress channel.
pub struct PacingMonitor {
    clock: Box<dyn Clock>,
    estimator: FrameStatsEstimator,
    title: TitleFormatter,
    log: ReportLog,

    max_frames: Option<u64>,
    max_seconds: Option<f64>,

    frames: u64,
    last_reading: f64,
    last_title: Option<String>,

    progress_tx: Option<Sender<Report>>,
}

impl PacingMonitor {
    pub fn new(clock: Box<dyn Clock>, config: MonitorConfig) -> Result<Self, PacingError> {
        config.validate()?;
        let estimator = FrameStatsEstimator::with_config(config.estimator)?;

        Ok(Self {
            clock,
            estimator,
            title: TitleFormatter::from_config(&config),
            log: ReportLog::default(),
            max_frames: config.max_frames,
            max_seconds: config.max_seconds,
            frames: 0,
            last_reading: 0.0,
            last_title: None,
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<Report>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Runs until a frame or time limit is hit, or `frame` returns
    /// [`ControlFlow::Break`]. The callback receives the zero-based frame index.
    pub fn run<F>(&mut self, mut frame: F)
    where
        F: FnMut(u64) -> ControlFlow<()>,
    {
        info!(
            max_frames = ?self.max_frames,
            max_seconds = ?self.max_seconds,
            window = self.estimator.window_size(),
            "pacing loop started"
        );

        while !self.limit_reached() {
            if frame(self.frames).is_break() {
                debug!(frame = self.frames, "frame callback requested exit");
                break;
            }

            let now = self.clock.now();
            self.frames += 1;
            self.last_reading = now;

            if let Some(report) = self.estimator.sample(now) {
                self.push_report(report);
            }
        }

        info!(
            frames = self.frames,
            reports = self.log.len(),
            degraded = self.log.degraded(),
            "pacing loop finished"
        );
    }

    fn limit_reached(&self) -> bool {
        if let Some(n) = self.max_frames {
            if self.frames >= n {
                return true;
            }
        }
        if let Some(s) = self.max_seconds {
            if self.last_reading >= s {
                return true;
            }
        }
        false
    }

    fn push_report(&mut self, report: Report) {
        let line = self.title.format(&report);
        info!("{line}");
        self.last_title = Some(line);

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(report);
        }
        self.log.push(report);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn log(&self) -> &ReportLog {
        &self.log
    }

    pub fn into_log(self) -> ReportLog {
        self.log
    }

    pub fn estimator(&self) -> &FrameStatsEstimator {
        &self.estimator
    }

    /// Title line of the most recent report.
    pub fn last_title(&self) -> Option<&str> {
        self.last_title.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SyntheticClock;
    use crate::config::EstimatorConfig;
    use crate::testing::ScriptedClock;
    use std::sync::mpsc;

    fn keep_going(_: u64) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn sixty_hz() -> Box<dyn Clock> {
        Box::new(SyntheticClock::from_rate(60.0).unwrap())
    }

    #[test]
    fn ctor_guards() {
        let cfg = MonitorConfig {
            max_frames: Some(0),
            ..Default::default()
        };
        let err = PacingMonitor::new(sixty_hz(), cfg).err().unwrap();
        assert!(matches!(err, PacingError::InvalidConfig(_)));

        let cfg = MonitorConfig {
            estimator: EstimatorConfig {
                report_interval: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(PacingMonitor::new(sixty_hz(), cfg).is_err());
    }

    #[test]
    fn steady_sixty_hz_reports_once_per_second() {
        let cfg = MonitorConfig {
            max_frames: Some(600),
            ..Default::default()
        };
        let mut pm = PacingMonitor::new(sixty_hz(), cfg).unwrap();
        pm.run(keep_going);

        assert_eq!(pm.frames(), 600);
        assert_eq!(pm.log().len(), 10);
        for r in pm.log().iter() {
            assert_eq!(r.samples, 60);
            assert!((r.fps - 60.0).abs() < 1e-6, "fps={}", r.fps);
            assert_eq!(r.next_window, 60);
        }
        assert_eq!(pm.estimator().window_size(), 60);
        assert!(pm.last_title().unwrap().starts_with("framepace | 60.0 fps"));
    }

    #[test]
    fn stops_at_max_seconds() {
        let cfg = MonitorConfig {
            max_seconds: Some(1.0),
            ..Default::default()
        };
        let clock = Box::new(SyntheticClock::from_rate(100.0).unwrap());
        let mut pm = PacingMonitor::new(clock, cfg).unwrap();
        pm.run(keep_going);

        assert!((100..=101).contains(&pm.frames()), "frames={}", pm.frames());
        assert_eq!(pm.log().len(), 1);
        assert_eq!(pm.log().latest().unwrap().next_window, 100);
    }

    #[test]
    fn stops_immediately_when_time_zero() {
        let cfg = MonitorConfig {
            max_seconds: Some(0.0),
            ..Default::default()
        };
        let mut calls = 0;
        let mut pm = PacingMonitor::new(sixty_hz(), cfg).unwrap();
        pm.run(|_| {
            calls += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(calls, 0);
        assert_eq!(pm.frames(), 0);
        assert!(pm.log().is_empty());
        assert!(pm.last_title().is_none());
    }

    #[test]
    fn callback_break_ends_loop() {
        let mut pm = PacingMonitor::new(sixty_hz(), MonitorConfig::default()).unwrap();
        let mut seen = Vec::new();
        pm.run(|i| {
            seen.push(i);
            if i == 89 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen.len(), 90);
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(pm.frames(), 89);
        assert_eq!(pm.log().len(), 1);
        assert_eq!(pm.estimator().sample_count(), 29);
    }

    #[test]
    fn progress_channel_mirrors_log() {
        let (tx, rx) = mpsc::channel();
        let cfg = MonitorConfig {
            max_frames: Some(300),
            ..Default::default()
        };
        let mut pm = PacingMonitor::new(sixty_hz(), cfg).unwrap().with_progress(tx);
        pm.run(keep_going);

        let got: Vec<Report> = rx.try_iter().collect();
        let log: Vec<Report> = pm.into_log().iter().copied().collect();
        assert_eq!(got.len(), 5);
        assert_eq!(got, log);
    }

    #[test]
    fn scripted_startup_artifact_is_kept() {
        // readings 0, 1, 2, ...: the first delta is 0 - 0 = 0
        let cfg = MonitorConfig {
            max_frames: Some(4),
            estimator: EstimatorConfig {
                initial_window: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let clock = Box::new(ScriptedClock::evenly_spaced(4, 1.0));
        let mut pm = PacingMonitor::new(clock, cfg).unwrap();
        pm.run(keep_going);

        let r = pm.log().latest().unwrap();
        assert_eq!(r.mean_dt, 0.75);
        assert_eq!(r.next_window, 1);
    }

    #[test]
    fn jittered_clock_stays_live() {
        let cfg = MonitorConfig {
            max_frames: Some(2_000),
            ..Default::default()
        };
        let clock = Box::new(SyntheticClock::new(1.0 / 144.0, 0.002, 9).unwrap());
        let mut pm = PacingMonitor::new(clock, cfg).unwrap();
        pm.run(keep_going);

        assert!(pm.log().len() >= 10);
        for r in pm.log().iter() {
            assert!(r.fps.is_finite() && r.fps > 100.0 && r.fps < 200.0, "fps={}", r.fps);
            assert!(r.std_dt > 0.0);
            assert!(r.standard_error < r.std_dt);
        }
    }
}
