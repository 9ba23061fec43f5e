use crate::config::MonitorConfig;
use crate::evaluation::Report;

/// Renders reports as a one-line status, e.g. for a window title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleFormatter {
    prefix: String,
    precision: usize,
}

impl TitleFormatter {
    pub fn new<P: Into<String>>(prefix: P, precision: usize) -> Self {
        Self {
            prefix: prefix.into(),
            precision,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.title_prefix.clone(), config.precision)
    }

    pub fn format(&self, report: &Report) -> String {
        let mut line = format!(
            "{} | {:.1} fps | {:.p$} ms ± {:.p$} (se {:.p$})",
            self.prefix,
            report.fps,
            report.mean_ms(),
            report.std_ms(),
            report.standard_error_ms(),
            p = self.precision,
        );
        if report.is_degraded() {
            line.push_str(" [degraded]");
        }
        line
    }
}

impl Default for TitleFormatter {
    fn default() -> Self {
        Self::from_config(&MonitorConfig::default())
    }
}
