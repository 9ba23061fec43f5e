use crate::error::PacingError;
use crate::evaluation::Report;
use chrono::{DateTime, TimeZone};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    Csv,
    Tsv,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        self.into()
    }
}

/// Ordered record of every report a pacing run produced.
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    entries: Vec<Report>,
}

impl ReportLog {
    pub fn push(&mut self, report: Report) {
        self.entries.push(report)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn latest(&self) -> Option<Report> {
        self.entries.last().copied()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Report> {
        self.entries.iter()
    }

    /// Reports flagged with an [`Anomaly`](crate::evaluation::Anomaly).
    pub fn degraded(&self) -> usize {
        self.entries.iter().filter(|r| r.is_degraded()).count()
    }

    /// `framepace-YYYYMMDDTHHMMSS.<ext>` for the given instant.
    pub fn default_file_name<Tz>(now: &DateTime<Tz>, fmt: ReportFormat) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!("framepace-{}.{}", now.format("%Y%m%dT%H%M%S"), fmt.extension())
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: ReportFormat) -> Result<(), PacingError> {
        match fmt {
            ReportFormat::Csv => self.export_with_delimiter(path, ','),
            ReportFormat::Tsv => self.export_with_delimiter(path, '\t'),
            ReportFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(
        &self,
        path: P,
        delimiter: char,
    ) -> Result<(), PacingError> {
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(
            w,
            "samples{d}mean_dt{d}std_dt{d}standard_error{d}fps{d}next_window{d}anomaly",
            d = delimiter
        )?;
        for r in &self.entries {
            let anomaly = r.anomaly.map(<&'static str>::from).unwrap_or("");
            writeln!(
                w,
                "{}{d}{:.9}{d}{:.9}{d}{:.9}{d}{:.3}{d}{}{d}{}",
                r.samples,
                r.mean_dt,
                r.std_dt,
                r.standard_error,
                r.fps,
                r.next_window,
                anomaly,
                d = delimiter
            )?;
        }
        w.flush()?;
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), PacingError> {
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &self.entries)?;
        writeln!(w)?;
        w.flush()?;
        Ok(())
    }
}
