mod report_log;
mod title;

pub use report_log::{ReportFormat, ReportLog};
pub use title::TitleFormatter;
