//! Per-account JSON sale reports.

pub mod error;
pub mod reporter;

pub use error::{ReportError, ReportResult};
pub use reporter::{build_report, Report, ReportEntry, ReportWriter};
