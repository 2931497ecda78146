//! Markdown reporting over the loaded tables

mod markdown;
mod reporter;

pub use markdown::{MarkdownReport, render_section};
pub use reporter::{QueryOutcome, ReportQuery, ReportSummary, Reporter};
