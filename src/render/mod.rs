//! Text rendering for the summary report.

pub mod text;

pub use text::render_report;
