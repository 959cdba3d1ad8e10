//! SQLite-backed loader for the `system_log` table.

pub mod load;
pub mod table;

pub use load::load_table;
pub use table::{LogRecord, LogTable, Metric};
