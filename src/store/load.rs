use crate::store::table::{LogRecord, LogTable, Metric};
use anyhow::Context;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::Path;

/// Load every row of the `system_log` table into memory.
///
/// A missing database file is a recognized "no data" condition: a diagnostic
/// is emitted and `Ok(None)` is returned so the caller can skip the rest of
/// the pipeline. Anything else that goes wrong during the read (missing
/// table, corrupt file) is fatal and propagates.
pub fn load_table(path: &str) -> anyhow::Result<Option<LogTable>> {
    if !Path::new(path).exists() {
        eprintln!("WARN: database {} not found; nothing to summarize", path);
        return Ok(None);
    }

    // The store is read-only from this program's perspective; the connection
    // lives only for the duration of this function.
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("open database {}", path))?;

    let mut stmt = conn
        .prepare("SELECT * FROM system_log")
        .with_context(|| format!("query system_log in {}", path))?;

    // Column set is whatever the store has; unrecognized columns are ignored.
    let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
    let position = |name: &str| names.iter().position(|n| n == name);

    let ts_idx = position("timestamp");
    let metric_idx: Vec<(Metric, usize)> = Metric::ALL
        .iter()
        .filter_map(|&m| position(m.column_name()).map(|i| (m, i)))
        .collect();

    let mut table = LogTable::with_columns(ts_idx.is_some(), metric_idx.iter().map(|&(m, _)| m));

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        table.push(read_record(row, ts_idx, &metric_idx)?);
    }

    Ok(Some(table))
}

fn read_record(
    row: &Row<'_>,
    ts_idx: Option<usize>,
    metric_idx: &[(Metric, usize)],
) -> rusqlite::Result<LogRecord> {
    let mut record = LogRecord::default();
    if let Some(i) = ts_idx {
        record.timestamp = row.get::<_, Option<String>>(i)?;
    }
    for &(metric, i) in metric_idx {
        let value = row.get::<_, Option<f64>>(i)?;
        match metric {
            Metric::Cpu => record.cpu = value,
            Metric::Mem => record.mem = value,
            Metric::Disk => record.disk = value,
        }
    }
    Ok(record)
}
