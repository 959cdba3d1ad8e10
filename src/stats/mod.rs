//! Aggregation over a loaded [`LogTable`]: threshold counts, per-column
//! statistics, and the CPU peak selection feeding the report.

use crate::store::{LogTable, Metric};

/// How many peak rows the report lists.
pub const TOP_PEAKS: usize = 3;

/// CPU percentage the "exceeded N times" count measures against.
pub const HIGH_CPU_THRESHOLD: f64 = 80.0;

/// Avg/min/max over the non-NULL cells of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// One of the highest-CPU rows, with its timestamp when the store has one.
#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    pub timestamp: Option<String>,
    pub cpu: f64,
}

/// Aggregated snapshot handed to the formatter; immutable once built.
#[derive(Debug, Clone)]
pub struct Summary {
    pub total: usize,
    pub cpu: Option<ColumnStats>,
    pub mem: Option<ColumnStats>,
    pub disk: Option<ColumnStats>,
    pub peaks: Vec<Peak>,
    pub timestamps: bool,
}

/// Count rows whose value in `metric` strictly exceeds `threshold`.
///
/// An absent column is not an error: the count degrades to 0 with a
/// diagnostic, mirroring how the rest of the pipeline treats missing columns.
pub fn count_above_threshold(table: &LogTable, metric: Metric, threshold: f64) -> usize {
    if !table.has_metric(metric) {
        eprintln!(
            "WARN: column '{}' not found in system_log table",
            metric.column_name()
        );
        return 0;
    }
    table.metric_values(metric).filter(|v| *v > threshold).count()
}

/// Avg/min/max for one column; `None` when the column is absent or has no
/// non-NULL cells (either way the report omits the section).
pub fn column_stats(table: &LogTable, metric: Metric) -> Option<ColumnStats> {
    if !table.has_metric(metric) {
        return None;
    }

    let mut count = 0usize;
    let mut sum = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in table.metric_values(metric) {
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }
    if count == 0 {
        return None;
    }

    Some(ColumnStats {
        avg: sum / count as f64,
        min,
        max,
    })
}

/// Top `n` rows by CPU, descending; ties keep original row order.
pub fn top_cpu_peaks(table: &LogTable, n: usize) -> Vec<Peak> {
    if !table.has_metric(Metric::Cpu) {
        return Vec::new();
    }

    let mut peaks: Vec<Peak> = table
        .rows()
        .iter()
        .filter_map(|r| {
            r.cpu.map(|cpu| Peak {
                timestamp: r.timestamp.clone(),
                cpu,
            })
        })
        .collect();

    // sort_by is stable, so equal CPUs stay in storage order.
    peaks.sort_by(|a, b| b.cpu.partial_cmp(&a.cpu).unwrap_or(std::cmp::Ordering::Equal));
    peaks.truncate(n);
    peaks
}

/// Build the full aggregated snapshot for the formatter.
pub fn summarize(table: &LogTable) -> Summary {
    Summary {
        total: table.len(),
        cpu: column_stats(table, Metric::Cpu),
        mem: column_stats(table, Metric::Mem),
        disk: column_stats(table, Metric::Disk),
        peaks: top_cpu_peaks(table, TOP_PEAKS),
        timestamps: table.has_timestamp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LogRecord;
    use pretty_assertions::assert_eq;

    fn record(ts: &str, cpu: f64, mem: f64, disk: f64) -> LogRecord {
        LogRecord {
            timestamp: Some(ts.to_string()),
            cpu: Some(cpu),
            mem: Some(mem),
            disk: Some(disk),
        }
    }

    fn full_table(rows: &[(&str, f64, f64, f64)]) -> LogTable {
        let mut table = LogTable::with_columns(true, Metric::ALL);
        for &(ts, cpu, mem, disk) in rows {
            table.push(record(ts, cpu, mem, disk));
        }
        table
    }

    #[test]
    fn count_is_strict_and_bounded() {
        let table = full_table(&[("t1", 80.0, 0.0, 0.0), ("t2", 80.1, 0.0, 0.0), ("t3", 95.0, 0.0, 0.0)]);
        let n = count_above_threshold(&table, Metric::Cpu, 80.0);
        assert_eq!(n, 2);
        assert!(n <= table.len());
    }

    #[test]
    fn count_without_cpu_column_is_zero() {
        let mut table = LogTable::with_columns(false, [Metric::Mem]);
        table.push(LogRecord {
            mem: Some(99.0),
            ..Default::default()
        });
        assert_eq!(count_above_threshold(&table, Metric::Cpu, 80.0), 0);
    }

    #[test]
    fn count_skips_null_cells() {
        let mut table = LogTable::with_columns(false, [Metric::Cpu]);
        table.push(LogRecord {
            cpu: Some(90.0),
            ..Default::default()
        });
        table.push(LogRecord::default());
        assert_eq!(count_above_threshold(&table, Metric::Cpu, 80.0), 1);
    }

    #[test]
    fn stats_avg_within_min_max() {
        let table = full_table(&[("t1", 10.0, 20.0, 30.0), ("t2", 95.0, 70.0, 50.0)]);
        for metric in Metric::ALL {
            let s = column_stats(&table, metric).unwrap();
            assert!(s.min <= s.avg && s.avg <= s.max);
        }
        let cpu = column_stats(&table, Metric::Cpu).unwrap();
        assert_eq!(cpu.avg, 52.5);
        assert_eq!(cpu.min, 10.0);
        assert_eq!(cpu.max, 95.0);
    }

    #[test]
    fn stats_absent_or_all_null_column() {
        let mut table = LogTable::with_columns(false, [Metric::Cpu]);
        table.push(LogRecord::default());
        assert_eq!(column_stats(&table, Metric::Cpu), None);
        assert_eq!(column_stats(&table, Metric::Disk), None);
    }

    #[test]
    fn peaks_sorted_desc_with_stable_ties() {
        let table = full_table(&[
            ("t1", 50.0, 0.0, 0.0),
            ("t2", 90.0, 0.0, 0.0),
            ("t3", 50.0, 0.0, 0.0),
            ("t4", 70.0, 0.0, 0.0),
        ]);
        let peaks = top_cpu_peaks(&table, 3);
        let order: Vec<&str> = peaks.iter().map(|p| p.timestamp.as_deref().unwrap()).collect();
        assert_eq!(order, vec!["t2", "t4", "t1"]);
    }

    #[test]
    fn peaks_never_exceed_row_count() {
        let table = full_table(&[("t1", 10.0, 0.0, 0.0), ("t2", 95.0, 0.0, 0.0)]);
        let peaks = top_cpu_peaks(&table, 3);
        assert_eq!(peaks.len(), 2);
        let order: Vec<&str> = peaks.iter().map(|p| p.timestamp.as_deref().unwrap()).collect();
        assert_eq!(order, vec!["t2", "t1"]);
    }

    #[test]
    fn peaks_empty_without_cpu_column() {
        let table = LogTable::with_columns(true, [Metric::Mem, Metric::Disk]);
        assert!(top_cpu_peaks(&table, 3).is_empty());
    }
}
