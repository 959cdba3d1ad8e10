use std::collections::BTreeSet;

/// The numeric columns the summarizer knows about.
///
/// Ordered Cpu < Mem < Disk; report sections follow this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Metric {
    Cpu,
    Mem,
    Disk,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cpu, Metric::Mem, Metric::Disk];

    /// Column name as it appears in the `system_log` table.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Mem => "mem",
            Metric::Disk => "disk",
        }
    }
}

/// One sampled observation of system resource usage.
///
/// A field is `None` when its cell is NULL in the store; whether the column
/// exists at all is tracked by [`LogTable`], not per row.
#[derive(Debug, Clone, Default)]
pub struct LogRecord {
    pub timestamp: Option<String>,
    pub cpu: Option<f64>,
    pub mem: Option<f64>,
    pub disk: Option<f64>,
}

impl LogRecord {
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Cpu => self.cpu,
            Metric::Mem => self.mem,
            Metric::Disk => self.disk,
        }
    }
}

/// All rows of `system_log` plus the column set the store actually has.
///
/// "Column absent" and "column present with NULL cells" are distinct states:
/// the former drops a whole report section, the latter only skips cells.
#[derive(Debug, Clone)]
pub struct LogTable {
    rows: Vec<LogRecord>,
    metrics: BTreeSet<Metric>,
    timestamp: bool,
}

impl LogTable {
    pub fn with_columns(timestamp: bool, metrics: impl IntoIterator<Item = Metric>) -> Self {
        Self {
            rows: Vec::new(),
            metrics: metrics.into_iter().collect(),
            timestamp,
        }
    }

    pub fn push(&mut self, record: LogRecord) {
        self.rows.push(record);
    }

    pub fn rows(&self) -> &[LogRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_metric(&self, metric: Metric) -> bool {
        self.metrics.contains(&metric)
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp
    }

    /// Non-NULL cells of one metric column, in storage order.
    pub fn metric_values(&self, metric: Metric) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |r| r.metric(metric))
    }

    /// Append the fixed high-CPU demo row used to exercise the alert path.
    ///
    /// Only appended when the store has all four recognized columns; returns
    /// whether the row was added.
    pub fn append_demo_alert_row(&mut self) -> bool {
        let complete = self.timestamp && Metric::ALL.iter().all(|m| self.metrics.contains(m));
        if !complete {
            return false;
        }
        self.rows.push(LogRecord {
            timestamp: Some("2025-12-10 12:00".to_string()),
            cpu: Some(95.0),
            mem: Some(70.0),
            disk: Some(50.0),
        });
        true
    }
}
