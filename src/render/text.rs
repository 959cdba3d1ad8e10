use crate::stats::{ColumnStats, Peak, Summary};

/// One presence-gated report section. Sections are rendered in the fixed
/// order they are listed in; an absent column never leaves a placeholder.
enum Section<'a> {
    Cpu {
        stats: &'a ColumnStats,
        peaks: &'a [Peak],
        timestamps: bool,
    },
    Stats {
        title: &'static str,
        stats: &'a ColumnStats,
    },
}

impl Section<'_> {
    fn render(&self, lines: &mut Vec<String>) {
        match self {
            Section::Cpu {
                stats,
                peaks,
                timestamps,
            } => {
                lines.push("CPU usage (%)".to_string());
                lines.push(stats_line(stats));
                lines.push("  Top 3 CPU peaks:".to_string());
                for peak in *peaks {
                    let line = match (&peak.timestamp, timestamps) {
                        (Some(ts), true) => format!("    - {} -> {:.2}%", ts, peak.cpu),
                        _ => format!("    - CPU: {:.2}%", peak.cpu),
                    };
                    lines.push(line);
                }
            }
            Section::Stats { title, stats } => {
                lines.push(title.to_string());
                lines.push(stats_line(stats));
            }
        }
    }
}

fn stats_line(stats: &ColumnStats) -> String {
    format!(
        "  Avg: {:.2}, Min: {:.2}, Max: {:.2}",
        stats.avg, stats.min, stats.max
    )
}

/// Render the fixed-layout text report. Deterministic: the same summary
/// always yields byte-identical text.
pub fn render_report(summary: &Summary) -> String {
    let mut lines = vec![
        "SYSTEM SUMMARY".to_string(),
        "--------------".to_string(),
        format!("Total log entries: {}", summary.total),
        String::new(),
    ];

    let mut sections: Vec<Section<'_>> = Vec::new();
    if let Some(stats) = &summary.cpu {
        sections.push(Section::Cpu {
            stats,
            peaks: &summary.peaks,
            timestamps: summary.timestamps,
        });
    }
    if let Some(stats) = &summary.mem {
        sections.push(Section::Stats {
            title: "Memory usage (%)",
            stats,
        });
    }
    if let Some(stats) = &summary.disk {
        sections.push(Section::Stats {
            title: "Disk usage (%)",
            stats,
        });
    }

    for section in &sections {
        section.render(&mut lines);
        lines.push(String::new());
    }

    lines.join("\n")
}
