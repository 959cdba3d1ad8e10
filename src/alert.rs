//! Threshold alert: a two-state decision over the loaded table plus a
//! notification sink. The production sink prints a simulated email; real
//! delivery is out of scope.

use crate::store::{LogTable, Metric};

/// CPU percentage above which the alert fires.
pub const ALERT_CPU_THRESHOLD: f64 = 90.0;

const RECIPIENT: &str = "admin@example.com";
const SUBJECT: &str = "⚠️ High CPU Alert";

#[derive(Debug, Clone, PartialEq)]
pub enum AlertState {
    Idle,
    Firing { max_cpu: f64 },
}

/// Evaluate the alert condition once, over the same table the report used.
///
/// Firing iff the maximum non-NULL CPU value strictly exceeds the threshold;
/// a table without a CPU column stays Idle.
pub fn evaluate(table: &LogTable) -> AlertState {
    if !table.has_metric(Metric::Cpu) {
        return AlertState::Idle;
    }
    let max_cpu = table
        .metric_values(Metric::Cpu)
        .fold(f64::NEG_INFINITY, f64::max);
    if max_cpu > ALERT_CPU_THRESHOLD {
        AlertState::Firing { max_cpu }
    } else {
        AlertState::Idle
    }
}

/// Outbound notification capability. A real mailer could replace
/// [`ConsoleMailer`] without touching the decision logic above.
pub trait AlertSink {
    fn fire(&mut self, message: &str);
}

/// Simulated delivery: prints the email block to the console.
pub struct ConsoleMailer;

impl AlertSink for ConsoleMailer {
    fn fire(&mut self, message: &str) {
        println!();
        println!("=== EMAIL ALERT (SIMULATION) ===");
        println!("To: {}", RECIPIENT);
        println!("Subject: {}", SUBJECT);
        println!();
        println!("{}", message);
        println!("=== END OF EMAIL ===");
        println!();
    }
}

/// Fire the sink when the state warrants it; returns whether it fired.
pub fn notify(state: &AlertState, sink: &mut dyn AlertSink) -> bool {
    match state {
        AlertState::Idle => false,
        AlertState::Firing { max_cpu } => {
            sink.fire(&alert_body(*max_cpu));
            true
        }
    }
}

fn alert_body(max_cpu: f64) -> String {
    format!(
        "Alert! CPU usage exceeded {:.0}%.\nMaximum recorded CPU usage: {:.2}%.",
        ALERT_CPU_THRESHOLD, max_cpu
    )
}
