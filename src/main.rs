use clap::Parser;

mod alert;
mod render;
mod stats;
mod store;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "sysmon-report")]
#[command(about = "System resource log summarizer", long_about = None)]
struct Cli {
    /// SQLite database holding the system_log table.
    #[arg(long, default_value = "log.db")]
    db: String,

    /// Output file for the rendered summary.
    #[arg(short = 'o', long, default_value = "system_summary.txt")]
    out: String,

    /// Append the fixed high-CPU demo row before aggregating, to exercise
    /// the alert path. Skipped unless the store has all four columns.
    #[arg(long)]
    demo_alert_row: bool,
}

fn main() -> Result<()> {
    run(&Cli::parse())
}

fn run(cli: &Cli) -> Result<()> {
    // 1) Load. A missing database means "no data": skip everything else.
    let Some(mut table) = store::load_table(&cli.db)? else {
        return Ok(());
    };

    if cli.demo_alert_row && !table.append_demo_alert_row() {
        eprintln!("WARN: demo alert row skipped; system_log is missing columns");
    }

    // 2) Aggregate.
    let high = stats::count_above_threshold(&table, store::Metric::Cpu, stats::HIGH_CPU_THRESHOLD);
    println!(
        "CPU usage exceeded {:.0}% a total of {} times.\n",
        stats::HIGH_CPU_THRESHOLD,
        high
    );
    let summary = stats::summarize(&table);

    // 3) Render, print, persist. A write failure is fatal.
    let report = render::render_report(&summary);
    println!("{}", report);
    std::fs::write(&cli.out, &report)?;
    println!("Summary saved to {}", cli.out);

    // 4) Alert decision, evaluated once over the same table.
    let state = alert::evaluate(&table);
    if !alert::notify(&state, &mut alert::ConsoleMailer) {
        println!(
            "\nNo CPU value above {:.0}%. No alert email simulated.",
            alert::ALERT_CPU_THRESHOLD
        );
    }

    Ok(())
}
