use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_timetable::catalog::{demo_catalog, load_catalog};
use u_timetable::models::ScheduleSummary;
use u_timetable::scheduler::Scheduler;

/// Lists every conflict-free way to take a number of subjects from a catalog.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON catalog to search. Defaults to the bundled demo catalog.
    #[arg(long, short, env = "U_TIMETABLE_CATALOG")]
    catalog: Option<PathBuf>,
    /// Number of subjects to take.
    #[arg(long, short = 'k', env = "U_TIMETABLE_SUBJECTS", default_value_t = 4)]
    subjects: usize,
    /// Stop after this many schedules.
    #[arg(long, short)]
    limit: Option<usize>,
    /// Print schedules as JSON instead of weekly tables.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("loading catalog from {}", path.display()))?,
        None => demo_catalog().context("loading bundled demo catalog")?,
    };
    info!(subjects = catalog.len(), "catalog loaded");

    let scheduler = Scheduler::new(&catalog).context("catalog lists a subject twice")?;
    info!(
        k = args.subjects,
        candidates = %scheduler.candidate_count(args.subjects),
        "searching schedules"
    );

    let mut search = scheduler.schedules(args.subjects);
    let schedules: Vec<_> = search
        .by_ref()
        .take(args.limit.unwrap_or(usize::MAX))
        .collect();
    info!(stats = ?search.stats(), "search finished");

    if args.json {
        let summaries: Vec<ScheduleSummary> = schedules.iter().map(|s| s.summary()).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if schedules.is_empty() {
        println!("No valid schedules found.");
        return Ok(());
    }

    println!(
        "Found {} schedule(s) with {} of {} subjects:",
        schedules.len(),
        args.subjects,
        catalog.len()
    );
    for (i, schedule) in schedules.iter().enumerate() {
        println!("\nOption #{}\n{schedule}", i + 1);
    }
    Ok(())
}
