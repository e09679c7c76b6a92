//! AOC CLI - runs registered Advent of Code solvers on local inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Linked for the solver plugins it submits.
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use executor::Executor;
use output::OutputFormatter;
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so answers on stdout stay machine-readable.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;
    let executor =
        Executor::new(registry, &config).map_err(|e| error::CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing_inputs = check_missing_inputs(&work_items, &executor);
    if !missing_inputs.is_empty() {
        eprintln!(
            "Missing {} input file(s) in {}:",
            missing_inputs.len(),
            executor.store().dir().display()
        );
        for (year, day) in &missing_inputs {
            eprintln!("  - {}_day{:02}.txt", year, day);
        }
    }

    let results = run_executor(executor, work_items, config.quiet)?;
    match output::count_incorrect(&results) {
        0 => Ok(()),
        wrong => Err(error::CliError::WrongAnswers(wrong)),
    }
}

fn check_missing_inputs(work_items: &[executor::WorkItem], executor: &Executor) -> Vec<(u16, u8)> {
    work_items
        .iter()
        .filter(|w| !executor.store().contains(w.year, w.day))
        .map(|w| (w.year, w.day))
        .collect()
}

/// Runs the executor on a background thread and prints results in order.
fn run_executor(
    executor: Executor,
    work_items: Vec<executor::WorkItem>,
    quiet: bool,
) -> Result<Vec<executor::SolverResult>, error::CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| error::CliError::Config("Executor thread panicked".to_string()))?
        .map_err(error::CliError::Executor)?;

    formatter.print_summary(&results);
    Ok(results)
}

/// Registers plugins carrying every tag in `tags` (all plugins when empty).
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, error::CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
