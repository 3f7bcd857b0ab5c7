use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use crate::solver::Solutions;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Countdown - enumerate arithmetic expressions that hit a target value
#[derive(Parser, Debug)]
#[command(name = "countdown")]
#[command(
    about = "Enumerate expressions over the given numbers that evaluate to the target value"
)]
#[command(version)]
pub struct CliArgs {
    /// Target value to reach
    pub target: i64,

    /// Input numbers, each usable at most once per expression
    #[arg(required = true)]
    pub numbers: Vec<i64>,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Ordinal of each input position among equal values; rendered by the
/// annotated display as tick marks ("5", "5'", "5''", …).
fn occurrence_marks(numbers: &[i64]) -> Vec<usize> {
    numbers
        .iter()
        .enumerate()
        .map(|(i, n)| numbers[..i].iter().filter(|&&m| m == *n).count())
        .collect()
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args.log_level)?;

    let mut numbers = args.numbers.clone();
    numbers.sort_unstable();

    let solutions = Solutions::new(args.target, &numbers).context("Invalid input")?;
    let marks = occurrence_marks(&numbers);

    println!("target  = {}", args.target);
    println!(
        "numbers = [{}]",
        numbers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    info!(
        "Enumerating expressions over {:?} that equal {}",
        numbers, args.target
    );

    println!("solutions:");
    let start = Instant::now();
    let mut count = 0;
    for (i, expr) in solutions.enumerate() {
        println!(
            "{:3}: {} ({:.3?})",
            i + 1,
            expr.annotated(&marks),
            start.elapsed()
        );
        count = i + 1;
    }

    if count == 0 {
        warn!("No matching expression found");
        println!("no solutions.");
    } else {
        info!("{} solutions in {:.3?}", count, start.elapsed());
    }
    Ok(())
}
