// Mockslow CLI - runs the mock-contamination demonstration once
use anyhow::Result;
use clap::{Parser, ValueEnum};

use mockslow::{
    init_logging_with_level, ConsoleEnvironment, Environment, HarnessBuilder,
    JsonLinesEnvironment, TracingEnvironment, DEFAULT_CYCLES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    /// One plain line per measured phase on stdout
    Console,
    /// Structured log records plus timer metrics
    Tracing,
    /// One JSON object per measured phase on stdout
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "mockslow",
    about = "Demonstrates that mocking one capability can slow down unrelated types"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Suppress everything except errors
    #[arg(long)]
    quiet: bool,

    /// How phase timings are reported
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    format: ReportFormat,

    /// Field-access iterations per phase (one value for the whole run)
    #[arg(long, default_value_t = DEFAULT_CYCLES)]
    cycles: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging_with_level(cli.verbose, cli.quiet)?;

    match cli.format {
        ReportFormat::Console => run_with(ConsoleEnvironment, cli.cycles),
        ReportFormat::Tracing => run_with(TracingEnvironment, cli.cycles),
        ReportFormat::Json => run_with(JsonLinesEnvironment, cli.cycles),
    }
}

fn run_with<E: Environment>(environment: E, cycles: u32) -> Result<()> {
    let mut harness = HarnessBuilder::new()
        .environment(environment)
        .cycles(cycles)
        .build()?;
    harness.run()?;
    Ok(())
}
