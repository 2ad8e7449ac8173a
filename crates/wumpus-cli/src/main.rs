//! Wumpus CLI - drives the inference agent through a cave.
//!
//! - `wumpus run` - run the agent and print a summary
//! - `wumpus layout` - print the effective cave layout as YAML

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use wumpus_core::{Agent, AgentConfig, RunReport, TraceEvent, TraceSink};
use wumpus_world::{SimulationConfig, WumpusWorld};

#[derive(Parser)]
#[command(name = "wumpus")]
#[command(about = "Percept-driven inference agent for a hazard grid", version)]
struct Cli {
    /// Simulation config (YAML); defaults to the reference cave
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent until it halts or the step budget runs out
    Run {
        /// Override the configured step budget
        #[arg(long)]
        steps: Option<u64>,

        /// Print trace events as JSON lines
        #[arg(long)]
        trace: bool,
    },

    /// Print the cave layout as YAML
    Layout,
}

/// Writes each trace event to stdout as one JSON line.
struct JsonLines;

impl TraceSink for JsonLines {
    fn emit(&mut self, event: TraceEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode trace event");
                return;
            }
        };
        if let Err(err) = writeln!(std::io::stdout().lock(), "{line}") {
            tracing::warn!(error = %err, "failed to write trace event");
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = SimulationConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Run { steps, trace }) => run(config, steps, trace),
        Some(Commands::Layout) => show_layout(&config),
        None => {
            println!("Wumpus - percept-driven inference agent");
            println!();
            println!("Usage: wumpus [--config <FILE>] <COMMAND>");
            println!();
            println!("Commands:");
            println!("  run       Run the agent through the cave");
            println!("  layout    Print the cave layout");
            println!();
            println!("Run 'wumpus --help' for more information.");
            Ok(())
        }
    }
}

fn run(config: SimulationConfig, steps: Option<u64>, trace: bool) -> Result<()> {
    let max_steps = steps.unwrap_or(config.max_steps);
    let mut world = WumpusWorld::new(config.world).context("Failed to build world")?;

    let mut agent = Agent::new(AgentConfig {
        start: world.start(),
    });
    if trace {
        agent = agent.with_trace_sink(Box::new(JsonLines));
    }

    tracing::info!(size = world.layout().size, max_steps, "Starting run");
    let report = agent
        .run_steps(&mut world, max_steps)
        .context("Agent run failed")?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("Outcome:  {}", report.outcome);
    println!("Steps:    {}", report.steps);
    println!("Position: {}", report.position);
    println!("Gold:     {}", if report.has_gold { "yes" } else { "no" });
    println!("Arrows:   {}", report.arrows_left);
    println!(
        "Cells:    {} visited, {} proven safe",
        report.visited_count, report.safe_count
    );
    println!("Facts:    {}", report.fact_count);
}

fn show_layout(config: &SimulationConfig) -> Result<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}
