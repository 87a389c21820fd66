mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use args::{CompareArgs, InitArgs, ObserveArgs, SimulateArgs};
use commands::{compare, init, observe, presets, simulate};

/// rrnevo: rRNA Operon Neutral Model
///
/// Simulates how the seven rRNA operon copies of E. coli diverge under
/// point mutation and gene conversion, and compares the neutral expectation
/// with divergence observed in evolving populations.
#[derive(Parser, Debug)]
#[command(name = "rrnevo")]
#[command(author, version, about = "Neutral-model divergence of rRNA operon copies", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the strain presets and their rates.
    Presets,

    /// Write an ensemble configuration file.
    ///
    /// Records the parameters of an experiment without running it.
    Init(Box<InitArgs>),

    /// Run an ensemble and print per-generation divergence statistics.
    Simulate(Box<SimulateArgs>),

    /// Compute observed divergence from mutation-call files.
    Observe(ObserveArgs),

    /// Place observed divergence within the simulated neutral band.
    ///
    /// Each lineage is compared with an ensemble of its strain preset.
    Compare(Box<CompareArgs>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Presets => presets::list_presets()?,
        Commands::Init(args) => init::init_config(&args)?,
        Commands::Simulate(args) => simulate::run_simulation(&args)?,
        Commands::Observe(args) => observe::observe_files(&args)?,
        Commands::Compare(args) => compare::compare_files(&args)?,
    }

    Ok(())
}
