use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rrnevo_sim::simulation::{Configuration, StrainPreset};
use std::path::PathBuf;

use crate::defaults;

/// Output format for tables.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned table for reading in a terminal
    #[default]
    Pretty,
    Csv,
    Json,
}

/// Model and ensemble parameters shared by several commands.
///
/// Every flag is optional so that values loaded with `--config` are only
/// replaced by flags given explicitly.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Strain preset supplying the rates (normal, mutator) [default: normal]
    #[arg(short = 's', long)]
    pub strain: Option<StrainPreset>,

    /// Mutation rate per site per generation (overrides the preset)
    #[arg(short = 'm', long)]
    pub mutation_rate: Option<f64>,

    /// Gene conversion rate per copy pair per generation (overrides the preset)
    #[arg(short = 'c', long)]
    pub gene_conversion_rate: Option<f64>,

    /// Fraction of sites initially differing from the reference [default: 0.002]
    #[arg(short = 'd', long)]
    pub initial_divergence: Option<f64>,

    /// Final generation [default: 50000]
    #[arg(short = 'g', long)]
    pub generations: Option<usize>,

    /// Generations between samples [default: 2500]
    #[arg(short = 'i', long)]
    pub sampling_interval: Option<usize>,

    /// Number of independent runs [default: 100]
    #[arg(short = 'n', long)]
    pub runs: Option<usize>,

    /// Master random seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ModelArgs {
    /// Apply the given flags on top of `base`, or on top of the defaults
    /// when there is no base configuration.
    pub fn apply(&self, base: Option<Configuration>) -> Result<Configuration> {
        let mut config = match base {
            Some(config) => config,
            None => {
                let strain: StrainPreset = defaults::STRAIN
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                let mut config = Configuration::for_strain(strain, defaults::INITIAL_DIVERGENCE)?;
                config.execution.runs = defaults::RUNS;
                config.parameters.generations = defaults::GENERATIONS;
                config.parameters.sampling_interval = defaults::SAMPLING_INTERVAL;
                config
            }
        };

        if let Some(strain) = self.strain {
            config.parameters.mutation_rate = strain.mutation_rate();
            config.parameters.gene_conversion_rate = strain.gene_conversion_rate();
            config.strain = Some(strain);
        }
        if let Some(rate) = self.mutation_rate {
            config.parameters.mutation_rate = rate;
            config.strain = None;
        }
        if let Some(rate) = self.gene_conversion_rate {
            config.parameters.gene_conversion_rate = rate;
            config.strain = None;
        }
        if let Some(divergence) = self.initial_divergence {
            config.parameters.initial_divergence = divergence;
        }
        if let Some(generations) = self.generations {
            config.parameters.generations = generations;
        }
        if let Some(interval) = self.sampling_interval {
            config.parameters.sampling_interval = interval;
        }
        if let Some(runs) = self.runs {
            config.execution.runs = runs;
        }
        if let Some(seed) = self.seed {
            config.execution.seed = Some(seed);
        }

        config.validate().context("Invalid simulation parameters")?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output configuration file
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Load parameters from a configuration file (flags still override)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug)]
pub struct ObserveArgs {
    /// Mutation-call CSV files named like Ara-1_500gen_762B.csv
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Mutation-call CSV files named like Ara-1_500gen_762B.csv
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    // Without --strain each lineage is compared against its own preset's band
    #[command(flatten)]
    pub model: ModelArgs,

    /// Load parameters from a configuration file (flags still override)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Load `path` if given.
pub fn load_config(path: Option<&PathBuf>) -> Result<Option<Configuration>> {
    path.map(|p| {
        Configuration::from_json_file(p)
            .with_context(|| format!("Failed to load configuration from {}", p.display()))
    })
    .transpose()
}
