//! Simulation parameters and strain presets.
//!
//! This module provides the parameter structure shared read-only by every
//! run of an ensemble: rates of the two neutral processes, initial
//! divergence, the generation range and sampling interval, and the genome
//! layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParameterError;
use crate::evolution::{GeneConversionModel, MutationModel, TractLength};
use crate::genome::GenomeLayout;

/// Baseline per-site, per-generation mutation rate (3e-6 per genome over
/// a 30 kb reference, i.e. 1e-10 per bp).
pub const BASE_MUTATION_RATE: f64 = 3e-6 / 30_000.0;
/// Rate multiplier of the mutator strain.
pub const MUTATOR_FACTOR: f64 = 50.0;
/// Gene conversion probability per ordered copy pair per generation.
pub const GENE_CONVERSION_RATE: f64 = 8.6e-6;
/// Final generation of a run.
pub const DEFAULT_GENERATIONS: usize = 50_000;
/// Generations between trajectory samples.
pub const DEFAULT_SAMPLING_INTERVAL: usize = 2_500;
/// Initial divergence fraction of non-reference copies.
pub const DEFAULT_INITIAL_DIVERGENCE: f64 = 0.002;

/// Named strain types, each mapping to a mutation/gene conversion rate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrainPreset {
    /// Wild-type mutation rate
    Normal,
    /// Hypermutator with a 50-fold elevated mutation rate
    Mutator,
}

impl StrainPreset {
    /// Every preset, in display order.
    pub const ALL: [StrainPreset; 2] = [StrainPreset::Normal, StrainPreset::Mutator];

    /// Per-site mutation rate of this strain.
    pub fn mutation_rate(self) -> f64 {
        match self {
            StrainPreset::Normal => BASE_MUTATION_RATE,
            StrainPreset::Mutator => BASE_MUTATION_RATE * MUTATOR_FACTOR,
        }
    }

    /// Gene conversion rate of this strain (shared by all presets).
    pub fn gene_conversion_rate(self) -> f64 {
        GENE_CONVERSION_RATE
    }

    /// Identifier used on the command line and in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            StrainPreset::Normal => "normal",
            StrainPreset::Mutator => "mutator",
        }
    }

    /// Human-readable description.
    pub fn label(self) -> &'static str {
        match self {
            StrainPreset::Normal => "Normal (μ = 1×10⁻¹⁰ per bp)",
            StrainPreset::Mutator => "Mutator (μ = 5×10⁻⁹ per bp)",
        }
    }
}

impl fmt::Display for StrainPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrainPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(StrainPreset::Normal),
            "mutator" => Ok(StrainPreset::Mutator),
            other => Err(format!(
                "unknown strain preset '{other}' (expected 'normal' or 'mutator')"
            )),
        }
    }
}

/// Parameters of one neutral-model simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Mutation probability per site per generation
    pub mutation_rate: f64,
    /// Gene conversion probability per ordered copy pair per generation
    pub gene_conversion_rate: f64,
    /// Fraction of sites initially differing from the reference
    pub initial_divergence: f64,
    /// Final generation (inclusive)
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Generations between trajectory samples
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval: usize,
    /// Gene conversion tract length range
    #[serde(default)]
    pub tract: TractLength,
    /// Locus lengths and copy labels
    #[serde(default)]
    pub layout: GenomeLayout,
}

fn default_generations() -> usize {
    DEFAULT_GENERATIONS
}

fn default_sampling_interval() -> usize {
    DEFAULT_SAMPLING_INTERVAL
}

impl SimulationParameters {
    /// Create parameters with the default generation range, sampling
    /// interval, tract range and genome layout.
    pub fn new(
        mutation_rate: f64,
        gene_conversion_rate: f64,
        initial_divergence: f64,
    ) -> Result<Self, ParameterError> {
        let params = Self {
            mutation_rate,
            gene_conversion_rate,
            initial_divergence,
            generations: DEFAULT_GENERATIONS,
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
            tract: TractLength::default(),
            layout: GenomeLayout::default(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters for a strain preset.
    pub fn for_strain(
        strain: StrainPreset,
        initial_divergence: f64,
    ) -> Result<Self, ParameterError> {
        Self::new(
            strain.mutation_rate(),
            strain.gene_conversion_rate(),
            initial_divergence,
        )
    }

    /// Check every parameter invariant.
    ///
    /// Rates must be probabilities in [0, 1], the initial divergence a
    /// fraction in [0, 1], the sampling interval positive and the layout
    /// valid. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ParameterError> {
        MutationModel::new(self.mutation_rate)?;
        GeneConversionModel::new(self.gene_conversion_rate)?;
        TractLength::new(self.tract.min(), self.tract.max())?;
        if !(0.0..=1.0).contains(&self.initial_divergence) {
            return Err(ParameterError::InvalidDivergence(self.initial_divergence));
        }
        if self.sampling_interval == 0 {
            return Err(ParameterError::InvalidSamplingInterval);
        }
        self.layout.validate()
    }

    /// Mutation model for these parameters.
    pub fn mutation_model(&self) -> Result<MutationModel, ParameterError> {
        MutationModel::new(self.mutation_rate)
    }

    /// Gene conversion model for these parameters.
    pub fn conversion_model(&self) -> Result<GeneConversionModel, ParameterError> {
        GeneConversionModel::with_tract(self.gene_conversion_rate, self.tract)
    }

    /// Generations at which a trajectory is sampled: 0 and every multiple
    /// of the interval up to and including the final generation.
    pub fn sampled_generations(&self) -> Vec<usize> {
        if self.sampling_interval == 0 {
            return vec![0];
        }
        (0..=self.generations)
            .step_by(self.sampling_interval)
            .collect()
    }

    /// Number of points in every trajectory.
    pub fn sample_count(&self) -> usize {
        match self.sampling_interval {
            0 => 1,
            interval => self.generations / interval + 1,
        }
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            mutation_rate: StrainPreset::Normal.mutation_rate(),
            gene_conversion_rate: StrainPreset::Normal.gene_conversion_rate(),
            initial_divergence: DEFAULT_INITIAL_DIVERGENCE,
            generations: DEFAULT_GENERATIONS,
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
            tract: TractLength::default(),
            layout: GenomeLayout::default(),
        }
    }
}
