//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring single runs and ensembles with
//! defaults taken from the strain presets and validation deferred to
//! `build`.

use crate::ensemble::EnsembleRunner;
use crate::errors::ParameterError;
use crate::evolution::TractLength;
use crate::genome::GenomeLayout;
use crate::simulation::{
    Simulation, SimulationParameters, StrainPreset, DEFAULT_GENERATIONS,
    DEFAULT_INITIAL_DIVERGENCE, DEFAULT_SAMPLING_INTERVAL,
};

/// Builder for constructing [`Simulation`] and [`EnsembleRunner`] instances.
///
/// # Examples
///
/// ```
/// use rrnevo_sim::simulation::{SimulationBuilder, StrainPreset};
///
/// // Preset rates with a short run
/// let mut sim = SimulationBuilder::new()
///     .strain(StrainPreset::Mutator)
///     .generations(100)
///     .sampling_interval(10)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(sim.run().len(), 11);
///
/// // Explicit rates for an ensemble
/// let runner = SimulationBuilder::new()
///     .mutation_rate(1e-6)
///     .gene_conversion_rate(1e-4)
///     .generations(100)
///     .sampling_interval(50)
///     .seed(7)
///     .build_ensemble(4)
///     .unwrap();
/// assert_eq!(runner.run().unwrap().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    // Rates: explicit values override the strain preset
    strain: Option<StrainPreset>,
    mutation_rate: Option<f64>,
    gene_conversion_rate: Option<f64>,

    initial_divergence: f64,          // Default: 0.002
    generations: usize,               // Default: 50_000
    sampling_interval: usize,         // Default: 2_500
    tract: Option<(usize, usize)>,    // Default: [50, 200)
    lengths: Option<(usize, usize)>,  // Default: 1541, 2904
    copies: Option<(Vec<String>, String)>,
    seed: Option<u64>,                // Default: None (random)
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            strain: None,
            mutation_rate: None,
            gene_conversion_rate: None,
            initial_divergence: DEFAULT_INITIAL_DIVERGENCE,
            generations: DEFAULT_GENERATIONS,
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
            tract: None,
            lengths: None,
            copies: None,
            seed: None,
        }
    }

    /// Take mutation and gene conversion rates from a strain preset.
    pub fn strain(mut self, strain: StrainPreset) -> Self {
        self.strain = Some(strain);
        self
    }

    /// Set the per-site mutation rate.
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }

    /// Set the per-pair gene conversion rate.
    pub fn gene_conversion_rate(mut self, rate: f64) -> Self {
        self.gene_conversion_rate = Some(rate);
        self
    }

    /// Set the initial divergence fraction (default: 0.002).
    pub fn initial_divergence(mut self, divergence: f64) -> Self {
        self.initial_divergence = divergence;
        self
    }

    /// Set the final generation (default: 50000).
    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the sampling interval (default: 2500).
    pub fn sampling_interval(mut self, interval: usize) -> Self {
        self.sampling_interval = interval;
        self
    }

    /// Set the gene conversion tract range `[min, max)`.
    pub fn tract_length(mut self, min: usize, max: usize) -> Self {
        self.tract = Some((min, max));
        self
    }

    /// Set the short and long locus lengths.
    pub fn locus_lengths(mut self, short: usize, long: usize) -> Self {
        self.lengths = Some((short, long));
        self
    }

    /// Set the operon copy labels and the reference label.
    pub fn copies<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
        reference: impl Into<String>,
    ) -> Self {
        self.copies = Some((labels.into_iter().map(Into::into).collect(), reference.into()));
        self
    }

    /// Replace the whole genome layout.
    pub fn layout(mut self, layout: GenomeLayout) -> Self {
        self.lengths = Some((layout.short_length, layout.long_length));
        self.copies = Some((layout.copies, layout.reference));
        self
    }

    /// Set the random seed for reproducibility (default: None = random).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Assemble and validate the parameters.
    pub fn build_parameters(&self) -> Result<SimulationParameters, ParameterError> {
        let mutation_rate = self
            .mutation_rate
            .or(self.strain.map(StrainPreset::mutation_rate))
            .ok_or(ParameterError::MissingRequired("mutation_rate (or strain)"))?;
        let gene_conversion_rate = self
            .gene_conversion_rate
            .or(self.strain.map(StrainPreset::gene_conversion_rate))
            .ok_or(ParameterError::MissingRequired(
                "gene_conversion_rate (or strain)",
            ))?;

        let tract = match self.tract {
            Some((min, max)) => TractLength::new(min, max)?,
            None => TractLength::default(),
        };

        let mut layout = GenomeLayout::default();
        if let Some((short, long)) = self.lengths {
            layout.short_length = short;
            layout.long_length = long;
        }
        if let Some((copies, reference)) = &self.copies {
            layout.copies = copies.clone();
            layout.reference = reference.clone();
        }

        let params = SimulationParameters {
            mutation_rate,
            gene_conversion_rate,
            initial_divergence: self.initial_divergence,
            generations: self.generations,
            sampling_interval: self.sampling_interval,
            tract,
            layout,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build a single run.
    pub fn build(self) -> Result<Simulation, ParameterError> {
        let params = self.build_parameters()?;
        match self.seed {
            Some(seed) => Simulation::from_seed(&params, seed),
            None => Simulation::new(&params),
        }
    }

    /// Build an ensemble of `runs` independent runs.
    pub fn build_ensemble(self, runs: usize) -> Result<EnsembleRunner, ParameterError> {
        let params = self.build_parameters()?;
        let runner = EnsembleRunner::new(params, runs)?;
        Ok(match self.seed {
            Some(seed) => runner.with_seed(seed),
            None => runner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_strain_defaults() {
        let params = SimulationBuilder::new()
            .strain(StrainPreset::Normal)
            .build_parameters()
            .unwrap();

        assert_eq!(params, SimulationParameters::default());
    }

    #[test]
    fn test_builder_explicit_rate_overrides_strain() {
        let params = SimulationBuilder::new()
            .strain(StrainPreset::Mutator)
            .gene_conversion_rate(0.0)
            .build_parameters()
            .unwrap();

        assert_eq!(params.mutation_rate, StrainPreset::Mutator.mutation_rate());
        assert_eq!(params.gene_conversion_rate, 0.0);
    }

    #[test]
    fn test_builder_missing_rates() {
        let err = SimulationBuilder::new()
            .mutation_rate(1e-9)
            .build()
            .unwrap_err();

        match err {
            ParameterError::MissingRequired(param) => {
                assert!(param.starts_with("gene_conversion_rate"));
            }
            _ => panic!("Expected MissingRequired error"),
        }
    }

    #[test]
    fn test_builder_invalid_mutation_rate() {
        let sim = SimulationBuilder::new()
            .strain(StrainPreset::Normal)
            .mutation_rate(-0.1) // Invalid: negative
            .build();

        assert!(sim.is_err());
    }

    #[test]
    fn test_builder_invalid_tract() {
        let err = SimulationBuilder::new()
            .strain(StrainPreset::Normal)
            .tract_length(200, 50)
            .build_parameters()
            .unwrap_err();
        assert_eq!(err, ParameterError::InvalidTractRange { min: 200, max: 50 });
    }

    #[test]
    fn test_builder_custom_layout() {
        let sim = SimulationBuilder::new()
            .strain(StrainPreset::Normal)
            .locus_lengths(100, 200)
            .copies(["a", "b", "c"], "b")
            .generations(10)
            .seed(5)
            .build()
            .unwrap();

        assert_eq!(sim.genome().len(), 3);
        assert_eq!(sim.genome().reference().label(), "b");
        assert_eq!(sim.genome().reference().total_length(), 300);
    }

    #[test]
    fn test_builder_unknown_reference() {
        let err = SimulationBuilder::new()
            .strain(StrainPreset::Normal)
            .copies(["a", "b"], "z")
            .build_parameters()
            .unwrap_err();
        assert_eq!(err, ParameterError::UnknownReference("z".into()));
    }

    #[test]
    fn test_builder_ensemble_invalid_runs() {
        let err = SimulationBuilder::new()
            .strain(StrainPreset::Normal)
            .build_ensemble(0)
            .unwrap_err();
        assert_eq!(err, ParameterError::InvalidRunCount);
    }
}
