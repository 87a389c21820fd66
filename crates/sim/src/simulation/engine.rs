//! Simulation engine for a single neutral-model run.
//!
//! A run initializes a fresh genome, then for every generation applies
//! mutation to all copies, then gene conversion to all ordered pairs, then
//! samples if the generation is a sampling point. Generation 0 is sampled
//! before any process has acted.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::errors::ParameterError;
use crate::evolution::{GeneConversionModel, MutationModel};
use crate::genome::Genome;
use crate::simulation::{SimulationParameters, Trajectory, TrajectorySampler};

/// Events applied during a single generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationEvents {
    /// Point mutations applied
    pub mutations: usize,
    /// Gene conversion events applied
    pub conversions: usize,
}

impl std::ops::AddAssign for GenerationEvents {
    fn add_assign(&mut self, other: Self) {
        self.mutations += other.mutations;
        self.conversions += other.conversions;
    }
}

/// One simulation run.
///
/// The random source is injectable; by default runs use Xoshiro256++.
#[derive(Debug)]
pub struct Simulation<R = Xoshiro256PlusPlus> {
    /// Genome evolved by this run
    genome: Genome,
    /// Mutation model
    mutation: MutationModel,
    /// Gene conversion model
    conversion: GeneConversionModel,
    /// Trajectory sampler
    sampler: TrajectorySampler,
    /// Final generation (inclusive)
    generations: usize,
    /// Current generation
    generation: usize,
    /// Events applied since initialization
    totals: GenerationEvents,
    /// Random number generator
    rng: R,
}

impl Simulation<Xoshiro256PlusPlus> {
    /// Create a run seeded from `seed`.
    pub fn from_seed(params: &SimulationParameters, seed: u64) -> Result<Self, ParameterError> {
        Self::with_rng(params, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    /// Create a run seeded from OS entropy.
    pub fn new(params: &SimulationParameters) -> Result<Self, ParameterError> {
        Self::with_rng(params, Xoshiro256PlusPlus::from_os_rng())
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a run drawing all randomness from `rng`.
    ///
    /// Parameters are validated before the genome is initialized.
    pub fn with_rng(params: &SimulationParameters, mut rng: R) -> Result<Self, ParameterError> {
        params.validate()?;
        let genome = Genome::initialize(&params.layout, params.initial_divergence, &mut rng)?;
        Ok(Self {
            genome,
            mutation: params.mutation_model()?,
            conversion: params.conversion_model()?,
            sampler: TrajectorySampler::new(params.sampling_interval),
            generations: params.generations,
            generation: 0,
            totals: GenerationEvents::default(),
            rng,
        })
    }

    /// Current genome state.
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Final generation of the run.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Whether the final generation has been reached.
    pub fn is_finished(&self) -> bool {
        self.generation >= self.generations
    }

    /// Events applied since initialization.
    pub fn totals(&self) -> GenerationEvents {
        self.totals
    }

    /// Advance the run by one generation: mutation first, then gene
    /// conversion on the post-mutation state.
    pub fn step(&mut self) -> GenerationEvents {
        let mutations = self.mutation.mutate_genome(&mut self.genome, &mut self.rng);
        let conversions = self.conversion.convert_genome(&mut self.genome, &mut self.rng);
        self.generation += 1;

        let events = GenerationEvents {
            mutations,
            conversions,
        };
        self.totals += events;
        events
    }

    /// Advance by `generations` steps without sampling.
    pub fn run_for(&mut self, generations: usize) -> GenerationEvents {
        let mut events = GenerationEvents::default();
        for _ in 0..generations {
            events += self.step();
        }
        events
    }

    /// Run to the final generation and return the trajectory.
    pub fn run(&mut self) -> Trajectory {
        // A run that is never cancelled always completes.
        self.run_while(|| true).unwrap_or_default()
    }

    /// Run to the final generation, checking `keep_going` at every sampling
    /// point. Returns `None` if the run was abandoned.
    ///
    /// Sampling starts at the current generation, so a fresh run records
    /// generation 0 before anything evolves.
    pub fn run_while<F>(&mut self, keep_going: F) -> Option<Trajectory>
    where
        F: Fn() -> bool,
    {
        let mut trajectory = Trajectory::default();
        if self.sampler.should_sample(self.generation) {
            trajectory.push(self.sampler.sample(self.generation, &self.genome));
        }

        while !self.is_finished() {
            self.step();
            if self.sampler.should_sample(self.generation) {
                if !keep_going() {
                    return None;
                }
                trajectory.push(self.sampler.sample(self.generation, &self.genome));
            }
        }

        Some(trajectory)
    }
}
