//! Parallel ensemble execution.
//!
//! Each run gets its own generator seeded from a value drawn sequentially
//! from a master generator, so an ensemble depends only on the master seed
//! and never on how rayon schedules the runs.

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use super::observer::{EnsembleObserver, NoopObserver};
use super::summary::{summarize, SummarySeries};
use crate::errors::ParameterError;
use crate::simulation::{Configuration, Simulation, SimulationParameters, Trajectory};

/// Run counts above this are accepted but logged as unusually large.
pub const RECOMMENDED_MAX_RUNS: usize = 1000;

/// Trajectories of the completed runs of an ensemble, in run order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    trajectories: Vec<Trajectory>,
}

impl Ensemble {
    pub fn from_trajectories(trajectories: Vec<Trajectory>) -> Self {
        Self { trajectories }
    }

    /// Number of completed runs.
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    pub fn into_trajectories(self) -> Vec<Trajectory> {
        self.trajectories
    }

    /// Per-generation summary statistics over all runs.
    pub fn summarize(&self) -> SummarySeries {
        summarize(&self.trajectories)
    }
}

/// Result of [`EnsembleRunner::run_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleOutcome {
    /// Completed runs
    pub ensemble: Ensemble,
    /// Runs requested
    pub requested: usize,
    /// Runs completed
    pub completed: usize,
    /// Whether the observer stopped the ensemble early
    pub cancelled: bool,
}

/// Executes independent simulation runs in parallel.
#[derive(Debug, Clone)]
pub struct EnsembleRunner {
    parameters: SimulationParameters,
    runs: usize,
    seed: Option<u64>,
}

impl EnsembleRunner {
    /// Create a runner for `runs` runs of `parameters`.
    ///
    /// Fails if `runs` is zero or the parameters are invalid, before any
    /// run starts.
    pub fn new(parameters: SimulationParameters, runs: usize) -> Result<Self, ParameterError> {
        if runs == 0 {
            return Err(ParameterError::InvalidRunCount);
        }
        parameters.validate()?;
        Ok(Self {
            parameters,
            runs,
            seed: None,
        })
    }

    /// Create a runner from a configuration file's contents.
    pub fn from_config(config: &Configuration) -> Result<Self, ParameterError> {
        let runner = Self::new(config.parameters.clone(), config.execution.runs)?;
        Ok(match config.execution.seed {
            Some(seed) => runner.with_seed(seed),
            None => runner,
        })
    }

    /// Fix the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Per-run seeds, drawn in run order from the master generator.
    pub fn run_seeds(&self) -> Vec<u64> {
        let mut master = match self.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_os_rng(),
        };
        (0..self.runs).map(|_| master.random()).collect()
    }

    /// Execute every run to completion.
    pub fn run(&self) -> Result<Ensemble, ParameterError> {
        Ok(self.run_with(&NoopObserver)?.ensemble)
    }

    /// Execute the runs, reporting progress to `observer` and stopping
    /// early if it cancels. Only completed runs are kept.
    pub fn run_with(&self, observer: &dyn EnsembleObserver) -> Result<EnsembleOutcome, ParameterError> {
        let seeds = self.run_seeds();
        let completed = AtomicUsize::new(0);
        let started = Instant::now();

        if self.runs > RECOMMENDED_MAX_RUNS {
            warn!(
                "Requested {} runs (recommended at most {RECOMMENDED_MAX_RUNS})",
                self.runs
            );
        }

        info!(
            "Starting ensemble: {} runs, {} generations, sampling every {}",
            self.runs, self.parameters.generations, self.parameters.sampling_interval
        );

        let results: Vec<Option<Trajectory>> = seeds
            .par_iter()
            .enumerate()
            .map(|(run, &seed)| -> Result<Option<Trajectory>, ParameterError> {
                if observer.is_cancelled() {
                    return Ok(None);
                }
                debug!("Run {run} started (seed {seed})");
                let mut sim = Simulation::from_seed(&self.parameters, seed)?;
                let trajectory = sim.run_while(|| !observer.is_cancelled());

                if trajectory.is_some() {
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    debug!(
                        "Run {run} finished ({done}/{}): {} mutations, {} conversions",
                        self.runs,
                        sim.totals().mutations,
                        sim.totals().conversions
                    );
                    observer.on_run_complete(done, self.runs);
                }
                Ok(trajectory)
            })
            .collect::<Result<_, _>>()?;

        let trajectories: Vec<Trajectory> = results.into_iter().flatten().collect();
        let completed = trajectories.len();
        let cancelled = completed < self.runs;

        if cancelled {
            warn!(
                "Ensemble cancelled after {completed} of {} runs",
                self.runs
            );
        } else {
            info!("Ensemble finished: {completed} runs");
        }
        debug!("Ensemble took {:.2?}", started.elapsed());

        Ok(EnsembleOutcome {
            ensemble: Ensemble::from_trajectories(trajectories),
            requested: self.runs,
            completed,
            cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::CancellationToken;

    fn test_parameters() -> SimulationParameters {
        SimulationParameters {
            mutation_rate: 1e-5,
            gene_conversion_rate: 1e-3,
            initial_divergence: 0.01,
            generations: 200,
            sampling_interval: 50,
            ..SimulationParameters::default()
        }
    }

    #[test]
    fn test_runner_rejects_zero_runs() {
        assert_eq!(
            EnsembleRunner::new(test_parameters(), 0).unwrap_err(),
            ParameterError::InvalidRunCount
        );
    }

    #[test]
    fn test_runner_rejects_invalid_parameters() {
        let params = SimulationParameters {
            mutation_rate: f64::NAN,
            ..test_parameters()
        };
        assert!(EnsembleRunner::new(params, 4).is_err());
    }

    #[test]
    fn test_run_seeds_are_reproducible() {
        let runner = EnsembleRunner::new(test_parameters(), 8).unwrap().with_seed(11);
        assert_eq!(runner.run_seeds(), runner.run_seeds());
        assert_eq!(runner.run_seeds().len(), 8);
    }

    #[test]
    fn test_ensemble_collects_every_run() {
        let runner = EnsembleRunner::new(test_parameters(), 6).unwrap().with_seed(3);
        let ensemble = runner.run().unwrap();

        assert_eq!(ensemble.len(), 6);
        for trajectory in ensemble.trajectories() {
            assert_eq!(trajectory.len(), 5);
        }
    }

    #[test]
    fn test_ensemble_matches_sequential_runs() {
        let runner = EnsembleRunner::new(test_parameters(), 4).unwrap().with_seed(21);
        let ensemble = runner.run().unwrap();

        let sequential: Vec<Trajectory> = runner
            .run_seeds()
            .into_iter()
            .map(|seed| {
                Simulation::from_seed(runner.parameters(), seed)
                    .unwrap()
                    .run()
            })
            .collect();
        assert_eq!(ensemble.trajectories(), sequential.as_slice());
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();

        let runner = EnsembleRunner::new(test_parameters(), 5).unwrap().with_seed(1);
        let outcome = runner.run_with(&token).unwrap();

        assert!(outcome.cancelled);
        assert_eq!(outcome.requested, 5);
        assert_eq!(outcome.completed, 0);
        assert!(outcome.ensemble.is_empty());
        assert!(outcome.ensemble.summarize().is_empty());
    }

    struct CountingObserver {
        calls: AtomicUsize,
    }

    impl EnsembleObserver for CountingObserver {
        fn on_run_complete(&self, completed: usize, total: usize) {
            assert!(completed <= total);
            self.calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_observer_sees_every_run() {
        let observer = CountingObserver {
            calls: AtomicUsize::new(0),
        };
        let runner = EnsembleRunner::new(test_parameters(), 7).unwrap().with_seed(2);
        let outcome = runner.run_with(&observer).unwrap();

        assert!(!outcome.cancelled);
        assert_eq!(outcome.completed, 7);
        assert_eq!(observer.calls.load(Ordering::Relaxed), 7);
    }
}
