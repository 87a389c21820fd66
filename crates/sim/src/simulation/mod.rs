//! Single-run simulation engine.
//!
//! Re-exports
//!
//! The most commonly used simulation types are re-exported here for
//! convenience so consumers can import them from `rrnevo_sim::simulation`.
//!
//! - `Simulation`: one run, applying mutation then gene conversion each
//!   generation and sampling divergence at fixed intervals.
//! - `SimulationParameters` / `StrainPreset`: validated run parameters.
//! - `Configuration`: serializable bundle of execution settings and parameters.
//! - `SimulationBuilder`: fluent builder for runs and ensembles.

pub mod builder;
pub mod configs;
pub mod engine;
pub mod parameters;
pub mod sampler;

pub use builder::SimulationBuilder;
pub use configs::{Configuration, ExecutionConfig, DEFAULT_RUNS};
pub use engine::{GenerationEvents, Simulation};
pub use parameters::{
    SimulationParameters, StrainPreset, BASE_MUTATION_RATE, DEFAULT_GENERATIONS,
    DEFAULT_INITIAL_DIVERGENCE, DEFAULT_SAMPLING_INTERVAL, GENE_CONVERSION_RATE, MUTATOR_FACTOR,
};
pub use sampler::{Trajectory, TrajectoryPoint, TrajectorySampler};
