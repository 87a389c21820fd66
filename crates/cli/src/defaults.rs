//! Shared default values for the command-line interface.
//! These values are used by the `init`, `simulate` and `compare` commands.

use rrnevo_sim::simulation::{
    DEFAULT_GENERATIONS, DEFAULT_INITIAL_DIVERGENCE, DEFAULT_RUNS, DEFAULT_SAMPLING_INTERVAL,
};

pub const CONFIG_FILE: &str = "rrnevo.json";
pub const STRAIN: &str = "normal";

pub const RUNS: usize = DEFAULT_RUNS;
pub const INITIAL_DIVERGENCE: f64 = DEFAULT_INITIAL_DIVERGENCE;
pub const GENERATIONS: usize = DEFAULT_GENERATIONS;
pub const SAMPLING_INTERVAL: usize = DEFAULT_SAMPLING_INTERVAL;
