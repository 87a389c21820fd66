//! # Simulation Crate
//!
//! The `sim` crate provides the neutral model of rRNA operon evolution.
//! It includes modules for the genome state of one cell lineage, the two
//! neutral processes (point mutation and gene conversion), the single-run
//! engine, and the parallel ensemble runner with its summary statistics.

pub mod base;
pub mod ensemble;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod prelude;
pub mod simulation;
