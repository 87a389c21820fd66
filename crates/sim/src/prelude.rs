//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use rrnevo_sim::prelude::*;
//!
//! let params = SimulationParameters::for_strain(StrainPreset::Normal, 0.002).unwrap();
//! assert_eq!(params.sample_count(), 21);
//! ```

pub use crate::base::{Locus, LocusKind, SiteState};
pub use crate::ensemble::{
    CancellationToken, Ensemble, EnsembleObserver, EnsembleOutcome, EnsembleRunner, SummaryPoint,
    SummarySeries,
};
pub use crate::errors::{self, ConfigError, ParameterError};
pub use crate::genome::{Genome, GenomeLayout, OperonCopy};
pub use crate::simulation::{
    Configuration, Simulation, SimulationBuilder, SimulationParameters, StrainPreset, Trajectory,
    TrajectoryPoint,
};
