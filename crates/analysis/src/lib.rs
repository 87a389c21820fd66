//! # Analysis Crate
//!
//! Observed rRNA operon divergence from mutation-call tables, and its
//! comparison against the neutral bands produced by `rrnevo-sim`.
//!
//! - [`io`]: file name parsing and CSV loading
//! - [`observed`]: per-strain, per-generation divergence series
//! - [`comparison`]: placement of observed points within a summary band

pub mod comparison;
pub mod errors;
pub mod io;
pub mod observed;

// Re-export commonly used items
pub use comparison::{compare_series, BandPosition, PointComparison, StrainComparison};
pub use errors::ObservedDataError;
pub use io::{FileName, ObservedReader, FILE_NAME_PATTERN};
pub use observed::{
    aggregate, lineage_preset, MutationCall, ObservedFile, ObservedLoci, ObservedPoint,
    ObservedSeries, MUTATOR_LINEAGES,
};
