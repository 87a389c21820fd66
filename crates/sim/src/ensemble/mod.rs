//! Ensembles of independent runs and their summary statistics.
//!
//! - `EnsembleRunner`: executes N seeded runs in parallel and collects their
//!   trajectories in run order.
//! - `EnsembleObserver`: progress and cancellation hook for long ensembles.
//! - `SummarySeries`: per-generation mean, median, quartiles and range over
//!   the runs of an ensemble.

pub mod observer;
pub mod runner;
pub mod summary;

pub use observer::{CancellationToken, EnsembleObserver, NoopObserver};
pub use runner::{Ensemble, EnsembleOutcome, EnsembleRunner, RECOMMENDED_MAX_RUNS};
pub use summary::{summarize, SummaryPoint, SummarySeries};
