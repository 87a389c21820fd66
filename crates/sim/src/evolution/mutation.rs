//! Point mutation for operon loci.
//!
//! Each generation, every locus of every copy independently receives at most
//! one mutation. The chance of that event is the per-site rate times the
//! locus length, the usual small-probability approximation of a Poisson
//! number of hits. A hit picks a uniform position and advances its state
//! cyclically (`(state + 1) mod 4`). Sites are not tracked between events,
//! so a site can be hit repeatedly and eventually return to state 0.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::base::{Locus, LocusKind};
use crate::errors::ParameterError;
use crate::genome::Genome;

/// Per-site, per-generation point mutation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationModel {
    /// Mutation probability per site per generation
    rate: f64,
}

impl MutationModel {
    /// Create a mutation model.
    ///
    /// # Errors
    /// Returns an error if `rate` is outside [0.0, 1.0] or NaN.
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ParameterError::InvalidProbability("mutation_rate", rate));
        }
        Ok(Self { rate })
    }

    /// A model that never mutates.
    pub fn none() -> Self {
        Self { rate: 0.0 }
    }

    /// Per-site rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Probability that a locus of `length` sites mutates in one generation.
    ///
    /// Values above 1.0 are possible for extreme rates and simply mean the
    /// event always happens.
    #[inline]
    pub fn event_probability(&self, length: usize) -> f64 {
        self.rate * length as f64
    }

    /// Draw and apply at most one mutation to `locus`.
    ///
    /// Returns the mutated position, if any.
    #[inline]
    pub fn mutate_locus<R: Rng + ?Sized>(&self, locus: &mut Locus, rng: &mut R) -> Option<usize> {
        let len = locus.len();
        if len == 0 {
            return None;
        }
        if rng.random::<f64>() >= self.event_probability(len) {
            return None;
        }
        let pos = rng.random_range(0..len);
        let sites = locus.as_mut_slice();
        sites[pos] = sites[pos].next();
        Some(pos)
    }

    /// Apply one generation of mutation to every copy of `genome`.
    ///
    /// Copies are visited in layout order, short locus before long locus.
    /// Returns the number of mutations applied.
    pub fn mutate_genome<R: Rng + ?Sized>(&self, genome: &mut Genome, rng: &mut R) -> usize {
        let mut count = 0;
        for copy in genome.copies_mut() {
            for kind in LocusKind::ALL {
                if self.mutate_locus(copy.locus_mut(kind), rng).is_some() {
                    count += 1;
                }
            }
        }
        count
    }
}

impl Default for MutationModel {
    fn default() -> Self {
        Self::none()
    }
}
