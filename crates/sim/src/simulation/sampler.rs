//! Trajectory sampling.
//!
//! At fixed generation intervals the sampler measures how far each
//! non-reference copy has diverged from the reference copy and records the
//! mean as one trajectory point.

use serde::{Deserialize, Serialize};

use crate::base::LocusKind;
use crate::genome::Genome;

/// Aggregate divergence of a genome at one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Generation the sample was taken at
    pub generation: usize,
    /// Mean divergence of the non-reference copies over both loci
    pub divergence: f64,
    /// Mean divergence of the non-reference copies in the short locus
    pub short_divergence: f64,
    /// Mean divergence of the non-reference copies in the long locus
    pub long_divergence: f64,
}

/// One run's sampled divergence, ordered by generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Create a trajectory from points already ordered by generation.
    pub fn from_points(points: Vec<TrajectoryPoint>) -> Self {
        Self { points }
    }

    /// Number of sampled points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` if nothing was sampled.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points.
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// Sampled generations, in order.
    pub fn generations(&self) -> impl Iterator<Item = usize> + '_ {
        self.points.iter().map(|p| p.generation)
    }

    /// Aggregate divergence values, in order.
    pub fn divergences(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.divergence)
    }

    /// The point sampled at `generation`, if any.
    pub fn at(&self, generation: usize) -> Option<&TrajectoryPoint> {
        self.points
            .binary_search_by_key(&generation, |p| p.generation)
            .ok()
            .map(|idx| &self.points[idx])
    }

    /// The last sampled point.
    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub(crate) fn push(&mut self, point: TrajectoryPoint) {
        self.points.push(point);
    }
}

/// Samples a genome every `interval` generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectorySampler {
    interval: usize,
}

impl TrajectorySampler {
    /// Create a sampler. An interval of zero samples generation 0 only.
    pub fn new(interval: usize) -> Self {
        Self { interval }
    }

    /// Sampling interval in generations.
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Whether `generation` is a sampling point.
    #[inline]
    pub fn should_sample(&self, generation: usize) -> bool {
        match self.interval {
            0 => generation == 0,
            interval => generation % interval == 0,
        }
    }

    /// Measure `genome` at `generation`.
    ///
    /// Each non-reference copy's divergence is the number of sites, over
    /// both loci, differing from the reference divided by the combined
    /// length. The recorded value is the mean over those copies, or 0.0
    /// when the reference is the only copy.
    pub fn sample(&self, generation: usize, genome: &Genome) -> TrajectoryPoint {
        let reference = genome.reference();
        let short_len = reference.locus(LocusKind::Short).len();
        let long_len = reference.locus(LocusKind::Long).len();
        let total_len = short_len + long_len;

        let mut copies = 0usize;
        let mut total = 0.0;
        let mut short = 0.0;
        let mut long = 0.0;

        for (idx, copy) in genome.copies().iter().enumerate() {
            if idx == genome.reference_index() {
                continue;
            }
            let short_diff = copy
                .locus(LocusKind::Short)
                .differences(reference.locus(LocusKind::Short));
            let long_diff = copy
                .locus(LocusKind::Long)
                .differences(reference.locus(LocusKind::Long));

            total += ratio(short_diff + long_diff, total_len);
            short += ratio(short_diff, short_len);
            long += ratio(long_diff, long_len);
            copies += 1;
        }

        if copies == 0 {
            return TrajectoryPoint {
                generation,
                divergence: 0.0,
                short_divergence: 0.0,
                long_divergence: 0.0,
            };
        }

        let n = copies as f64;
        TrajectoryPoint {
            generation,
            divergence: total / n,
            short_divergence: short / n,
            long_divergence: long / n,
        }
    }
}

#[inline]
fn ratio(count: usize, len: usize) -> f64 {
    if len == 0 {
        0.0
    } else {
        count as f64 / len as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{GenomeLayout, OperonCopy};

    fn copy(label: &str, short: &str, long: &str) -> OperonCopy {
        OperonCopy::new(label, short.parse().unwrap(), long.parse().unwrap())
    }

    #[test]
    fn test_should_sample() {
        let sampler = TrajectorySampler::new(2500);
        assert!(sampler.should_sample(0));
        assert!(!sampler.should_sample(1));
        assert!(sampler.should_sample(2500));
        assert!(sampler.should_sample(50_000));
        assert!(!sampler.should_sample(49_999));
    }

    #[test]
    fn test_zero_interval_samples_only_start() {
        let sampler = TrajectorySampler::new(0);
        assert!(sampler.should_sample(0));
        assert!(!sampler.should_sample(10));
    }

    #[test]
    fn test_sample_averages_non_reference_copies() {
        let genome = Genome::from_copies(
            vec![
                copy("a", "1100", "000000"), // 2/10
                copy("ref", "0000", "000000"),
                copy("c", "0000", "333333"), // 6/10
            ],
            1,
        )
        .unwrap();

        let point = TrajectorySampler::new(1).sample(5, &genome);

        assert_eq!(point.generation, 5);
        assert!((point.divergence - 0.4).abs() < 1e-12);
        // short: (0.5 + 0.0) / 2, long: (0.0 + 1.0) / 2
        assert!((point.short_divergence - 0.25).abs() < 1e-12);
        assert!((point.long_divergence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reference_excluded() {
        let genome = Genome::from_copies(
            vec![copy("ref", "2222", "2222"), copy("b", "2222", "2222")],
            0,
        )
        .unwrap();
        let point = TrajectorySampler::new(1).sample(0, &genome);
        assert_eq!(point.divergence, 0.0);
    }

    #[test]
    fn test_single_copy_is_zero() {
        let layout = GenomeLayout::new(5, 5, vec!["only".into()], "only").unwrap();
        let genome = Genome::uniform(&layout).unwrap();
        let point = TrajectorySampler::new(1).sample(0, &genome);
        assert_eq!(point.divergence, 0.0);
    }

    #[test]
    fn test_trajectory_lookup() {
        let mut trajectory = Trajectory::default();
        for generation in [0, 10, 20] {
            trajectory.push(TrajectoryPoint {
                generation,
                divergence: generation as f64 / 100.0,
                short_divergence: 0.0,
                long_divergence: 0.0,
            });
        }
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.at(10).map(|p| p.divergence), Some(0.1));
        assert!(trajectory.at(15).is_none());
        assert_eq!(trajectory.generations().collect::<Vec<_>>(), vec![0, 10, 20]);
        assert_eq!(trajectory.last().map(|p| p.generation), Some(20));
    }
}
