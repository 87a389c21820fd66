//! Inter-operon gene conversion.
//!
//! Each generation, every ordered (recipient, donor) pair of distinct copies
//! independently undergoes a conversion event with a fixed probability. An
//! event draws one tract length, shared by both loci, and an independent
//! start position in each locus. The recipient's sites in the tract are
//! overwritten with the donor's; the donor is untouched.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::base::LocusKind;
use crate::errors::ParameterError;
use crate::genome::Genome;

/// Half-open range `[min, max)` of conversion tract lengths in sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TractLength {
    min: usize,
    max: usize,
}

impl TractLength {
    /// Shortest tract drawn by default.
    pub const DEFAULT_MIN: usize = 50;
    /// Exclusive upper bound of the default range (longest tract is 199).
    pub const DEFAULT_MAX: usize = 200;

    /// Create a tract length range.
    ///
    /// # Errors
    /// Returns an error if `min` is zero or the range is empty.
    pub fn new(min: usize, max: usize) -> Result<Self, ParameterError> {
        if min == 0 || min >= max {
            return Err(ParameterError::InvalidTractRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Inclusive lower bound.
    #[inline]
    pub fn min(&self) -> usize {
        self.min
    }

    /// Exclusive upper bound.
    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Draw a tract length uniformly from the range.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(self.min..self.max)
    }
}

impl Default for TractLength {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// A sampled gene conversion event between two copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionEvent {
    /// Index of the copy being overwritten
    pub recipient: usize,
    /// Index of the copy supplying the tract
    pub donor: usize,
    /// Tract length, shared by both loci
    pub tract_length: usize,
    /// Tract start in the short locus
    pub short_start: usize,
    /// Tract start in the long locus
    pub long_start: usize,
}

impl ConversionEvent {
    /// Tract start for the given locus kind.
    #[inline]
    pub fn start(&self, kind: LocusKind) -> usize {
        match kind {
            LocusKind::Short => self.short_start,
            LocusKind::Long => self.long_start,
        }
    }
}

/// Gene conversion model: per-pair event rate and tract length range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneConversionModel {
    /// Probability of a conversion event per ordered pair per generation
    rate: f64,
    /// Tract length range
    #[serde(default)]
    tract: TractLength,
}

impl GeneConversionModel {
    /// Create a gene conversion model with the default tract range.
    ///
    /// # Errors
    /// Returns an error if `rate` is outside [0.0, 1.0] or NaN.
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        Self::with_tract(rate, TractLength::default())
    }

    /// Create a gene conversion model with a custom tract range.
    pub fn with_tract(rate: f64, tract: TractLength) -> Result<Self, ParameterError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ParameterError::InvalidProbability(
                "gene_conversion_rate",
                rate,
            ));
        }
        Ok(Self { rate, tract })
    }

    /// A model that never converts.
    pub fn none() -> Self {
        Self {
            rate: 0.0,
            tract: TractLength::default(),
        }
    }

    /// Per-pair, per-generation event probability.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Tract length range.
    #[inline]
    pub fn tract(&self) -> TractLength {
        self.tract
    }

    /// Draw a tract start in a locus of `length` sites.
    ///
    /// Starts are uniform in `[0, length - tract_length)`. When the tract is
    /// at least as long as the locus the start is 0 and the tract is cut at
    /// the locus end when applied.
    #[inline]
    pub fn sample_start<R: Rng + ?Sized>(
        &self,
        length: usize,
        tract_length: usize,
        rng: &mut R,
    ) -> usize {
        let span = length.saturating_sub(tract_length).max(1);
        rng.random_range(0..span)
    }

    /// Decide whether `recipient` receives a tract from `donor` this
    /// generation and, if so, sample its geometry.
    pub fn sample_event<R: Rng + ?Sized>(
        &self,
        genome: &Genome,
        recipient: usize,
        donor: usize,
        rng: &mut R,
    ) -> Option<ConversionEvent> {
        if rng.random::<f64>() >= self.rate {
            return None;
        }
        let copy = genome.get(recipient)?;
        let tract_length = self.tract.sample(rng);
        let short_start = self.sample_start(copy.locus(LocusKind::Short).len(), tract_length, rng);
        let long_start = self.sample_start(copy.locus(LocusKind::Long).len(), tract_length, rng);
        Some(ConversionEvent {
            recipient,
            donor,
            tract_length,
            short_start,
            long_start,
        })
    }

    /// Overwrite the recipient's tract in both loci with the donor's states.
    ///
    /// Tracts are cut at the locus end. Returns the number of sites copied;
    /// events naming the same copy twice or unknown copies copy nothing.
    pub fn apply_event(&self, genome: &mut Genome, event: &ConversionEvent) -> usize {
        let Some((recipient, donor)) = genome.pair_mut(event.recipient, event.donor) else {
            return 0;
        };
        LocusKind::ALL
            .iter()
            .map(|&kind| {
                let start = event.start(kind);
                recipient.locus_mut(kind).copy_tract_from(
                    donor.locus(kind),
                    start,
                    start + event.tract_length,
                )
            })
            .sum()
    }

    /// Apply one generation of gene conversion to `genome`.
    ///
    /// All ordered pairs are visited, recipient-major in copy order, and
    /// each event sees the genome as left by the events before it. Returns
    /// the number of events applied.
    pub fn convert_genome<R: Rng + ?Sized>(&self, genome: &mut Genome, rng: &mut R) -> usize {
        if self.rate <= 0.0 {
            return 0;
        }
        let n = genome.len();
        let mut count = 0;
        for recipient in 0..n {
            for donor in 0..n {
                if donor == recipient {
                    continue;
                }
                if let Some(event) = self.sample_event(genome, recipient, donor, rng) {
                    self.apply_event(genome, &event);
                    count += 1;
                }
            }
        }
        count
    }
}

impl Default for GeneConversionModel {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{GenomeLayout, OperonCopy};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn two_copy_genome(short: usize, long: usize) -> Genome {
        let copies = vec![
            OperonCopy::reference("ref", short, long),
            OperonCopy::new(
                "other",
                "1".repeat(short).parse().unwrap(),
                "2".repeat(long).parse().unwrap(),
            ),
        ];
        Genome::from_copies(copies, 0).unwrap()
    }

    #[test]
    fn test_tract_length_validation() {
        assert!(TractLength::new(50, 200).is_ok());
        assert_eq!(
            TractLength::new(0, 10),
            Err(ParameterError::InvalidTractRange { min: 0, max: 10 })
        );
        assert!(TractLength::new(10, 10).is_err());
        assert!(TractLength::new(20, 10).is_err());
    }

    #[test]
    fn test_tract_length_sampling_range() {
        let tract = TractLength::default();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut seen_min = usize::MAX;
        let mut seen_max = 0;
        for _ in 0..20_000 {
            let len = tract.sample(&mut rng);
            assert!((50..200).contains(&len));
            seen_min = seen_min.min(len);
            seen_max = seen_max.max(len);
        }
        assert_eq!(seen_min, 50);
        assert_eq!(seen_max, 199);
    }

    #[test]
    fn test_new_validates_rate() {
        assert!(GeneConversionModel::new(8.6e-6).is_ok());
        assert!(GeneConversionModel::new(0.0).is_ok());
        assert!(GeneConversionModel::new(-0.1).is_err());
        assert!(GeneConversionModel::new(2.0).is_err());
    }

    #[test]
    fn test_sample_start_in_range() {
        let model = GeneConversionModel::new(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        for _ in 0..5000 {
            let start = model.sample_start(1541, 199, &mut rng);
            assert!(start < 1541 - 199);
        }
    }

    #[test]
    fn test_sample_start_clamped_for_short_locus() {
        let model = GeneConversionModel::new(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(model.sample_start(30, 100, &mut rng), 0);
            assert_eq!(model.sample_start(100, 100, &mut rng), 0);
        }
    }

    #[test]
    fn test_apply_event_replaces_tract() {
        let model = GeneConversionModel::new(1.0).unwrap();
        let mut genome = two_copy_genome(10, 12);
        let event = ConversionEvent {
            recipient: 0,
            donor: 1,
            tract_length: 3,
            short_start: 2,
            long_start: 8,
        };

        let copied = model.apply_event(&mut genome, &event);

        assert_eq!(copied, 6);
        let recipient = genome.get(0).unwrap();
        assert_eq!(recipient.locus(LocusKind::Short).to_string(), "0011100000");
        assert_eq!(recipient.locus(LocusKind::Long).to_string(), "000000002220");
        // Donor untouched
        assert_eq!(genome.get(1).unwrap().locus(LocusKind::Short).to_string(), "1111111111");
    }

    #[test]
    fn test_apply_event_clamps_to_locus_end() {
        let model = GeneConversionModel::new(1.0).unwrap();
        let mut genome = two_copy_genome(20, 40);
        let event = ConversionEvent {
            recipient: 0,
            donor: 1,
            tract_length: 150,
            short_start: 0,
            long_start: 0,
        };

        let copied = model.apply_event(&mut genome, &event);

        assert_eq!(copied, 60);
        let recipient = genome.get(0).unwrap();
        assert_eq!(recipient.locus(LocusKind::Short).len(), 20);
        assert_eq!(recipient.locus(LocusKind::Long).len(), 40);
        assert_eq!(recipient.divergence(genome.get(1).unwrap()), 0.0);
    }

    #[test]
    fn test_sampled_events_on_short_loci_stay_in_bounds() {
        let model = GeneConversionModel::new(1.0).unwrap();
        let mut genome = two_copy_genome(30, 45);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(17);

        for _ in 0..200 {
            let event = model.sample_event(&genome, 0, 1, &mut rng).unwrap();
            assert!(event.tract_length >= 50);
            assert_eq!(event.short_start, 0);
            assert_eq!(event.long_start, 0);
            model.apply_event(&mut genome, &event);
        }
        assert_eq!(genome.get(0).unwrap().locus(LocusKind::Short).len(), 30);
    }

    #[test]
    fn test_self_pair_is_noop() {
        let model = GeneConversionModel::new(1.0).unwrap();
        let mut genome = two_copy_genome(10, 10);
        let event = ConversionEvent {
            recipient: 1,
            donor: 1,
            tract_length: 5,
            short_start: 0,
            long_start: 0,
        };
        assert_eq!(model.apply_event(&mut genome, &event), 0);
    }

    #[test]
    fn test_zero_rate_never_converts() {
        let model = GeneConversionModel::none();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let mut genome = Genome::initialize(&GenomeLayout::default(), 0.05, &mut rng).unwrap();
        let before = genome.clone();
        for _ in 0..100 {
            assert_eq!(model.convert_genome(&mut genome, &mut rng), 0);
        }
        assert_eq!(genome, before);
    }

    #[test]
    fn test_certain_conversion_visits_every_ordered_pair() {
        let model = GeneConversionModel::new(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let mut genome = Genome::uniform(&GenomeLayout::default()).unwrap();
        assert_eq!(model.convert_genome(&mut genome, &mut rng), 42);
    }

    #[test]
    fn test_conversion_never_increases_recipient_donor_divergence() {
        let model = GeneConversionModel::new(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(23);
        let mut genome = Genome::initialize(&GenomeLayout::default(), 0.2, &mut rng).unwrap();

        for _ in 0..200 {
            let recipient = rng.random_range(0..genome.len());
            let donor = (recipient + 1 + rng.random_range(0..genome.len() - 1)) % genome.len();
            let before = genome.pairwise_divergence(recipient, donor).unwrap();
            let event = model.sample_event(&genome, recipient, donor, &mut rng).unwrap();
            model.apply_event(&mut genome, &event);
            let after = genome.pairwise_divergence(recipient, donor).unwrap();
            assert!(after <= before);
        }
    }
}
