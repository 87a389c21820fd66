//! Genome state: the full set of operon copies evolved by one run.

use rand::Rng;

use super::{GenomeLayout, OperonCopy};
use crate::base::{LocusKind, SiteState};
use crate::errors::ParameterError;

/// All operon copies of one simulated genome.
///
/// A genome is created fresh for every run, mutated in place for the run's
/// duration and dropped once its trajectory has been extracted. All copies of
/// one locus kind share a length, and the reference copy starts with every
/// site in state 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    copies: Vec<OperonCopy>,
    reference: usize,
}

impl Genome {
    /// Create a genome in which every copy, reference included, is all-zero.
    pub fn uniform(layout: &GenomeLayout) -> Result<Self, ParameterError> {
        layout.validate()?;
        let reference = layout
            .reference_index()
            .ok_or_else(|| ParameterError::UnknownReference(layout.reference.clone()))?;
        let copies = layout
            .copies
            .iter()
            .map(|label| {
                OperonCopy::reference(label.as_str(), layout.short_length, layout.long_length)
            })
            .collect();
        Ok(Self { copies, reference })
    }

    /// Create a genome with randomized initial divergence.
    ///
    /// The reference copy stays all-zero. Each other copy independently gets
    /// `floor(total_length * initial_divergence)` differing sites, split
    /// between the loci by [`GenomeLayout::split_sites`]. Positions are drawn
    /// uniformly with replacement, so colliding draws leave fewer distinct
    /// differing sites than allotted; each drawn site is set to a uniform
    /// state in {1, 2, 3}.
    pub fn initialize<R: Rng + ?Sized>(
        layout: &GenomeLayout,
        initial_divergence: f64,
        rng: &mut R,
    ) -> Result<Self, ParameterError> {
        if !(0.0..=1.0).contains(&initial_divergence) {
            return Err(ParameterError::InvalidDivergence(initial_divergence));
        }
        let mut genome = Self::uniform(layout)?;

        let differing = (layout.total_length() as f64 * initial_divergence).floor() as usize;
        let (short_sites, long_sites) = layout.split_sites(differing);

        let reference = genome.reference;
        for (idx, copy) in genome.copies.iter_mut().enumerate() {
            if idx == reference {
                continue;
            }
            scatter_differences(copy, LocusKind::Short, short_sites, rng);
            scatter_differences(copy, LocusKind::Long, long_sites, rng);
        }

        Ok(genome)
    }

    /// Build a genome directly from copies. Used by tests and tools that
    /// need hand-crafted states.
    ///
    /// Every copy must match the first copy's short and long locus lengths.
    pub fn from_copies(copies: Vec<OperonCopy>, reference: usize) -> Result<Self, ParameterError> {
        let first = copies.first().ok_or(ParameterError::NoCopies)?;
        if reference >= copies.len() {
            return Err(ParameterError::UnknownReference(reference.to_string()));
        }
        for kind in LocusKind::ALL {
            let expected = first.locus(kind).len();
            for copy in &copies {
                let found = copy.locus(kind).len();
                if found != expected {
                    return Err(ParameterError::LocusLengthMismatch {
                        copy: copy.label().to_string(),
                        kind: kind.name(),
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(Self { copies, reference })
    }

    /// Number of operon copies.
    #[inline]
    pub fn len(&self) -> usize {
        self.copies.len()
    }

    /// Return `true` if the genome has no copies.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    /// Borrow all copies.
    #[inline]
    pub fn copies(&self) -> &[OperonCopy] {
        &self.copies
    }

    /// Mutably borrow all copies.
    #[inline]
    pub fn copies_mut(&mut self) -> &mut [OperonCopy] {
        &mut self.copies
    }

    /// Get a copy by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&OperonCopy> {
        self.copies.get(index)
    }

    /// Look up a copy by label.
    pub fn by_label(&self, label: &str) -> Option<&OperonCopy> {
        self.copies.iter().find(|c| c.label() == label)
    }

    /// Index of the reference copy.
    #[inline]
    pub fn reference_index(&self) -> usize {
        self.reference
    }

    /// Borrow the reference copy.
    #[inline]
    pub fn reference(&self) -> &OperonCopy {
        &self.copies[self.reference]
    }

    /// Borrow a recipient mutably and a donor immutably at the same time.
    ///
    /// Returns `None` when the indices are equal or out of range.
    pub fn pair_mut(
        &mut self,
        recipient: usize,
        donor: usize,
    ) -> Option<(&mut OperonCopy, &OperonCopy)> {
        if recipient == donor || recipient >= self.len() || donor >= self.len() {
            return None;
        }
        if recipient < donor {
            let (head, tail) = self.copies.split_at_mut(donor);
            Some((&mut head[recipient], &tail[0]))
        } else {
            let (head, tail) = self.copies.split_at_mut(recipient);
            Some((&mut tail[0], &head[donor]))
        }
    }

    /// Divergence of each non-reference copy from the reference, in copy
    /// order.
    pub fn divergences(&self) -> Vec<f64> {
        let reference = self.reference();
        self.non_reference()
            .map(|copy| copy.divergence(reference))
            .collect()
    }

    /// Per-locus divergence of each non-reference copy from the reference.
    pub fn locus_divergences(&self, kind: LocusKind) -> Vec<f64> {
        let reference = self.reference();
        self.non_reference()
            .map(|copy| copy.locus_divergence(reference, kind))
            .collect()
    }

    /// Aggregate divergence: the mean divergence of the non-reference copies
    /// from the reference. Defined as 0.0 when there are none.
    pub fn mean_divergence(&self) -> f64 {
        mean(&self.divergences())
    }

    /// Mean per-locus divergence of the non-reference copies.
    pub fn mean_locus_divergence(&self, kind: LocusKind) -> f64 {
        mean(&self.locus_divergences(kind))
    }

    /// Divergence between two arbitrary copies.
    pub fn pairwise_divergence(&self, a: usize, b: usize) -> Option<f64> {
        Some(self.copies.get(a)?.divergence(self.copies.get(b)?))
    }

    /// Mean divergence over all unordered copy pairs, 0.0 for a single copy.
    pub fn mean_pairwise_divergence(&self) -> f64 {
        let n = self.copies.len();
        if n < 2 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                sum += self.copies[i].divergence(&self.copies[j]);
            }
        }
        sum / (n * (n - 1) / 2) as f64
    }

    fn non_reference(&self) -> impl Iterator<Item = &OperonCopy> {
        self.copies
            .iter()
            .enumerate()
            .filter(move |(idx, _)| *idx != self.reference)
            .map(|(_, copy)| copy)
    }
}

fn scatter_differences<R: Rng + ?Sized>(
    copy: &mut OperonCopy,
    kind: LocusKind,
    count: usize,
    rng: &mut R,
) {
    let sites = copy.locus_mut(kind).as_mut_slice();
    if sites.is_empty() {
        return;
    }
    for _ in 0..count {
        let pos = rng.random_range(0..sites.len());
        let state = rng.random_range(1..SiteState::COUNT);
        // from_index cannot fail for 1..=3
        if let Some(state) = SiteState::from_index(state) {
            sites[pos] = state;
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
