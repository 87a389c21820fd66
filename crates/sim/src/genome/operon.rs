use std::sync::Arc;

use crate::base::{Locus, LocusKind};

/// One operon copy: a short locus and a long locus under a fixed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperonCopy {
    label: Arc<str>,
    short: Locus,
    long: Locus,
}

impl OperonCopy {
    /// Create a copy from its two loci.
    pub fn new(label: impl Into<Arc<str>>, short: Locus, long: Locus) -> Self {
        Self {
            label: label.into(),
            short,
            long,
        }
    }

    /// Create a copy with every site in the reference state.
    pub fn reference(label: impl Into<Arc<str>>, short_length: usize, long_length: usize) -> Self {
        Self::new(
            label,
            Locus::reference(short_length),
            Locus::reference(long_length),
        )
    }

    /// Copy label (e.g. `rrnB`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Borrow one of the two loci.
    #[inline]
    pub fn locus(&self, kind: LocusKind) -> &Locus {
        match kind {
            LocusKind::Short => &self.short,
            LocusKind::Long => &self.long,
        }
    }

    /// Mutably borrow one of the two loci.
    #[inline]
    pub fn locus_mut(&mut self, kind: LocusKind) -> &mut Locus {
        match kind {
            LocusKind::Short => &mut self.short,
            LocusKind::Long => &mut self.long,
        }
    }

    /// Combined number of sites across both loci.
    #[inline]
    pub fn total_length(&self) -> usize {
        self.short.len() + self.long.len()
    }

    /// Number of sites, across both loci, that differ from `other`.
    #[inline]
    pub fn differences(&self, other: &OperonCopy) -> usize {
        self.short.differences(&other.short) + self.long.differences(&other.long)
    }

    /// Fraction of sites, across both loci, that differ from `other`.
    pub fn divergence(&self, other: &OperonCopy) -> f64 {
        let total = self.total_length();
        if total == 0 {
            return 0.0;
        }
        self.differences(other) as f64 / total as f64
    }

    /// Fraction of sites in one locus that differ from `other`.
    pub fn locus_divergence(&self, other: &OperonCopy, kind: LocusKind) -> f64 {
        let locus = self.locus(kind);
        if locus.is_empty() {
            return 0.0;
        }
        locus.differences(other.locus(kind)) as f64 / locus.len() as f64
    }
}
