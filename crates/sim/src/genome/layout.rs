//! Static shape of a genome: locus lengths and operon copy labels.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::base::LocusKind;
use crate::errors::ParameterError;

/// Length of the short (16S-like) locus in sites.
pub const SHORT_LOCUS_LENGTH: usize = 1541;
/// Length of the long (23S-like) locus in sites.
pub const LONG_LOCUS_LENGTH: usize = 2904;
/// Operon copy labels of the default genome.
pub const DEFAULT_COPIES: [&str; 7] = ["rrnA", "rrnB", "rrnC", "rrnD", "rrnE", "rrnG", "rrnH"];
/// Label of the default reference copy.
pub const DEFAULT_REFERENCE: &str = "rrnB";

/// Locus lengths and operon copy labels shared by every genome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeLayout {
    /// Sites in the short locus
    pub short_length: usize,
    /// Sites in the long locus
    pub long_length: usize,
    /// Operon copy labels, in processing order
    pub copies: Vec<String>,
    /// Label of the reference copy
    pub reference: String,
}

impl Default for GenomeLayout {
    fn default() -> Self {
        Self {
            short_length: SHORT_LOCUS_LENGTH,
            long_length: LONG_LOCUS_LENGTH,
            copies: DEFAULT_COPIES.iter().map(|c| c.to_string()).collect(),
            reference: DEFAULT_REFERENCE.to_string(),
        }
    }
}

impl GenomeLayout {
    /// Create a layout, validating lengths and labels.
    pub fn new(
        short_length: usize,
        long_length: usize,
        copies: Vec<String>,
        reference: impl Into<String>,
    ) -> Result<Self, ParameterError> {
        let layout = Self {
            short_length,
            long_length,
            copies,
            reference: reference.into(),
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check every layout invariant.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.short_length == 0 {
            return Err(ParameterError::EmptyLocus(LocusKind::Short.name()));
        }
        if self.long_length == 0 {
            return Err(ParameterError::EmptyLocus(LocusKind::Long.name()));
        }
        if self.copies.is_empty() {
            return Err(ParameterError::NoCopies);
        }
        let mut seen = HashSet::with_capacity(self.copies.len());
        for label in &self.copies {
            if !seen.insert(label.as_str()) {
                return Err(ParameterError::DuplicateCopy(label.clone()));
            }
        }
        if self.reference_index().is_none() {
            return Err(ParameterError::UnknownReference(self.reference.clone()));
        }
        Ok(())
    }

    /// Length of the given locus kind.
    #[inline]
    pub fn length(&self, kind: LocusKind) -> usize {
        match kind {
            LocusKind::Short => self.short_length,
            LocusKind::Long => self.long_length,
        }
    }

    /// Combined number of sites across both loci.
    #[inline]
    pub fn total_length(&self) -> usize {
        self.short_length + self.long_length
    }

    /// Number of operon copies.
    #[inline]
    pub fn copy_count(&self) -> usize {
        self.copies.len()
    }

    /// Position of the reference copy in `copies`.
    pub fn reference_index(&self) -> Option<usize> {
        self.copies.iter().position(|c| *c == self.reference)
    }

    /// Split a number of differing sites between the two loci in proportion
    /// to their lengths. The short locus gets the floor of its share, the
    /// long locus the remainder.
    pub fn split_sites(&self, total: usize) -> (usize, usize) {
        let share = self.short_length as f64 / self.total_length() as f64;
        let short = (total as f64 * share).floor() as usize;
        (short, total - short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = GenomeLayout::default();
        assert_eq!(layout.copy_count(), 7);
        assert_eq!(layout.total_length(), 4445);
        assert_eq!(layout.reference_index(), Some(1));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_split_sites() {
        let layout = GenomeLayout::default();
        // floor(4445 * 0.002) = 8; floor(8 * 1541 / 4445) = 2
        assert_eq!(layout.split_sites(8), (2, 6));
        assert_eq!(layout.split_sites(0), (0, 0));
    }

    #[test]
    fn test_invalid_layouts() {
        let copies = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            GenomeLayout::new(0, 10, copies.clone(), "a"),
            Err(ParameterError::EmptyLocus("short"))
        );
        assert_eq!(
            GenomeLayout::new(10, 0, copies.clone(), "a"),
            Err(ParameterError::EmptyLocus("long"))
        );
        assert_eq!(
            GenomeLayout::new(10, 10, vec![], "a"),
            Err(ParameterError::NoCopies)
        );
        assert_eq!(
            GenomeLayout::new(10, 10, copies.clone(), "z"),
            Err(ParameterError::UnknownReference("z".into()))
        );
        assert_eq!(
            GenomeLayout::new(10, 10, vec!["a".into(), "a".into()], "a"),
            Err(ParameterError::DuplicateCopy("a".into()))
        );
    }
}
