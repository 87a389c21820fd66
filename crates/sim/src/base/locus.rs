use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SiteState;
use crate::errors::InvalidLocus;

/// The two loci carried by every operon copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocusKind {
    /// Small-subunit gene (16S-like).
    Short,
    /// Large-subunit gene (23S-like).
    Long,
}

impl LocusKind {
    /// Both kinds, in the order they are processed within a generation.
    pub const ALL: [LocusKind; 2] = [LocusKind::Short, LocusKind::Long];

    /// Short name used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            LocusKind::Short => "short",
            LocusKind::Long => "long",
        }
    }
}

impl fmt::Display for LocusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-length sequence of site states.
///
/// Loci never change length during a simulation: mutation rewrites a single
/// site and gene conversion overwrites a tract in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locus(Vec<SiteState>);

impl Locus {
    /// Create a locus of `len` sites, all in the reference state.
    pub fn reference(len: usize) -> Self {
        Self(vec![SiteState::REFERENCE; len])
    }

    /// Create a locus from a vector of site states.
    pub fn from_states(states: Vec<SiteState>) -> Self {
        Self(states)
    }

    /// Number of sites.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if the locus has no sites.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the state at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<SiteState> {
        self.0.get(index).copied()
    }

    /// Borrow the underlying slice.
    #[inline]
    pub fn as_slice(&self) -> &[SiteState] {
        &self.0
    }

    /// Borrow the mutable underlying slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [SiteState] {
        &mut self.0
    }

    /// Number of positions at which `self` and `other` differ.
    ///
    /// Only the overlapping prefix is compared; loci of one kind always share
    /// a length inside a genome.
    #[inline]
    pub fn differences(&self, other: &Locus) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Number of sites not in the reference state.
    pub fn non_reference_sites(&self) -> usize {
        self.0.iter().filter(|s| !s.is_reference()).count()
    }

    /// Overwrite `[start, end)` with the donor's states at the same positions.
    ///
    /// `end` is clamped to both lengths; an empty or inverted range is a
    /// no-op. Returns the number of sites copied.
    pub fn copy_tract_from(&mut self, donor: &Locus, start: usize, end: usize) -> usize {
        let end = end.min(self.len()).min(donor.len());
        if start >= end {
            return 0;
        }
        self.0[start..end].copy_from_slice(&donor.0[start..end]);
        end - start
    }
}

impl FromStr for Locus {
    type Err = InvalidLocus;

    /// Parse a locus written as a string of state digits, e.g. `"0120"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidLocus::Empty);
        }
        s.chars()
            .map(|c| {
                c.to_digit(10)
                    .and_then(|d| SiteState::from_index(d as u8))
                    .ok_or(InvalidLocus::InvalidChar(c))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in &self.0 {
            write!(f, "{state}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_locus() {
        let locus = Locus::reference(10);
        assert_eq!(locus.len(), 10);
        assert!(locus.as_slice().iter().all(|s| s.is_reference()));
        assert_eq!(locus.non_reference_sites(), 0);
    }

    #[test]
    fn test_from_str_roundtrip_display() {
        let locus: Locus = "01230".parse().unwrap();
        assert_eq!(locus.len(), 5);
        assert_eq!(locus.to_string(), "01230");
        assert_eq!(locus.non_reference_sites(), 3);
    }

    #[test]
    fn test_from_str_invalid() {
        assert_eq!("014".parse::<Locus>(), Err(InvalidLocus::InvalidChar('4')));
        assert_eq!("0a".parse::<Locus>(), Err(InvalidLocus::InvalidChar('a')));
        assert_eq!("".parse::<Locus>(), Err(InvalidLocus::Empty));
    }

    #[test]
    fn test_differences() {
        let a: Locus = "0000".parse().unwrap();
        let b: Locus = "0120".parse().unwrap();
        assert_eq!(a.differences(&b), 2);
        assert_eq!(b.differences(&a), 2);
        assert_eq!(a.differences(&a), 0);
    }

    #[test]
    fn test_copy_tract_basic() {
        let mut recipient: Locus = "0000".parse().unwrap();
        let donor: Locus = "1111".parse().unwrap();

        let copied = recipient.copy_tract_from(&donor, 1, 3);

        assert_eq!(copied, 2);
        assert_eq!(recipient.to_string(), "0110");
    }

    #[test]
    fn test_copy_tract_clamps_end() {
        let mut recipient: Locus = "0000".parse().unwrap();
        let donor: Locus = "2222".parse().unwrap();

        let copied = recipient.copy_tract_from(&donor, 2, 200);

        assert_eq!(copied, 2);
        assert_eq!(recipient.to_string(), "0022");
    }

    #[test]
    fn test_copy_tract_empty_range() {
        let mut recipient: Locus = "0000".parse().unwrap();
        let donor: Locus = "3333".parse().unwrap();

        assert_eq!(recipient.copy_tract_from(&donor, 3, 3), 0);
        assert_eq!(recipient.copy_tract_from(&donor, 10, 12), 0);
        assert_eq!(recipient.to_string(), "0000");
    }

    #[test]
    fn test_locus_kind_names() {
        assert_eq!(LocusKind::Short.to_string(), "short");
        assert_eq!(LocusKind::Long.name(), "long");
    }
}
