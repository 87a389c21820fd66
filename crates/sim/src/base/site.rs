use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidSiteState;

/// Discrete state of a single site.
///
/// `SiteState` is a four-state abstraction of nucleotide identity backed by a
/// single byte. State 0 is the reference state every site of the reference
/// copy starts in; states 1-3 are the alternatives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(transparent)]
pub struct SiteState(u8);

impl SiteState {
    /// Number of distinct states.
    pub const COUNT: u8 = 4;

    /// State of every site in the reference copy at initialization.
    pub const REFERENCE: Self = Self(0);

    /// Convert from a u8 index (0-3).
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Option<Self> {
        if idx < Self::COUNT {
            Some(Self(idx))
        } else {
            None
        }
    }

    /// Convert to the compact u8 index (0-3).
    #[inline(always)]
    pub const fn to_index(self) -> u8 {
        self.0
    }

    /// Cyclic substitution: `(state + 1) mod 4`.
    ///
    /// Four successive substitutions at one site return it to its original
    /// state.
    #[inline(always)]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % Self::COUNT)
    }

    /// Whether this is the reference state.
    #[inline(always)]
    pub const fn is_reference(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for SiteState {
    type Error = InvalidSiteState;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(InvalidSiteState(value))
    }
}

impl From<SiteState> for u8 {
    #[inline(always)]
    fn from(state: SiteState) -> Self {
        state.0
    }
}

impl fmt::Display for SiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
