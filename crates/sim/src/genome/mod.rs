//! Genome structures: operon copies, the genome they form and its layout.

mod layout;
mod operon;
mod state;

pub use layout::{
    GenomeLayout, DEFAULT_COPIES, DEFAULT_REFERENCE, LONG_LOCUS_LENGTH, SHORT_LOCUS_LENGTH,
};
pub use operon::OperonCopy;
pub use state::Genome;
