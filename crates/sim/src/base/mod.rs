//! Base types for locus representation.
//!
//! Sites carry one of four discrete states. Only "same" versus "different"
//! matters to the model; the states are not tied to particular nucleotides.

mod locus;
mod site;

pub use locus::{Locus, LocusKind};
pub use site::SiteState;
