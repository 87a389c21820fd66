//! Evolution module providing the two neutral processes of the model.
//!
//! - **Mutation**: at most one cyclic point substitution per locus per copy
//!   per generation
//! - **Gene conversion**: unidirectional tract copying between ordered pairs
//!   of operon copies

pub mod conversion;
pub mod mutation;

pub use conversion::{ConversionEvent, GeneConversionModel, TractLength};
pub use mutation::MutationModel;
