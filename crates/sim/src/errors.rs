use thiserror::Error;

/// Errors raised while validating simulation parameters.
///
/// Every check happens before a run starts; a run itself has no recoverable
/// failure modes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// A per-generation probability was negative, NaN or above 1.0.
    #[error("Invalid probability for {0}: {1} (must be between 0.0 and 1.0)")]
    InvalidProbability(&'static str, f64),

    /// Initial divergence fraction outside [0, 1].
    #[error("Invalid initial divergence: {0} (must be between 0.0 and 1.0)")]
    InvalidDivergence(f64),

    /// A locus was configured with no sites.
    #[error("Locus length for {0} must be positive")]
    EmptyLocus(&'static str),

    /// The sampling interval must be at least one generation.
    #[error("Sampling interval must be positive")]
    InvalidSamplingInterval,

    /// Ensembles need at least one run.
    #[error("Run count must be positive")]
    InvalidRunCount,

    /// Gene conversion tract range is empty or starts at zero.
    #[error("Invalid tract length range [{min}, {max})")]
    InvalidTractRange { min: usize, max: usize },

    /// A genome needs at least one operon copy.
    #[error("Genome must contain at least one operon copy")]
    NoCopies,

    /// Copy labels must be unique.
    #[error("Duplicate operon copy label: {0}")]
    DuplicateCopy(String),

    /// The reference label does not name any copy.
    #[error("Reference copy '{0}' is not one of the operon copies")]
    UnknownReference(String),

    /// Copies of one locus kind must all have the same length.
    #[error("Copy '{copy}' has a {kind} locus of {found} sites, expected {expected}")]
    LocusLengthMismatch {
        copy: String,
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// A required builder field was never set.
    #[error("Missing required parameter: {0}")]
    MissingRequired(&'static str),
}

/// Errors raised while loading or storing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ParameterError),
}

/// Error returned when converting an out-of-range integer into a site state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid site state: {0} (must be 0..=3)")]
pub struct InvalidSiteState(pub u8);

/// Error type for failures when parsing a `Locus` from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidLocus {
    /// A character was not one of `0`, `1`, `2`, `3`.
    #[error("Invalid character in locus: '{0}'")]
    InvalidChar(char),

    /// The locus was empty when a non-empty locus was required.
    #[error("Empty locus not allowed")]
    Empty,
}
