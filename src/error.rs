//! Error types for the simulation core.

/// Errors surfaced by simulation construction and stepping.
#[derive(Debug)]
pub enum SimError {
    /// `tick()` was called after the population emptied.
    EpochOver,
    /// Configuration failed validation.
    InvalidConfig(String),
    /// A silhouette had no pixels, so collision tests would be meaningless.
    EmptyMask { what: &'static str },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EpochOver => write!(f, "tick() called after the epoch ended"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Self::EmptyMask { what } => write!(f, "empty collision mask: {}", what),
        }
    }
}

impl std::error::Error for SimError {}
