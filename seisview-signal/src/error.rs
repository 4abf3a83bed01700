//! Generator errors

use thiserror::Error;

/// Generator result type
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Precondition violations reported by the generator.
///
/// Nothing is generated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("{dimension} must be positive")]
    EmptyDimension { dimension: &'static str },

    #[error("waveform of {count} samples does not fit in memory")]
    TooLong { count: usize },

    #[error("spectrogram of {rows} x {cols} cells does not fit in memory")]
    TooLarge { rows: usize, cols: usize },
}
