//! Error types for mask operations.

use thiserror::Error;

/// Result type for mask operations.
pub type MaskResult<T> = Result<T, MaskError>;

/// Errors that can occur during mask operations.
#[derive(Debug, Error)]
pub enum MaskError {
    /// Downsampling factor must be at least 1.
    #[error("invalid downsample factor: {factor} (must be >= 1)")]
    InvalidFactor {
        /// The rejected factor.
        factor: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_factor_message() {
        let err = MaskError::InvalidFactor { factor: 0 };
        assert_eq!(
            format!("{err}"),
            "invalid downsample factor: 0 (must be >= 1)"
        );
    }
}
