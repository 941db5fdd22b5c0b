//! Error types for mesh decimation operations.

use mesh_types::MeshError;
use thiserror::Error;

/// Errors that can occur during decimation operations.
#[derive(Debug, Error)]
pub enum DecimateError {
    /// The input mesh breaks the indexed-mesh invariants.
    #[error(transparent)]
    Geometry(#[from] MeshError),

    /// Invalid target ratio.
    #[error("Invalid target ratio: {0} (must be between 0.0 and 1.0)")]
    InvalidRatio(f64),
}

/// Result type for decimation operations.
pub type DecimateResult<T> = std::result::Result<T, DecimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecimateError::InvalidRatio(1.5);
        assert!(format!("{err}").contains("1.5"));

        let err = DecimateError::from(MeshError::IndexBufferLength { len: 4 });
        assert!(format!("{err}").contains("multiple of 3"));
    }
}
