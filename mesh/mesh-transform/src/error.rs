//! Error types for mesh transformation operations.

use mesh_types::MeshError;
use thiserror::Error;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur during mesh transformation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input mesh has no positions or breaks the indexed-mesh invariants.
    #[error(transparent)]
    Geometry(#[from] MeshError),

    /// A scale component is zero, NaN or infinite.
    #[error("invalid scale factor ({x}, {y}, {z}): every component must be finite and non-zero")]
    InvalidScale {
        /// X component.
        x: f64,
        /// Y component.
        y: f64,
        /// Z component.
        z: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::InvalidScale {
            x: 1.0,
            y: 0.0,
            z: 2.0,
        };
        assert!(err.to_string().contains("(1, 0, 2)"));
    }
}
