//! Error types for mesh repair operations.

use mesh_types::MeshError;
use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur during mesh repair.
#[derive(Debug, Error)]
pub enum RepairError {
    /// The input mesh has no positions or breaks the indexed-mesh invariants.
    #[error(transparent)]
    Geometry(#[from] MeshError),

    /// A vertex position contains NaN or infinity.
    #[error("vertex {index} has a non-finite position")]
    NonFiniteVertex {
        /// Index of the first offending vertex.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RepairError::NonFiniteVertex { index: 7 };
        assert!(err.to_string().contains("vertex 7"));

        let err = RepairError::from(MeshError::MissingPositions);
        assert_eq!(err.to_string(), MeshError::MissingPositions.to_string());
    }
}
