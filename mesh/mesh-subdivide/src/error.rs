//! Error types for mesh subdivision operations.

use mesh_types::MeshError;
use thiserror::Error;

/// Errors that can occur during subdivision.
#[derive(Debug, Error)]
pub enum SubdivideError {
    /// The input mesh breaks the indexed-mesh invariants.
    #[error(transparent)]
    Geometry(#[from] MeshError),

    /// Mesh would exceed the configured face limit.
    #[error("Subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SubdivideError::from(MeshError::MissingPositions);
        assert_eq!(format!("{err}"), "mesh has no vertex positions");

        let err = SubdivideError::MeshTooLarge {
            current: 1000,
            projected: 4000,
            max: 2000,
        };
        let display = format!("{err}");
        assert!(display.contains("1000"));
        assert!(display.contains("4000"));
        assert!(display.contains("2000"));
    }
}
