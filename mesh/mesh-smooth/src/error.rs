//! Error types for smoothing.

use mesh_types::MeshError;
use thiserror::Error;

/// Errors that can occur during smoothing.
#[derive(Debug, Error)]
pub enum SmoothError {
    /// The input mesh breaks the indexed-mesh invariants.
    #[error(transparent)]
    Geometry(#[from] MeshError),

    /// Strength outside `[0, 100]` or not finite.
    #[error("Invalid smoothing strength: {0} (must be within 0..=100)")]
    InvalidStrength(f64),
}

/// Result type for smoothing operations.
pub type SmoothResult<T> = std::result::Result<T, SmoothError>;
