//! Error taxonomy for editing sessions.
//!
//! Every operator crate has its own error enum. A session folds them into two
//! kinds: the mesh itself is unusable ([`EditError::InvalidGeometry`]) or the
//! operator could not complete ([`EditError::OperationFailed`]).

use mesh_decimate::DecimateError;
use mesh_repair::RepairError;
use mesh_smooth::SmoothError;
use mesh_subdivide::SubdivideError;
use mesh_transform::TransformError;
use mesh_types::MeshError;
use thiserror::Error;

/// Result type for session operations.
pub type EditResult<T> = Result<T, EditError>;

/// Why an edit was not committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The input or output mesh lacks positions or breaks the index invariants.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry {
        /// Description of the violated invariant.
        reason: String,
    },

    /// The operator rejected its parameters or could not finish.
    #[error("{operation} failed: {reason}")]
    OperationFailed {
        /// Name of the operation.
        operation: &'static str,
        /// Description of the failure.
        reason: String,
    },
}

impl EditError {
    /// Whether this is an [`EditError::InvalidGeometry`].
    #[must_use]
    pub const fn is_invalid_geometry(&self) -> bool {
        matches!(self, Self::InvalidGeometry { .. })
    }

    pub(crate) fn failed(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation,
            reason: reason.into(),
        }
    }

    /// Classify an operator error raised while running `operation`.
    pub(crate) fn from_operator<E: OperatorError>(operation: &'static str, err: &E) -> Self {
        match err.geometry() {
            Some(geometry) => geometry.clone().into(),
            None => Self::failed(operation, err.to_string()),
        }
    }
}

impl From<MeshError> for EditError {
    fn from(err: MeshError) -> Self {
        Self::InvalidGeometry {
            reason: err.to_string(),
        }
    }
}

/// Operator errors that may wrap a [`MeshError`].
pub(crate) trait OperatorError: std::error::Error {
    /// The geometry fault, if that is what this error is.
    fn geometry(&self) -> Option<&MeshError>;
}

impl OperatorError for SmoothError {
    fn geometry(&self) -> Option<&MeshError> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::InvalidStrength(_) => None,
        }
    }
}

impl OperatorError for SubdivideError {
    fn geometry(&self) -> Option<&MeshError> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::MeshTooLarge { .. } => None,
        }
    }
}

impl OperatorError for DecimateError {
    fn geometry(&self) -> Option<&MeshError> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::InvalidRatio(_) => None,
        }
    }
}

impl OperatorError for RepairError {
    fn geometry(&self) -> Option<&MeshError> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::NonFiniteVertex { .. } => None,
        }
    }
}

impl OperatorError for TransformError {
    fn geometry(&self) -> Option<&MeshError> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::InvalidScale { .. } => None,
        }
    }
}
