//! Result types for decimation operations.

// Triangle counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::IndexedMesh;

/// Result of mesh decimation.
#[derive(Debug, Clone)]
pub struct DecimationResult {
    /// The decimated mesh.
    pub mesh: IndexedMesh,

    /// Number of triangles in original mesh.
    pub original_triangles: usize,

    /// Triangle floor the run worked toward.
    pub target_triangles: usize,

    /// Number of triangles in decimated mesh.
    pub final_triangles: usize,

    /// Number of edge collapses performed.
    pub collapses_performed: usize,

    /// Number of edge collapses rejected (non-manifold, over budget or over error).
    pub collapses_rejected: usize,
}

impl DecimationResult {
    /// Result for a mesh that was left as is.
    pub(crate) fn unchanged(mesh: &IndexedMesh, target_triangles: usize) -> Self {
        Self {
            mesh: mesh.clone(),
            original_triangles: mesh.faces.len(),
            target_triangles,
            final_triangles: mesh.faces.len(),
            collapses_performed: 0,
            collapses_rejected: 0,
        }
    }

    /// Get the reduction ratio (final / original).
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Get the percentage of triangles removed.
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.reduction_ratio()) * 100.0
    }

    /// Check if any decimation occurred.
    #[must_use]
    pub const fn was_decimated(&self) -> bool {
        self.collapses_performed > 0
    }

    /// Check whether the target was hit exactly.
    #[must_use]
    pub const fn reached_target(&self) -> bool {
        self.final_triangles == self.target_triangles
    }
}

impl std::fmt::Display for DecimationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decimation: {} → {} triangles (target {}, {:.1}% reduction, {} collapses)",
            self.original_triangles,
            self.final_triangles,
            self.target_triangles,
            self.reduction_percent(),
            self.collapses_performed
        )
    }
}
