//! Result of a smoothing run.

use mesh_types::IndexedMesh;

/// Result of Laplacian smoothing.
#[derive(Debug, Clone)]
pub struct SmoothingResult {
    /// The smoothed mesh.
    pub mesh: IndexedMesh,

    /// Number of passes performed.
    pub iterations_performed: u32,

    /// Blend factor used for every pass.
    pub lambda: f64,

    /// Sum of the per-pass maximum displacements.
    pub total_displacement: f64,

    /// Maximum single vertex displacement across all passes.
    pub max_displacement: f64,
}

impl std::fmt::Display for SmoothingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Smoothing: {} passes at lambda {:.2}, max displacement {:.6}",
            self.iterations_performed, self.lambda, self.max_displacement
        )
    }
}
