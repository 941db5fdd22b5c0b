//! Mesh editing engine for indexed triangle meshes.
//!
//! This umbrella crate re-exports the mesh-* crates behind one dependency.
//! All of them are pure in-memory computation: no file formats, rendering or
//! network code.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! let mut session = EditSession::load(mesh::types::unit_cube());
//!
//! session.apply(&Operation::Smooth { strength: 100.0, iterations: 1 })?;
//! session.apply(&Operation::Subdivide { levels: 1 })?;
//! session.apply(&Operation::Center)?;
//! assert_eq!(session.stats().triangle_count, 48);
//!
//! session.undo();
//! session.undo();
//! assert_eq!(session.stats().triangle_count, 12);
//! # Ok::<(), mesh::edit::EditError>(())
//! ```
//!
//! # Module Organization
//!
//! ## Foundation
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `Aabb`, adjacency
//! - [`transform`] - Scaling, centering and `Transform3D`
//!
//! ## Operators
//! - [`smooth`] - Laplacian smoothing
//! - [`subdivide`] - Midpoint subdivision
//! - [`decimate`] - Mesh simplification (QEM-based)
//! - [`repair`] - Validation, welding and winding repair
//!
//! ## Editing
//! - [`edit`] - Undoable sessions, stats and background edits
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for meshes, configs and reports

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`.
pub use mesh_types as types;

/// Scaling, centering and affine transforms.
pub use mesh_transform as transform;

/// Laplacian smoothing.
pub use mesh_smooth as smooth;

/// Midpoint subdivision.
pub use mesh_subdivide as subdivide;

/// Mesh simplification (QEM-based decimation).
pub use mesh_decimate as decimate;

/// Mesh validation and repair.
pub use mesh_repair as repair;

/// Undoable editing sessions.
pub use mesh_edit as edit;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh editing.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Triangle, Vertex};

    // Operators
    pub use mesh_decimate::{DecimateParams, decimate_mesh};
    pub use mesh_repair::{MeshReport, RepairParams, repair_mesh, validate_mesh};
    pub use mesh_smooth::{SmoothParams, smooth_mesh};
    pub use mesh_subdivide::{SubdivideParams, subdivide_mesh};
    pub use mesh_transform::{ScaleFactor, Transform3D, center_mesh, scale_mesh};

    // Editing
    pub use mesh_edit::{EditConfig, EditError, EditSession, MeshStats, Operation, mesh_stats};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let mesh = IndexedMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh_stats(&mesh).triangle_count, 0);
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::IndexedMesh::new();
        let _ = smooth::SmoothParams::default();
        let _ = subdivide::SubdivideParams::default();
        let _ = decimate::DecimateParams::default();
        let _ = repair::RepairParams::default();
        let _ = transform::Transform3D::identity();
        let _ = edit::EditConfig::default();
    }
}
