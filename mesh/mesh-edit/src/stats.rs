//! Read-only mesh statistics.

use mesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology};

/// Vertex and triangle counts plus the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
    /// Axis-aligned bounds, `None` for a mesh without vertices.
    pub bounds: Option<Aabb>,
}

impl std::fmt::Display for MeshStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles",
            self.vertex_count, self.triangle_count
        )?;
        if let Some(b) = self.bounds {
            write!(
                f,
                ", bounds ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
                b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
            )?;
        }
        Ok(())
    }
}

/// Compute [`MeshStats`] for `mesh`.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_edit::mesh_stats;
///
/// let stats = mesh_stats(&unit_cube());
/// assert_eq!(stats.vertex_count, 8);
/// assert_eq!(stats.triangle_count, 12);
/// ```
#[must_use]
pub fn mesh_stats(mesh: &IndexedMesh) -> MeshStats {
    MeshStats {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.face_count(),
        bounds: mesh.bounds_opt(),
    }
}
