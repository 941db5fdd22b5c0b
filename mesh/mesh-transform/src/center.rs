//! Moving a mesh's bounding box to the origin.

use mesh_types::{IndexedMesh, MeshBounds};
use tracing::debug;

use crate::error::TransformResult;
use crate::transform::Transform3D;

/// Translate a copy of `mesh` so its bounding-box center is the origin.
///
/// Applying it twice changes nothing beyond floating-point noise.
///
/// # Errors
///
/// Returns an error if the mesh has no vertex positions or breaks the index
/// invariants.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshBounds};
/// use mesh_transform::center_mesh;
///
/// let centered = center_mesh(&unit_cube())?;
/// let bounds = centered.bounds();
/// assert_eq!(bounds.min.x, -0.5);
/// assert_eq!(bounds.max.x, 0.5);
/// # Ok::<(), mesh_transform::TransformError>(())
/// ```
pub fn center_mesh(mesh: &IndexedMesh) -> TransformResult<IndexedMesh> {
    mesh.require_positions()?;
    mesh.validate()?;

    let offset = -mesh.center().coords;
    debug!(dx = offset.x, dy = offset.y, dz = offset.z, "Centering mesh");

    Ok(Transform3D::translation(offset).apply_to_mesh(mesh))
}
