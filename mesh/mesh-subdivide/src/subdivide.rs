//! Midpoint subdivision.

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3, Vertex};
use tracing::debug;

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::result::SubdivisionResult;

/// Subdivide a mesh `params.levels` times.
///
/// Each level replaces every triangle `(v0, v1, v2)` with
/// `(v0, m01, m20)`, `(v1, m12, m01)`, `(v2, m20, m12)` and
/// `(m01, m12, m20)`, where `mij` is the shared midpoint of edge `vi-vj`.
/// Vertex normals are recomputed afterwards. Zero levels, or a point set
/// with no faces, returns the input unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh has no vertex positions or breaks the index invariants
/// - The resulting mesh would exceed `max_faces`
///
/// # Examples
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// let result = subdivide_mesh(&mesh, &SubdivideParams::default())?;
///
/// // 3 corners + 3 edge midpoints
/// assert_eq!(result.final_faces, 4);
/// assert_eq!(result.final_vertices, 6);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &IndexedMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    mesh.require_positions()?;
    mesh.validate()?;

    let original_faces = mesh.faces.len();
    let original_vertices = mesh.vertices.len();

    let projected = params.expected_faces(original_faces);
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: original_faces,
            projected,
            max: params.max_faces,
        });
    }

    if params.levels == 0 || original_faces == 0 {
        debug!(
            levels = params.levels,
            faces = original_faces,
            "Nothing to subdivide"
        );
        return Ok(SubdivisionResult {
            mesh: mesh.clone(),
            original_faces,
            final_faces: original_faces,
            original_vertices,
            final_vertices: original_vertices,
            levels: 0,
        });
    }

    debug!(
        faces = original_faces,
        vertices = original_vertices,
        levels = params.levels,
        "Subdividing mesh"
    );

    let mut current = mesh.clone();
    for level in 0..params.levels {
        current = subdivide_once(&current).ok_or(SubdivideError::MeshTooLarge {
            current: original_faces,
            projected,
            max: params.max_faces,
        })?;
        debug!(
            level = level + 1,
            faces = current.faces.len(),
            vertices = current.vertices.len(),
            "Subdivision level complete"
        );
    }
    current.compute_vertex_normals();

    Ok(SubdivisionResult {
        final_faces: current.faces.len(),
        final_vertices: current.vertices.len(),
        mesh: current,
        original_faces,
        original_vertices,
        levels: params.levels,
    })
}

/// Split each triangle into 4 by adding edge midpoints.
///
/// `None` if the new vertices don't fit in `u32` indices.
fn subdivide_once(mesh: &IndexedMesh) -> Option<IndexedMesh> {
    let mut vertices = mesh.vertices.clone();
    let mut faces = Vec::with_capacity(mesh.faces.len() * 4);

    // Edge (sorted vertex indices) -> midpoint vertex index
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    for &[v0, v1, v2] in &mesh.faces {
        let m01 = midpoint_index(v0, v1, &mut vertices, &mut midpoints)?;
        let m12 = midpoint_index(v1, v2, &mut vertices, &mut midpoints)?;
        let m20 = midpoint_index(v2, v0, &mut vertices, &mut midpoints)?;

        // Corner triangles
        faces.push([v0, m01, m20]);
        faces.push([v1, m12, m01]);
        faces.push([v2, m20, m12]);
        // Center triangle
        faces.push([m01, m12, m20]);
    }

    Some(IndexedMesh::from_parts(vertices, faces))
}

/// Index of the midpoint of edge `a-b`, emitting the vertex on first use.
fn midpoint_index(
    a: u32,
    b: u32,
    vertices: &mut Vec<Vertex>,
    midpoints: &mut HashMap<(u32, u32), u32>,
) -> Option<u32> {
    let edge = normalize_edge(a, b);
    if let Some(&index) = midpoints.get(&edge) {
        return Some(index);
    }

    let index = next_vertex_index(vertices.len())?;
    let p0 = vertices[a as usize].position;
    let p1 = vertices[b as usize].position;
    vertices.push(Vertex::new(Point3::from((p0.coords + p1.coords) * 0.5)));
    midpoints.insert(edge, index);
    Some(index)
}

/// Index a vertex pushed onto `len` existing ones would get.
fn next_vertex_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

/// Normalize edge so smaller vertex index comes first.
const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 <= v1 { (v0, v1) } else { (v1, v0) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshError, VertexAdjacency, unit_cube};

    fn make_triangle() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh
    }

    fn make_two_triangles() -> IndexedMesh {
        let mut mesh = make_triangle();
        mesh.vertices.push(Vertex::from_coords(1.5, 1.0, 0.0));
        mesh.faces.push([1, 3, 2]);
        mesh
    }

    #[test]
    fn test_subdivide_missing_positions() {
        let result = subdivide_mesh(&IndexedMesh::new(), &SubdivideParams::default());
        assert!(matches!(
            result,
            Err(SubdivideError::Geometry(MeshError::MissingPositions))
        ));
    }

    #[test]
    fn test_subdivide_point_set_is_identity() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        let result = subdivide_mesh(&mesh, &SubdivideParams::default()).unwrap();
        assert_eq!(result.mesh, mesh);
        assert!(!result.was_subdivided());
    }

    #[test]
    fn test_subdivide_zero_levels_is_identity() {
        let cube = unit_cube();
        let result = subdivide_mesh(&cube, &SubdivideParams::new().with_levels(0)).unwrap();
        assert_eq!(result.mesh, cube);
        assert_eq!(result.levels, 0);
    }

    #[test]
    fn test_subdivide_too_large() {
        let mesh = make_triangle();
        let params = SubdivideParams::new().with_levels(2).with_max_faces(10); // 1 * 4^2 = 16 > 10
        let result = subdivide_mesh(&mesh, &params);
        assert!(matches!(
            result,
            Err(SubdivideError::MeshTooLarge {
                current: 1,
                projected: 16,
                max: 10
            })
        ));
    }

    #[test]
    fn test_subdivide_single_triangle() {
        let result = subdivide_mesh(&make_triangle(), &SubdivideParams::new()).unwrap();

        assert_eq!(result.final_faces, 4);
        assert_eq!(result.final_vertices, 6);
        assert!(result.mesh.validate().is_ok());

        let m01 = result.mesh.vertices[3].position;
        assert_relative_eq!(m01.x, 0.5);
        assert_relative_eq!(m01.y, 0.0);
    }

    #[test]
    fn test_subdivide_shared_edge() {
        let result = subdivide_mesh(&make_two_triangles(), &SubdivideParams::new()).unwrap();

        assert_eq!(result.final_faces, 8);
        // 4 original + 5 edge midpoints (one shared edge)
        assert_eq!(result.final_vertices, 9);
    }

    #[test]
    fn test_subdivide_cube_levels() {
        let cube = unit_cube();
        let one = subdivide_mesh(&cube, &SubdivideParams::new().with_levels(1)).unwrap();
        let two = subdivide_mesh(&cube, &SubdivideParams::new().with_levels(2)).unwrap();

        assert_eq!(one.final_faces, 48);
        assert_eq!(two.final_faces, 192);
        assert_eq!(
            one.added_vertices(),
            VertexAdjacency::build(&cube).edge_count()
        );
    }

    #[test]
    fn test_subdivide_keeps_shape_and_normals() {
        let cube = unit_cube();
        let result = subdivide_mesh(&cube, &SubdivideParams::new().with_levels(2)).unwrap();

        assert_relative_eq!(result.mesh.signed_volume(), 1.0, epsilon = 1e-10);
        assert!(result.mesh.vertices.iter().all(|v| v.normal().is_some()));
    }

    #[test]
    fn test_midpoint_reused_across_faces() {
        let mut vertices = make_triangle().vertices;
        let mut midpoints = HashMap::new();

        let first = midpoint_index(0, 1, &mut vertices, &mut midpoints).unwrap();
        let again = midpoint_index(1, 0, &mut vertices, &mut midpoints).unwrap();
        assert_eq!(first, 3);
        assert_eq!(again, first);
        assert_eq!(vertices.len(), 4);
    }

    #[test]
    fn test_next_vertex_index_stops_at_u32() {
        assert_eq!(next_vertex_index(0), Some(0));
        assert_eq!(next_vertex_index(7), Some(7));
        assert_eq!(next_vertex_index(u32::MAX as usize), Some(u32::MAX));
        if let Ok(len) = usize::try_from(u64::from(u32::MAX) + 1) {
            assert_eq!(next_vertex_index(len), None);
        }
    }

    #[test]
    fn test_normalize_edge() {
        assert_eq!(normalize_edge(0, 1), (0, 1));
        assert_eq!(normalize_edge(1, 0), (0, 1));
        assert_eq!(normalize_edge(5, 3), (3, 5));
    }
}
