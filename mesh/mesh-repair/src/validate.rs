//! Mesh health reporting.

use hashbrown::HashSet;
use mesh_types::{IndexedMesh, MeshTopology};

use crate::adjacency::{MeshAdjacency, face_key};
use crate::winding::count_inconsistent_edges;

/// Faces with area below this are reported as degenerate.
const DEGENERATE_AREA: f64 = 1e-12;

/// Topology and orientation report for a mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Number of distinct undirected edges.
    pub edge_count: usize,
    /// Edges with exactly one face.
    pub boundary_edge_count: usize,
    /// Edges with more than two faces.
    pub non_manifold_edge_count: usize,
    /// Manifold edges whose faces disagree on winding.
    pub inconsistent_edge_count: usize,
    /// Faces with (near) zero area.
    pub degenerate_face_count: usize,
    /// Faces repeating an earlier face's vertex set.
    pub duplicate_face_count: usize,
    /// Vertices no face references.
    pub unreferenced_vertex_count: usize,
    /// No boundary edges.
    pub is_watertight: bool,
    /// No non-manifold edges.
    pub is_manifold: bool,
    /// Closed and enclosing negative volume.
    pub is_inside_out: bool,
}

impl MeshReport {
    /// Watertight, manifold, consistently wound and facing outward.
    #[must_use]
    pub const fn is_printable(&self) -> bool {
        self.is_watertight
            && self.is_manifold
            && self.inconsistent_edge_count == 0
            && !self.is_inside_out
    }

    /// Whether anything a repair pass could address was found.
    #[must_use]
    pub const fn has_issues(&self) -> bool {
        self.issue_count() > 0
    }

    /// Total of the per-kind issue counts.
    #[must_use]
    pub const fn issue_count(&self) -> usize {
        self.boundary_edge_count
            + self.non_manifold_edge_count
            + self.inconsistent_edge_count
            + self.degenerate_face_count
            + self.duplicate_face_count
            + self.unreferenced_vertex_count
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };

        writeln!(
            f,
            "Mesh: {} vertices, {} faces, {} edges",
            self.vertex_count, self.face_count, self.edge_count
        )?;
        writeln!(f, "  Watertight: {}", yes_no(self.is_watertight))?;
        writeln!(f, "  Manifold: {}", yes_no(self.is_manifold))?;
        writeln!(f, "  Inside-out: {}", yes_no(self.is_inside_out))?;

        for (label, count) in [
            ("Boundary edges", self.boundary_edge_count),
            ("Non-manifold edges", self.non_manifold_edge_count),
            ("Inconsistent edges", self.inconsistent_edge_count),
            ("Degenerate faces", self.degenerate_face_count),
            ("Duplicate faces", self.duplicate_face_count),
            ("Unreferenced vertices", self.unreferenced_vertex_count),
        ] {
            if count > 0 {
                writeln!(f, "  {label}: {count}")?;
            }
        }
        Ok(())
    }
}

/// Inspect a mesh without modifying it.
///
/// The mesh must satisfy the indexed-mesh invariants; call
/// [`IndexedMesh::validate`] first for untrusted input.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::validate_mesh;
///
/// let report = validate_mesh(&unit_cube());
/// assert_eq!(report.edge_count, 18);
/// assert!(report.is_printable());
/// ```
#[must_use]
pub fn validate_mesh(mesh: &IndexedMesh) -> MeshReport {
    let adjacency = MeshAdjacency::build(&mesh.faces);

    let degenerate_face_count = mesh
        .triangles()
        .filter(|tri| tri.area() < DEGENERATE_AREA)
        .count();

    let mut seen = HashSet::with_capacity(mesh.faces.len());
    let duplicate_face_count = mesh
        .faces
        .iter()
        .filter(|&&face| !seen.insert(face_key(face)))
        .count();

    let is_watertight = adjacency.is_watertight();
    let is_inside_out = !mesh.faces.is_empty() && is_watertight && mesh.signed_volume() < 0.0;

    MeshReport {
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
        edge_count: adjacency.edge_count(),
        boundary_edge_count: adjacency.boundary_edge_count(),
        non_manifold_edge_count: adjacency.non_manifold_edge_count(),
        inconsistent_edge_count: count_inconsistent_edges(mesh),
        degenerate_face_count,
        duplicate_face_count,
        unreferenced_vertex_count: mesh.vertex_count() - adjacency.vertex_count(),
        is_watertight,
        is_manifold: adjacency.is_manifold(),
        is_inside_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, unit_cube};

    fn triangle() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(10.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 10.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_open_triangle() {
        let report = validate_mesh(&triangle());

        assert_eq!(report.face_count, 1);
        assert_eq!(report.boundary_edge_count, 3);
        assert!(!report.is_watertight);
        assert!(!report.is_inside_out);
        assert!(!report.is_printable());
        assert_eq!(report.issue_count(), 3);
    }

    #[test]
    fn test_cube_is_printable() {
        let report = validate_mesh(&unit_cube());

        assert_eq!(report.vertex_count, 8);
        assert_eq!(report.face_count, 12);
        assert!(report.is_watertight);
        assert!(report.is_manifold);
        assert!(!report.has_issues());
        assert!(report.is_printable());
    }

    #[test]
    fn test_inside_out_cube() {
        let mut cube = unit_cube();
        cube.flip_winding();
        let report = validate_mesh(&cube);

        assert!(report.is_inside_out);
        assert_eq!(report.inconsistent_edge_count, 0);
        assert!(!report.is_printable());
    }

    #[test]
    fn test_counts_degenerate_duplicate_unreferenced() {
        let mut mesh = triangle();
        mesh.vertices.push(Vertex::from_coords(5.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(3.0, 3.0, 3.0));
        mesh.faces.push([2, 1, 0]);
        mesh.faces.push([0, 3, 1]);

        let report = validate_mesh(&mesh);
        assert_eq!(report.duplicate_face_count, 1);
        assert_eq!(report.degenerate_face_count, 1);
        assert_eq!(report.unreferenced_vertex_count, 1);
    }

    #[test]
    fn test_point_set() {
        let mut points = triangle();
        points.faces.clear();
        let report = validate_mesh(&points);

        assert_eq!(report.edge_count, 0);
        assert_eq!(report.unreferenced_vertex_count, 3);
        assert!(!report.is_inside_out);
    }

    #[test]
    fn test_display() {
        let text = validate_mesh(&triangle()).to_string();
        assert!(text.contains("3 vertices"));
        assert!(text.contains("Watertight: No"));
        assert!(text.contains("Boundary edges: 3"));
    }
}
