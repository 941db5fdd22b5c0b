//! Edge and vertex to face lookups.

use hashbrown::HashMap;

/// Face incidence of every edge and vertex of a triangle list.
///
/// Edges are undirected: `(a, b)` and `(b, a)` resolve to the same entry.
/// An edge with one face is a boundary edge, an edge with more than two is
/// non-manifold.
#[derive(Debug, Clone, Default)]
pub struct MeshAdjacency {
    edge_faces: HashMap<(u32, u32), Vec<usize>>,
    vertex_faces: HashMap<u32, Vec<usize>>,
}

impl MeshAdjacency {
    /// Index the faces of a triangle list.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_repair::MeshAdjacency;
    ///
    /// // Two triangles forming a quad.
    /// let adjacency = MeshAdjacency::build(&[[0, 1, 2], [0, 2, 3]]);
    ///
    /// assert_eq!(adjacency.edge_count(), 5);
    /// assert_eq!(adjacency.boundary_edge_count(), 4);
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut adjacency = Self::default();

        for (face_idx, &face) in faces.iter().enumerate() {
            for (a, b) in directed_edges(face) {
                adjacency
                    .edge_faces
                    .entry(undirected(a, b))
                    .or_default()
                    .push(face_idx);
                adjacency.vertex_faces.entry(a).or_default().push(face_idx);
            }
        }

        adjacency
    }

    /// Faces sharing the edge between `a` and `b`, if the edge exists.
    #[must_use]
    pub fn faces_for_edge(&self, a: u32, b: u32) -> Option<&[usize]> {
        self.edge_faces.get(&undirected(a, b)).map(Vec::as_slice)
    }

    /// Faces using `vertex`. Empty for unreferenced vertices.
    #[must_use]
    pub fn faces_for_vertex(&self, vertex: u32) -> &[usize] {
        self.vertex_faces.get(&vertex).map_or(&[], Vec::as_slice)
    }

    /// Edges with exactly one incident face.
    pub fn boundary_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edges_with(|n| n == 1)
    }

    /// Number of boundary edges.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.boundary_edges().count()
    }

    /// Number of edges with more than two incident faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edges_with(|n| n > 2).count()
    }

    /// No edge has more than two faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count() == 0
    }

    /// Every edge has at least two faces.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.boundary_edge_count() == 0
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    /// Number of vertices referenced by at least one face.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_faces.len()
    }

    fn edges_with(&self, pred: fn(usize) -> bool) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_faces
            .iter()
            .filter(move |(_, faces)| pred(faces.len()))
            .map(|(&edge, _)| edge)
    }
}

/// The three edges of a face in winding order.
#[inline]
pub(crate) fn directed_edges([a, b, c]: [u32; 3]) -> [(u32, u32); 3] {
    [(a, b), (b, c), (c, a)]
}

/// Winding-independent key of a face: its corners in ascending order.
#[inline]
pub(crate) fn face_key(mut face: [u32; 3]) -> [u32; 3] {
    face.sort_unstable();
    face
}

#[inline]
fn undirected(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_single_triangle_is_open() {
        let adjacency = MeshAdjacency::build(&[[0, 1, 2]]);

        assert_eq!(adjacency.edge_count(), 3);
        assert_eq!(adjacency.vertex_count(), 3);
        assert_eq!(adjacency.boundary_edge_count(), 3);
        assert!(adjacency.is_manifold());
        assert!(!adjacency.is_watertight());
    }

    #[test]
    fn test_edge_lookup_ignores_direction() {
        let adjacency = MeshAdjacency::build(&[[0, 1, 2], [0, 2, 3]]);

        assert_eq!(adjacency.faces_for_edge(0, 2), adjacency.faces_for_edge(2, 0));
        assert_eq!(adjacency.faces_for_edge(0, 2).unwrap().len(), 2);
        assert_eq!(adjacency.faces_for_edge(1, 2).unwrap(), &[0]);
        assert!(adjacency.faces_for_edge(1, 3).is_none());
    }

    #[test]
    fn test_faces_for_vertex() {
        let adjacency = MeshAdjacency::build(&[[0, 1, 2], [0, 2, 3]]);

        assert_eq!(adjacency.faces_for_vertex(0), &[0, 1]);
        assert_eq!(adjacency.faces_for_vertex(3), &[1]);
        assert!(adjacency.faces_for_vertex(42).is_empty());
    }

    #[test]
    fn test_fan_around_edge_is_non_manifold() {
        let adjacency = MeshAdjacency::build(&[[0, 1, 2], [1, 0, 3], [0, 1, 4]]);

        assert_eq!(adjacency.non_manifold_edge_count(), 1);
        assert!(!adjacency.is_manifold());
    }

    #[test]
    fn test_cube_is_closed() {
        let cube = mesh_types::unit_cube();
        let adjacency = MeshAdjacency::build(&cube.faces);

        assert_eq!(adjacency.edge_count(), 18);
        assert!(adjacency.is_watertight());
        assert!(adjacency.is_manifold());
    }

    #[test]
    fn test_face_key() {
        assert_eq!(face_key([2, 0, 1]), [0, 1, 2]);
        assert_eq!(face_key([0, 2, 1]), face_key([1, 2, 0]));
    }
}
