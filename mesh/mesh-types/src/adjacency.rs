//! Vertex-to-vertex adjacency derived from triangle connectivity.
//!
//! The graph is never stored on the mesh. Build it when needed and drop it
//! afterwards, so it cannot drift out of sync with the faces.

use hashbrown::{HashMap, HashSet};

use crate::IndexedMesh;

/// Per-vertex sets of distinct, edge-connected neighbours.
///
/// # Example
///
/// ```
/// use mesh_types::{VertexAdjacency, unit_cube};
///
/// let adj = VertexAdjacency::build(&unit_cube());
/// assert_eq!(adj.len(), 8);
/// assert_eq!(adj.edge_count(), 18);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VertexAdjacency {
    neighbors: HashMap<u32, HashSet<u32>>,
}

impl VertexAdjacency {
    /// Build the adjacency graph from the mesh faces.
    ///
    /// Each triangle `(a, b, c)` contributes the edges `a-b`, `b-c` and
    /// `c-a` in both directions. A point set yields an empty graph.
    #[must_use]
    pub fn build(mesh: &IndexedMesh) -> Self {
        let mut neighbors: HashMap<u32, HashSet<u32>> = HashMap::new();

        for &[a, b, c] in &mesh.faces {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                neighbors.entry(from).or_default().insert(to);
                neighbors.entry(to).or_default().insert(from);
            }
        }

        Self { neighbors }
    }

    /// Neighbours of `vertex`, or `None` if no face references it.
    #[must_use]
    pub fn neighbors(&self, vertex: u32) -> Option<&HashSet<u32>> {
        self.neighbors.get(&vertex)
    }

    /// Number of neighbours of `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: u32) -> usize {
        self.neighbors.get(&vertex).map_or(0, HashSet::len)
    }

    /// Number of vertices with at least one neighbour.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// True when no vertex has a neighbour.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.values().map(HashSet::len).sum::<usize>() / 2
    }
}

/// Build the vertex adjacency graph of `mesh`.
///
/// Shorthand for [`VertexAdjacency::build`].
#[must_use]
pub fn build_adjacency(mesh: &IndexedMesh) -> VertexAdjacency {
    VertexAdjacency::build(mesh)
}
