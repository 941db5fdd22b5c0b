//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshError, MeshResult, MeshTopology, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index. Cloning produces a fully independent copy; no buffer
/// is ever shared between two meshes.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Vertex>` - positions plus derived normals
/// - `faces`: `Vec<[u32; 3]>` - triangle corners as vertex indices
///
/// An empty `faces` list means the mesh is an unstructured point set.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array, CCW winding.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces without validation.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Build a mesh from flat interchange buffers.
    ///
    /// `positions` is `[x0, y0, z0, x1, ...]` and `indices` is
    /// `[a0, b0, c0, a1, ...]`. A missing index buffer produces a point set.
    /// The result is validated and carries fresh vertex normals.
    ///
    /// # Errors
    ///
    /// - [`MeshError::MissingPositions`] if `positions` is `None`
    /// - [`MeshError::PositionBufferLength`] / [`MeshError::IndexBufferLength`]
    ///   if a buffer length is not a multiple of 3
    /// - [`MeshError::InvalidIndex`] / [`MeshError::RepeatedCorner`] if a face
    ///   breaks the indexed-mesh invariants
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, MeshError};
    ///
    /// let err = IndexedMesh::from_buffers(None, Some(&[0, 1, 2])).unwrap_err();
    /// assert_eq!(err, MeshError::MissingPositions);
    ///
    /// let points = IndexedMesh::from_buffers(Some(&[0.0, 0.0, 0.0]), None)?;
    /// assert!(points.faces.is_empty());
    /// # Ok::<(), MeshError>(())
    /// ```
    pub fn from_buffers(positions: Option<&[f64]>, indices: Option<&[u32]>) -> MeshResult<Self> {
        let positions = positions.ok_or(MeshError::MissingPositions)?;
        if positions.len() % 3 != 0 {
            return Err(MeshError::PositionBufferLength {
                len: positions.len(),
            });
        }
        let indices = indices.unwrap_or(&[]);
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexBufferLength { len: indices.len() });
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        let mut mesh = Self { vertices, faces };
        mesh.validate()?;
        mesh.compute_vertex_normals();
        Ok(mesh)
    }

    /// Flatten vertex positions to `[x0, y0, z0, x1, ...]`.
    #[must_use]
    pub fn to_position_buffer(&self) -> Vec<f64> {
        self.vertices
            .iter()
            .flat_map(|v| [v.position.x, v.position.y, v.position.z])
            .collect()
    }

    /// Flatten faces to `[a0, b0, c0, a1, ...]`.
    #[must_use]
    pub fn to_index_buffer(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }

    /// Flatten vertex normals to `[nx0, ny0, nz0, ...]`.
    ///
    /// Vertices without a normal contribute a zero vector.
    #[must_use]
    pub fn to_normal_buffer(&self) -> Vec<f64> {
        self.vertices
            .iter()
            .flat_map(|v| {
                let n = v.attributes.normal.unwrap_or_else(Vector3::zeros);
                [n.x, n.y, n.z]
            })
            .collect()
    }

    /// Check that the mesh has a position buffer at all.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MissingPositions`] if there are no vertices.
    pub fn require_positions(&self) -> MeshResult<()> {
        if self.vertices.is_empty() {
            return Err(MeshError::MissingPositions);
        }
        Ok(())
    }

    /// Check the indexed-mesh invariants.
    ///
    /// Every index must be below the vertex count, and each face must
    /// reference three distinct vertices. Does not require any vertices: an
    /// empty mesh is structurally valid.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (face, &corners) in self.faces.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::InvalidIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
            let [a, b, c] = corners;
            if a == b || b == c || a == c {
                return Err(MeshError::RepeatedCorner { face, corners });
            }
        }
        Ok(())
    }

    /// Recompute area-weighted unit vertex normals from the faces.
    ///
    /// Vertices that no face references (or whose faces all have zero
    /// area) end up with `None`.
    pub fn compute_vertex_normals(&mut self) {
        let mut accum = vec![Vector3::zeros(); self.vertices.len()];

        for &[i0, i1, i2] in &self.faces {
            let tri = Triangle::new(
                self.vertices[i0 as usize].position,
                self.vertices[i1 as usize].position,
                self.vertices[i2 as usize].position,
            );
            let n = tri.normal_unnormalized();
            accum[i0 as usize] += n;
            accum[i1 as usize] += n;
            accum[i2 as usize] += n;
        }

        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            vertex.attributes.normal = n.try_normalize(f64::EPSILON);
        }
    }

    /// Reverse the winding of every face and negate stored normals.
    pub fn flip_winding(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
        for vertex in &mut self.vertices {
            if let Some(ref mut normal) = vertex.attributes.normal {
                *normal = -*normal;
            }
        }
    }

    /// Signed volume via the divergence theorem.
    ///
    /// Positive for a closed mesh with outward (CCW) winding, negative when
    /// inside-out. Not meaningful for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|t| t.v0.coords.dot(&t.v1.coords.cross(&t.v2.coords)))
            .sum::<f64>()
            / 6.0
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            self.vertices.get(i0 as usize)?.position,
            self.vertices.get(i1 as usize)?.position,
            self.vertices.get(i2 as usize)?.position,
        ))
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize].position,
            v1: self.vertices[i1 as usize].position,
            v2: self.vertices[i2 as usize].position,
        })
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// Create the unit cube fixture: (0,0,0) to (1,1,1), 8 vertices, 12 faces.
///
/// Faces wind outward and vertex normals are already computed.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(8, 12);

    for &(x, y, z) in &[
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
        (1.0, 1.0, 1.0),
        (0.0, 1.0, 1.0),
    ] {
        mesh.vertices.push(Vertex::from_coords(x, y, z));
    }

    mesh.faces.extend_from_slice(&[
        // Bottom (-Z)
        [0, 2, 1],
        [0, 3, 2],
        // Top (+Z)
        [4, 5, 6],
        [4, 6, 7],
        // Front (-Y)
        [0, 1, 5],
        [0, 5, 4],
        // Back (+Y)
        [3, 7, 6],
        [3, 6, 2],
        // Left (-X)
        [0, 4, 7],
        [0, 7, 3],
        // Right (+X)
        [1, 2, 6],
        [1, 6, 5],
    ]);

    mesh.compute_vertex_normals();
    mesh
}
