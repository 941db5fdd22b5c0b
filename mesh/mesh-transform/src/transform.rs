//! Affine transforms built from scaling and translation.

use mesh_types::IndexedMesh;
use nalgebra::{Matrix4, Point3, Vector3};

/// An affine 3D transformation stored as a homogeneous 4x4 matrix.
///
/// # Example
///
/// ```
/// use mesh_transform::Transform3D;
/// use nalgebra::{Point3, Vector3};
///
/// let t = Transform3D::scale(Vector3::new(2.0, 1.0, 1.0));
/// assert_eq!(t.transform_point(&Point3::new(1.0, 1.0, 1.0)), Point3::new(2.0, 1.0, 1.0));
/// assert!(!t.reverses_orientation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    matrix: Matrix4<f64>,
}

impl Transform3D {
    /// The identity transformation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `offset`.
    #[must_use]
    pub fn translation(offset: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset),
        }
    }

    /// Per-axis scaling about the origin.
    #[must_use]
    pub fn scale(factors: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&factors),
        }
    }

    /// Determinant of the linear (upper-left 3x3) part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.matrix.fixed_view::<3, 3>(0, 0).determinant()
    }

    /// Whether the transformation mirrors space, reversing face orientation.
    #[must_use]
    pub fn reverses_orientation(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Transform a point.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }

    /// Transform every vertex of a copy of `mesh`.
    ///
    /// Mirroring transforms also reverse face winding so surfaces keep
    /// facing outward. Vertex normals are recomputed from the new geometry.
    #[must_use]
    pub fn apply_to_mesh(&self, mesh: &IndexedMesh) -> IndexedMesh {
        let mut result = mesh.clone();
        for vertex in &mut result.vertices {
            vertex.position = self.transform_point(&vertex.position);
        }
        if self.reverses_orientation() {
            result.flip_winding();
        }
        result.compute_vertex_normals();
        result
    }
}
