//! Scaling about the origin.

use mesh_types::IndexedMesh;
use nalgebra::Vector3;
use tracing::debug;

use crate::error::{TransformError, TransformResult};
use crate::transform::Transform3D;

/// How much to stretch each axis.
///
/// A plain `f64` converts to [`ScaleFactor::Uniform`], a vector or array to
/// [`ScaleFactor::PerAxis`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleFactor {
    /// The same factor on all three axes.
    Uniform(f64),
    /// Independent x, y and z factors.
    PerAxis(Vector3<f64>),
}

impl ScaleFactor {
    /// Factors as an `(x, y, z)` vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        match self {
            Self::Uniform(k) => Vector3::repeat(k),
            Self::PerAxis(v) => v,
        }
    }

    /// Every component is finite and non-zero.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.to_vector().iter().all(|c| c.is_finite() && *c != 0.0)
    }

    /// The factor that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Uniform(k) => Self::Uniform(1.0 / k),
            Self::PerAxis(v) => Self::PerAxis(v.map(|c| 1.0 / c)),
        }
    }
}

impl From<f64> for ScaleFactor {
    fn from(k: f64) -> Self {
        Self::Uniform(k)
    }
}

impl From<Vector3<f64>> for ScaleFactor {
    fn from(v: Vector3<f64>) -> Self {
        Self::PerAxis(v)
    }
}

impl From<[f64; 3]> for ScaleFactor {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::PerAxis(Vector3::new(x, y, z))
    }
}

/// Multiply every vertex coordinate by the matching factor component.
///
/// A negative factor product mirrors the mesh, so face winding is reversed
/// to keep surfaces facing outward. Normals are recomputed.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh has no vertex positions or breaks the index invariants
/// - Any factor component is zero, NaN or infinite
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshBounds};
/// use mesh_transform::scale_mesh;
///
/// let stretched = scale_mesh(&unit_cube(), [2.0, 1.0, 0.5])?;
/// let size = stretched.bounds().size();
/// assert_eq!((size.x, size.y, size.z), (2.0, 1.0, 0.5));
/// # Ok::<(), mesh_transform::TransformError>(())
/// ```
pub fn scale_mesh(mesh: &IndexedMesh, factor: impl Into<ScaleFactor>) -> TransformResult<IndexedMesh> {
    mesh.require_positions()?;
    mesh.validate()?;

    let factor = factor.into();
    let v = factor.to_vector();
    if !factor.is_valid() {
        return Err(TransformError::InvalidScale {
            x: v.x,
            y: v.y,
            z: v.z,
        });
    }

    let transform = Transform3D::scale(v);
    debug!(
        x = v.x,
        y = v.y,
        z = v.z,
        mirrored = transform.reverses_orientation(),
        "Scaling mesh"
    );
    Ok(transform.apply_to_mesh(mesh))
}
