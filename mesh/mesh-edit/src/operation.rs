//! The editing operations a session can apply.

use mesh_decimate::{DecimateParams, decimate_mesh};
use mesh_repair::repair_mesh;
use mesh_smooth::{SmoothParams, smooth_mesh};
use mesh_subdivide::{SubdivideParams, subdivide_mesh};
use mesh_transform::{ScaleFactor, center_mesh, scale_mesh};
use mesh_types::IndexedMesh;

use crate::config::EditConfig;
use crate::error::{EditError, EditResult};

/// One undoable mesh edit.
///
/// Each variant maps onto one operator crate. Session-wide settings such as
/// boundary preservation and repair passes come from [`EditConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Operation {
    /// Laplacian smoothing with `strength` in `[0, 100]`.
    Smooth {
        /// Smoothing strength.
        strength: f64,
        /// Number of passes.
        iterations: u32,
    },
    /// Midpoint subdivision, `4^levels` times the triangles.
    Subdivide {
        /// Number of levels.
        levels: u32,
    },
    /// Reduce triangles to `ratio` of the current count.
    Decimate {
        /// Target ratio in `[0, 1]`.
        ratio: f64,
    },
    /// Validate, clean up and recompute normals.
    Repair,
    /// Scale about the origin.
    Scale {
        /// Uniform or per-axis factor.
        factor: ScaleFactor,
    },
    /// Move the bounding-box center to the origin.
    Center,
}

impl Operation {
    /// Short lowercase name, used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Smooth { .. } => "smooth",
            Self::Subdivide { .. } => "subdivide",
            Self::Decimate { .. } => "decimate",
            Self::Repair => "repair",
            Self::Scale { .. } => "scale",
            Self::Center => "center",
        }
    }

    /// Run the operation on `mesh`, producing a new mesh.
    ///
    /// The input is never modified.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidGeometry`] for a mesh without positions or with
    /// invalid faces, [`EditError::OperationFailed`] for anything else the
    /// operator rejects.
    pub fn run(&self, mesh: &IndexedMesh, config: &EditConfig) -> EditResult<IndexedMesh> {
        let name = self.name();
        match *self {
            Self::Smooth {
                strength,
                iterations,
            } => {
                let params = SmoothParams::new(strength, iterations)
                    .with_preserve_boundaries(config.smooth_preserve_boundaries);
                smooth_mesh(mesh, &params)
                    .map(|r| r.mesh)
                    .map_err(|e| EditError::from_operator(name, &e))
            }
            Self::Subdivide { levels } => {
                let params = SubdivideParams::new()
                    .with_levels(levels)
                    .with_max_faces(config.subdivide_max_faces);
                subdivide_mesh(mesh, &params)
                    .map(|r| r.mesh)
                    .map_err(|e| EditError::from_operator(name, &e))
            }
            Self::Decimate { ratio } => {
                let params = DecimateParams::with_target_ratio(ratio)
                    .with_preserve_boundary(config.decimate_preserve_boundary);
                decimate_mesh(mesh, &params)
                    .map(|r| r.mesh)
                    .map_err(|e| EditError::from_operator(name, &e))
            }
            Self::Repair => repair_mesh(mesh, &config.repair)
                .map(|r| r.mesh)
                .map_err(|e| EditError::from_operator(name, &e)),
            Self::Scale { factor } => {
                scale_mesh(mesh, factor).map_err(|e| EditError::from_operator(name, &e))
            }
            Self::Center => center_mesh(mesh).map_err(|e| EditError::from_operator(name, &e)),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smooth {
                strength,
                iterations,
            } => write!(f, "smooth (strength {strength}, {iterations} passes)"),
            Self::Subdivide { levels } => write!(f, "subdivide ({levels} levels)"),
            Self::Decimate { ratio } => write!(f, "decimate (ratio {ratio})"),
            Self::Scale { factor } => {
                let v = factor.to_vector();
                write!(f, "scale ({}, {}, {})", v.x, v.y, v.z)
            }
            Self::Repair | Self::Center => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{MeshBounds, unit_cube};

    #[test]
    fn test_names_and_display() {
        assert_eq!(Operation::Repair.name(), "repair");
        assert_eq!(Operation::Subdivide { levels: 2 }.to_string(), "subdivide (2 levels)");
        assert_eq!(
            Operation::Scale {
                factor: ScaleFactor::Uniform(2.0)
            }
            .to_string(),
            "scale (2, 2, 2)"
        );
    }

    #[test]
    fn test_run_each_operation() {
        let cube = unit_cube();
        let config = EditConfig::default();

        let smoothed = Operation::Smooth {
            strength: 100.0,
            iterations: 1,
        }
        .run(&cube, &config)
        .unwrap();
        assert_eq!(smoothed.faces.len(), 12);

        let subdivided = Operation::Subdivide { levels: 1 }.run(&cube, &config).unwrap();
        assert_eq!(subdivided.faces.len(), 48);

        let decimated = Operation::Decimate { ratio: 1.0 }.run(&cube, &config).unwrap();
        assert_eq!(decimated, cube);

        let repaired = Operation::Repair.run(&cube, &config).unwrap();
        assert_eq!(repaired.faces.len(), 12);

        let scaled = Operation::Scale {
            factor: ScaleFactor::Uniform(2.0),
        }
        .run(&cube, &config)
        .unwrap();
        assert_eq!(scaled.bounds().max.x, 2.0);

        let centered = Operation::Center.run(&cube, &config).unwrap();
        assert_eq!(centered.bounds().min.x, -0.5);
    }

    #[test]
    fn test_decimate_to_zero_keeps_a_closed_surface() {
        let decimated = Operation::Decimate { ratio: 0.0 }
            .run(&unit_cube(), &EditConfig::default())
            .unwrap();

        let report = mesh_repair::validate_mesh(&decimated);
        assert_eq!(report.duplicate_face_count, 0);
        assert_eq!(report.unreferenced_vertex_count, 0);
        assert!(decimated.faces.len() >= 4);
        assert!(decimated.signed_volume() > 0.0);
    }

    #[test]
    fn test_errors_are_classified() {
        let config = EditConfig::default();
        let cube = unit_cube();

        let err = Operation::Repair.run(&IndexedMesh::new(), &config).unwrap_err();
        assert!(err.is_invalid_geometry());

        let err = Operation::Decimate { ratio: 1.5 }.run(&cube, &config).unwrap_err();
        assert!(matches!(err, EditError::OperationFailed { operation: "decimate", .. }));

        let err = Operation::Subdivide { levels: 3 }
            .run(&cube, &config.clone().with_subdivide_max_faces(100))
            .unwrap_err();
        assert!(matches!(err, EditError::OperationFailed { operation: "subdivide", .. }));
    }
}
