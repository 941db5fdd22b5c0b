//! Rigid placement and scaling of indexed triangle meshes.
//!
//! - [`scale_mesh`] multiplies coordinates by a uniform or per-axis factor
//! - [`center_mesh`] moves the bounding-box center to the origin
//! - [`Transform3D`] is the affine transform both are applied through
//!
//! Every operation returns a new mesh with recomputed normals. Mirroring
//! scales reverse face winding so the surface keeps facing outward.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, MeshBounds};
//! use mesh_transform::{center_mesh, scale_mesh};
//!
//! let mesh = center_mesh(&scale_mesh(&unit_cube(), 10.0)?)?;
//! let bounds = mesh.bounds();
//! assert_eq!(bounds.min.x, -5.0);
//! assert_eq!(bounds.max.z, 5.0);
//! # Ok::<(), mesh_transform::TransformError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod center;
mod error;
mod scale;
mod transform;

pub use center::center_mesh;
pub use error::{TransformError, TransformResult};
pub use scale::{ScaleFactor, scale_mesh};
pub use transform::Transform3D;
