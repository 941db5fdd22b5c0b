//! Uniform midpoint subdivision.
//!
//! Every level splits each triangle into four by inserting a vertex at the
//! midpoint of each edge. Midpoints are shared between the two triangles on
//! either side of an edge, so one level adds exactly one vertex per distinct
//! edge and multiplies the face count by four.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_subdivide::{subdivide_mesh, SubdivideParams};
//!
//! let cube = unit_cube();
//!
//! let result = subdivide_mesh(&cube, &SubdivideParams::new().with_levels(2))?;
//! assert_eq!(result.final_faces, 192);
//!
//! // Level 0 hands the mesh back untouched
//! let result = subdivide_mesh(&cube, &SubdivideParams::new().with_levels(0))?;
//! assert_eq!(result.mesh, cube);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod result;
mod subdivide;

pub use error::{SubdivideError, SubdivideResult};
pub use params::SubdivideParams;
pub use result::SubdivisionResult;
pub use subdivide::subdivide_mesh;
