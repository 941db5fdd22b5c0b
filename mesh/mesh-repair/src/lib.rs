//! Mesh validation and repair.
//!
//! [`repair_mesh`] always checks that the mesh has positions and valid
//! indices, and recomputes vertex normals. On top of that floor it runs the
//! passes enabled in [`RepairParams`]:
//!
//! - degenerate triangle removal (area, aspect ratio, edge length)
//! - vertex welding with a spatial hash
//! - duplicate face removal
//! - winding repair per connected component
//! - unreferenced vertex removal
//!
//! [`validate_mesh`] reports the same issues without changing anything.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_repair::{repair_mesh, validate_mesh, RepairParams};
//!
//! let mut mesh = unit_cube();
//! mesh.flip_winding();
//! assert!(validate_mesh(&mesh).is_inside_out);
//!
//! let outcome = repair_mesh(&mesh, &RepairParams::default())?;
//! assert_eq!(outcome.summary.winding_fixed, 12);
//! assert!(validate_mesh(&outcome.mesh).is_printable());
//! # Ok::<(), mesh_repair::RepairError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod error;
mod repair;
mod validate;
mod winding;

pub use adjacency::MeshAdjacency;
pub use error::{RepairError, RepairResult};
pub use repair::{
    RepairOutcome, RepairParams, RepairSummary, remove_degenerate_triangles,
    remove_duplicate_faces, remove_unreferenced_vertices, repair_mesh, weld_vertices,
};
pub use validate::{MeshReport, validate_mesh};
pub use winding::{count_inconsistent_edges, fix_winding_order};
