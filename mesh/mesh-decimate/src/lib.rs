//! Mesh simplification using quadric error metrics.
//!
//! Edges are collapsed cheapest-first, where the cost of merging two vertices
//! is the summed squared distance of the merged position to the planes of the
//! faces that met at either vertex.
//!
//! # Guarantees
//!
//! - The result never has fewer triangles than the target
//!   `max(1, round(ratio * n))`, and never fewer than one
//! - Every output face indexes an existing vertex three times, all distinct
//! - Every output vertex is referenced by at least one face
//! - `ratio = 1.0` returns the input unchanged
//!
//! The target is a floor, not an exact count: collapses that would create
//! non-manifold geometry are skipped, so the result may stop above it.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_decimate::{decimate_mesh, DecimateParams};
//!
//! let cube = unit_cube();
//! let result = decimate_mesh(&cube, &DecimateParams::with_target_ratio(0.5))?;
//! assert!(result.final_triangles >= 6);
//! assert!(result.final_triangles <= 12);
//! println!("{result}");
//! # Ok::<(), mesh_decimate::DecimateError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod decimate;
mod error;
mod params;
mod quadric;
mod result;

pub use decimate::decimate_mesh;
pub use error::{DecimateError, DecimateResult};
pub use params::DecimateParams;
pub use result::DecimationResult;
