//! Laplacian smoothing.
//!
//! Each pass moves every vertex toward the mean of its edge-connected
//! neighbours:
//!
//! ```text
//! v_new = (1 - lambda) * v + lambda * mean(N(v))
//! lambda = min(strength / 100, 0.5)
//! ```
//!
//! All vertices of a pass read positions from the previous pass, never from
//! vertices already moved in the current one. Vertices without neighbours stay
//! where they are. Topology is never touched, so vertex and triangle counts
//! are invariant.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_smooth::{smooth_mesh, SmoothParams};
//!
//! let cube = unit_cube();
//! let result = smooth_mesh(&cube, &SmoothParams::new(100.0, 1))?;
//!
//! assert_eq!(result.mesh.vertices.len(), 8);
//! assert_eq!(result.mesh.faces.len(), 12);
//! assert!(result.max_displacement > 0.0);
//! # Ok::<(), mesh_smooth::SmoothError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod result;
mod smooth;

pub use error::{SmoothError, SmoothResult};
pub use params::{MAX_LAMBDA, SmoothParams};
pub use result::SmoothingResult;
pub use smooth::smooth_mesh;
