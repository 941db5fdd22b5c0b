//! Core mesh types for the mesh editing engine.
//!
//! This crate provides the data model every editing operator works on:
//!
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Vertex`] - A position plus derived attributes (the vertex normal)
//! - [`Triangle`] - A concrete triangle with resolved vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`VertexAdjacency`] - Per-vertex neighbour sets derived from the faces
//! - [`MeshError`] - Violations of the indexed-mesh invariants
//!
//! # Invariants
//!
//! An [`IndexedMesh`] is valid when every face index is smaller than the
//! vertex count and each face references three distinct vertices. Normals
//! are derived data: operators recompute them with
//! [`IndexedMesh::compute_vertex_normals`] after moving vertices. The bounding
//! box is never stored; it is computed on demand through [`MeshBounds`].
//!
//! A mesh without faces is an unstructured point set. A mesh without
//! vertices has no position buffer and is rejected by every operator.
//!
//! # Coordinate System
//!
//! Right-handed, unit-agnostic `f64` coordinates. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**, so normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshBounds, MeshTopology};
//!
//! let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
//! let indices = [0, 1, 2];
//!
//! let mesh = IndexedMesh::from_buffers(Some(&positions), Some(&indices))?;
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.face_count(), 1);
//! assert!((mesh.bounds().max.x - 1.0).abs() < 1e-12);
//! # Ok::<(), mesh_types::MeshError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod bounds;
mod error;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use adjacency::{VertexAdjacency, build_adjacency};
pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use mesh::{IndexedMesh, unit_cube};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
