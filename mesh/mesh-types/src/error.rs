//! Error types for indexed mesh construction and validation.

use thiserror::Error;

/// Result type for mesh construction and validation.
pub type MeshResult<T> = Result<T, MeshError>;

/// Violations of the indexed triangle mesh invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The mesh has no vertex position buffer.
    #[error("mesh has no vertex positions")]
    MissingPositions,

    /// The flat position buffer length is not a multiple of 3.
    #[error("position buffer length {len} is not a multiple of 3")]
    PositionBufferLength {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// The flat index buffer length is not a multiple of 3.
    #[error("index buffer length {len} is not a multiple of 3")]
    IndexBufferLength {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// The offending face.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face references the same vertex more than once.
    #[error("face {face} repeats a vertex index: {corners:?}")]
    RepeatedCorner {
        /// The offending face.
        face: usize,
        /// The face's corner indices.
        corners: [u32; 3],
    },
}
