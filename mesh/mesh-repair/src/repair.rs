//! The repair pipeline and its individual passes.

use hashbrown::{HashMap, HashSet};
use mesh_types::{IndexedMesh, MeshTopology};
use nalgebra::Point3;
use tracing::{debug, info};

use crate::adjacency::face_key;
use crate::error::{RepairError, RepairResult};
use crate::winding::fix_winding_order;

/// Configuration for [`repair_mesh`].
///
/// Thresholds are in mesh units. Each pass can be switched off on its own;
/// normal recomputation always runs.
///
/// # Example
///
/// ```
/// use mesh_repair::RepairParams;
///
/// let params = RepairParams::default()
///     .with_weld_epsilon(0.01)
///     .with_fix_winding(false);
/// assert!(params.weld);
/// assert!(!params.fix_winding);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairParams {
    /// Drop zero-area, sliver and short-edged faces. Default: true
    pub remove_degenerates: bool,

    /// Faces with area below this are degenerate. Default: `1e-9`
    pub degenerate_area_threshold: f64,

    /// Faces with a larger aspect ratio are degenerate. `f64::INFINITY`
    /// disables the check. Default: `1000.0`
    pub degenerate_aspect_ratio: f64,

    /// Faces with an edge shorter than this are degenerate. `0.0` disables
    /// the check. Default: `1e-9`
    pub degenerate_min_edge_length: f64,

    /// Merge coincident vertices. Default: true
    pub weld: bool,

    /// Vertices closer than this are merged. Default: `1e-6`
    pub weld_epsilon: f64,

    /// Drop faces over the same three vertices, in either winding. Default: true
    pub remove_duplicates: bool,

    /// Make winding consistent and outward per component. Default: true
    pub fix_winding: bool,

    /// Compact away vertices no face references. Default: true
    pub remove_unreferenced: bool,
}

impl Default for RepairParams {
    fn default() -> Self {
        Self {
            remove_degenerates: true,
            degenerate_area_threshold: 1e-9,
            degenerate_aspect_ratio: 1000.0,
            degenerate_min_edge_length: 1e-9,
            weld: true,
            weld_epsilon: 1e-6,
            remove_duplicates: true,
            fix_winding: true,
            remove_unreferenced: true,
        }
    }
}

impl RepairParams {
    /// Only validate and recompute normals. Topology is left alone.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            remove_degenerates: false,
            weld: false,
            remove_duplicates: false,
            fix_winding: false,
            remove_unreferenced: false,
            ..Default::default()
        }
    }

    /// Settings for preparing a model for 3D printing (mm scale).
    #[must_use]
    pub fn for_printing() -> Self {
        Self {
            weld_epsilon: 0.001,
            degenerate_area_threshold: 0.00001,
            degenerate_aspect_ratio: 500.0,
            degenerate_min_edge_length: 0.0001,
            ..Default::default()
        }
    }

    /// Set the welding distance.
    #[must_use]
    pub const fn with_weld_epsilon(mut self, epsilon: f64) -> Self {
        self.weld_epsilon = epsilon;
        self
    }

    /// Set the minimum face area.
    #[must_use]
    pub const fn with_degenerate_area_threshold(mut self, threshold: f64) -> Self {
        self.degenerate_area_threshold = threshold;
        self
    }

    /// Set the maximum aspect ratio.
    #[must_use]
    pub const fn with_degenerate_aspect_ratio(mut self, ratio: f64) -> Self {
        self.degenerate_aspect_ratio = ratio;
        self
    }

    /// Enable or disable winding repair.
    #[must_use]
    pub const fn with_fix_winding(mut self, fix: bool) -> Self {
        self.fix_winding = fix;
        self
    }

    /// Enable or disable unreferenced vertex removal.
    #[must_use]
    pub const fn with_remove_unreferenced(mut self, remove: bool) -> Self {
        self.remove_unreferenced = remove;
        self
    }

    /// Whether any topology pass is enabled.
    #[must_use]
    pub const fn has_passes(&self) -> bool {
        self.remove_degenerates
            || self.weld
            || self.remove_duplicates
            || self.fix_winding
            || self.remove_unreferenced
    }
}

/// Counts gathered by [`repair_mesh`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairSummary {
    /// Vertices before repair.
    pub initial_vertices: usize,
    /// Faces before repair.
    pub initial_faces: usize,
    /// Vertices after repair.
    pub final_vertices: usize,
    /// Faces after repair.
    pub final_faces: usize,
    /// Degenerate faces dropped.
    pub degenerates_removed: usize,
    /// Vertices merged into another vertex.
    pub vertices_welded: usize,
    /// Duplicate faces dropped.
    pub duplicates_removed: usize,
    /// Faces whose winding was reversed.
    pub winding_fixed: usize,
    /// Unreferenced vertices dropped.
    pub unreferenced_removed: usize,
}

impl RepairSummary {
    /// Whether any pass changed the topology or winding.
    #[must_use]
    pub const fn had_changes(&self) -> bool {
        self.degenerates_removed > 0
            || self.vertices_welded > 0
            || self.duplicates_removed > 0
            || self.winding_fixed > 0
            || self.unreferenced_removed > 0
    }
}

impl std::fmt::Display for RepairSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repair: {} verts ({} welded, {} unreferenced), {} faces ({} degenerate, {} duplicate, {} rewound)",
            self.final_vertices,
            self.vertices_welded,
            self.unreferenced_removed,
            self.final_faces,
            self.degenerates_removed,
            self.duplicates_removed,
            self.winding_fixed
        )
    }
}

/// A repaired mesh and what was done to it.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    /// The repaired mesh, with fresh normals.
    pub mesh: IndexedMesh,
    /// Per-pass counts.
    pub summary: RepairSummary,
}

impl std::fmt::Display for RepairOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.summary.fmt(f)
    }
}

/// Repair a copy of `mesh`.
///
/// Always checks that positions exist and the face indices are valid, then
/// recomputes vertex normals. The enabled passes run in between, in this
/// order: degenerate removal, welding, duplicate removal, winding repair and
/// unreferenced vertex removal. A point set (no faces) skips every pass. If
/// the passes remove every face, the vertices are kept.
///
/// # Errors
///
/// - [`RepairError::Geometry`] if the mesh has no vertices or an invalid face
/// - [`RepairError::NonFiniteVertex`] if a position is NaN or infinite
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::{repair_mesh, RepairParams};
///
/// let mut cube = unit_cube();
/// cube.faces.push(cube.faces[0]);
///
/// let outcome = repair_mesh(&cube, &RepairParams::default())?;
/// assert_eq!(outcome.mesh.faces.len(), 12);
/// assert_eq!(outcome.summary.duplicates_removed, 1);
/// # Ok::<(), mesh_repair::RepairError>(())
/// ```
pub fn repair_mesh(mesh: &IndexedMesh, params: &RepairParams) -> RepairResult<RepairOutcome> {
    mesh.require_positions()?;
    mesh.validate()?;
    if let Some(index) = mesh
        .vertices
        .iter()
        .position(|v| v.position.coords.iter().any(|c| !c.is_finite()))
    {
        return Err(RepairError::NonFiniteVertex { index });
    }

    let mut repaired = mesh.clone();
    let mut summary = RepairSummary {
        initial_vertices: mesh.vertex_count(),
        initial_faces: mesh.face_count(),
        ..Default::default()
    };

    if !repaired.faces.is_empty() {
        if params.remove_degenerates {
            summary.degenerates_removed = remove_degenerate_triangles(&mut repaired, params);
        }
        if params.weld {
            summary.vertices_welded = weld_vertices(&mut repaired, params.weld_epsilon);
        }
        if params.remove_duplicates {
            summary.duplicates_removed = remove_duplicate_faces(&mut repaired);
        }
        if params.fix_winding {
            summary.winding_fixed = fix_winding_order(&mut repaired);
        }
        if params.remove_unreferenced && !repaired.faces.is_empty() {
            summary.unreferenced_removed = remove_unreferenced_vertices(&mut repaired);
        }
    }

    repaired.compute_vertex_normals();
    summary.final_vertices = repaired.vertex_count();
    summary.final_faces = repaired.face_count();

    info!(
        vertices = summary.final_vertices,
        faces = summary.final_faces,
        degenerates = summary.degenerates_removed,
        welded = summary.vertices_welded,
        duplicates = summary.duplicates_removed,
        rewound = summary.winding_fixed,
        unreferenced = summary.unreferenced_removed,
        "Repair complete"
    );

    Ok(RepairOutcome {
        mesh: repaired,
        summary,
    })
}

/// Drop faces that fail any of the degenerate thresholds in `params`.
///
/// Returns the number of faces removed.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_repair::{remove_degenerate_triangles, RepairParams};
///
/// let mut mesh = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(5.0, 0.0, 0.0),
///         Vertex::from_coords(10.0, 0.0, 0.0), // collinear
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(remove_degenerate_triangles(&mut mesh, &RepairParams::default()), 1);
/// assert!(mesh.faces.is_empty());
/// ```
pub fn remove_degenerate_triangles(mesh: &mut IndexedMesh, params: &RepairParams) -> usize {
    let keep: Vec<bool> = mesh
        .triangles()
        .map(|tri| {
            let area = tri.area();
            area >= params.degenerate_area_threshold
                && tri.min_edge_length() >= params.degenerate_min_edge_length
                && (!params.degenerate_aspect_ratio.is_finite()
                    || tri.aspect_ratio() <= params.degenerate_aspect_ratio)
        })
        .collect();

    let before = mesh.faces.len();
    let mut flags = keep.into_iter();
    mesh.faces.retain(|_| flags.next().unwrap_or(true));
    let removed = before - mesh.faces.len();

    debug!(removed, "Degenerate faces removed");
    removed
}

/// Merge vertices closer than `epsilon` into the lowest-indexed one.
///
/// Faces are remapped to the surviving vertices and faces that collapse onto
/// fewer than three distinct vertices are dropped. Merged vertices stay in
/// the vertex list until [`remove_unreferenced_vertices`] runs. Returns the
/// number of merged vertices.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_repair::weld_vertices;
///
/// let mut mesh = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///         Vertex::from_coords(1.0001, 0.0, 0.0),
///     ],
///     vec![[0, 1, 2], [0, 2, 3]],
/// );
///
/// assert_eq!(weld_vertices(&mut mesh, 0.001), 1);
/// assert_eq!(mesh.faces[1], [0, 2, 1]);
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn weld_vertices(mesh: &mut IndexedMesh, epsilon: f64) -> usize {
    if mesh.vertices.is_empty() || epsilon <= 0.0 {
        return 0;
    }

    let cell_size = epsilon * 2.0;
    let mut grid: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        grid.entry(grid_cell(&vertex.position, cell_size))
            .or_default()
            .push(idx as u32);
    }

    let mut canonical: Vec<u32> = (0..mesh.vertices.len() as u32).collect();
    let mut merged = 0usize;

    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        if canonical[idx] != idx as u32 {
            continue;
        }
        let (cx, cy, cz) = grid_cell(&vertex.position, cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &other in bucket {
                        let o = other as usize;
                        if o <= idx || canonical[o] != other {
                            continue;
                        }
                        if (mesh.vertices[o].position - vertex.position).norm() < epsilon {
                            canonical[o] = idx as u32;
                            merged += 1;
                        }
                    }
                }
            }
        }
    }

    if merged > 0 {
        for face in &mut mesh.faces {
            for corner in face.iter_mut() {
                *corner = canonical[*corner as usize];
            }
        }
        mesh.faces.retain(|&[a, b, c]| a != b && b != c && a != c);
    }

    debug!(merged, "Vertices welded");
    merged
}

#[allow(clippy::cast_possible_truncation)]
fn grid_cell(p: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (p.x / cell_size).floor() as i64,
        (p.y / cell_size).floor() as i64,
        (p.z / cell_size).floor() as i64,
    )
}

/// Drop every face whose vertex set was already seen, in either winding.
///
/// The first occurrence is kept. Returns the number of faces removed.
pub fn remove_duplicate_faces(mesh: &mut IndexedMesh) -> usize {
    let before = mesh.faces.len();
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(before);
    mesh.faces.retain(|&face| seen.insert(face_key(face)));
    let removed = before - mesh.faces.len();

    debug!(removed, "Duplicate faces removed");
    removed
}

/// Compact the vertex list down to vertices some face references.
///
/// Relative vertex order is preserved. Returns the number of vertices removed.
pub fn remove_unreferenced_vertices(mesh: &mut IndexedMesh) -> usize {
    let mut used = vec![false; mesh.vertices.len()];
    for face in &mesh.faces {
        for &corner in face {
            used[corner as usize] = true;
        }
    }

    let before = mesh.vertices.len();
    if used.iter().all(|&u| u) {
        return 0;
    }

    let mut remap = vec![0u32; before];
    let mut next = 0u32;
    for (slot, &is_used) in remap.iter_mut().zip(&used) {
        if is_used {
            *slot = next;
            next += 1;
        }
    }

    let mut flags = used.iter();
    mesh.vertices.retain(|_| flags.next().copied().unwrap_or(false));
    for face in &mut mesh.faces {
        for corner in face.iter_mut() {
            *corner = remap[*corner as usize];
        }
    }

    before - mesh.vertices.len()
}
