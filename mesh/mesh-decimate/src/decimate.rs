//! Core mesh decimation algorithm.
//!
//! Implements edge collapse with quadric error metrics (QEM).

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_possible_truncation)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use mesh_types::{IndexedMesh, Point3, Triangle, Vertex};
use tracing::{debug, info};

use crate::error::{DecimateError, DecimateResult};
use crate::params::DecimateParams;
use crate::quadric::Quadric;
use crate::result::DecimationResult;

/// An edge collapse candidate in the priority queue.
#[derive(Debug, Clone)]
struct EdgeCollapse {
    /// Surviving vertex.
    keep: u32,
    /// Vertex merged into `keep`.
    remove: u32,
    /// Vertex versions when this candidate was computed.
    stamp: (u32, u32),
    /// The error cost of this collapse.
    cost: f64,
    /// Position of the merged vertex.
    target: Point3<f64>,
}

impl PartialEq for EdgeCollapse {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeCollapse {}

impl PartialOrd for EdgeCollapse {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeCollapse {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (smaller cost = higher priority)
        other.cost.total_cmp(&self.cost)
    }
}

/// Decimate a mesh using edge collapse with quadric error metrics.
///
/// Collapses continue until the triangle count reaches
/// [`DecimateParams::target_triangles`] or no valid collapse is left. A
/// collapse that would take the mesh below the target is skipped. The result
/// carries recomputed normals and no unreferenced vertices. A mesh already at
/// or below its target, including every mesh at `ratio = 1.0` and every
/// point set, is returned unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh has no vertex positions or breaks the index invariants
/// - The target ratio is outside `[0, 1]` or not a number
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_decimate::{decimate_mesh, DecimateParams};
///
/// let cube = unit_cube();
/// let result = decimate_mesh(&cube, &DecimateParams::with_target_ratio(1.0))?;
/// assert_eq!(result.mesh, cube);
/// # Ok::<(), mesh_decimate::DecimateError>(())
/// ```
pub fn decimate_mesh(
    mesh: &IndexedMesh,
    params: &DecimateParams,
) -> DecimateResult<DecimationResult> {
    mesh.require_positions()?;
    mesh.validate()?;
    if !(0.0..=1.0).contains(&params.target_ratio) {
        return Err(DecimateError::InvalidRatio(params.target_ratio));
    }

    let original_triangles = mesh.faces.len();
    let target = params.target_triangles(original_triangles);

    // Don't decimate if already at or below target
    if original_triangles <= target {
        return Ok(DecimationResult::unchanged(mesh, target));
    }

    info!(
        original = original_triangles,
        target, "Starting mesh decimation"
    );

    let mut state = CollapseState::new(mesh);
    let mut heap = state.initial_queue(params);
    debug!(candidates = heap.len(), "Built collapse queue");

    let mut collapses_performed = 0;
    let mut collapses_rejected = 0;

    while state.active_faces > target {
        let Some(collapse) = heap.pop() else {
            break;
        };
        let (keep, remove) = (collapse.keep, collapse.remove);

        // Stale entry: one endpoint died or moved since it was queued
        if !state.alive[keep as usize]
            || !state.alive[remove as usize]
            || collapse.stamp != (state.versions[keep as usize], state.versions[remove as usize])
        {
            continue;
        }

        let removed_faces = state.shared_faces(keep, remove).len();
        if removed_faces == 0 {
            continue;
        }

        // Never undershoot the target
        if state.active_faces - removed_faces < target {
            collapses_rejected += 1;
            continue;
        }

        if !state.is_collapse_valid(keep, remove, &collapse.target) {
            collapses_rejected += 1;
            continue;
        }

        if params.max_error.is_some_and(|max| collapse.cost > max) {
            collapses_rejected += 1;
            continue;
        }

        state.collapse(keep, remove, collapse.target);
        collapses_performed += 1;

        for candidate in state.vertex_candidates(keep, params) {
            heap.push(candidate);
        }
    }

    let final_mesh = state.into_mesh();

    info!(
        final_triangles = final_mesh.faces.len(),
        collapses = collapses_performed,
        rejected = collapses_rejected,
        "Decimation complete"
    );

    Ok(DecimationResult {
        original_triangles,
        target_triangles: target,
        final_triangles: final_mesh.faces.len(),
        mesh: final_mesh,
        collapses_performed,
        collapses_rejected,
    })
}

// ============================================================================
// Collapse bookkeeping
// ============================================================================

/// Mutable working copy of the mesh while edges are collapsed.
struct CollapseState {
    positions: Vec<Point3<f64>>,
    alive: Vec<bool>,
    /// Bumped whenever a vertex moves or gains faces.
    versions: Vec<u32>,
    quadrics: Vec<Quadric>,
    faces: Vec<Option<[u32; 3]>>,
    /// Face indices per vertex. May contain dead faces.
    vertex_faces: Vec<Vec<usize>>,
    active_faces: usize,
    /// Vertices on an edge with a single adjacent face.
    boundary: HashSet<u32>,
}

impl CollapseState {
    fn new(mesh: &IndexedMesh) -> Self {
        let vertex_count = mesh.vertices.len();
        let mut vertex_faces = vec![Vec::new(); vertex_count];
        let mut quadrics = vec![Quadric::default(); vertex_count];
        let mut edge_counts: HashMap<(u32, u32), usize> = HashMap::new();

        for (face_idx, face) in mesh.faces.iter().enumerate() {
            for (i, &v) in face.iter().enumerate() {
                vertex_faces[v as usize].push(face_idx);
                *edge_counts
                    .entry(normalize_edge(v, face[(i + 1) % 3]))
                    .or_insert(0) += 1;
            }

            let [a, b, c] = face.map(|i| mesh.vertices[i as usize].position);
            if let Some(normal) = Triangle::new(a, b, c).normal() {
                let q = Quadric::from_plane(&normal, &a);
                for &v in face {
                    quadrics[v as usize] += q;
                }
            }
        }

        let boundary = edge_counts
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .flat_map(|((a, b), _)| [a, b])
            .collect();

        Self {
            positions: mesh.vertices.iter().map(|v| v.position).collect(),
            alive: vec![true; vertex_count],
            versions: vec![0; vertex_count],
            quadrics,
            faces: mesh.faces.iter().copied().map(Some).collect(),
            vertex_faces,
            active_faces: mesh.faces.len(),
            boundary,
        }
    }

    fn initial_queue(&self, params: &DecimateParams) -> BinaryHeap<EdgeCollapse> {
        let mut heap = BinaryHeap::new();
        let mut seen_edges = HashSet::new();

        for &[a, b, c] in self.faces.iter().flatten() {
            for (v1, v2) in [(a, b), (b, c), (c, a)] {
                if !seen_edges.insert(normalize_edge(v1, v2)) {
                    continue;
                }
                if let Some(collapse) = self.candidate(v1, v2, params) {
                    heap.push(collapse);
                }
            }
        }

        heap
    }

    fn live_faces(&self, v: u32) -> impl Iterator<Item = (usize, [u32; 3])> + '_ {
        self.vertex_faces[v as usize]
            .iter()
            .filter_map(|&f| self.faces[f].map(|face| (f, face)))
    }

    fn neighbors(&self, v: u32) -> HashSet<u32> {
        self.live_faces(v)
            .flat_map(|(_, face)| face)
            .filter(|&n| n != v)
            .collect()
    }

    fn shared_faces(&self, v1: u32, v2: u32) -> Vec<usize> {
        self.live_faces(v1)
            .filter(|(_, face)| face.contains(&v2))
            .map(|(f, _)| f)
            .collect()
    }

    /// Whether merging `remove` into `keep` at `target` keeps the surface
    /// manifold and consistently wound.
    ///
    /// Three checks, cheapest first:
    /// - link condition: the endpoints share exactly the opposite vertices of
    ///   the edge's triangles (two for an interior edge, one on a boundary)
    /// - no surviving face becomes a copy of another live face, which is how
    ///   a tetrahedron folds flat
    /// - no surviving face around either endpoint flips or degenerates
    fn is_collapse_valid(&self, keep: u32, remove: u32, target: &Point3<f64>) -> bool {
        let shared = self.shared_faces(keep, remove);
        let common = self
            .neighbors(keep)
            .intersection(&self.neighbors(remove))
            .count();
        if common != shared.len() {
            return false;
        }

        let keep_faces: HashSet<[u32; 3]> = self
            .live_faces(keep)
            .filter(|(f, _)| !shared.contains(f))
            .map(|(_, face)| sorted_face(face))
            .collect();
        let duplicates = self
            .live_faces(remove)
            .filter(|(f, _)| !shared.contains(f))
            .any(|(_, face)| keep_faces.contains(&sorted_face(rename(face, remove, keep))));
        if duplicates {
            return false;
        }

        self.live_faces(keep)
            .chain(self.live_faces(remove))
            .filter(|(f, _)| !shared.contains(f))
            .all(|(_, face)| {
                let before = self.face_triangle(face, None).normal();
                let after = self
                    .face_triangle(rename(face, remove, keep), Some((keep, target)))
                    .normal();
                match (before, after) {
                    (Some(before), Some(after)) => before.dot(&after) > 0.0,
                    (None, Some(_)) => true,
                    (_, None) => false,
                }
            })
    }

    /// Positions of `face`, with `moved` overriding one vertex.
    fn face_triangle(&self, face: [u32; 3], moved: Option<(u32, &Point3<f64>)>) -> Triangle {
        let [a, b, c] = face.map(|i| match moved {
            Some((v, p)) if v == i => *p,
            _ => self.positions[i as usize],
        });
        Triangle::new(a, b, c)
    }

    fn candidate(&self, v1: u32, v2: u32, params: &DecimateParams) -> Option<EdgeCollapse> {
        let on_boundary = self.boundary.contains(&v1) || self.boundary.contains(&v2);
        if params.preserve_boundary && on_boundary {
            return None;
        }

        let combined = self.quadrics[v1 as usize] + self.quadrics[v2 as usize];
        let p1 = self.positions[v1 as usize];
        let p2 = self.positions[v2 as usize];
        let target = combined
            .optimal_point()
            .unwrap_or_else(|| Point3::from((p1.coords + p2.coords) * 0.5));

        let mut cost = combined.evaluate(&target);
        if on_boundary {
            cost *= params.boundary_penalty;
        }

        Some(EdgeCollapse {
            keep: v1,
            remove: v2,
            stamp: (self.versions[v1 as usize], self.versions[v2 as usize]),
            cost,
            target,
        })
    }

    /// Candidates for every edge now touching `v`.
    fn vertex_candidates(&self, v: u32, params: &DecimateParams) -> Vec<EdgeCollapse> {
        self.neighbors(v)
            .into_iter()
            .filter_map(|n| self.candidate(v, n, params))
            .collect()
    }

    /// Merge `remove` into `keep`, moving `keep` to `target`.
    fn collapse(&mut self, keep: u32, remove: u32, target: Point3<f64>) {
        for f in self.shared_faces(keep, remove) {
            self.faces[f] = None;
            self.active_faces -= 1;
        }

        let moved: Vec<usize> = self
            .live_faces(remove)
            .map(|(f, _)| f)
            .collect();
        for f in moved {
            if let Some(face) = self.faces[f].as_mut() {
                for idx in face.iter_mut().filter(|idx| **idx == remove) {
                    *idx = keep;
                }
            }
            self.vertex_faces[keep as usize].push(f);
        }

        let faces = &self.faces;
        self.vertex_faces[keep as usize].retain(|&f| faces[f].is_some());
        self.vertex_faces[remove as usize].clear();

        let q = self.quadrics[remove as usize];
        self.quadrics[keep as usize] += q;
        self.positions[keep as usize] = target;
        self.alive[remove as usize] = false;
        self.versions[keep as usize] += 1;

        if self.boundary.remove(&remove) {
            self.boundary.insert(keep);
        }
    }

    /// Compact to the live faces and the vertices they reference.
    fn into_mesh(self) -> IndexedMesh {
        let mut remap: Vec<Option<u32>> = vec![None; self.positions.len()];
        let mut vertices = Vec::new();
        let mut faces = Vec::with_capacity(self.active_faces);

        for face in self.faces.into_iter().flatten() {
            faces.push(face.map(|old| {
                *remap[old as usize].get_or_insert_with(|| {
                    vertices.push(Vertex::new(self.positions[old as usize]));
                    (vertices.len() - 1) as u32
                })
            }));
        }

        let mut mesh = IndexedMesh::from_parts(vertices, faces);
        mesh.compute_vertex_normals();

        debug!(
            vertices = mesh.vertices.len(),
            faces = mesh.faces.len(),
            "Built final decimated mesh"
        );
        mesh
    }
}

const fn normalize_edge(v1: u32, v2: u32) -> (u32, u32) {
    if v1 < v2 { (v1, v2) } else { (v2, v1) }
}

/// `face` with every `from` corner replaced by `to`.
fn rename(face: [u32; 3], from: u32, to: u32) -> [u32; 3] {
    face.map(|i| if i == from { to } else { i })
}

fn sorted_face(mut face: [u32; 3]) -> [u32; 3] {
    face.sort_unstable();
    face
}
