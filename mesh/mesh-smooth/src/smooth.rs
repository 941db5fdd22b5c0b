//! Laplacian relaxation of vertex positions.

use hashbrown::{HashMap, HashSet};
use mesh_types::{IndexedMesh, VertexAdjacency};
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{SmoothError, SmoothResult};
use crate::params::SmoothParams;
use crate::result::SmoothingResult;

/// Smooth a mesh with `params.iterations` Laplacian passes.
///
/// Normals are recomputed once all passes are done. A strength of zero or a
/// pass count of zero returns an unchanged copy of the input.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh has no vertex positions or breaks the index invariants
/// - The strength is outside `[0, 100]` or not finite
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_smooth::{smooth_mesh, SmoothParams};
///
/// let cube = unit_cube();
/// let unchanged = smooth_mesh(&cube, &SmoothParams::new(0.0, 5))?;
/// assert_eq!(unchanged.mesh, cube);
/// assert_eq!(unchanged.iterations_performed, 0);
/// # Ok::<(), mesh_smooth::SmoothError>(())
/// ```
pub fn smooth_mesh(mesh: &IndexedMesh, params: &SmoothParams) -> SmoothResult<SmoothingResult> {
    mesh.require_positions()?;
    mesh.validate()?;
    if !params.strength.is_finite() || !(0.0..=100.0).contains(&params.strength) {
        return Err(SmoothError::InvalidStrength(params.strength));
    }

    let lambda = params.lambda();
    if params.is_identity() {
        return Ok(SmoothingResult {
            mesh: mesh.clone(),
            iterations_performed: 0,
            lambda,
            total_displacement: 0.0,
            max_displacement: 0.0,
        });
    }

    let adjacency = VertexAdjacency::build(mesh);
    let pinned = if params.preserve_boundaries {
        boundary_vertices(mesh)
    } else {
        HashSet::new()
    };
    debug!(
        vertices = mesh.vertices.len(),
        connected = adjacency.len(),
        pinned = pinned.len(),
        lambda,
        "Built smoothing adjacency"
    );

    let mut result = mesh.clone();
    let mut total_displacement = 0.0;
    let mut max_displacement = 0.0_f64;

    for pass in 0..params.iterations {
        let pass_max = smooth_pass(&mut result, &adjacency, &pinned, lambda);
        total_displacement += pass_max;
        max_displacement = max_displacement.max(pass_max);
        debug!(pass = pass + 1, max_displacement = pass_max, "Smoothing pass");
    }

    result.compute_vertex_normals();

    Ok(SmoothingResult {
        mesh: result,
        iterations_performed: params.iterations,
        lambda,
        total_displacement,
        max_displacement,
    })
}

/// One pass over all vertices, reading from a snapshot of the previous pass.
///
/// Returns the largest displacement of the pass.
fn smooth_pass(
    mesh: &mut IndexedMesh,
    adjacency: &VertexAdjacency,
    pinned: &HashSet<u32>,
    lambda: f64,
) -> f64 {
    let snapshot: Vec<Point3<f64>> = mesh.vertices.iter().map(|v| v.position).collect();
    let mut max_displacement = 0.0_f64;

    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let idx = i as u32;

        if pinned.contains(&idx) {
            continue;
        }
        let Some(neighbors) = adjacency.neighbors(idx).filter(|n| !n.is_empty()) else {
            continue;
        };

        let sum: Vector3<f64> = neighbors
            .iter()
            .map(|&n| snapshot[n as usize].coords)
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / neighbors.len() as f64;

        let displacement = (mean - snapshot[i].coords) * lambda;
        max_displacement = max_displacement.max(displacement.norm());
        vertex.position = snapshot[i] + displacement;
    }

    max_displacement
}

/// Vertices on edges that only one face uses.
fn boundary_vertices(mesh: &IndexedMesh) -> HashSet<u32> {
    let mut edge_counts: HashMap<(u32, u32), usize> = HashMap::new();

    for &[a, b, c] in &mesh.faces {
        for (v0, v1) in [(a, b), (b, c), (c, a)] {
            let edge = if v0 < v1 { (v0, v1) } else { (v1, v0) };
            *edge_counts.entry(edge).or_insert(0) += 1;
        }
    }

    edge_counts
        .into_iter()
        .filter(|&(_, count)| count == 1)
        .flat_map(|((v0, v1), _)| [v0, v1])
        .collect()
}
