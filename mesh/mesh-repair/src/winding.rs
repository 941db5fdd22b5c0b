//! Face orientation repair.
//!
//! Two faces sharing an edge are consistently wound when they traverse that
//! edge in opposite directions. [`fix_winding_order`] walks every connected
//! component breadth-first across manifold edges and flips neighbours that
//! disagree with the face they were reached from. A closed component that
//! ends up enclosing negative volume is then turned outward as a whole.

use std::collections::VecDeque;

use hashbrown::HashMap;
use mesh_types::IndexedMesh;
use tracing::debug;

use crate::adjacency::{MeshAdjacency, directed_edges};

/// Make face winding consistent and outward. Returns the number of faces
/// whose winding differs from the input.
///
/// Face corner sets never change, only their order, so the result has the
/// same edges and vertices as the input.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::fix_winding_order;
///
/// let mut mesh = unit_cube();
/// mesh.faces[3].swap(1, 2);
///
/// assert_eq!(fix_winding_order(&mut mesh), 1);
/// assert_eq!(mesh.faces, unit_cube().faces);
/// ```
pub fn fix_winding_order(mesh: &mut IndexedMesh) -> usize {
    let face_count = mesh.faces.len();
    if face_count == 0 {
        return 0;
    }

    let adjacency = MeshAdjacency::build(&mesh.faces);
    let mut visited = vec![false; face_count];
    let mut toggled = vec![false; face_count];
    let mut components = 0usize;

    for seed in 0..face_count {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        components += 1;

        let mut component = vec![seed];
        let mut queue = VecDeque::from([seed]);

        while let Some(current) = queue.pop_front() {
            for (a, b) in directed_edges(mesh.faces[current]) {
                let Some(&[f0, f1]) = adjacency.faces_for_edge(a, b) else {
                    continue;
                };
                let other = if f0 == current { f1 } else { f0 };
                if visited[other] {
                    continue;
                }
                visited[other] = true;

                // A consistent neighbour runs b -> a.
                if traverses(mesh.faces[other], a, b) {
                    flip(mesh, &mut toggled, other);
                }
                component.push(other);
                queue.push_back(other);
            }
        }

        if is_closed(mesh, &adjacency, &component) && component_volume(mesh, &component) < 0.0 {
            for &face in &component {
                flip(mesh, &mut toggled, face);
            }
        }
    }

    let changed = toggled.iter().filter(|&&t| t).count();
    debug!(components, changed, "Winding repaired");
    changed
}

/// Number of manifold edges whose two faces traverse it in the same direction.
///
/// Zero for any consistently wound mesh, regardless of whether it faces
/// outward.
#[must_use]
pub fn count_inconsistent_edges(mesh: &IndexedMesh) -> usize {
    let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
    for &face in &mesh.faces {
        for edge in directed_edges(face) {
            *directed.entry(edge).or_insert(0) += 1;
        }
    }

    let adjacency = MeshAdjacency::build(&mesh.faces);
    directed
        .iter()
        .filter(|&(&(a, b), &count)| {
            count == 2 && adjacency.faces_for_edge(a, b).is_some_and(|f| f.len() == 2)
        })
        .count()
}

fn flip(mesh: &mut IndexedMesh, toggled: &mut [bool], face: usize) {
    mesh.faces[face].swap(1, 2);
    toggled[face] = !toggled[face];
}

fn traverses(face: [u32; 3], from: u32, to: u32) -> bool {
    directed_edges(face).contains(&(from, to))
}

fn is_closed(mesh: &IndexedMesh, adjacency: &MeshAdjacency, component: &[usize]) -> bool {
    component.iter().all(|&face| {
        directed_edges(mesh.faces[face])
            .iter()
            .all(|&(a, b)| adjacency.faces_for_edge(a, b).is_some_and(|f| f.len() >= 2))
    })
}

fn component_volume(mesh: &IndexedMesh, component: &[usize]) -> f64 {
    component
        .iter()
        .map(|&face| {
            let [i0, i1, i2] = mesh.faces[face];
            let p0 = mesh.vertices[i0 as usize].position.coords;
            let p1 = mesh.vertices[i1 as usize].position.coords;
            let p2 = mesh.vertices[i2 as usize].position.coords;
            p0.dot(&p1.cross(&p2))
        })
        .sum::<f64>()
        / 6.0
}
