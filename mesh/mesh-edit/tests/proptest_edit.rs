//! Property-based tests for operators and edit history.
//!
//! Run with: cargo test -p mesh-edit --test proptest_edit

#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use std::collections::HashSet;

use approx::relative_eq;
use mesh_decimate::{DecimateParams, decimate_mesh};
use mesh_edit::{EditConfig, EditSession, Operation, ScaleFactor};
use mesh_repair::validate_mesh;
use mesh_types::{IndexedMesh, MeshBounds, Vertex, build_adjacency};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_vertex() -> impl Strategy<Value = Vertex> {
    prop::array::uniform3(-10.0..10.0f64).prop_map(|[x, y, z]| Vertex::from_coords(x, y, z))
}

/// Random valid meshes: every index in range, no repeated corners.
fn arb_mesh(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = IndexedMesh> {
    prop::collection::vec(arb_vertex(), 3..=max_vertices).prop_flat_map(move |vertices| {
        let n = u32::try_from(vertices.len()).unwrap();
        prop::collection::vec(prop::array::uniform3(0..n), 1..=max_faces).prop_map(
            move |faces| {
                let faces = faces
                    .into_iter()
                    .filter(|&[a, b, c]| a != b && b != c && a != c)
                    .collect();
                IndexedMesh::from_parts(vertices.clone(), faces)
            },
        )
    })
}

fn arb_scale() -> impl Strategy<Value = f64> {
    prop_oneof![0.1..10.0f64, -10.0..-0.1f64]
}

/// Operations that succeed on any mesh with positions.
fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0.0..=100.0f64, 0..4u32).prop_map(|(strength, iterations)| Operation::Smooth {
            strength,
            iterations
        }),
        Just(Operation::Subdivide { levels: 1 }),
        Just(Operation::Repair),
        arb_scale().prop_map(|k| Operation::Scale {
            factor: ScaleFactor::Uniform(k)
        }),
        Just(Operation::Center),
        (0.0..=1.0f64).prop_map(|ratio| Operation::Decimate { ratio }),
    ]
}

/// Drop faces that repeat another face's corners in any order.
fn without_duplicate_faces(mut mesh: IndexedMesh) -> IndexedMesh {
    let mut seen = HashSet::new();
    mesh.faces.retain(|face| {
        let mut key = *face;
        key.sort_unstable();
        seen.insert(key)
    });
    mesh
}

fn undirected_edge_count(mesh: &IndexedMesh) -> usize {
    let mut edges = HashSet::new();
    for &[a, b, c] in &mesh.faces {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            edges.insert((u.min(v), u.max(v)));
        }
    }
    edges.len()
}

fn close(a: f64, b: f64) -> bool {
    relative_eq!(a, b, epsilon = 1e-9, max_relative = 1e-9)
}

// =============================================================================
// Operator properties
// =============================================================================

proptest! {
    #[test]
    fn smoothing_preserves_counts(
        mesh in arb_mesh(20, 40),
        strength in 0.0..=100.0f64,
        iterations in 0..5u32,
    ) {
        let out = Operation::Smooth { strength, iterations }
            .run(&mesh, &EditConfig::default())
            .unwrap();

        prop_assert_eq!(out.vertices.len(), mesh.vertices.len());
        prop_assert_eq!(&out.faces, &mesh.faces);
    }

    #[test]
    fn smoothing_identity(mesh in arb_mesh(20, 40), n in 0..5u32, s in 0.0..=100.0f64) {
        let config = EditConfig::default();

        for op in [
            Operation::Smooth { strength: 0.0, iterations: n },
            Operation::Smooth { strength: s, iterations: 0 },
        ] {
            let out = op.run(&mesh, &config).unwrap();
            for (a, b) in out.vertices.iter().zip(&mesh.vertices) {
                prop_assert_eq!(a.position, b.position);
            }
        }
    }

    #[test]
    fn smoothing_leaves_isolated_vertices(mesh in arb_mesh(20, 10), iterations in 1..4u32) {
        let adjacency = build_adjacency(&mesh);
        let out = Operation::Smooth { strength: 100.0, iterations }
            .run(&mesh, &EditConfig::default())
            .unwrap();

        for (i, (a, b)) in out.vertices.iter().zip(&mesh.vertices).enumerate() {
            let isolated = adjacency
                .neighbors(u32::try_from(i).unwrap())
                .is_none_or(|n| n.is_empty());
            if isolated {
                prop_assert_eq!(a.position, b.position);
            }
        }
    }

    #[test]
    fn subdivision_quadruples_per_level(mesh in arb_mesh(12, 20), levels in 0..3u32) {
        let out = Operation::Subdivide { levels }
            .run(&mesh, &EditConfig::default())
            .unwrap();

        prop_assert_eq!(out.faces.len(), 4usize.pow(levels) * mesh.faces.len());
    }

    #[test]
    fn subdivision_shares_edge_midpoints(mesh in arb_mesh(12, 20)) {
        let out = Operation::Subdivide { levels: 1 }
            .run(&mesh, &EditConfig::default())
            .unwrap();

        let added = out.vertices.len() - mesh.vertices.len();
        let expected = if mesh.faces.is_empty() { 0 } else { undirected_edge_count(&mesh) };
        prop_assert_eq!(added, expected);
    }

    #[test]
    fn decimation_respects_bound_and_validity(
        mesh in arb_mesh(16, 40).prop_map(without_duplicate_faces),
        ratio in 0.0..=1.0f64,
        preserve_boundary in any::<bool>(),
    ) {
        let params = DecimateParams::with_target_ratio(ratio)
            .with_preserve_boundary(preserve_boundary);
        let target = params.target_triangles(mesh.faces.len());
        let result = decimate_mesh(&mesh, &params).unwrap();
        let out = &result.mesh;

        prop_assert!(out.validate().is_ok());
        prop_assert!(out.faces.len() <= mesh.faces.len());
        prop_assert!(out.faces.len() >= target.min(mesh.faces.len()));
        prop_assert_eq!(result.final_triangles, out.faces.len());

        let report = validate_mesh(out);
        prop_assert_eq!(report.duplicate_face_count, 0);
        if mesh.faces.len() <= target {
            prop_assert_eq!(out, &mesh);
        } else {
            prop_assert_eq!(report.unreferenced_vertex_count, 0);
        }
    }

    #[test]
    fn decimation_at_ratio_one_is_identity(mesh in arb_mesh(16, 40)) {
        let out = Operation::Decimate { ratio: 1.0 }
            .run(&mesh, &EditConfig::default())
            .unwrap();
        prop_assert_eq!(out, mesh);
    }

    #[test]
    fn centering_is_idempotent(mesh in arb_mesh(20, 20)) {
        let config = EditConfig::default();
        let once = Operation::Center.run(&mesh, &config).unwrap();
        let twice = Operation::Center.run(&once, &config).unwrap();

        let (a, b) = (once.bounds(), twice.bounds());
        for axis in 0..3 {
            prop_assert!(relative_eq!(a.min[axis], b.min[axis], epsilon = 1e-9));
            prop_assert!(relative_eq!(a.max[axis], b.max[axis], epsilon = 1e-9));
            prop_assert!(b.center()[axis].abs() < 1e-9);
        }
    }

    #[test]
    fn scaling_round_trips_bounds(mesh in arb_mesh(20, 20), k in arb_scale()) {
        let config = EditConfig::default();
        let there = Operation::Scale { factor: ScaleFactor::Uniform(k) }
            .run(&mesh, &config)
            .unwrap();
        let back = Operation::Scale { factor: ScaleFactor::Uniform(1.0 / k) }
            .run(&there, &config)
            .unwrap();

        let (a, b) = (mesh.bounds(), back.bounds());
        for axis in 0..3 {
            prop_assert!(close(a.min[axis], b.min[axis]));
            prop_assert!(close(a.max[axis], b.max[axis]));
        }
    }
}

// =============================================================================
// History properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn history_round_trip(
        mesh in arb_mesh(10, 10),
        ops in prop::collection::vec(arb_operation(), 1..5),
    ) {
        let mut session = EditSession::load(mesh);
        for op in &ops {
            session.apply(op).unwrap();
        }
        let last = session.current();

        for _ in &ops {
            prop_assert!(session.undo());
        }
        prop_assert!(!session.can_undo());
        for _ in &ops {
            prop_assert!(session.redo());
        }
        prop_assert_eq!(session.current(), last);
        prop_assert!(!session.can_redo());
    }

    #[test]
    fn commit_after_undo_discards_redo(
        mesh in arb_mesh(10, 10),
        ops in prop::collection::vec(arb_operation(), 1..4),
        next in arb_operation(),
    ) {
        let mut session = EditSession::load(mesh);
        for op in &ops {
            session.apply(op).unwrap();
        }

        prop_assert!(session.undo());
        session.apply(&next).unwrap();
        let committed = session.current();

        prop_assert!(!session.redo());
        prop_assert_eq!(session.current(), committed);
        prop_assert_eq!(session.len(), ops.len() + 1);
    }

    #[test]
    fn failed_edit_leaves_history(mesh in arb_mesh(10, 10), ratio in 1.01..5.0f64) {
        let mut session = EditSession::load(mesh);
        session.apply(&Operation::Center).unwrap();
        let before = session.current();

        let op = Operation::Decimate { ratio };
        prop_assert!(session.apply(&op).is_err());
        prop_assert_eq!(session.len(), 2);
        prop_assert_eq!(session.cursor(), 1);
        prop_assert_eq!(session.current(), before);
    }
}
