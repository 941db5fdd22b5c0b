//! Benchmarks for the editing pipeline.
//!
//! Run with: cargo bench -p mesh-edit
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-edit -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-edit -- --baseline main

#![allow(missing_docs, clippy::unwrap_used, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_edit::{EditConfig, EditSession, Operation, ScaleFactor, mesh_stats};
use mesh_types::{IndexedMesh, unit_cube};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Unit cube subdivided `levels` times (12 * 4^levels triangles).
fn dense_cube(levels: u32) -> IndexedMesh {
    Operation::Subdivide { levels }
        .run(&unit_cube(), &EditConfig::default())
        .unwrap()
}

fn test_cases() -> [(&'static str, IndexedMesh); 4] {
    [
        ("cube_12tri", unit_cube()),
        ("cube_192tri", dense_cube(2)),
        ("cube_3072tri", dense_cube(4)),
        ("cube_12288tri", dense_cube(5)),
    ]
}

// =============================================================================
// Operator Benchmarks
// =============================================================================

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Operators");
    let config = EditConfig::default();

    let operations = [
        Operation::Smooth {
            strength: 50.0,
            iterations: 5,
        },
        Operation::Subdivide { levels: 1 },
        Operation::Decimate { ratio: 0.5 },
        Operation::Repair,
        Operation::Scale {
            factor: ScaleFactor::Uniform(2.0),
        },
        Operation::Center,
    ];

    for (name, mesh) in &test_cases() {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for op in &operations {
            group.bench_with_input(BenchmarkId::new(op.name(), name), mesh, |b, mesh| {
                b.iter(|| op.run(black_box(mesh), &config));
            });
        }
    }

    group.finish();
}

// =============================================================================
// Session Benchmarks
// =============================================================================

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("Session");

    for (name, mesh) in &test_cases() {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        group.bench_with_input(BenchmarkId::new("apply_undo_redo", name), mesh, |b, mesh| {
            b.iter(|| {
                let mut session = EditSession::load(mesh.clone());
                session.apply(&Operation::Center).unwrap();
                session.undo();
                session.redo();
                black_box(session.stats())
            });
        });

        group.bench_with_input(BenchmarkId::new("stats", name), mesh, |b, mesh| {
            b.iter(|| mesh_stats(black_box(mesh)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_operators, bench_session);
criterion_main!(benches);
