//! Benchmarks for QuCode circuit and linear-algebra operations
//!
//! Run with: cargo bench -p qucode-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qucode_ir::linalg::{embed, identity, kron};
use qucode_ir::{Circuit, QubitId, StandardGate};
use std::f64::consts::PI;

/// Benchmark adding gates to a circuit
fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("h_gate", |b| {
        let mut circuit = Circuit::new("bench", 10);
        b.iter(|| {
            circuit.h(black_box(QubitId(0))).unwrap();
        });
    });

    group.bench_function("ry_gate", |b| {
        let mut circuit = Circuit::new("bench", 10);
        b.iter(|| {
            circuit
                .ry(black_box(PI / 4.0), black_box(QubitId(0)))
                .unwrap();
        });
    });

    group.bench_function("cx_gate", |b| {
        let mut circuit = Circuit::new("bench", 10);
        b.iter(|| {
            circuit
                .cx(black_box(QubitId(0)), black_box(QubitId(1)))
                .unwrap();
        });
    });

    group.finish();
}

/// Benchmark Kronecker products of growing identity blocks
fn bench_kron(c: &mut Criterion) {
    let mut group = c.benchmark_group("kron");
    let h = StandardGate::H.matrix();

    for num_qubits in &[2usize, 4, 6] {
        let block = identity(1 << num_qubits);
        group.bench_with_input(
            BenchmarkId::new("h_x_identity", num_qubits),
            &block,
            |b, block| {
                b.iter(|| black_box(kron(&h, block)));
            },
        );
    }

    group.finish();
}

/// Benchmark full-operator embedding of a two-qubit gate
fn bench_embed(c: &mut Criterion) {
    let mut group = c.benchmark_group("embed");
    let swap = StandardGate::Swap.matrix();

    for num_qubits in &[3u32, 5, 7] {
        group.bench_with_input(
            BenchmarkId::new("swap_ends", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| black_box(embed(&swap, &[QubitId(n - 1), QubitId(0)], n).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark circuit depth calculation
fn bench_circuit_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_depth");

    for num_qubits in &[5, 10, 20, 50] {
        let mut circuit = Circuit::new("bench", *num_qubits);

        for _layer in 0..5 {
            for i in 0..*num_qubits {
                circuit.h(QubitId(i)).unwrap();
            }
            for i in (0..*num_qubits - 1).step_by(2) {
                circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
            }
        }

        group.bench_with_input(
            BenchmarkId::new("depth", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.depth()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gate_addition,
    bench_kron,
    bench_embed,
    bench_circuit_depth,
);

criterion_main!(benches);
