//! Benchmarks for circuit construction and layering
//!
//! Run with: cargo bench -p feynsum-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use feynsum_ir::{Circuit, QubitId, layers};

/// Benchmark QFT circuit construction
fn bench_qft_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("qft_construction");

    for num_qubits in &[4, 8, 16, 26] {
        group.bench_with_input(
            BenchmarkId::new("build", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| black_box(Circuit::qft(n).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark layering of brickwork circuits
fn bench_layering(c: &mut Criterion) {
    let mut group = c.benchmark_group("layering");

    for num_qubits in &[8, 16, 26] {
        let mut circuit = Circuit::new(*num_qubits);
        for _ in 0..10 {
            for i in 0..*num_qubits {
                circuit.rz(0.1, QubitId::from(i)).unwrap();
            }
            for i in (0..*num_qubits - 1).step_by(2) {
                circuit
                    .cx(QubitId::from(i), QubitId::from(i + 1))
                    .unwrap();
            }
        }

        group.bench_with_input(
            BenchmarkId::new("brickwork", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(layers(circuit)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_qft_construction, bench_layering);

criterion_main!(benches);
