//! Criterion benchmarks for the entropy estimation pipeline (training plus
//! a single target pass).
//!
//! Run with:
//!   cargo bench --bench entropy

use std::io::Write as _;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rfcm::Engine;
use tempfile::NamedTempFile;

mod corpus {
    include!("corpus.rs");
}

fn write_tempfile(data: &[u8]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(data).unwrap();
    f.flush().unwrap();
    f
}

fn bench_single_table_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_table_model");

    for &size in &[65_536usize, 262_144] {
        let reference = write_tempfile(&corpus::synthetic_sequence(size));
        let target = write_tempfile(&corpus::synthetic_sequence(size / 4));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("k8", size), &size, |b, _| {
            b.iter(|| {
                let mut engine =
                    Engine::build("0,8,1.0,0.99", reference.path(), 1, 1).unwrap();
                engine.average_entropy(target.path()).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_sketch_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("sketch_model");

    let size = 262_144usize;
    let reference = write_tempfile(&corpus::synthetic_sequence(size));
    let target = write_tempfile(&corpus::synthetic_sequence(size / 4));

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("k20", |b| {
        b.iter(|| {
            let mut engine = Engine::build("0,20,1.0,0.99", reference.path(), 1, 1).unwrap();
            engine.average_entropy(target.path()).unwrap()
        })
    });

    group.finish();
}

fn bench_mixture_of_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixture_of_models");

    let size = 262_144usize;
    let reference = write_tempfile(&corpus::synthetic_sequence(size));
    let target = write_tempfile(&corpus::synthetic_sequence(size / 4));

    for &nthr in &[1usize, 2, 4] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("nthr", nthr), &nthr, |b, &nthr| {
            b.iter(|| {
                let mut engine = Engine::build(
                    "0,2,1.0,0.99:0,8,1.0,0.99:1,14,1.0,0.99",
                    reference.path(),
                    nthr,
                    1,
                )
                .unwrap();
                engine.average_entropy(target.path()).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_table_model,
    bench_sketch_model,
    bench_mixture_of_models
);
criterion_main!(benches);
