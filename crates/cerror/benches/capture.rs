//! Construction, rendering and chain-walk costs.

use std::hint::black_box;

use cerror::codes::{NOT_FOUND, TIMEOUT};
use cerror::{BoxError, Coded};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn chain(depth: usize) -> BoxError {
    let mut err: BoxError = Box::new(cerror::new_with_code(NOT_FOUND, "leaf"));
    for i in 0..depth {
        err = Box::new(cerror::wrapf(err, format_args!("layer {i}")));
    }
    err
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");

    group.bench_function("new", |b| b.iter(|| black_box(cerror::new("boom"))));
    group.bench_function("wrap", |b| {
        b.iter(|| black_box(cerror::wrap(cerror::new("boom"), "ctx")))
    });
    group.bench_function("with_code", |b| {
        b.iter(|| black_box(cerror::with_code(cerror::new("boom"), TIMEOUT)))
    });
    group.bench_function("new_with_code", |b| {
        b.iter(|| black_box(cerror::new_with_code(TIMEOUT, "slow")))
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let err = cerror::wrap(cerror::with_code(cerror::new("disk"), TIMEOUT), "flush");
    group.bench_function("plain", |b| b.iter(|| black_box(err.to_string())));
    // Symbols are resolved on the first render and cached afterwards.
    group.bench_function("verbose", |b| b.iter(|| black_box(format!("{err:#}"))));
    group.bench_function("verbose_fresh", |b| {
        b.iter(|| black_box(format!("{:#}", cerror::new("fresh"))))
    });

    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    for depth in [1usize, 8, 64] {
        let err = chain(depth);
        group.bench_with_input(BenchmarkId::new("is_code", depth), &err, |b, err| {
            b.iter(|| black_box(cerror::is_code(&**err, &NOT_FOUND)))
        });
        group.bench_with_input(BenchmarkId::new("get_coder", depth), &err, |b, err| {
            b.iter(|| black_box(cerror::get_coder(&**err).is_some()))
        });
        group.bench_with_input(BenchmarkId::new("find", depth), &err, |b, err| {
            b.iter(|| black_box(cerror::find::<Coded>(&**err).is_some()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_render, bench_walk);
criterion_main!(benches);
