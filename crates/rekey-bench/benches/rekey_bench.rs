//! Benchmarks for rekey operations.
//!
//! Run with: `cargo bench -p rekey-bench` (add `--features parallel` to
//! measure the rayon passes).

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rekey_core::{BackgroundMode, ProcessOptions, Raster, Rgb8, Rgba8};
use rekey_io::{Format, SaveOptions};
use rekey_ops::{alpha, key, resize, Pipeline, Unstoppable};

fn test_raster(w: u32, h: u32) -> Raster {
    Raster::from_fn(w, h, |x, y| {
        Rgba8::new((x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255)
    })
    .expect("non-zero size")
}

/// Benchmark the per-pixel classifier for each mode.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let src = test_raster(1024, 1024);
    group.throughput(Throughput::Elements(src.len() as u64));

    let modes = [
        ("black", ProcessOptions::default().with_background(BackgroundMode::Black, 20)),
        ("white_invert", ProcessOptions::default().with_background(BackgroundMode::White, 20).with_invert(true)),
        ("custom", ProcessOptions::default().with_custom_color(Rgb8::new(0, 255, 0), 15)),
    ];
    for (name, options) in modes {
        group.bench_with_input(BenchmarkId::from_parameter(name), &options, |b, o| {
            b.iter_batched_ref(
                || src.clone(),
                |r| key::classify(black_box(r), o),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

/// Benchmark Lanczos-3 resize at several scales.
fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");
    let src = test_raster(1024, 768);

    for (name, w, h) in [("quarter", 256, 192), ("half", 512, 384), ("double", 2048, 1536)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(w, h), |b, &(w, h)| {
            b.iter(|| resize::resize(black_box(&src), w, h))
        });
    }
    group.finish();
}

/// Benchmark the alpha limiter.
fn bench_alpha(c: &mut Criterion) {
    let src = test_raster(1024, 1024);
    c.bench_function("limit_alpha", |b| {
        b.iter_batched_ref(
            || src.clone(),
            |r| alpha::limit_alpha(black_box(r), 128),
            criterion::BatchSize::LargeInput,
        )
    });
}

/// Benchmark a full pipeline run and each encoder.
fn bench_pipeline(c: &mut Criterion) {
    let src = test_raster(640, 480);
    let pipeline = Pipeline::new(
        ProcessOptions::default()
            .with_resize(320, 240)
            .with_background(BackgroundMode::White, 10)
            .with_replacement(Rgba8::BLACK),
    );
    c.bench_function("pipeline_640x480", |b| {
        b.iter(|| pipeline.run(black_box(src.clone()), &Unstoppable))
    });

    let mut group = c.benchmark_group("encode");
    for format in Format::ALL {
        let options = SaveOptions::new(format, "bench");
        group.bench_with_input(BenchmarkId::from_parameter(format), &options, |b, o| {
            b.iter(|| rekey_io::encode(black_box(&src), o))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_resize, bench_alpha, bench_pipeline);
criterion_main!(benches);
