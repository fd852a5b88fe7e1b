//! Benchmarks for the clustering filters.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use recluster::{quantize, smooth, PixelGrid, RegionScanner, Rgb};

fn generate_test_image(width: usize, height: usize) -> PixelGrid {
    let mut grid = PixelGrid::filled(width, height, Rgb::default());
    for y in 0..height {
        for x in 0..width {
            // a pattern with distinct regions
            let r = ((x * 255) / width) as u8;
            let g = ((y * 255) / height) as u8;
            let b = (((x + y) * 128) / (width + height)) as u8;
            grid.set(x, y, Rgb::new(r, g, b));
        }
    }
    grid
}

fn grayscale_palette(len: usize) -> Vec<Rgb> {
    (0..len)
        .map(|i| {
            let shade = ((i * 255) / (len - 1)) as u8;
            Rgb::new(shade, shade, shade)
        })
        .collect()
}

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");
    let palette = grayscale_palette(8);

    for size in [32, 64, 128].iter() {
        let grid = generate_test_image(*size, *size);

        group.bench_with_input(BenchmarkId::new("palette_8", size), size, |b, _| {
            b.iter(|| quantize(black_box(&grid), black_box(&palette)).unwrap())
        });
    }

    group.finish();
}

fn bench_region_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_scan");

    for size in [64, 128, 256].iter() {
        let grid = generate_test_image(*size, *size);

        group.bench_with_input(BenchmarkId::new("full_pass", size), size, |b, _| {
            b.iter(|| RegionScanner::new(black_box(&grid)).count())
        });
    }

    group.finish();
}

fn bench_smooth(c: &mut Criterion) {
    let mut group = c.benchmark_group("smooth");
    let grid = generate_test_image(64, 64);

    group.bench_function("k16_floor4", |b| {
        b.iter(|| smooth(black_box(&grid), black_box(16), black_box(4)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_quantize, bench_region_scan, bench_smooth);
criterion_main!(benches);
