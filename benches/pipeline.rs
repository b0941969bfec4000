//! Color Pipeline Benchmarks
//!
//! HCT solving and the quantize-then-score path used for source colors.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hctcolor::{
    Hct, Quantizer, QuantizerCelebi, QuantizerWu, Score, ViewingConditions, hct::solve_to_argb,
    quantizer_wsmeans,
};

/// Deterministic pseudo-photo: smooth gradients with a few dominant hues.
fn generate_pixels(count: usize) -> Vec<u32> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            let r = (255.0 * t) as u32;
            let g = ((i * 37) % 256) as u32;
            let b = (255.0 * (1.0 - t) * ((i % 7) as f64 / 6.0)) as u32;
            0xff00_0000 | r << 16 | g << 8 | b
        })
        .collect()
}

// ============================================================================
// HCT Benchmarks
// ============================================================================

fn bench_hct(c: &mut Criterion) {
    let mut group = c.benchmark_group("hct");
    let vc = ViewingConditions::default();

    group.bench_function("from_argb", |b| {
        b.iter(|| Hct::from_argb(black_box(0xff4285f4)))
    });

    group.bench_function("solve_in_gamut", |b| {
        b.iter(|| solve_to_argb(black_box(250.0), black_box(30.0), black_box(50.0), &vc))
    });

    group.bench_function("solve_out_of_gamut", |b| {
        b.iter(|| solve_to_argb(black_box(120.0), black_box(150.0), black_box(50.0), &vc))
    });

    group.finish();
}

// ============================================================================
// Quantizer Benchmarks
// ============================================================================

fn bench_quantizers(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");

    for &count in &[4_096usize, 65_536] {
        let pixels = generate_pixels(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("wu", count), &pixels, |b, pixels| {
            b.iter(|| QuantizerWu::new().quantize_colors(black_box(pixels), 128))
        });

        group.bench_with_input(BenchmarkId::new("celebi", count), &pixels, |b, pixels| {
            b.iter(|| QuantizerCelebi.quantize(black_box(pixels), 128))
        });
    }

    let pixels = generate_pixels(16_384);
    let seeds = QuantizerWu::new().quantize_colors(&pixels, 128);
    group.bench_function("wsmeans_seeded_16384", |b| {
        b.iter(|| quantizer_wsmeans::quantize(black_box(&pixels), &seeds, 128))
    });

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let pixels = generate_pixels(65_536);
    let result = QuantizerCelebi.quantize(&pixels, 128);

    c.bench_function("score_128", |b| {
        b.iter(|| Score::score(black_box(&result.color_to_count)))
    });
}

criterion_group!(benches, bench_hct, bench_quantizers, bench_score);
criterion_main!(benches);
