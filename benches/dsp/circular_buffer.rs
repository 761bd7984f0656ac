//! Benchmarks for ring buffer reads and window comparison.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modeller_dsp::dsp::CircularSampleBuffer;

pub fn bench_circular_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/circular_buffer");

    let mut buffer = CircularSampleBuffer::with_min_frequency(10.0, 48_000.0).unwrap();
    for i in 0..buffer.len() {
        buffer.write(i, (i as f32 * 0.013).sin());
    }

    // The window walk is the only O(n) cost per processed sample
    for &window in &[8usize, 32, 256, 1024] {
        group.bench_with_input(
            BenchmarkId::new("rms_difference", window),
            &window,
            |b, &window| b.iter(|| buffer.rms_difference(black_box(2400), black_box(1920), window)),
        );
    }

    group.bench_function("read_interpolated", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for i in 0..512 {
                sum += buffer.read_interpolated(black_box(i as f64 * 0.5 + 4700.0));
            }
            sum
        })
    });

    group.finish();
}
