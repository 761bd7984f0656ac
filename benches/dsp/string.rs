//! Benchmarks for one integration step of the string model.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modeller_dsp::string::UniformString;

pub fn bench_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/string");

    for &segments in &[16usize, 64, 256, 1024] {
        let mut string = UniformString::new(segments, 0.65, 0.001, 1000.0, 110.0).unwrap();
        string.pluck(0.2, 1e-3).unwrap();
        let dt = 0.01 * string.stable_time_step();

        group.bench_with_input(
            BenchmarkId::new("advance_to_next_iteration", segments),
            &segments,
            |b, _| b.iter(|| string.advance_to_next_iteration(black_box(dt))),
        );
    }

    group.finish();
}
