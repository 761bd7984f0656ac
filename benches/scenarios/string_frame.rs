//! One drawn frame of the string view: a batch of steps, then a polyline.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modeller_dsp::string::{to_polyline, UniformString, Viewport};

pub fn bench_string_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/string_frame");
    let viewport = Viewport::new(200.0, 40.0, 2_000.0);

    for &steps_per_frame in &[16usize, 160] {
        let mut string = UniformString::new(64, 0.65, 0.001, 1000.0, 110.0).unwrap();
        string.pluck(0.2, 5e-3).unwrap();
        let dt = 0.01 * string.stable_time_step();

        group.bench_with_input(
            BenchmarkId::new("step_and_draw", steps_per_frame),
            &steps_per_frame,
            |b, &steps| {
                b.iter(|| {
                    for _ in 0..steps {
                        string.advance_to_next_iteration(dt);
                    }
                    black_box(to_polyline(&string, viewport))
                })
            },
        );
    }

    group.finish();
}
