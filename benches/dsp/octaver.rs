//! Benchmarks for the pitch-synchronous octave shifter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modeller_dsp::{dsp::PitchSyncOctaveShifter, OctaverConfig};

use crate::BLOCK_SIZES;

pub fn bench_octaver(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/octaver");

    for &size in BLOCK_SIZES {
        // 220 Hz sine at 48kHz
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 * std::f32::consts::TAU * 220.0 / 48_000.0).sin())
            .collect();

        for &window in &[32usize, 1024] {
            let config = OctaverConfig {
                comparison_window_length: window,
                ..OctaverConfig::default()
            };
            let mut shifter = PitchSyncOctaveShifter::from_config(&config).unwrap();
            let mut buffer = input.clone();

            group.bench_with_input(
                BenchmarkId::new(format!("process_block_w{window}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        shifter.process_block(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
