//! Octaver driven as a boxed graph node with a control ring attached.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modeller_dsp::{
    control::OctaverMessage,
    graph::{GraphNode, OctaverNode, RenderCtx},
    OctaverConfig,
};
use rtrb::RingBuffer;

use crate::BLOCK_SIZES;

pub fn bench_octaver_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/octaver_node");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.037).sin() * 0.8).collect();

        let (mut tx, rx) = RingBuffer::<OctaverMessage>::new(16);
        let mut node: Box<dyn GraphNode> = Box::new(
            OctaverNode::new(&OctaverConfig::default())
                .unwrap()
                .with_receiver(rx),
        );
        let mut buffer = input.clone();
        let mut toggle = false;

        group.bench_with_input(BenchmarkId::new("render_block", size), &size, |b, _| {
            b.iter(|| {
                // One parameter change per block, like a knob being turned
                toggle = !toggle;
                let _ = tx.push(OctaverMessage::SetComparisonWindow(if toggle { 32 } else { 48 }));
                buffer.copy_from_slice(&input);
                node.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
