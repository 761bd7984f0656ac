use crate::{
    config::OctaverConfig,
    control::message::{MessageReceiver, NoMessages, OctaverMessage},
    dsp::octaver::PitchSyncOctaveShifter,
    error::Result,
    graph::node::{GraphNode, Modulatable, RenderCtx},
};

/*
Octaver Node
============

Wraps a PitchSyncOctaveShifter as an in-place graph node: the block handed
to `render_block` is the dry input and comes back one octave down.

Parameters reach the node two ways:

  direct     `Modulatable::apply_modulation` from whoever owns the node
  messages   an `OctaverMessage` receiver (e.g. an rtrb consumer) drained
             at the top of every block

Either way the new values apply from the next sample processed; nothing is
interpolated.

  let (tx, rx) = RingBuffer::new(16);
  let node = OctaverNode::new(&OctaverConfig::default())?.with_receiver(rx);
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaverParam {
    ComparisonWindow,
    SkipThreshold,
}

pub struct OctaverNode<R = NoMessages> {
    shifter: PitchSyncOctaveShifter,
    rx: R,
}

impl OctaverNode<NoMessages> {
    pub fn new(config: &OctaverConfig) -> Result<Self> {
        Ok(Self {
            shifter: PitchSyncOctaveShifter::from_config(config)?,
            rx: NoMessages,
        })
    }
}

impl<R: MessageReceiver> OctaverNode<R> {
    /// Attach a control-message receiver.
    pub fn with_receiver<Q: MessageReceiver>(self, rx: Q) -> OctaverNode<Q> {
        OctaverNode {
            shifter: self.shifter,
            rx,
        }
    }

    pub fn shifter(&self) -> &PitchSyncOctaveShifter {
        &self.shifter
    }

    fn drain_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            match msg {
                OctaverMessage::SetComparisonWindow(window) => {
                    self.shifter.set_comparison_window_length(window);
                }
                OctaverMessage::SetSkipThreshold(threshold) => {
                    self.shifter.set_skip_threshold(threshold);
                }
                OctaverMessage::Reset => self.shifter.reset(),
            }
        }
    }
}

impl<R: MessageReceiver + Send> Modulatable for OctaverNode<R> {
    type Param = OctaverParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        let params = self.shifter.params();
        match param {
            OctaverParam::ComparisonWindow => params.comparison_window_length() as f32,
            OctaverParam::SkipThreshold => params.skip_threshold(),
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let final_value = base + modulation;
        match param {
            OctaverParam::ComparisonWindow => {
                let window = final_value.round().max(0.0) as usize;
                self.shifter.set_comparison_window_length(window);
            }
            OctaverParam::SkipThreshold => self.shifter.set_skip_threshold(final_value),
        }
    }
}

impl<R: MessageReceiver + Send> GraphNode for OctaverNode<R> {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.drain_messages();
        self.shifter.process_block(out);
    }

    fn reset(&mut self) {
        self.shifter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulation_is_clamped() {
        let mut node = OctaverNode::new(&OctaverConfig::default()).unwrap();
        node.apply_modulation(OctaverParam::ComparisonWindow, 32.0, 10_000.0);
        assert_eq!(node.get_param(OctaverParam::ComparisonWindow), 1024.0);
        node.apply_modulation(OctaverParam::SkipThreshold, 0.01, -0.02);
        assert_eq!(node.get_param(OctaverParam::SkipThreshold), 0.0);
    }

    #[test]
    fn render_block_matches_per_sample_processing() {
        let config = OctaverConfig::default();
        let mut node = OctaverNode::new(&config).unwrap();
        let mut reference = PitchSyncOctaveShifter::from_config(&config).unwrap();
        let ctx = RenderCtx::new(config.sample_rate);

        let input: Vec<f32> = (0..512).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut block = input.clone();
        node.render_block(&mut block, &ctx);

        let expected: Vec<f32> = input.iter().map(|&x| reference.process_sample(x)).collect();
        assert_eq!(block, expected);
    }

    #[test]
    fn boxed_node_renders_and_resets() {
        let mut node: Box<dyn GraphNode> =
            Box::new(OctaverNode::new(&OctaverConfig::default()).unwrap());
        let mut ctx = RenderCtx::new(48_000.0);

        let mut block: Vec<f32> = (0..256).map(|i| (i as f32 * 0.05).sin()).collect();
        node.render_block(&mut block, &ctx);
        ctx.advance(block.len());
        assert!(block.iter().any(|&s| s != 0.0));

        node.reset();
        let mut silence = [0.0f32; 256];
        node.render_block(&mut silence, &ctx);
        assert!(silence.iter().all(|&s| s == 0.0));
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn messages_apply_at_block_start() {
        use rtrb::RingBuffer;

        let (mut tx, rx) = RingBuffer::<OctaverMessage>::new(8);
        let mut node = OctaverNode::new(&OctaverConfig::default())
            .unwrap()
            .with_receiver(rx);
        let ctx = RenderCtx::new(48_000.0);

        tx.push(OctaverMessage::SetComparisonWindow(128)).unwrap();
        tx.push(OctaverMessage::SetSkipThreshold(0.02)).unwrap();
        let mut block = [0.0f32; 64];
        node.render_block(&mut block, &ctx);

        let params = node.shifter().params();
        assert_eq!(params.comparison_window_length(), 128);
        assert_eq!(params.skip_threshold(), 0.02);
        assert_eq!(node.shifter().samples_processed(), 64);

        tx.push(OctaverMessage::Reset).unwrap();
        node.render_block(&mut block[..0], &ctx);
        assert_eq!(node.shifter().samples_processed(), 0);
    }
}
