/// Context passed to graph nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - time: Stream time in seconds at the start of the block
pub struct RenderCtx {
    pub sample_rate: f32,
    pub time: f64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            time: 0.0,
        }
    }

    /// Move the clock forward by one rendered block.
    pub fn advance(&mut self, frames: usize) {
        self.time += frames as f64 / self.sample_rate as f64;
    }
}

/// Trait for nodes whose parameters can be driven from a control surface
pub trait Modulatable: Send {
    type Param: Copy + Send;

    fn get_param(&self, param: Self::Param) -> f32;

    /// Set `param` to `base + modulation`, clamped by the node into its valid range.
    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32);
}

/// Core trait for audio processing graph nodes
///
/// Nodes transform a mono block in place.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Drop any internal history.
    fn reset(&mut self);
}
