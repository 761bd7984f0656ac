//! Graph nodes wrapping the DSP primitives for hosts that render in blocks.

/// Core traits shared by all graph nodes.
pub mod node;
/// Octave shifter as an in-place block processor.
pub mod octaver;

pub use node::{GraphNode, Modulatable, RenderCtx};
pub use octaver::{OctaverNode, OctaverParam};
