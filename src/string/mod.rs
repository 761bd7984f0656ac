//! Physical string model.
//!
//! A fixed-fixed string discretized into point masses and integrated with an
//! explicit finite-difference step. The renderer side is a set of pure
//! projections over the current generation.

/// Read-only sampling of the current shape.
pub mod render;
/// One point mass with double-buffered state.
pub mod segment;
/// The string itself and its integration step.
pub mod uniform;

pub use render::{sample_displacements, sample_displacements_into, to_polyline, Viewport};
pub use segment::StringSegment;
pub use uniform::UniformString;
