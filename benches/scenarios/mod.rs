//! Host-shaped workloads.
//!
//! These model how the terminal host drives the cores: audio blocks through
//! a boxed graph node, and a batch of string steps per drawn frame.

mod octaver_node;
mod string_frame;

pub use octaver_node::bench_octaver_node;
pub use string_frame::bench_string_frame;
