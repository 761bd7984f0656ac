//! Benchmarks for low-level primitives.

mod circular_buffer;
mod octaver;
mod string;

pub use circular_buffer::bench_circular_buffer;
pub use octaver::bench_octaver;
pub use string::bench_string;
