//! Read-only projections of a `UniformString` for drawing.
//!
//! Everything here reads the current slot only and never mutates the string,
//! so calling it twice between steps yields the same output.

use crate::string::uniform::UniformString;

/// Current displacement of every segment, in order.
pub fn sample_displacements(string: &UniformString) -> Vec<f64> {
    let state = string.state();
    string
        .segments()
        .iter()
        .map(|s| s.displacement(state))
        .collect()
}

/// Allocation-free variant of [`sample_displacements`].
///
/// Writes `min(out.len(), segment_count)` values and returns how many were written.
pub fn sample_displacements_into(string: &UniformString, out: &mut [f64]) -> usize {
    let state = string.state();
    let mut written = 0;
    for (dst, seg) in out.iter_mut().zip(string.segments()) {
        *dst = seg.displacement(state);
        written += 1;
    }
    written
}

/// Drawing surface the polyline is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Drawing units per meter of displacement
    pub amplitude_scale: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, amplitude_scale: f64) -> Self {
        Self {
            width,
            height,
            amplitude_scale,
        }
    }
}

/// Map the string onto `viewport` as `(x, y)` points, left to right.
///
/// Segments are spread evenly across the width; the string at rest lies on
/// the horizontal centre line, positive displacement goes up (smaller y).
pub fn to_polyline(string: &UniformString, viewport: Viewport) -> Vec<(f64, f64)> {
    let state = string.state();
    let span = (string.segment_count() - 1) as f64;
    let centre = viewport.height / 2.0;

    string
        .segments()
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let x = i as f64 / span * viewport.width;
            let y = centre - seg.displacement(state) * viewport.amplitude_scale;
            (x, y)
        })
        .collect()
}
