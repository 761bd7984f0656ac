//! String shape widget

use modeller_dsp::string::{to_polyline, UniformString, Viewport};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Draw the string's current shape.
///
/// `full_scale` is the displacement (m) that reaches the top/bottom edge.
pub fn render_string(frame: &mut Frame, area: Rect, string: &UniformString, full_scale: f64) {
    let block = Block::default()
        .title(format!(" String ({} segments) ", string.segment_count()))
        .borders(Borders::ALL);

    // Unit viewport: x in [0, 1], y in [-1, 1] with displacement up. The
    // polyline puts rest at height / 2 and grows y downwards, so flip it.
    let viewport = Viewport::new(1.0, 0.0, 1.0 / full_scale);
    let points: Vec<(f64, f64)> = to_polyline(string, viewport)
        .into_iter()
        .map(|(x, y)| (x, -y))
        .collect();
    let nodes = [points[0], points[points.len() - 1]];

    let shape = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points);
    let anchors = Dataset::default()
        .marker(symbols::Marker::Block)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Red))
        .data(&nodes);

    let chart = Chart::new(vec![shape, anchors])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(vec![
                    format!("-{full_scale:.0e}"),
                    "0".to_string(),
                    format!("{full_scale:.0e}"),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
