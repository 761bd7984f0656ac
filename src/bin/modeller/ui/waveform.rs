//! Triggered scope for the shifter output
//!
//! The half-speed output only reads steadily when every frame starts at the
//! same phase, so the trace is aligned on the first rising zero crossing and
//! the spacing between crossings is reported as the output period.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Indices `i` where `samples[i - 1] < 0.0 <= samples[i]`
fn rising_crossings(samples: &[f32]) -> impl Iterator<Item = usize> + '_ {
    samples
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] < 0.0 && w[1] >= 0.0)
        .map(|(i, _)| i + 1)
}

/// Mean distance between rising crossings, in samples
fn mean_period(samples: &[f32]) -> Option<f64> {
    let mut crossings = rising_crossings(samples);
    let first = crossings.next()?;
    let (count, last) = crossings.fold((0usize, first), |(n, _), i| (n + 1, i));
    (count > 0).then(|| (last - first) as f64 / count as f64)
}

pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32], sample_rate: f32) {
    // Show half the buffer so the trigger point can move without the trace shrinking
    let span = samples.len() / 2;
    let start = rising_crossings(&samples[..samples.len() - span])
        .next()
        .unwrap_or(0);
    let visible = &samples[start..start + span];

    let ms_per_sample = 1000.0 / sample_rate as f64;
    let data: Vec<(f64, f64)> = visible
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64 * ms_per_sample, s as f64))
        .collect();

    let title = match mean_period(samples) {
        Some(period) => format!(
            " Output  {:.2} ms / {:.1} Hz ",
            period * ms_per_sample,
            sample_rate as f64 / period
        ),
        None => " Output  untriggered ".to_string(),
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let window_ms = span as f64 * ms_per_sample;
    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, window_ms])
                .labels([Span::raw("0"), Span::raw(format!("{window_ms:.0} ms"))])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
