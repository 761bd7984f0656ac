//! Status bar widgets - device, parameters and skip statistics

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{UiStateInit, UiStateUpdate};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the octaver status bar
pub fn render_octaver_status(
    frame: &mut Frame,
    area: Rect,
    init: &UiStateInit,
    update: &UiStateUpdate,
    stats: &AudioStats,
) {
    let block = Block::default()
        .title(format!(" {} -> {} ", init.input_name, init.output_name))
        .borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" {:.1}kHz  buf {}  ", init.sample_rate / 1000.0, init.buffer_len),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("t {:.1}s  ", update.stream_time),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("window {}  ", update.window),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("threshold {:.3}  ", update.threshold),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "skips {} ({:.1}/s)  ",
                update.skip_count,
                update.skip_rate(init.sample_rate)
            ),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("underruns {}  ", update.underruns),
            Style::default().fg(if update.underruns > 0 {
                Color::Yellow
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the string simulation status bar
pub fn render_string_status(
    frame: &mut Frame,
    area: Rect,
    sim_time: f64,
    dt: f64,
    tension: f64,
    max_displacement: f64,
    kinetic_energy: f64,
) {
    let block = Block::default().title(" string ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" t = {:.4}s  ", sim_time),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("dt = {:.2e}s  ", dt), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("T = {:.2}N  ", tension),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("max |d| = {:.2e}m  ", max_displacement),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("KE = {:.2e}J", kinetic_energy),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
