//! Spectrum widget
//!
//! Hann-windowed FFT of the recent output, shown on log-spaced bins, plus the
//! strongest bin so an octave drop can be read off directly.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of log-spaced points drawn
const SPECTRUM_BINS: usize = 64;

/// Lowest frequency drawn (Hz)
const MIN_FREQ: f64 = 20.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    sample_rate: f32,
    /// FFT bin for each drawn point
    bin_indices: Vec<usize>,
    /// (frequency_hz, magnitude_db) per drawn point
    spectrum: Vec<(f64, f64)>,
    /// Frequency of the strongest FFT bin
    peak_hz: f64,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::<f32>::new().plan_fft_forward(fft_len);

        let denom = (fft_len.max(2) - 1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).max(MIN_FREQ * 2.0);
        let half = (fft_len / 2).max(1);
        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        let mut spectrum = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = MIN_FREQ * (nyquist / MIN_FREQ).powf(t);
            let index = (freq * fft_len as f64 / sample_rate as f64).round() as usize;
            bin_indices.push(index.min(half - 1));
            spectrum.push((freq, -120.0));
        }

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            sample_rate,
            bin_indices,
            spectrum,
            peak_hz: 0.0,
        }
    }

    /// Recompute from `buffer`; ignored unless it matches the FFT length.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let power = |c: &Complex<f32>| (c.re * c.re + c.im * c.im).max(1e-12);

        for ((_, db), &idx) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            *db = 10.0 * (power(&self.scratch[idx]) as f64).log10();
        }

        let half = self.scratch.len() / 2;
        let peak_bin = self.scratch[1..half.max(2)]
            .iter()
            .enumerate()
            .max_by(|a, b| power(a.1).total_cmp(&power(b.1)))
            .map(|(i, _)| i + 1)
            .unwrap_or(0);
        self.peak_hz = peak_bin as f64 * self.sample_rate as f64 / self.scratch.len() as f64;
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    pub fn peak_hz(&self) -> f64 {
        self.peak_hz
    }
}

/// Render the spectrum on a log-frequency x axis
pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let block = Block::default()
        .title(format!(" Spectrum (peak {:.1} Hz) ", analyzer.peak_hz()))
        .borders(Borders::ALL);

    // Plot against log10(f) so octaves are evenly spaced
    let data: Vec<(f64, f64)> = analyzer
        .data()
        .iter()
        .map(|&(f, db)| (f.log10(), db))
        .collect();
    let x_min = MIN_FREQ.log10();
    let x_max = data.last().map(|p| p.0).unwrap_or(x_min + 1.0);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([x_min, x_max])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, 40.0])
                .labels(vec!["-100", "-30", "40"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
