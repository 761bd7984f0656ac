//! TUI module for modeller
//!
//! Octaver view: status bar, output oscilloscope and spectrum. The string
//! view reuses the status and string widgets from `string_sim`.

pub mod state;
mod spectrum;
mod status;
mod string_view;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use modeller_dsp::{
    control::OctaverMessage,
    dsp::octaver::{MAX_COMPARISON_WINDOW, MIN_COMPARISON_WINDOW},
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;
use tracing::{debug, warn};

pub use state::{UiStateInit, UiStateUpdate};
pub use status::render_string_status;
pub use string_view::render_string;

use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_octaver_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size (also the FFT length)
pub const VIS_BUFFER_SIZE: usize = 2048;

const WINDOW_STEP: usize = 8;
const THRESHOLD_STEP: f32 = 0.001;

pub struct OctaverUi {
    /// Ring buffer receiver for output samples
    audio_rx: Consumer<f32>,
    /// Ring buffer receiver for shifter statistics
    state_rx: Consumer<UiStateUpdate>,
    /// Parameter changes towards the audio thread
    control_tx: Producer<OctaverMessage>,
    init: UiStateInit,
    current: UiStateUpdate,
    audio_buffer: Vec<f32>,
    analyzer: SpectrumAnalyzer,
    should_quit: bool,
}

impl OctaverUi {
    pub fn new(
        audio_rx: Consumer<f32>,
        state_rx: Consumer<UiStateUpdate>,
        control_tx: Producer<OctaverMessage>,
        init: UiStateInit,
        initial: UiStateUpdate,
    ) -> Self {
        let analyzer = SpectrumAnalyzer::new(VIS_BUFFER_SIZE, init.sample_rate);
        Self {
            audio_rx,
            state_rx,
            control_tx,
            init,
            current: initial,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            analyzer,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();
            self.analyzer.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep only the last VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }
        if let Ok(chunk) = self.audio_rx.read_chunk(available) {
            let (first, second) = chunk.as_slices();
            self.audio_buffer.extend_from_slice(first);
            self.audio_buffer.extend_from_slice(second);
            chunk.commit_all();
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current = state;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let msg = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('[') => OctaverMessage::SetComparisonWindow(
                self.current
                    .window
                    .saturating_sub(WINDOW_STEP)
                    .max(MIN_COMPARISON_WINDOW),
            ),
            KeyCode::Char(']') => OctaverMessage::SetComparisonWindow(
                (self.current.window + WINDOW_STEP).min(MAX_COMPARISON_WINDOW),
            ),
            KeyCode::Char('-') => {
                OctaverMessage::SetSkipThreshold((self.current.threshold - THRESHOLD_STEP).max(0.0))
            }
            KeyCode::Char('=') | KeyCode::Char('+') => {
                OctaverMessage::SetSkipThreshold((self.current.threshold + THRESHOLD_STEP).min(1.0))
            }
            KeyCode::Char('r') | KeyCode::Char('R') => OctaverMessage::Reset,
            _ => return,
        };

        debug!(?msg, "control change");
        if self.control_tx.push(msg).is_err() {
            warn!(?msg, "control ring full, change dropped");
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Waveform
                Constraint::Min(8),    // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_octaver_status(frame, chunks[0], &self.init, &self.current, &stats);
        render_waveform(frame, chunks[1], &self.audio_buffer, self.init.sample_rate);
        render_spectrum(frame, chunks[2], &self.analyzer);

        let help = Paragraph::new(" [Q] Quit  [ [ ] ] Window  [-/=] Threshold  [R] Reset")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
