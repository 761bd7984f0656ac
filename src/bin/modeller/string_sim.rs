//! String host - fixed-rate simulation loop with a live drawing of the shape

use std::time::{Duration, Instant};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use modeller_dsp::{string::UniformString, StringConfig};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use tracing::{info, warn};

use super::ui::{render_string, render_string_status};

const FRAME: Duration = Duration::from_millis(16);

/// Pluck height in meters
const PLUCK_AMPLITUDE: f64 = 5e-3;

/// Pluck positions cycled through on every [Space]
const PLUCK_POSITIONS: [f64; 4] = [0.5, 0.2, 0.8, 0.35];

/// Beyond this multiple of the pluck height the run is treated as blown up
const BLOW_UP_FACTOR: f64 = 10.0;

struct StringSim {
    string: UniformString,
    dt: f64,
    steps_per_frame: usize,
    sim_time: f64,
    next_pluck: usize,
    should_quit: bool,
}

pub fn run(config: StringConfig, dt_fraction: f64, slow_motion: f64) -> EyreResult<()> {
    let string = UniformString::from_config(&config).wrap_err("invalid string configuration")?;

    let dt = dt_fraction.clamp(1e-6, 1.0) * string.stable_time_step();
    let sim_per_frame = FRAME.as_secs_f64() / slow_motion.max(1.0);
    let steps_per_frame = (sim_per_frame / dt).ceil().max(1.0) as usize;

    info!(
        segments = config.segment_count,
        tension = string.tension(),
        dt,
        steps_per_frame,
        "starting string simulation"
    );

    let mut sim = StringSim {
        string,
        dt,
        steps_per_frame,
        sim_time: 0.0,
        next_pluck: 0,
        should_quit: false,
    };
    sim.pluck()?;

    let mut terminal = ratatui::init();
    let result = sim.run(&mut terminal);
    ratatui::restore();
    result
}

impl StringSim {
    fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let frame_start = Instant::now();

            self.step_frame()?;
            terminal.draw(|frame| self.render(frame))?;

            let wait = FRAME.saturating_sub(frame_start.elapsed());
            if event::poll(wait)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn step_frame(&mut self) -> EyreResult<()> {
        for _ in 0..self.steps_per_frame {
            self.string.advance_to_next_iteration(self.dt);
        }
        self.sim_time += self.steps_per_frame as f64 * self.dt;

        let max = self.string.max_displacement();
        let blown_up = self
            .string
            .segments()
            .iter()
            .any(|s| !s.displacement(self.string.state()).is_finite());
        if blown_up || max > BLOW_UP_FACTOR * PLUCK_AMPLITUDE {
            warn!(
                sim_time = self.sim_time,
                max, "string diverged, replucking"
            );
            self.string.reset();
            self.pluck()?;
        }
        Ok(())
    }

    fn pluck(&mut self) -> EyreResult<()> {
        let position = PLUCK_POSITIONS[self.next_pluck % PLUCK_POSITIONS.len()];
        self.next_pluck += 1;
        self.string.pluck(position, PLUCK_AMPLITUDE)?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) -> EyreResult<()> {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.pluck()?,
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.string.reset();
                self.sim_time = 0.0;
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // String
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_string_status(
            frame,
            chunks[0],
            self.sim_time,
            self.dt,
            self.string.tension(),
            self.string.max_displacement(),
            self.string.kinetic_energy(),
        );
        render_string(frame, chunks[1], &self.string, 1.5 * PLUCK_AMPLITUDE);

        let help = Paragraph::new(" [Q] Quit  [Space] Pluck  [R] Rest")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
