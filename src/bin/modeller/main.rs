//! modeller - terminal host for the string model and the octave shifter
//!
//! Run with:
//!   cargo run -- string
//!   cargo run -- octaver

mod app;
mod string_sim;
mod ui;

use std::{fs::File, path::Path, sync::Mutex};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use modeller_dsp::{OctaverConfig, StringConfig};

#[derive(Parser)]
#[command(name = "modeller", about = "Plucked string simulation and live octave-down effect")]
struct Cli {
    /// Write debug logs to this file (the terminal belongs to the UI)
    #[arg(long, global = true)]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a plucked string and draw its shape
    #[command(name = "string")]
    StringSim {
        #[arg(long, default_value_t = 64)]
        segments: usize,
        /// Meters
        #[arg(long, default_value_t = 0.65)]
        length: f64,
        /// kg/m
        #[arg(long, default_value_t = 0.001)]
        mass_per_unit_length: f64,
        #[arg(long, default_value_t = 1000.0)]
        stiffness: f64,
        /// Fundamental in Hz
        #[arg(long, default_value_t = 110.0)]
        frequency: f64,
        /// Time step as a fraction of the stability bound
        #[arg(long, default_value_t = 0.005)]
        dt_fraction: f64,
        /// Simulated seconds are stretched by this factor on screen
        #[arg(long, default_value_t = 100.0)]
        slow_motion: f64,
    },
    /// Run the default input device through the octave shifter
    Octaver {
        /// Trailing samples compared for a phase match (8-1024)
        #[arg(long, default_value_t = 32)]
        window: usize,
        /// Largest RMS difference accepted as a match (0-1)
        #[arg(long, default_value_t = 0.005)]
        threshold: f32,
        /// Lowest input frequency the history buffer covers, in Hz
        #[arg(long, default_value_t = 10.0)]
        min_frequency: f32,
    },
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_tracing(path)?;
    }

    match cli.command {
        Command::StringSim {
            segments,
            length,
            mass_per_unit_length,
            stiffness,
            frequency,
            dt_fraction,
            slow_motion,
        } => {
            let config = StringConfig {
                segment_count: segments,
                length,
                mass_per_unit_length,
                stiffness,
                frequency,
            };
            string_sim::run(config, dt_fraction, slow_motion)
        }
        Command::Octaver {
            window,
            threshold,
            min_frequency,
        } => {
            let config = OctaverConfig {
                min_frequency,
                comparison_window_length: window,
                skip_threshold: threshold,
                ..OctaverConfig::default()
            };
            app::run_octaver(config)
        }
    }
}

fn init_tracing(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    Ok(())
}
